//! Header-keyed result record

use super::cell::header_key;
use serde::Serialize;
use serde_json::{Map, Value};

/// A matched row projected onto the header row
///
/// Keys keep header order. A repeated header keeps its first position and
/// the value of its last column; headers past the end of a short row are
/// left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn from_row(headers: &[Value], row: &[Value]) -> Self {
        let mut fields = Map::with_capacity(headers.len());
        for (header, cell) in headers.iter().zip(row) {
            fields.insert(header_key(header), cell.clone());
        }
        Self(fields)
    }

    /// Compact JSON text, the body returned to clients
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(cells: &[Value]) -> Vec<Value> {
        cells.to_vec()
    }

    #[test]
    fn test_keys_follow_header_order() {
        let headers = values(&[json!("Timestamp"), json!("Full Name"), json!("Email")]);
        let row = values(&[json!("2024-01-01"), json!("123456"), json!("a@example.com")]);
        let record = Record::from_row(&headers, &row);
        assert_eq!(
            record.to_json().unwrap(),
            r#"{"Timestamp":"2024-01-01","Full Name":"123456","Email":"a@example.com"}"#
        );
    }

    #[test]
    fn test_short_row_omits_trailing_headers() {
        let headers = values(&[json!("a"), json!("b"), json!("c")]);
        let row = values(&[json!(1), json!(2)]);
        let record = Record::from_row(&headers, &row);
        assert_eq!(record.to_json().unwrap(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_long_row_ignores_extra_cells() {
        let headers = values(&[json!("a")]);
        let row = values(&[json!(1), json!(2)]);
        assert_eq!(Record::from_row(&headers, &row).to_json().unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_duplicate_header_keeps_first_position_last_value() {
        let headers = values(&[json!("x"), json!("y"), json!("x")]);
        let row = values(&[json!(1), json!(2), json!(3)]);
        assert_eq!(
            Record::from_row(&headers, &row).to_json().unwrap(),
            r#"{"x":3,"y":2}"#
        );
    }
}
