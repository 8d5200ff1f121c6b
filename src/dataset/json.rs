//! JSON file source
//!
//! Accepts a bare `[[...], ...]` grid or a spreadsheet value-range document
//! (`{"range": "Sheet1!A1:C9", "values": [[...], ...]}`). Cells keep their
//! JSON types, so numeric cells stay numbers.

use super::{DatasetSource, Grid, SourceError};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum GridDocument {
    Bare(Grid),
    ValueRange {
        #[serde(default)]
        values: Grid,
    },
}

impl GridDocument {
    fn into_grid(self) -> Grid {
        match self {
            Self::Bare(grid) | Self::ValueRange { values: grid } => grid,
        }
    }
}

pub struct JsonSource {
    path: String,
}

impl JsonSource {
    pub const fn new(path: String) -> Self {
        Self { path }
    }
}

impl DatasetSource for JsonSource {
    fn describe(&self) -> String {
        format!("json:{}", self.path)
    }

    fn fetch(&self) -> Result<Grid, SourceError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let document: GridDocument =
            serde_json::from_str(&text).map_err(|source| SourceError::Json {
                path: self.path.clone(),
                source,
            })?;
        Ok(document.into_grid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::io::Write;

    fn source_with(content: &str) -> (tempfile::NamedTempFile, JsonSource) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let source = JsonSource::new(file.path().to_string_lossy().into_owned());
        (file, source)
    }

    #[test]
    fn test_bare_grid_keeps_cell_types() {
        let (_file, source) = source_with(r#"[["Name","Id"],["Ana",123456]]"#);
        let grid = source.fetch().unwrap();
        assert_eq!(grid[1][1], json!(123_456));
    }

    #[test]
    fn test_value_range_document() {
        let (_file, source) = source_with(
            r#"{"range":"Form Responses 1!A1:C2","majorDimension":"ROWS","values":[["Timestamp","Id"],["2024-01-01","7"]]}"#,
        );
        let grid = source.fetch().unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[1][1], Value::from("7"));
    }

    #[test]
    fn test_value_range_without_values_is_empty() {
        let (_file, source) = source_with(r#"{"range":"Sheet1!A1:Z1000"}"#);
        assert!(source.fetch().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let (_file, source) = source_with("[[\"Name\",");
        assert!(matches!(source.fetch(), Err(SourceError::Json { .. })));
    }

    #[test]
    fn test_missing_file() {
        let source = JsonSource::new("/nonexistent/sheet.json".to_string());
        assert!(matches!(source.fetch(), Err(SourceError::Io { .. })));
    }
}
