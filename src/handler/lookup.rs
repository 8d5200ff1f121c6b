//! Lookup request handler
//!
//! Validates the query, runs the row lookup and maps its outcome to a body.
//! Every outcome is reported through the body text; the HTTP status is
//! always 200.

use crate::config::AppState;
use crate::logger;
use crate::lookup::{self, LookupOutcome};

pub const MISSING_ID: &str = "Bad Request: Missing ID";
pub const INVALID_ID: &str = "Bad Request: Invalid ID (not a number)";
pub const NOT_FOUND: &str = "Not Found: ID not found in the sheet";
pub const UNAUTHORIZED: &str = "Unauthorized: Invalid API key";

/// What happened to a lookup request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Found,
    NotFound,
    MissingId,
    InvalidId,
    Unauthorized,
    Error,
}

impl ReplyKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::NotFound => "not_found",
            Self::MissingId => "missing_id",
            Self::InvalidId => "invalid_id",
            Self::Unauthorized => "unauthorized",
            Self::Error => "error",
        }
    }
}

/// Body and classification of a lookup response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub body: String,
}

impl Reply {
    fn text(kind: ReplyKind, body: &str) -> Self {
        Self {
            kind,
            body: body.to_string(),
        }
    }

    /// Failure surfaced to the caller as `Error: <details>`
    pub fn error(details: &impl std::fmt::Display) -> Self {
        Self {
            kind: ReplyKind::Error,
            body: format!("Error: {details}"),
        }
    }

    pub const fn is_json(&self) -> bool {
        matches!(self.kind, ReplyKind::Found)
    }
}

/// Parse an identifier the way the lookup endpoint accepts it
///
/// Surrounding whitespace and a leading sign are allowed; anything else that
/// is not a base-10 `i64` is rejected.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// First value of `name` in a form-encoded query string
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Handle one lookup request given its raw query string
pub fn respond(state: &AppState, query: Option<&str>) -> Reply {
    if let Some(expected) = state.config.auth.api_key.as_deref() {
        let supplied = query_param(query, &state.config.auth.param);
        if supplied.as_deref() != Some(expected) {
            logger::log_warning("Lookup rejected: invalid API key");
            return Reply::text(ReplyKind::Unauthorized, UNAUTHORIZED);
        }
    }

    let raw_id = match query_param(query, &state.config.lookup.id_param) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Reply::text(ReplyKind::MissingId, MISSING_ID),
    };

    let Some(id) = parse_id(&raw_id) else {
        return Reply::text(ReplyKind::InvalidId, INVALID_ID);
    };

    match lookup::find_row(state.source.as_ref(), &state.id_column, id) {
        Ok(LookupOutcome::Found(record)) => match record.to_json() {
            Ok(body) => Reply {
                kind: ReplyKind::Found,
                body,
            },
            Err(e) => {
                logger::log_error(&format!("Failed to serialize record for id {id}: {e}"));
                Reply::error(&e)
            }
        },
        Ok(LookupOutcome::NotFound) => Reply::text(ReplyKind::NotFound, NOT_FOUND),
        Err(e) => {
            logger::log_error(&format!("Lookup for id {id} failed: {e}"));
            Reply::error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dataset::testing::{BrokenSource, MemorySource};
    use crate::dataset::DatasetSource;
    use crate::lookup::IdColumn;

    fn sheet() -> MemorySource {
        MemorySource::from_strings(&[
            &["Timestamp", "Full Name", "Email"],
            &["2024-01-01", "123456", "a@example.com"],
            &["2024-01-02", "123456", "dup@example.com"],
        ])
    }

    fn state_with(source: impl DatasetSource + 'static) -> AppState {
        let config = Config::default();
        AppState::with_source(config, Box::new(source))
    }

    #[test]
    fn test_missing_id() {
        let state = state_with(sheet());
        assert_eq!(respond(&state, None).body, MISSING_ID);
        assert_eq!(respond(&state, Some("")).body, MISSING_ID);
        assert_eq!(respond(&state, Some("other=1")).body, MISSING_ID);
        assert_eq!(respond(&state, Some("id=")).body, MISSING_ID);
    }

    #[test]
    fn test_invalid_id() {
        let state = state_with(sheet());
        for query in ["id=abc", "id=12.5x", "id=12.5", "id=0x10", "id=99999999999999999999"] {
            let reply = respond(&state, Some(query));
            assert_eq!(reply.body, INVALID_ID, "query {query}");
            assert_eq!(reply.kind, ReplyKind::InvalidId);
        }
    }

    #[test]
    fn test_found_returns_json() {
        let state = state_with(sheet());
        let reply = respond(&state, Some("id=123456"));
        assert!(reply.is_json());
        assert_eq!(
            reply.body,
            r#"{"Timestamp":"2024-01-01","Full Name":"123456","Email":"a@example.com"}"#
        );
    }

    #[test]
    fn test_percent_encoded_and_padded_id() {
        let state = state_with(sheet());
        let reply = respond(&state, Some("id=%20123456+"));
        assert_eq!(reply.kind, ReplyKind::Found);
    }

    #[test]
    fn test_first_id_parameter_wins() {
        let state = state_with(sheet());
        assert_eq!(respond(&state, Some("id=123456&id=abc")).kind, ReplyKind::Found);
        assert_eq!(respond(&state, Some("id=abc&id=123456")).body, INVALID_ID);
    }

    #[test]
    fn test_not_found() {
        let state = state_with(sheet());
        let reply = respond(&state, Some("id=42"));
        assert_eq!(reply.body, NOT_FOUND);
        assert!(!reply.is_json());
    }

    #[test]
    fn test_repeated_requests_are_identical() {
        let state = state_with(sheet());
        let first = respond(&state, Some("id=123456"));
        let second = respond(&state, Some("id=123456"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_source_failure_becomes_error_text() {
        let state = state_with(BrokenSource);
        let reply = respond(&state, Some("id=1"));
        assert_eq!(reply.kind, ReplyKind::Error);
        assert!(reply.body.starts_with("Error: failed to read dataset sheet.csv"));
    }

    #[test]
    fn test_validation_happens_before_data_access() {
        let state = state_with(BrokenSource);
        assert_eq!(respond(&state, Some("id=abc")).body, INVALID_ID);
    }

    #[test]
    fn test_api_key_required_when_configured() {
        let mut config = Config::default();
        config.auth.api_key = Some("s3cret".to_string());
        let state = AppState::with_source(config, Box::new(sheet()));

        assert_eq!(respond(&state, Some("id=123456")).body, UNAUTHORIZED);
        assert_eq!(respond(&state, Some("id=123456&apiKey=nope")).body, UNAUTHORIZED);
        assert_eq!(
            respond(&state, Some("id=123456&apiKey=s3cret")).kind,
            ReplyKind::Found
        );
        assert_eq!(
            respond(&state, Some("id=123456&apiKe%79=s3cret")).kind,
            ReplyKind::Found
        );
    }

    #[test]
    fn test_header_name_column() {
        let mut config = Config::default();
        config.lookup.id_header = Some("Email".to_string());
        let source = MemorySource::from_strings(&[&["Name", "Email"], &["Ana", "17"]]);
        let state = AppState::with_source(config, Box::new(source));
        assert_eq!(state.id_column, IdColumn::Header("Email".to_string()));
        assert_eq!(
            respond(&state, Some("id=17")).body,
            r#"{"Name":"Ana","Email":"17"}"#
        );
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("123456"), Some(123_456));
        assert_eq!(parse_id(" -7 "), Some(-7));
        assert_eq!(parse_id("+7"), Some(7));
        assert_eq!(parse_id("7 7"), None);
        assert_eq!(parse_id(""), None);
    }
}
