//! HTTP protocol layer module
//!
//! Provides HTTP response builders, decoupled from the lookup logic.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_405_response, build_body_response, build_health_response,
    build_options_response, with_cors, APPLICATION_JSON, TEXT_PLAIN,
};
