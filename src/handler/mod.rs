//! Request handler module
//!
//! Routing dispatch plus the lookup endpoint's request handling.

pub mod lookup;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
