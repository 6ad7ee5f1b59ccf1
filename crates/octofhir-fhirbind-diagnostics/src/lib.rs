//! Diagnostics and error handling for FHIR data binding
//!
//! This crate provides the error taxonomy shared by the JSON and XML codecs,
//! including stable error codes, source locations for markup input, and
//! diagnostic reporting.

mod error;
mod error_code;
mod span;

pub use error::*;
pub use error_code::*;
pub use span::*;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;
