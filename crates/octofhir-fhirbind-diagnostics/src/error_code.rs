//! Codec error codes following a structured numbering system
//!
//! Error code ranges:
//! - FHB0001-FHB0099: Decode errors (wire record structure)
//! - FHB0100-FHB0199: Markup errors (XML namespaces, attributes, syntax)
//! - FHB0200-FHB0299: Registry errors (polymorphic dispatch)
//! - FHB0300-FHB0399: System errors (JSON syntax, I/O)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FHB{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Decode errors (0001-0099)
    map.insert(
        1,
        ErrorInfo::new("Conflicting union value")
            .with_help("A choice field may populate at most one of its type-suffixed keys"),
    );
    map.insert(2, ErrorInfo::new("Invalid value"));
    map.insert(3, ErrorInfo::new("Repeated element"));
    map.insert(
        4,
        ErrorInfo::new("Resource type mismatch")
            .with_help("Decode into the generic container when the root type is not known"),
    );
    map.insert(
        5,
        ErrorInfo::new("Unknown element")
            .with_help("The key or element is not declared by the type being decoded"),
    );

    // Markup errors (0100-0199)
    map.insert(
        100,
        ErrorInfo::new("Malformed namespace")
            .with_help("FHIR XML elements must be in the http://hl7.org/fhir namespace"),
    );
    map.insert(101, ErrorInfo::new("Malformed attribute"));
    map.insert(102, ErrorInfo::new("Unexpected content"));
    map.insert(103, ErrorInfo::new("XML syntax error"));

    // Registry errors (0200-0299)
    map.insert(
        200,
        ErrorInfo::new("Unrecognized resource type")
            .with_help("Only types registered in the type registry can be decoded"),
    );
    map.insert(201, ErrorInfo::new("Missing resourceType discriminator"));

    // System errors (0300-0399)
    map.insert(300, ErrorInfo::new("JSON syntax error"));
    map.insert(301, ErrorInfo::new("I/O error"));

    map
});

// Decode errors
pub const FHB0001: ErrorCode = ErrorCode::new(1);
pub const FHB0002: ErrorCode = ErrorCode::new(2);
pub const FHB0003: ErrorCode = ErrorCode::new(3);
pub const FHB0004: ErrorCode = ErrorCode::new(4);
pub const FHB0005: ErrorCode = ErrorCode::new(5);

// Markup errors
pub const FHB0100: ErrorCode = ErrorCode::new(100);
pub const FHB0101: ErrorCode = ErrorCode::new(101);
pub const FHB0102: ErrorCode = ErrorCode::new(102);
pub const FHB0103: ErrorCode = ErrorCode::new(103);

// Registry errors
pub const FHB0200: ErrorCode = ErrorCode::new(200);
pub const FHB0201: ErrorCode = ErrorCode::new(201);

// System errors
pub const FHB0300: ErrorCode = ErrorCode::new(300);
pub const FHB0301: ErrorCode = ErrorCode::new(301);
