//! Codec error types

use crate::{
    ErrorCode, SourceLocation, FHB0001, FHB0002, FHB0003, FHB0004, FHB0005, FHB0100, FHB0101,
    FHB0102, FHB0103, FHB0200, FHB0201, FHB0300, FHB0301,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A diagnostic message with location and context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Source location (markup input only)
    pub location: Option<SourceLocation>,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render the diagnostic with terminal colors
    #[cfg(feature = "colored")]
    pub fn render_colored(&self) -> String {
        use colored::Colorize;

        let mut out = format!(
            "{}[{}]: {}",
            "error".red().bold(),
            self.code.to_string().bold(),
            self.message
        );
        if let Some(loc) = &self.location {
            out.push_str(&format!("\n  {} {}", "-->".blue().bold(), loc));
        }
        if let Some(help) = &self.help {
            out.push_str(&format!("\n  {}: {}", "help".cyan().bold(), help));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {} - {}", self.code, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        Ok(())
    }
}

/// Main codec error type
///
/// Every variant aborts the decode of the smallest enclosing object and is
/// propagated unchanged; there is no partial-result recovery.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Two or more candidate keys of one choice field are populated
    #[error("conflicting union value for field '{field}': '{first}' and '{second}' are both populated")]
    ConflictingUnionValue {
        field: String,
        first: String,
        second: String,
    },

    /// A wire value has the wrong shape for its key
    #[error("invalid value for '{key}': expected {expected}, found {found}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        found: String,
    },

    /// A non-repeating element occurs more than once in markup
    #[error("element '{name}' occurs more than once")]
    RepeatedElement { name: String },

    /// A typed root carries a different discriminator than requested
    #[error("expected resource type '{expected}', found '{found}'")]
    TypeMismatch { expected: String, found: String },

    /// A JSON key or XML element that the target type does not declare
    #[error("unknown element '{name}'")]
    UnknownElement {
        name: String,
        location: Option<SourceLocation>,
    },

    /// Unexpected XML namespace
    #[error("unexpected namespace '{name}'")]
    MalformedNamespace {
        name: String,
        location: Option<SourceLocation>,
    },

    /// Unexpected XML attribute
    #[error("unexpected attribute '{name}'")]
    MalformedAttribute {
        name: String,
        location: Option<SourceLocation>,
    },

    /// Text content where FHIR XML allows only elements
    #[error("unexpected text content")]
    UnexpectedContent { location: Option<SourceLocation> },

    /// Markup syntax error reported by the XML reader
    #[error("XML error: {message}")]
    Xml {
        message: String,
        location: Option<SourceLocation>,
    },

    /// Polymorphic container discriminator not found in the registry
    #[error("unrecognized resource type '{0}'")]
    UnrecognizedType(String),

    /// Polymorphic container without a resourceType discriminator
    #[error("missing resourceType discriminator")]
    MissingDiscriminator,

    /// Document syntax error reported by serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Create a conflicting union value error
    pub fn conflict(
        field: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::ConflictingUnionValue {
            field: field.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        key: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            expected,
            found: found.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ConflictingUnionValue { .. } => FHB0001,
            Self::InvalidValue { .. } => FHB0002,
            Self::RepeatedElement { .. } => FHB0003,
            Self::TypeMismatch { .. } => FHB0004,
            Self::UnknownElement { .. } => FHB0005,
            Self::MalformedNamespace { .. } => FHB0100,
            Self::MalformedAttribute { .. } => FHB0101,
            Self::UnexpectedContent { .. } => FHB0102,
            Self::Xml { .. } => FHB0103,
            Self::UnrecognizedType(_) => FHB0200,
            Self::MissingDiscriminator => FHB0201,
            Self::Json(_) => FHB0300,
            Self::Io(_) => FHB0301,
        }
    }

    /// Get the location if available
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::UnknownElement { location, .. }
            | Self::MalformedNamespace { location, .. }
            | Self::MalformedAttribute { location, .. }
            | Self::UnexpectedContent { location }
            | Self::Xml { location, .. } => location.as_ref(),
            _ => None,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = self.code();
        let mut diag = Diagnostic::error(code, self.to_string());
        if let Some(loc) = self.location() {
            diag = diag.with_location(loc.clone());
        }
        if let Some(help) = code.info().help {
            diag = diag.with_help(help);
        }
        diag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_conflict_message_names_field() {
        let err = CodecError::conflict("onset", "onsetDateTime", "onsetAge");
        assert_eq!(err.code(), FHB0001);
        assert_eq!(
            err.to_string(),
            "conflicting union value for field 'onset': 'onsetDateTime' and 'onsetAge' are both populated"
        );
    }

    #[test]
    fn test_diagnostic_display() {
        let err = CodecError::MalformedAttribute {
            name: "foo".to_string(),
            location: Some(SourceLocation::new(3, 7, 40, 0)),
        };
        let diag = err.to_diagnostic();

        assert!(diag.to_string().contains("FHB0101"));
        assert!(diag.to_string().contains("3:7"));
        assert!(diag.help.is_none());
    }

    #[test]
    fn test_diagnostic_help_from_code_table() {
        let diag = CodecError::UnrecognizedType("Bogus".to_string()).to_diagnostic();
        assert_eq!(diag.code, FHB0200);
        assert!(diag.message.contains("Bogus"));
        assert!(diag.help.is_some());
    }

    #[test]
    fn test_unknown_element_carries_location() {
        let err = CodecError::UnknownElement {
            name: "activ".to_string(),
            location: Some(SourceLocation::new(1, 40, 39, 22)),
        };
        assert_eq!(err.code(), FHB0005);
        assert_eq!(err.to_string(), "unknown element 'activ'");
        assert_eq!(err.location().map(|loc| loc.length), Some(22));
        assert!(err.to_diagnostic().help.is_some());
    }
}
