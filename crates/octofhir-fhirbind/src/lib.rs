//! FHIR data binding for Rust
//!
//! This crate bundles the version-independent codec with the R4 model:
//! - Choice fields (`onset[x]`) as closed enums with mutual exclusion on decode
//! - Primitive values merged with their `_key` id/extension sibling
//! - Polymorphic resources (`contained`, `Bundle.entry.resource`, untyped
//!   document roots) dispatched by `resourceType` through a type registry
//! - FHIR JSON and strict FHIR XML on the same typed model
//!
//! # Example
//!
//! ```
//! use octofhir_fhirbind::r4::{Condition, ConditionOnset, Document};
//!
//! let condition = Condition {
//!     onset: Some(ConditionOnset::String("childhood".into())),
//!     ..Condition::default()
//! };
//! let json = condition.to_json_string().unwrap();
//! assert_eq!(json, r#"{"resourceType":"Condition","onsetString":"childhood"}"#);
//!
//! let xml = condition.to_xml_string().unwrap();
//! let back = Condition::from_xml_str(&xml, octofhir_fhirbind::r4::registry()).unwrap();
//! assert_eq!(back, condition);
//! ```

// Re-export all public APIs from internal crates
pub use octofhir_fhirbind_core as codec;
pub use octofhir_fhirbind_diagnostics as diagnostics;
pub use octofhir_fhirbind_r4 as r4;

// Convenience re-exports
pub use octofhir_fhirbind_core::{
    ContainedResource, Document, FhirSerializer, JsonSerializer, Resource, TypeRegistry,
    XmlSerializer,
};
pub use octofhir_fhirbind_diagnostics::{CodecError, Diagnostic, ErrorCode, Result};
