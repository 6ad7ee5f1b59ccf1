//! FHIR R4 data binding
//!
//! R4 (4.0.1) primitives, data types and a representative set of resources,
//! declared with the `octofhir-fhirbind-core` macros. Every resource round
//! trips through FHIR JSON and FHIR XML; resources of unknown type are decoded
//! through [`registry()`] into a [`ContainedResource`].
//!
//! # Example
//!
//! ```
//! use octofhir_fhirbind_r4::{ConditionOnset, Condition, ContainedResource};
//!
//! let input = r#"{"resourceType": "Condition", "onsetString": "childhood"}"#;
//! let resource: ContainedResource = octofhir_fhirbind_r4::from_json(input).unwrap();
//! let condition = resource.downcast_ref::<Condition>().unwrap();
//! assert_eq!(condition.onset, Some(ConditionOnset::String("childhood".into())));
//! ```

pub mod datatypes;
pub mod primitives;
mod registry;
pub mod resources;

pub use datatypes::*;
pub use primitives::*;
pub use registry::{FHIR_VERSION, registry};
pub use resources::*;

pub use octofhir_fhirbind_core::{
    CodecError, ContainedResource, Document, FhirSerializer, JsonSerializer, Resource, Result,
    XmlSerializer, Xhtml,
};

/// Decode a JSON document of any registered resource type
pub fn from_json(input: &str) -> Result<ContainedResource> {
    ContainedResource::from_json_str(input, registry())
}

/// Decode an XML document of any registered resource type
pub fn from_xml(input: &str) -> Result<ContainedResource> {
    ContainedResource::from_xml_str(input, registry())
}

/// Encode a resource as a compact JSON document
pub fn to_json<D: Document>(document: &D) -> Result<String> {
    document.to_json_string()
}

/// Encode a resource as a compact XML document
pub fn to_xml<D: Document>(document: &D) -> Result<String> {
    document.to_xml_string()
}
