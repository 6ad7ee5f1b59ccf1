//! Version-independent FHIR data binding
//!
//! This crate holds the one reusable codec mechanism that every generated
//! FHIR type delegates to:
//!
//! - [`primitive`]: a primitive value and its `_key` metadata sibling
//! - [`choice`]: type-suffixed choice fields with mutual exclusion
//! - [`resource`] and [`registry`]: polymorphic resources dispatched by type name
//! - [`xml`]: the strict FHIR XML element tree
//! - [`xhtml`]: narrative markup kept as raw XHTML
//!
//! Schema crates declare their types with [`complex_type!`], [`choice_type!`]
//! and [`resource_type!`]; the generated code only forwards to this crate.

pub mod choice;
pub mod element;
pub mod node;
pub mod primitive;
pub mod registry;
pub mod resource;
pub mod serialize;
pub mod wire;
pub mod xhtml;
pub mod xml;

#[cfg(test)]
mod testing;

pub use choice::Choice;
pub use element::{Element, Field, Repeatable};
pub use node::Node;
pub use primitive::{Primitive, Scalar};
pub use registry::{TypeDescriptor, TypeRegistry, TypeRegistryBuilder};
pub use resource::{AnyResource, ContainedResource, Document, Resource};
pub use serialize::{FhirSerializer, JsonSerializer, XmlSerializer};
pub use wire::WireRecord;
pub use xhtml::Xhtml;
pub use xml::XmlElement;

pub use octofhir_fhirbind_diagnostics::{CodecError, Result};
