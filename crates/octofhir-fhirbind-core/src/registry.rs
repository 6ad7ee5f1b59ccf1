//! Resource type registry
//!
//! Maps a type name to the constructor and decoders of one concrete
//! [`Resource`]. A registry is assembled once with [`TypeRegistryBuilder`] and
//! is read-only afterwards, so it can be shared freely between threads.

use crate::node::Node;
use crate::resource::{AnyResource, ContainedResource, Resource};
use crate::wire::{self, WireRecord};
use crate::xml::XmlElement;
use indexmap::IndexMap;
use octofhir_fhirbind_diagnostics::{CodecError, Result};
use std::fmt;

type DecodeJson = fn(&WireRecord, &TypeRegistry) -> Result<Box<dyn AnyResource>>;
type DecodeXml = fn(&XmlElement, &TypeRegistry) -> Result<Box<dyn AnyResource>>;

/// Constructor and decoders for one registered resource type
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    name: &'static str,
    new: fn() -> Box<dyn AnyResource>,
    decode_json: DecodeJson,
    decode_xml: DecodeXml,
}

impl TypeDescriptor {
    /// Describe the resource type `R`
    pub fn of<R: Resource>() -> Self {
        Self {
            name: R::RESOURCE_TYPE,
            new: new_boxed::<R>,
            decode_json: decode_json_boxed::<R>,
            decode_xml: decode_xml_boxed::<R>,
        }
    }

    /// Registered type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Create the zero value of the type
    pub fn instantiate(&self) -> ContainedResource {
        ContainedResource::from_boxed((self.new)())
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn new_boxed<R: Resource>() -> Box<dyn AnyResource> {
    Box::new(R::default())
}

fn decode_json_boxed<R: Resource>(
    record: &WireRecord,
    registry: &TypeRegistry,
) -> Result<Box<dyn AnyResource>> {
    Ok(Box::new(R::from_record(record, registry)?))
}

fn decode_xml_boxed<R: Resource>(
    element: &XmlElement,
    registry: &TypeRegistry,
) -> Result<Box<dyn AnyResource>> {
    Ok(Box::new(R::read_xml_content(element, registry)?))
}

/// Read-only mapping from type name to [`TypeDescriptor`]
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<&'static str, TypeDescriptor>,
}

impl TypeRegistry {
    /// Start building a registry
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Look up a type by name
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Check whether a type name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered type names in registration order
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Create the zero value of a registered type
    pub fn instantiate(&self, name: &str) -> Result<ContainedResource> {
        Ok(self.lookup(name)?.instantiate())
    }

    /// Decode a record whose concrete type is named by its discriminator
    pub fn decode_json(&self, record: &WireRecord) -> Result<ContainedResource> {
        let name = wire::discriminator(record)?;
        let descriptor = self.lookup(name)?;
        log::trace!("dispatching JSON resource '{}'", name);
        Ok(ContainedResource::from_boxed((descriptor.decode_json)(
            record, self,
        )?))
    }

    /// Decode an element whose concrete type is named by its element name
    pub fn decode_xml(&self, element: &XmlElement) -> Result<ContainedResource> {
        let descriptor = self.lookup(&element.name)?;
        log::trace!("dispatching XML resource '{}'", element.name);
        Ok(ContainedResource::from_boxed((descriptor.decode_xml)(
            element, self,
        )?))
    }

    fn lookup(&self, name: &str) -> Result<&TypeDescriptor> {
        self.types
            .get(name)
            .ok_or_else(|| CodecError::UnrecognizedType(name.to_string()))
    }
}

/// Builder for [`TypeRegistry`]
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    types: IndexMap<&'static str, TypeDescriptor>,
}

impl TypeRegistryBuilder {
    /// Register the resource type `R`
    ///
    /// A second registration under the same name replaces the first.
    pub fn register<R: Resource>(mut self) -> Self {
        let descriptor = TypeDescriptor::of::<R>();
        if self.types.insert(descriptor.name, descriptor).is_some() {
            log::warn!(
                "resource type '{}' registered twice; keeping the last registration",
                descriptor.name
            );
        }
        self
    }

    /// Finish the registry
    pub fn build(self) -> TypeRegistry {
        log::debug!("built type registry with {} resource types", self.types.len());
        TypeRegistry { types: self.types }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Condition, Patient};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_registration_order_and_lookup() {
        let registry = TypeRegistry::builder()
            .register::<Patient>()
            .register::<Condition>()
            .build();

        assert_eq!(registry.type_names().collect::<Vec<_>>(), ["Patient", "Condition"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Patient"));
        assert!(!registry.contains("patient"));
        assert_eq!(registry.get("Condition").map(TypeDescriptor::name), Some("Condition"));
    }

    #[test]
    fn test_duplicate_registration_keeps_one_entry() {
        let registry = TypeRegistry::builder()
            .register::<Patient>()
            .register::<Patient>()
            .build();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_instantiate_zero_value() {
        let registry = TypeRegistry::builder().register::<Patient>().build();
        let zero = registry.instantiate("Patient").unwrap();
        assert_eq!(zero.downcast_ref::<Patient>(), Some(&Patient::default()));
        assert!(matches!(
            registry.instantiate("Nope"),
            Err(CodecError::UnrecognizedType(ref name)) if name == "Nope"
        ));
    }

    #[test]
    fn test_empty_registry_rejects_everything() {
        let registry = TypeRegistry::default();
        assert!(registry.is_empty());
        let record = json!({"resourceType": "Patient"}).as_object().cloned().unwrap();
        assert!(matches!(
            registry.decode_json(&record),
            Err(CodecError::UnrecognizedType(_))
        ));
        assert!(matches!(
            registry.decode_xml(&XmlElement::new("Patient")),
            Err(CodecError::UnrecognizedType(_))
        ));
    }

    #[test]
    fn test_discriminator_is_case_sensitive() {
        let registry = TypeRegistry::builder().register::<Patient>().build();
        let record = json!({"resourceType": "patient"}).as_object().cloned().unwrap();
        assert!(matches!(
            registry.decode_json(&record),
            Err(CodecError::UnrecognizedType(ref name)) if name == "patient"
        ));
    }
}
