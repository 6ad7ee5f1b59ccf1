//! Resources and the polymorphic resource container
//!
//! A [`Resource`] is a [`Node`] with a registered type name. Resources can be
//! document roots, and any resource can be wrapped in a [`ContainedResource`]
//! whose concrete type is recovered on decode from the `resourceType`
//! discriminator (JSON) or the inner element name (XML).

use crate::node::Node;
use crate::registry::TypeRegistry;
use crate::serialize::{FhirSerializer, JsonSerializer, XmlSerializer};
use crate::wire::{self, RESOURCE_TYPE_KEY, WireRecord};
use crate::xml::XmlElement;
use octofhir_fhirbind_diagnostics::{CodecError, Result};
use serde_json::Value;
use std::any::Any;
use std::fmt;

/// A concrete resource type
pub trait Resource: Node + Clone + PartialEq + fmt::Debug + Default + Send + Sync + 'static {
    /// Registered type name, used as the wire discriminator
    const RESOURCE_TYPE: &'static str;
}

/// A value that can be the root of a JSON or XML document
pub trait Document: Sized {
    /// Encode as a root record, discriminator first
    fn to_json_record(&self) -> WireRecord;

    /// Decode from a root record
    fn from_json_record(record: &WireRecord, registry: &TypeRegistry) -> Result<Self>;

    /// Encode as a root element named after the resource type
    fn to_xml_element(&self) -> XmlElement;

    /// Decode from a root element
    fn from_xml_element(element: &XmlElement, registry: &TypeRegistry) -> Result<Self>;

    /// Parse a JSON document
    fn from_json_str(input: &str, registry: &TypeRegistry) -> Result<Self> {
        JsonSerializer::new().deserialize(input, registry)
    }

    /// Parse an XML document
    fn from_xml_str(input: &str, registry: &TypeRegistry) -> Result<Self> {
        XmlSerializer::new().deserialize(input, registry)
    }

    /// Write a compact JSON document
    fn to_json_string(&self) -> Result<String> {
        JsonSerializer::new().serialize(self)
    }

    /// Write a compact XML document
    fn to_xml_string(&self) -> Result<String> {
        XmlSerializer::new().serialize(self)
    }
}

/// Encode a resource as a root record with its discriminator
pub fn encode_json_root<R: Resource>(resource: &R) -> WireRecord {
    let mut record = WireRecord::new();
    record.insert(
        RESOURCE_TYPE_KEY.to_string(),
        Value::String(R::RESOURCE_TYPE.to_string()),
    );
    for (key, value) in resource.to_record() {
        if key != RESOURCE_TYPE_KEY {
            record.insert(key, value);
        }
    }
    record
}

/// Decode a root record, requiring its discriminator to name `R`
pub fn decode_json_root<R: Resource>(record: &WireRecord, registry: &TypeRegistry) -> Result<R> {
    let found = wire::discriminator(record)?;
    if found != R::RESOURCE_TYPE {
        return Err(CodecError::TypeMismatch {
            expected: R::RESOURCE_TYPE.to_string(),
            found: found.to_string(),
        });
    }
    R::from_record(record, registry)
}

/// Encode a resource as a root element
pub fn encode_xml_root<R: Resource>(resource: &R) -> XmlElement {
    let mut element = XmlElement::new(R::RESOURCE_TYPE);
    resource.write_xml_content(&mut element);
    element
}

/// Decode a root element, requiring its name to be `R`'s type name
pub fn decode_xml_root<R: Resource>(element: &XmlElement, registry: &TypeRegistry) -> Result<R> {
    if element.name != R::RESOURCE_TYPE {
        return Err(CodecError::TypeMismatch {
            expected: R::RESOURCE_TYPE.to_string(),
            found: element.name.clone(),
        });
    }
    R::read_xml_content(element, registry)
}

/// Object-safe view of any [`Resource`]
pub trait AnyResource: fmt::Debug + Send + Sync {
    /// Registered type name of the concrete value
    fn resource_type(&self) -> &'static str;

    /// Encode with the discriminator written first
    fn encode_json(&self) -> WireRecord;

    /// Encode as an element named after the resource type
    fn encode_xml(&self) -> XmlElement;

    fn clone_boxed(&self) -> Box<dyn AnyResource>;
    fn dyn_eq(&self, other: &dyn AnyResource) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<R: Resource> AnyResource for R {
    fn resource_type(&self) -> &'static str {
        R::RESOURCE_TYPE
    }

    fn encode_json(&self) -> WireRecord {
        encode_json_root(self)
    }

    fn encode_xml(&self) -> XmlElement {
        encode_xml_root(self)
    }

    fn clone_boxed(&self) -> Box<dyn AnyResource> {
        Box::new(self.clone())
    }

    fn dyn_eq(&self, other: &dyn AnyResource) -> bool {
        other
            .as_any()
            .downcast_ref::<R>()
            .is_some_and(|other| other == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A resource of any registered type
///
/// The discriminator is always taken from the wrapped value, so the declared
/// and the actual type can never disagree on the wire.
#[derive(Debug)]
pub struct ContainedResource(Box<dyn AnyResource>);

impl ContainedResource {
    /// Wrap a concrete resource
    pub fn new<R: Resource>(resource: R) -> Self {
        Self(Box::new(resource))
    }

    /// Wrap an already boxed resource
    pub fn from_boxed(resource: Box<dyn AnyResource>) -> Self {
        Self(resource)
    }

    /// Registered type name of the wrapped value
    pub fn resource_type(&self) -> &'static str {
        self.0.resource_type()
    }

    /// Borrow the wrapped value as a trait object
    pub fn as_resource(&self) -> &dyn AnyResource {
        self.0.as_ref()
    }

    /// True when the wrapped value is an `R`
    pub fn is<R: Resource>(&self) -> bool {
        self.0.as_any().is::<R>()
    }

    /// Borrow the wrapped value as an `R`
    pub fn downcast_ref<R: Resource>(&self) -> Option<&R> {
        self.0.as_any().downcast_ref()
    }

    /// Mutably borrow the wrapped value as an `R`
    pub fn downcast_mut<R: Resource>(&mut self) -> Option<&mut R> {
        self.0.as_any_mut().downcast_mut()
    }

    /// Unwrap into a concrete resource
    pub fn into_resource<R: Resource>(self) -> Result<R> {
        let found = self.resource_type();
        self.0
            .into_any()
            .downcast::<R>()
            .map(|resource| *resource)
            .map_err(|_| CodecError::TypeMismatch {
                expected: R::RESOURCE_TYPE.to_string(),
                found: found.to_string(),
            })
    }
}

impl<R: Resource> From<R> for ContainedResource {
    fn from(resource: R) -> Self {
        Self::new(resource)
    }
}

impl Clone for ContainedResource {
    fn clone(&self) -> Self {
        Self(self.0.clone_boxed())
    }
}

impl PartialEq for ContainedResource {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_ref())
    }
}

impl Node for ContainedResource {
    fn is_empty(&self) -> bool {
        false
    }

    fn to_record(&self) -> WireRecord {
        self.0.encode_json()
    }

    fn from_record(record: &WireRecord, registry: &TypeRegistry) -> Result<Self> {
        registry.decode_json(record)
    }

    fn write_xml_content(&self, element: &mut XmlElement) {
        element.push_child(self.0.encode_xml());
    }

    fn read_xml_content(element: &XmlElement, registry: &TypeRegistry) -> Result<Self> {
        element.check_attributes(&[])?;
        match element.children.as_slice() {
            [inner] => registry.decode_xml(inner),
            [] => Err(CodecError::MissingDiscriminator),
            [_, second, ..] => Err(CodecError::RepeatedElement {
                name: format!("{}/{}", element.name, second.name),
            }),
        }
    }
}

crate::impl_element_for_node!(ContainedResource);

impl Document for ContainedResource {
    fn to_json_record(&self) -> WireRecord {
        self.0.encode_json()
    }

    fn from_json_record(record: &WireRecord, registry: &TypeRegistry) -> Result<Self> {
        registry.decode_json(record)
    }

    fn to_xml_element(&self) -> XmlElement {
        self.0.encode_xml()
    }

    fn from_xml_element(element: &XmlElement, registry: &TypeRegistry) -> Result<Self> {
        registry.decode_xml(element)
    }
}

impl serde::Serialize for ContainedResource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_json_record(), serializer)
    }
}

/// Declare a resource type
///
/// Expands to [`complex_type!`](crate::complex_type) plus the [`Resource`] and
/// [`Document`] impls; the struct name is the registered type name.
#[macro_export]
macro_rules! resource_type {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty => $key:literal, )*
        }
    ) => {
        $crate::complex_type! {
            @reserved ["resourceType"]
            $(#[$meta])*
            pub struct $name {
                $( $(#[$field_meta])* $field: $ty => $key, )*
            }
        }

        impl $crate::Resource for $name {
            const RESOURCE_TYPE: &'static str = stringify!($name);
        }

        impl $crate::Document for $name {
            fn to_json_record(&self) -> $crate::WireRecord {
                $crate::resource::encode_json_root(self)
            }

            fn from_json_record(
                record: &$crate::WireRecord,
                registry: &$crate::TypeRegistry,
            ) -> $crate::Result<Self> {
                $crate::resource::decode_json_root(record, registry)
            }

            fn to_xml_element(&self) -> $crate::XmlElement {
                $crate::resource::encode_xml_root(self)
            }

            fn from_xml_element(
                element: &$crate::XmlElement,
                registry: &$crate::TypeRegistry,
            ) -> $crate::Result<Self> {
                $crate::resource::decode_xml_root(element, registry)
            }
        }
    };
}
