//! Field-level codec traits
//!
//! [`Element`] is implemented by every type that can be stored in a field:
//! decorated primitives, complex types, choice unions and the polymorphic
//! resource container. [`Field`] lifts it over the two field cardinalities
//! (`Option<T>` and `Vec<T>`), so generated types never carry per-field
//! codec logic of their own.

use crate::registry::TypeRegistry;
use crate::wire::WireRecord;
use crate::xml::XmlElement;
use octofhir_fhirbind_diagnostics::{CodecError, Result};

/// A value that can be written under a field key and read back
pub trait Element: Sized {
    /// True for primitives, which also own the `_key` metadata sibling
    const PRIMITIVE: bool = false;

    /// True when the value carries nothing and must be omitted from output
    fn is_empty(&self) -> bool;

    /// True when `wire_key` is one of the JSON keys this value uses under `key`
    fn owns_json_key(key: &str, wire_key: &str) -> bool {
        wire_key == key || (Self::PRIMITIVE && wire_key.strip_prefix('_') == Some(key))
    }

    /// True when `name` is one of the XML elements this value uses under `tag`
    fn owns_xml_tag(tag: &str, name: &str) -> bool {
        name == tag
    }

    /// Write the value (and any sibling keys) under `key`
    fn write_json(&self, key: &str, record: &mut WireRecord);

    /// Read the value stored under `key`; `None` when no key is populated
    fn read_json(key: &str, record: &WireRecord, registry: &TypeRegistry) -> Result<Option<Self>>;

    /// Append the value to `parent` as an element named after `tag`
    fn write_xml(&self, tag: &str, parent: &mut XmlElement);

    /// Read the value from the children of `parent`
    fn read_xml(tag: &str, parent: &XmlElement, registry: &TypeRegistry) -> Result<Option<Self>>;
}

/// An element that may also appear in a repeating field
///
/// Choice unions never repeat and do not implement this trait.
pub trait Repeatable: Element {
    /// Write all items under `key`
    fn write_json_list(items: &[Self], key: &str, record: &mut WireRecord);

    /// Read all items stored under `key`
    fn read_json_list(key: &str, record: &WireRecord, registry: &TypeRegistry) -> Result<Vec<Self>>;

    /// Append every item as a sibling element named `tag`
    fn write_xml_list(items: &[Self], tag: &str, parent: &mut XmlElement) {
        for item in items {
            item.write_xml(tag, parent);
        }
    }

    /// Read every child of `parent` named `tag`
    fn read_xml_list(tag: &str, parent: &XmlElement, registry: &TypeRegistry) -> Result<Vec<Self>>;
}

/// Storage shape of a generated field: optional or repeating
pub trait Field: Default {
    fn is_empty(&self) -> bool;
    fn owns_json_key(key: &str, wire_key: &str) -> bool;
    fn owns_xml_tag(tag: &str, name: &str) -> bool;
    fn write_json(&self, key: &str, record: &mut WireRecord);
    fn read_json(key: &str, record: &WireRecord, registry: &TypeRegistry) -> Result<Self>;
    fn write_xml(&self, tag: &str, parent: &mut XmlElement);
    fn read_xml(tag: &str, parent: &XmlElement, registry: &TypeRegistry) -> Result<Self>;
}

impl<T: Element> Field for Option<T> {
    fn is_empty(&self) -> bool {
        self.as_ref().is_none_or(Element::is_empty)
    }

    fn owns_json_key(key: &str, wire_key: &str) -> bool {
        T::owns_json_key(key, wire_key)
    }

    fn owns_xml_tag(tag: &str, name: &str) -> bool {
        T::owns_xml_tag(tag, name)
    }

    fn write_json(&self, key: &str, record: &mut WireRecord) {
        if let Some(value) = self {
            if !value.is_empty() {
                value.write_json(key, record);
            }
        }
    }

    fn read_json(key: &str, record: &WireRecord, registry: &TypeRegistry) -> Result<Self> {
        T::read_json(key, record, registry)
    }

    fn write_xml(&self, tag: &str, parent: &mut XmlElement) {
        if let Some(value) = self {
            if !value.is_empty() {
                value.write_xml(tag, parent);
            }
        }
    }

    fn read_xml(tag: &str, parent: &XmlElement, registry: &TypeRegistry) -> Result<Self> {
        T::read_xml(tag, parent, registry)
    }
}

impl<T: Repeatable> Field for Vec<T> {
    fn is_empty(&self) -> bool {
        self.iter().all(Element::is_empty)
    }

    fn owns_json_key(key: &str, wire_key: &str) -> bool {
        T::owns_json_key(key, wire_key)
    }

    fn owns_xml_tag(tag: &str, name: &str) -> bool {
        T::owns_xml_tag(tag, name)
    }

    fn write_json(&self, key: &str, record: &mut WireRecord) {
        if !Field::is_empty(self) {
            T::write_json_list(self, key, record);
        }
    }

    fn read_json(key: &str, record: &WireRecord, registry: &TypeRegistry) -> Result<Self> {
        T::read_json_list(key, record, registry)
    }

    fn write_xml(&self, tag: &str, parent: &mut XmlElement) {
        T::write_xml_list(self, tag, parent);
    }

    fn read_xml(tag: &str, parent: &XmlElement, registry: &TypeRegistry) -> Result<Self> {
        T::read_xml_list(tag, parent, registry)
    }
}

impl<T: Element> Element for Box<T> {
    const PRIMITIVE: bool = T::PRIMITIVE;

    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    fn owns_json_key(key: &str, wire_key: &str) -> bool {
        T::owns_json_key(key, wire_key)
    }

    fn owns_xml_tag(tag: &str, name: &str) -> bool {
        T::owns_xml_tag(tag, name)
    }

    fn write_json(&self, key: &str, record: &mut WireRecord) {
        self.as_ref().write_json(key, record);
    }

    fn read_json(key: &str, record: &WireRecord, registry: &TypeRegistry) -> Result<Option<Self>> {
        Ok(T::read_json(key, record, registry)?.map(Box::new))
    }

    fn write_xml(&self, tag: &str, parent: &mut XmlElement) {
        self.as_ref().write_xml(tag, parent);
    }

    fn read_xml(tag: &str, parent: &XmlElement, registry: &TypeRegistry) -> Result<Option<Self>> {
        Ok(T::read_xml(tag, parent, registry)?.map(Box::new))
    }
}

/// Reject any key of `record` that no declared field owns
pub fn check_json_keys(record: &WireRecord, owns: impl Fn(&str) -> bool) -> Result<()> {
    match record.keys().find(|key| !owns(key.as_str())) {
        Some(key) => Err(CodecError::UnknownElement {
            name: key.clone(),
            location: None,
        }),
        None => Ok(()),
    }
}

/// Reject any child of `element` that no declared field owns
pub fn check_xml_children(element: &XmlElement, owns: impl Fn(&str) -> bool) -> Result<()> {
    match element.children.iter().find(|child| !owns(&child.name)) {
        Some(child) => Err(CodecError::UnknownElement {
            name: child.name.clone(),
            location: child.location.clone(),
        }),
        None => Ok(()),
    }
}
