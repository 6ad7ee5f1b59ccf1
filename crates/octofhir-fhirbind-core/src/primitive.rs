//! Decorated primitive values
//!
//! In memory a FHIR primitive is one entity: a scalar plus an optional element
//! id and extensions. On the JSON wire it is split in two siblings, the bare
//! scalar under `key` and the metadata object under `_key`. For repeating
//! primitives both siblings are arrays aligned by index, either of which may
//! hold `null` at any position.

use crate::element::{Element, Repeatable, check_json_keys, check_xml_children};
use crate::registry::TypeRegistry;
use crate::wire::{self, WireRecord};
use crate::xml::XmlElement;
use octofhir_fhirbind_diagnostics::{CodecError, Result};
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

/// A scalar that can be carried by a primitive element
pub trait Scalar: Clone + PartialEq + fmt::Debug {
    /// Name of the expected JSON shape, used in error messages
    const EXPECTED: &'static str;

    fn to_json(&self) -> Value;
    fn from_json(value: &Value) -> Option<Self>;
    fn to_xml_value(&self) -> String;
    fn from_xml_value(text: &str) -> Option<Self>;
}

impl Scalar for bool {
    const EXPECTED: &'static str = "boolean";

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn to_xml_value(&self) -> String {
        self.to_string()
    }

    fn from_xml_value(text: &str) -> Option<Self> {
        match text {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl Scalar for i32 {
    const EXPECTED: &'static str = "integer";

    fn to_json(&self) -> Value {
        Value::from(*self)
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|n| i32::try_from(n).ok())
    }

    fn to_xml_value(&self) -> String {
        self.to_string()
    }

    fn from_xml_value(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl Scalar for u32 {
    const EXPECTED: &'static str = "unsigned integer";

    fn to_json(&self) -> Value {
        Value::from(*self)
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_u64().and_then(|n| u32::try_from(n).ok())
    }

    fn to_xml_value(&self) -> String {
        self.to_string()
    }

    fn from_xml_value(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl Scalar for Decimal {
    const EXPECTED: &'static str = "decimal";

    fn to_json(&self) -> Value {
        let text = self.to_string();
        match Number::from_str(&text) {
            Ok(number) => Value::Number(number),
            Err(_) => Value::String(text),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => parse_decimal(number.as_str()),
            _ => None,
        }
    }

    fn to_xml_value(&self) -> String {
        self.to_string()
    }

    fn from_xml_value(text: &str) -> Option<Self> {
        parse_decimal(text)
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

impl Scalar for String {
    const EXPECTED: &'static str = "string";

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn to_xml_value(&self) -> String {
        self.clone()
    }

    fn from_xml_value(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

/// A primitive value with its element id and extensions
///
/// `X` is the extension type of the schema version in use.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive<T, X> {
    /// Element id (`_key.id` / `id` attribute)
    pub id: Option<String>,
    /// Extensions (`_key.extension` / `<extension>` children)
    pub extension: Vec<X>,
    /// The scalar itself
    pub value: Option<T>,
}

impl<T, X> Default for Primitive<T, X> {
    fn default() -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            value: None,
        }
    }
}

impl<T, X> Primitive<T, X> {
    /// Create a primitive holding only a value
    pub fn new(value: T) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Set the element id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add an extension
    pub fn with_extension(mut self, extension: X) -> Self {
        self.extension.push(extension);
        self
    }

    /// Get the scalar value
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// True when an id or extensions must travel in the metadata sibling
    pub fn has_metadata(&self) -> bool {
        self.id.is_some() || !self.extension.is_empty()
    }
}

impl<T, X> From<T> for Primitive<T, X> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<X> From<&str> for Primitive<String, X> {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl<T: Scalar, X: Repeatable> Primitive<T, X> {
    fn metadata(&self) -> Option<WireRecord> {
        if !self.has_metadata() {
            return None;
        }
        let mut meta = WireRecord::new();
        wire::write_attribute(&self.id, "id", &mut meta);
        if !self.extension.is_empty() {
            X::write_json_list(&self.extension, "extension", &mut meta);
        }
        Some(meta)
    }

    fn read_value(key: &str, value: Option<&Value>) -> Result<Option<T>> {
        match value.filter(|value| !value.is_null()) {
            Some(value) => T::from_json(value)
                .map(Some)
                .ok_or_else(|| CodecError::invalid_value(key, T::EXPECTED, wire::describe(value))),
            None => Ok(None),
        }
    }

    fn read_metadata(
        key: &str,
        value: Option<&Value>,
        registry: &TypeRegistry,
    ) -> Result<Option<(Option<String>, Vec<X>)>> {
        match value.filter(|value| !value.is_null()) {
            Some(value) => {
                let meta = wire::as_object(key, value)?;
                check_json_keys(meta, |name| name == "id" || name == "extension")?;
                let id = wire::read_attribute("id", meta)?;
                let extension = X::read_json_list("extension", meta, registry)?;
                Ok(Some((id, extension)))
            }
            None => Ok(None),
        }
    }

    fn merge(value: Option<T>, metadata: Option<(Option<String>, Vec<X>)>) -> Self {
        let (id, extension) = metadata.unwrap_or_default();
        Self {
            id,
            extension,
            value,
        }
    }

    fn push_xml(&self, tag: &str, parent: &mut XmlElement) {
        let mut element = XmlElement::new(tag);
        if let Some(id) = &self.id {
            element.push_attribute("id", id.clone());
        }
        if let Some(value) = &self.value {
            element.push_attribute("value", value.to_xml_value());
        }
        X::write_xml_list(&self.extension, "extension", &mut element);
        parent.push_child(element);
    }

    fn from_xml(element: &XmlElement, registry: &TypeRegistry) -> Result<Self> {
        element.check_attributes(&["id", "value"])?;
        check_xml_children(element, |name| name == "extension")?;
        let value = match element.attribute("value") {
            Some(text) => Some(T::from_xml_value(text).ok_or_else(|| {
                CodecError::invalid_value(element.name.clone(), T::EXPECTED, format!("'{text}'"))
            })?),
            None => None,
        };
        Ok(Self {
            id: element.attribute("id").map(str::to_string),
            extension: X::read_xml_list("extension", element, registry)?,
            value,
        })
    }
}

impl<T: Scalar, X: Repeatable> Element for Primitive<T, X> {
    const PRIMITIVE: bool = true;

    fn is_empty(&self) -> bool {
        self.value.is_none() && !self.has_metadata()
    }

    fn write_json(&self, key: &str, record: &mut WireRecord) {
        if let Some(value) = &self.value {
            record.insert(key.to_string(), value.to_json());
        }
        if let Some(meta) = self.metadata() {
            record.insert(wire::metadata_key(key), Value::Object(meta));
        }
    }

    fn read_json(key: &str, record: &WireRecord, registry: &TypeRegistry) -> Result<Option<Self>> {
        let meta_key = wire::metadata_key(key);
        let value = Self::read_value(key, record.get(key))?;
        let metadata = Self::read_metadata(&meta_key, record.get(&meta_key), registry)?;
        if value.is_none() && metadata.is_none() {
            return Ok(None);
        }
        Ok(Some(Self::merge(value, metadata)))
    }

    fn write_xml(&self, tag: &str, parent: &mut XmlElement) {
        if !Element::is_empty(self) {
            self.push_xml(tag, parent);
        }
    }

    fn read_xml(tag: &str, parent: &XmlElement, registry: &TypeRegistry) -> Result<Option<Self>> {
        parent
            .single_child(tag)?
            .map(|element| Self::from_xml(element, registry))
            .transpose()
    }
}

impl<T: Scalar, X: Repeatable> Repeatable for Primitive<T, X> {
    fn write_json_list(items: &[Self], key: &str, record: &mut WireRecord) {
        if items.iter().any(|item| item.value.is_some()) {
            let values = items
                .iter()
                .map(|item| item.value.as_ref().map_or(Value::Null, Scalar::to_json))
                .collect();
            record.insert(key.to_string(), Value::Array(values));
        }
        if items.iter().any(Self::has_metadata) {
            let metas = items
                .iter()
                .map(|item| item.metadata().map_or(Value::Null, Value::Object))
                .collect();
            record.insert(wire::metadata_key(key), Value::Array(metas));
        }
    }

    /// Entries without value or metadata are kept as `<tag/>`, matching the
    /// `null` placeholders of the JSON arrays
    fn write_xml_list(items: &[Self], tag: &str, parent: &mut XmlElement) {
        if items.iter().all(Element::is_empty) {
            return;
        }
        for item in items {
            item.push_xml(tag, parent);
        }
    }

    fn read_json_list(key: &str, record: &WireRecord, registry: &TypeRegistry) -> Result<Vec<Self>> {
        let meta_key = wire::metadata_key(key);
        let values = wire::array(key, record)?;
        let metas = wire::array(&meta_key, record)?;

        (0..values.len().max(metas.len()))
            .map(|index| {
                let value = Self::read_value(key, values.get(index))?;
                let metadata = Self::read_metadata(&meta_key, metas.get(index), registry)?;
                Ok(Self::merge(value, metadata))
            })
            .collect()
    }

    fn read_xml_list(tag: &str, parent: &XmlElement, registry: &TypeRegistry) -> Result<Vec<Self>> {
        parent
            .children_named(tag)
            .map(|element| Self::from_xml(element, registry))
            .collect()
    }
}
