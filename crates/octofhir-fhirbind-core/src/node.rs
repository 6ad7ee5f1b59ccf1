//! Structured values encoded as a nested object / element
//!
//! Complex data types, backbone elements, resources and the resource
//! container all encode as one JSON object (or one XML element with child
//! elements). The functions in this module implement [`Element`] and
//! [`Repeatable`] once for every such [`Node`]; the generating macros only
//! forward to them.
//!
//! [`Element`]: crate::Element
//! [`Repeatable`]: crate::Repeatable

use crate::registry::TypeRegistry;
use crate::wire::{self, WireRecord};
use crate::xml::XmlElement;
use octofhir_fhirbind_diagnostics::Result;
use serde_json::Value;

/// A value with its own object/element representation
pub trait Node: Sized {
    /// True when no attribute or field is populated
    fn is_empty(&self) -> bool;

    /// Flatten into a wire record
    fn to_record(&self) -> WireRecord;

    /// Rebuild from a wire record
    fn from_record(record: &WireRecord, registry: &TypeRegistry) -> Result<Self>;

    /// Write attributes and children into an element created by the caller
    fn write_xml_content(&self, element: &mut XmlElement);

    /// Rebuild from an element's attributes and children
    fn read_xml_content(element: &XmlElement, registry: &TypeRegistry) -> Result<Self>;
}

pub fn write_json<T: Node>(value: &T, key: &str, record: &mut WireRecord) {
    if !value.is_empty() {
        record.insert(key.to_string(), Value::Object(value.to_record()));
    }
}

pub fn read_json<T: Node>(
    key: &str,
    record: &WireRecord,
    registry: &TypeRegistry,
) -> Result<Option<T>> {
    match wire::get(record, key) {
        Some(value) => Ok(Some(T::from_record(wire::as_object(key, value)?, registry)?)),
        None => Ok(None),
    }
}

pub fn write_json_list<T: Node>(items: &[T], key: &str, record: &mut WireRecord) {
    let values: Vec<Value> = items
        .iter()
        .filter(|item| !item.is_empty())
        .map(|item| Value::Object(item.to_record()))
        .collect();
    if !values.is_empty() {
        record.insert(key.to_string(), Value::Array(values));
    }
}

pub fn read_json_list<T: Node>(
    key: &str,
    record: &WireRecord,
    registry: &TypeRegistry,
) -> Result<Vec<T>> {
    wire::array(key, record)?
        .iter()
        .filter(|value| !value.is_null())
        .map(|value| T::from_record(wire::as_object(key, value)?, registry))
        .collect()
}

pub fn write_xml<T: Node>(value: &T, tag: &str, parent: &mut XmlElement) {
    if !value.is_empty() {
        let mut element = XmlElement::new(tag);
        value.write_xml_content(&mut element);
        parent.push_child(element);
    }
}

pub fn read_xml<T: Node>(
    tag: &str,
    parent: &XmlElement,
    registry: &TypeRegistry,
) -> Result<Option<T>> {
    parent
        .single_child(tag)?
        .map(|element| T::read_xml_content(element, registry))
        .transpose()
}

pub fn read_xml_list<T: Node>(
    tag: &str,
    parent: &XmlElement,
    registry: &TypeRegistry,
) -> Result<Vec<T>> {
    parent
        .children_named(tag)
        .map(|element| T::read_xml_content(element, registry))
        .collect()
}

/// Implement `Element` and `Repeatable` for a `Node` by forwarding to this module
#[doc(hidden)]
#[macro_export]
macro_rules! impl_element_for_node {
    ($name:ty) => {
        impl $crate::Element for $name {
            fn is_empty(&self) -> bool {
                $crate::Node::is_empty(self)
            }

            fn write_json(&self, key: &str, record: &mut $crate::WireRecord) {
                $crate::node::write_json(self, key, record)
            }

            fn read_json(
                key: &str,
                record: &$crate::WireRecord,
                registry: &$crate::TypeRegistry,
            ) -> $crate::Result<Option<Self>> {
                $crate::node::read_json(key, record, registry)
            }

            fn write_xml(&self, tag: &str, parent: &mut $crate::XmlElement) {
                $crate::node::write_xml(self, tag, parent)
            }

            fn read_xml(
                tag: &str,
                parent: &$crate::XmlElement,
                registry: &$crate::TypeRegistry,
            ) -> $crate::Result<Option<Self>> {
                $crate::node::read_xml(tag, parent, registry)
            }
        }

        impl $crate::Repeatable for $name {
            fn write_json_list(items: &[Self], key: &str, record: &mut $crate::WireRecord) {
                $crate::node::write_json_list(items, key, record)
            }

            fn read_json_list(
                key: &str,
                record: &$crate::WireRecord,
                registry: &$crate::TypeRegistry,
            ) -> $crate::Result<Vec<Self>> {
                $crate::node::read_json_list(key, record, registry)
            }

            fn read_xml_list(
                tag: &str,
                parent: &$crate::XmlElement,
                registry: &$crate::TypeRegistry,
            ) -> $crate::Result<Vec<Self>> {
                $crate::node::read_xml_list(tag, parent, registry)
            }
        }
    };
}

/// Declare a complex data type or backbone element
///
/// Fields prefixed with `@` are plain string attributes (`id`, `url`): JSON
/// keys on the document path, XML attributes on the markup path. All other
/// fields are `Option<T>` or `Vec<T>` of an [`Element`](crate::Element) type
/// and are written in declaration order. Keys and child elements that no
/// field declares are rejected on decode.
///
/// ```ignore
/// complex_type! {
///     /// A time period defined by a start and end date/time
///     pub struct Period {
///         @id: "id",
///         extension: Vec<Extension> => "extension",
///         start: Option<DateTime> => "start",
///         end: Option<DateTime> => "end",
///     }
/// }
/// ```
#[macro_export]
macro_rules! complex_type {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( @ $attr:ident : $attr_key:literal, )*
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty => $key:literal, )*
        }
    ) => {
        $crate::complex_type! {
            @reserved []
            $(#[$meta])*
            pub struct $name {
                $( @ $attr: $attr_key, )*
                $( $(#[$field_meta])* $field: $ty => $key, )*
            }
        }
    };
    (
        @reserved [$($reserved:literal),*]
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( @ $attr:ident : $attr_key:literal, )*
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty => $key:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(
                #[doc = concat!("`", $attr_key, "` attribute")]
                pub $attr: Option<String>,
            )*
            $( $(#[$field_meta])* pub $field: $ty, )*
        }

        impl $crate::Node for $name {
            fn is_empty(&self) -> bool {
                true $( && self.$attr.is_none() )* $( && $crate::Field::is_empty(&self.$field) )*
            }

            fn to_record(&self) -> $crate::WireRecord {
                #[allow(unused_mut)]
                let mut record = $crate::WireRecord::new();
                $( $crate::wire::write_attribute(&self.$attr, $attr_key, &mut record); )*
                $( $crate::Field::write_json(&self.$field, $key, &mut record); )*
                record
            }

            #[allow(unused_variables)]
            fn from_record(
                record: &$crate::WireRecord,
                registry: &$crate::TypeRegistry,
            ) -> $crate::Result<Self> {
                $crate::element::check_json_keys(record, |wire_key| {
                    false
                        $( || wire_key == $reserved )*
                        $( || wire_key == $attr_key )*
                        $( || <$ty as $crate::Field>::owns_json_key($key, wire_key) )*
                })?;
                Ok(Self {
                    $( $attr: $crate::wire::read_attribute($attr_key, record)?, )*
                    $( $field: $crate::Field::read_json($key, record, registry)?, )*
                })
            }

            #[allow(unused_variables)]
            fn write_xml_content(&self, element: &mut $crate::XmlElement) {
                $(
                    if let Some(value) = &self.$attr {
                        element.push_attribute($attr_key, value.clone());
                    }
                )*
                $( $crate::Field::write_xml(&self.$field, $key, element); )*
            }

            #[allow(unused_variables)]
            fn read_xml_content(
                element: &$crate::XmlElement,
                registry: &$crate::TypeRegistry,
            ) -> $crate::Result<Self> {
                element.check_attributes(&[$($attr_key),*])?;
                $crate::element::check_xml_children(element, |name| {
                    false $( || <$ty as $crate::Field>::owns_xml_tag($key, name) )*
                })?;
                Ok(Self {
                    $( $attr: element.attribute($attr_key).map(str::to_string), )*
                    $( $field: $crate::Field::read_xml($key, element, registry)?, )*
                })
            }
        }

        $crate::impl_element_for_node!($name);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, Extension, ExtensionValue, Period};
    use crate::{CodecError, Field};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_attributes_and_fields_in_declaration_order() {
        let ext = Extension {
            id: Some("e1".into()),
            ..testing::extension("http://example.org/x", ExtensionValue::String("y".into()))
        };
        let encoded = Value::Object(ext.to_record());
        assert_eq!(
            encoded,
            json!({"id": "e1", "url": "http://example.org/x", "valueString": "y"})
        );
        let keys: Vec<&String> = encoded.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["id", "url", "valueString"]);

        let mut element = XmlElement::new("extension");
        ext.write_xml_content(&mut element);
        assert_eq!(element.attribute("url"), Some("http://example.org/x"));
        assert_eq!(element.children[0].name, "valueString");
    }

    #[test]
    fn test_empty_node_is_omitted() {
        let period: Option<Period> = Some(Period::default());
        let mut record = WireRecord::new();
        Field::write_json(&period, "period", &mut record);
        assert!(record.is_empty());

        let mut parent = XmlElement::new("Encounter");
        Field::write_xml(&period, "period", &mut parent);
        assert!(parent.children.is_empty());
    }

    #[test]
    fn test_list_skips_null_entries() {
        let registry = testing::registry();
        let record = json!({"extension": [null, {"url": "http://a"}]})
            .as_object()
            .cloned()
            .unwrap();
        let decoded: Vec<Extension> = read_json_list("extension", &record, &registry).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].url.as_deref(), Some("http://a"));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let registry = testing::registry();
        let record = json!({"period": "2020"}).as_object().cloned().unwrap();
        assert!(matches!(
            read_json::<Period>("period", &record, &registry),
            Err(CodecError::InvalidValue { ref key, .. }) if key == "period"
        ));
    }

    #[test]
    fn test_undeclared_key_is_rejected() {
        let registry = testing::registry();
        let record = json!({"start": "2020", "_start": {"id": "s"}, "ending": "2021"})
            .as_object()
            .cloned()
            .unwrap();
        assert!(matches!(
            Period::from_record(&record, &registry),
            Err(CodecError::UnknownElement { ref name, .. }) if name == "ending"
        ));

        let record = json!({"url": "http://a", "_valueString": {"id": "v"}})
            .as_object()
            .cloned()
            .unwrap();
        let ext = Extension::from_record(&record, &registry).unwrap();
        assert_eq!(ext.url.as_deref(), Some("http://a"));

        let record = json!({"resourceType": "Period"}).as_object().cloned().unwrap();
        assert!(matches!(
            Period::from_record(&record, &registry),
            Err(CodecError::UnknownElement { ref name, .. }) if name == "resourceType"
        ));
    }

    #[test]
    fn test_xml_rejects_undeclared_child() {
        let registry = testing::registry();
        let mut element = XmlElement::new("period");
        let mut start = XmlElement::new("start");
        start.push_attribute("value", "2020");
        element.push_child(start);
        element.push_child(XmlElement::new("ending"));
        assert!(matches!(
            Period::read_xml_content(&element, &registry),
            Err(CodecError::UnknownElement { ref name, .. }) if name == "ending"
        ));
    }

    #[test]
    fn test_xml_rejects_undeclared_attribute() {
        let registry = testing::registry();
        let mut element = XmlElement::new("period");
        element.push_attribute("url", "http://nope");
        assert!(matches!(
            Period::read_xml_content(&element, &registry),
            Err(CodecError::MalformedAttribute { ref name, .. }) if name == "url"
        ));
    }

    #[test]
    fn test_xml_repeated_single_field() {
        let registry = testing::registry();
        let mut parent = XmlElement::new("Encounter");
        parent.push_child(XmlElement::new("period"));
        parent.push_child(XmlElement::new("period"));
        assert!(matches!(
            read_xml::<Period>("period", &parent, &registry),
            Err(CodecError::RepeatedElement { ref name }) if name == "period"
        ));
    }
}
