//! Document serialization
//!
//! JSON and XML front ends for any [`Document`]: a typed resource or a
//! polymorphic [`ContainedResource`](crate::ContainedResource).

use std::io::{Read, Write};

use crate::registry::TypeRegistry;
use crate::resource::Document;
use crate::wire;
use crate::xml;
use octofhir_fhirbind_diagnostics::Result;
use serde_json::Value;

/// Trait for FHIR document serializers
pub trait FhirSerializer {
    /// Serialize a document to a string
    fn serialize<D: Document>(&self, document: &D) -> Result<String>;

    /// Serialize a document to a writer
    fn serialize_to_writer<D: Document, W: Write>(&self, document: &D, mut writer: W) -> Result<()> {
        let text = self.serialize(document)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Deserialize a document from a string
    fn deserialize<D: Document>(&self, input: &str, registry: &TypeRegistry) -> Result<D>;

    /// Deserialize a document from a reader
    fn deserialize_from_reader<D: Document, R: Read>(
        &self,
        mut reader: R,
        registry: &TypeRegistry,
    ) -> Result<D> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.deserialize(&content, registry)
    }
}

/// JSON serializer
#[derive(Debug, Default, Clone)]
pub struct JsonSerializer {
    /// Whether to produce pretty-printed output
    pub pretty: bool,
}

impl JsonSerializer {
    /// Create a new JSON serializer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new JSON serializer with pretty-printing enabled
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl FhirSerializer for JsonSerializer {
    fn serialize<D: Document>(&self, document: &D) -> Result<String> {
        let value = Value::Object(document.to_json_record());
        let text = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }

    fn deserialize<D: Document>(&self, input: &str, registry: &TypeRegistry) -> Result<D> {
        let value: Value = serde_json::from_str(input)?;
        let record = wire::as_object("$root", &value)?;
        D::from_json_record(record, registry)
    }
}

/// XML serializer
///
/// Writes the FHIR namespace as the default namespace of the root element.
#[derive(Debug, Default, Clone)]
pub struct XmlSerializer {
    /// Whether to produce indented output
    pub pretty: bool,
}

impl XmlSerializer {
    /// Create a new XML serializer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new XML serializer with pretty-printing enabled
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl FhirSerializer for XmlSerializer {
    fn serialize<D: Document>(&self, document: &D) -> Result<String> {
        Ok(document.to_xml_element().to_document(self.pretty))
    }

    fn deserialize<D: Document>(&self, input: &str, registry: &TypeRegistry) -> Result<D> {
        let root = xml::parse(input)?;
        D::from_xml_element(&root, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, Condition, Onset, Patient};
    use crate::ContainedResource;
    use octofhir_fhirbind_diagnostics::CodecError;
    use pretty_assertions::assert_eq;

    fn sample() -> Condition {
        Condition {
            id: Some("c1".into()),
            onset: Some(Onset::String("after <surgery> & \"rehab\"".into())),
            ..Condition::default()
        }
    }

    #[test]
    fn test_json_round_trip() {
        let registry = testing::registry();
        let serializer = JsonSerializer::new();
        let text = serializer.serialize(&sample()).unwrap();
        assert!(text.starts_with(r#"{"resourceType":"Condition""#));

        let decoded: Condition = serializer.deserialize(&text, &registry).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_json_pretty_and_writer() {
        let registry = testing::registry();
        let serializer = JsonSerializer::pretty();
        let mut out = Vec::new();
        serializer.serialize_to_writer(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\n'));

        let decoded: ContainedResource = serializer
            .deserialize_from_reader(text.as_bytes(), &registry)
            .unwrap();
        assert_eq!(decoded.downcast_ref::<Condition>(), Some(&sample()));
    }

    #[test]
    fn test_json_root_must_be_object() {
        let registry = testing::registry();
        let err = JsonSerializer::new()
            .deserialize::<Patient>("[1, 2]", &registry)
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { .. }));

        let err = JsonSerializer::new()
            .deserialize::<Patient>("{", &registry)
            .unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn test_xml_round_trip() {
        let registry = testing::registry();
        let serializer = XmlSerializer::new();
        let text = serializer.serialize(&sample()).unwrap();
        assert_eq!(
            text,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                r#"<Condition xmlns="http://hl7.org/fhir"><id value="c1"/>"#,
                r#"<onsetString value="after &lt;surgery&gt; &amp; &quot;rehab&quot;"/>"#,
                r#"</Condition>"#
            )
        );

        let decoded: Condition = serializer.deserialize(&text, &registry).unwrap();
        assert_eq!(decoded, sample());

        let pretty = XmlSerializer::pretty().serialize(&sample()).unwrap();
        let decoded: ContainedResource = XmlSerializer::new().deserialize(&pretty, &registry).unwrap();
        assert_eq!(decoded.resource_type(), "Condition");
    }
}
