//! Narrative XHTML carried as raw markup
//!
//! The `div` of a narrative is the one place where a FHIR document embeds
//! non-FHIR content. It is kept as the exact source text of the XHTML `div`
//! element: a plain string on the JSON path, a verbatim subtree on the XML
//! path.

use crate::element::Element;
use crate::registry::TypeRegistry;
use crate::wire::{self, WireRecord};
use crate::xml::{self, XmlElement};
use octofhir_fhirbind_diagnostics::{CodecError, Result};
use serde_json::Value;

/// Markup of one XHTML `div` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Xhtml(pub String);

impl Xhtml {
    /// Wrap markup after checking it is a single XHTML `div`
    pub fn parse(markup: impl Into<String>) -> Result<Self> {
        let markup = markup.into();
        xml::check_xhtml(&markup)?;
        Ok(Self(markup))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Element for Xhtml {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn write_json(&self, key: &str, record: &mut WireRecord) {
        record.insert(key.to_string(), Value::String(self.0.clone()));
    }

    fn read_json(key: &str, record: &WireRecord, _registry: &TypeRegistry) -> Result<Option<Self>> {
        match wire::get(record, key) {
            Some(Value::String(markup)) => Self::parse(markup.as_str()).map(Some),
            Some(other) => Err(CodecError::invalid_value(key, "string", wire::describe(other))),
            None => Ok(None),
        }
    }

    fn write_xml(&self, tag: &str, parent: &mut XmlElement) {
        parent.push_child(XmlElement::raw_xhtml(tag, self.0.clone()));
    }

    fn read_xml(tag: &str, parent: &XmlElement, _registry: &TypeRegistry) -> Result<Option<Self>> {
        match parent.single_child(tag)? {
            Some(element) => match &element.xhtml {
                Some(markup) => Ok(Some(Self(markup.clone()))),
                None => Err(CodecError::MalformedNamespace {
                    name: format!("{tag} (expected XHTML div)"),
                    location: element.location.clone(),
                }),
            },
            None => Ok(None),
        }
    }
}
