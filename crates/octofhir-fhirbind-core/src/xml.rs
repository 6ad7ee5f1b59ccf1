//! FHIR XML element tree
//!
//! The markup counterpart of [`WireRecord`](crate::WireRecord): an ordered
//! tree of named elements where repeated fields are repeated siblings and
//! `id`/`value`/`url` travel as attributes. Parsing is strict: every element
//! must live in the FHIR namespace, foreign namespace declarations and
//! prefixed attributes are rejected, and text content is not allowed.
//!
//! The one exception is a narrative `div` declaring the XHTML namespace. Its
//! whole subtree is kept as raw markup in [`XmlElement::xhtml`].

use octofhir_fhirbind_diagnostics::{CodecError, LineIndex, Result, SourceLocation, Span};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;

/// The FHIR XML namespace
pub const FHIR_NAMESPACE: &str = "http://hl7.org/fhir";

/// The XHTML namespace of narrative content
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A single element of a FHIR XML document
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    /// Local element name
    pub name: String,
    /// Unprefixed attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
    /// Position of the start tag in the parsed source
    pub location: Option<SourceLocation>,
    /// Raw XHTML markup of a narrative `div`, written verbatim
    pub xhtml: Option<String>,
}

impl XmlElement {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an element holding raw XHTML markup
    pub fn raw_xhtml(name: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            xhtml: Some(markup.into()),
            ..Self::default()
        }
    }

    /// Append an attribute
    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    /// Append a child element
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Get an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over the children with the given name
    pub fn children_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Get the only child with the given name
    ///
    /// A non-repeating field that occurs twice is a format error.
    pub fn single_child(&self, name: &str) -> Result<Option<&XmlElement>> {
        let mut matches = self.children_named(name);
        let first = matches.next();
        if first.is_some() && matches.next().is_some() {
            return Err(CodecError::RepeatedElement {
                name: name.to_string(),
            });
        }
        Ok(first)
    }

    /// Reject any attribute not listed in `allowed`
    pub fn check_attributes(&self, allowed: &[&str]) -> Result<()> {
        match self
            .attributes
            .iter()
            .find(|(key, _)| !allowed.contains(&key.as_str()))
        {
            Some((key, _)) => Err(CodecError::MalformedAttribute {
                name: key.clone(),
                location: self.location.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Serialize as a standalone document rooted in the FHIR namespace
    pub fn to_document(&self, pretty: bool) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        if pretty {
            xml.push('\n');
        }
        self.write_to(&mut xml, pretty, 0, Some(FHIR_NAMESPACE));
        xml
    }

    fn write_to(&self, xml: &mut String, pretty: bool, level: usize, namespace: Option<&str>) {
        write_indent(xml, pretty, level);
        if let Some(markup) = &self.xhtml {
            xml.push_str(markup);
            if pretty {
                xml.push('\n');
            }
            return;
        }
        xml.push('<');
        xml.push_str(&self.name);
        if let Some(namespace) = namespace {
            xml.push_str(r#" xmlns=""#);
            xml.push_str(namespace);
            xml.push('"');
        }
        for (key, value) in &self.attributes {
            xml.push(' ');
            xml.push_str(key);
            xml.push_str(r#"=""#);
            xml.push_str(&escape_attribute(value));
            xml.push('"');
        }

        if self.children.is_empty() {
            xml.push_str("/>");
        } else {
            xml.push('>');
            if pretty {
                xml.push('\n');
            }
            for child in &self.children {
                child.write_to(xml, pretty, level + 1, None);
            }
            write_indent(xml, pretty, level);
            xml.push_str("</");
            xml.push_str(&self.name);
            xml.push('>');
        }
        if pretty {
            xml.push('\n');
        }
    }
}

fn write_indent(xml: &mut String, pretty: bool, level: usize) {
    if pretty {
        for _ in 0..level {
            xml.push_str("   ");
        }
    }
}

fn escape_attribute(value: &str) -> String {
    quick_xml::escape::escape(value)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

/// Namespace state inherited by nested elements
#[derive(Debug, Clone, Default)]
struct Scope {
    default_is_fhir: bool,
    fhir_prefixes: Vec<String>,
}

/// Parse a FHIR XML document into its root element
pub fn parse(input: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let lines = LineIndex::new(input);
    let mut stack: Vec<(XmlElement, Scope)> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut buf = Vec::new();

    loop {
        let offset = reader.buffer_position() as usize;
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let end = reader.buffer_position() as usize;
                let span = Span::new(end.saturating_sub(e.len() + 2), end);
                let location = lines.locate(span);
                // XHTML is only accepted below a FHIR element, never as the root
                if !stack.is_empty() && is_xhtml_div(&e) {
                    let name = e.name().as_ref().to_vec();
                    let element = read_xhtml(&mut reader, input, QName(&name), span, &lines)?;
                    close_element(element, &mut stack, &mut root)?;
                    buf.clear();
                    continue;
                }
                let parent = stack.last().map(|(_, scope)| scope.clone()).unwrap_or_default();
                let (element, scope) = open_element(&e, &parent, location)?;
                if stack.is_empty() && root.is_some() {
                    return Err(multiple_roots(element.location));
                }
                stack.push((element, scope));
            }
            Ok(Event::Empty(e)) => {
                let end = reader.buffer_position() as usize;
                let span = Span::new(end.saturating_sub(e.len() + 3), end);
                let location = lines.locate(span);
                let element = if !stack.is_empty() && is_xhtml_div(&e) {
                    xhtml_element(input, span, location)
                } else {
                    let parent = stack.last().map(|(_, scope)| scope.clone()).unwrap_or_default();
                    open_element(&e, &parent, location)?.0
                };
                close_element(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                if let Some((element, _)) = stack.pop() {
                    close_element(element, &mut stack, &mut root)?;
                }
            }
            Ok(Event::Text(text)) => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    let end = reader.buffer_position() as usize;
                    return Err(CodecError::UnexpectedContent {
                        location: Some(lines.locate(Span::new(offset, end))),
                    });
                }
            }
            Ok(Event::CData(_) | Event::GeneralRef(_)) => {
                let end = reader.buffer_position() as usize;
                return Err(CodecError::UnexpectedContent {
                    location: Some(lines.locate(Span::new(offset, end))),
                });
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                let end = reader.buffer_position() as usize;
                return Err(CodecError::Xml {
                    message: e.to_string(),
                    location: Some(lines.locate(Span::new(end, end))),
                });
            }
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(CodecError::Xml {
            message: "unexpected end of document".to_string(),
            location: Some(lines.locate(Span::new(input.len(), input.len()))),
        });
    }

    root.ok_or_else(|| CodecError::Xml {
        message: "document has no root element".to_string(),
        location: None,
    })
}

/// True for an unprefixed `div` that declares the XHTML default namespace
fn is_xhtml_div(start: &BytesStart<'_>) -> bool {
    start.name().as_ref() == b"div"
        && start.attributes().flatten().any(|attr| {
            attr.key.as_ref() == b"xmlns" && attr.value.as_ref() == XHTML_NAMESPACE.as_bytes()
        })
}

/// Consume an XHTML subtree and keep its source text
fn read_xhtml(
    reader: &mut Reader<&[u8]>,
    input: &str,
    name: QName<'_>,
    start: Span,
    lines: &LineIndex<'_>,
) -> Result<XmlElement> {
    let mut scratch = Vec::new();
    reader
        .read_to_end_into(name, &mut scratch)
        .map_err(|e| CodecError::Xml {
            message: e.to_string(),
            location: Some(lines.locate(start)),
        })?;
    let span = Span::new(start.start, reader.buffer_position() as usize);
    Ok(xhtml_element(input, span, lines.locate(start)))
}

fn xhtml_element(input: &str, span: Span, location: SourceLocation) -> XmlElement {
    let markup = input.get(span.start..span.end).unwrap_or_default();
    log::trace!("xhtml div of {} bytes at {}", span.len(), location);
    XmlElement {
        location: Some(location),
        ..XmlElement::raw_xhtml("div", markup)
    }
}

/// Check that `markup` is a single well-formed XHTML `div` element
pub fn check_xhtml(markup: &str) -> Result<()> {
    let mut reader = Reader::from_str(markup);
    let lines = LineIndex::new(markup);
    let mut buf = Vec::new();
    let mut seen_root = false;
    loop {
        let offset = reader.buffer_position() as usize;
        let event = reader.read_event_into(&mut buf);
        let span = Span::new(offset, reader.buffer_position() as usize);
        match event {
            Ok(Event::Start(e)) if !seen_root && is_xhtml_div(&e) => {
                let name = e.name().as_ref().to_vec();
                let mut scratch = Vec::new();
                reader
                    .read_to_end_into(QName(&name), &mut scratch)
                    .map_err(|e| CodecError::Xml {
                        message: e.to_string(),
                        location: Some(lines.locate(span)),
                    })?;
                seen_root = true;
            }
            Ok(Event::Empty(e)) if !seen_root && is_xhtml_div(&e) => seen_root = true,
            Ok(Event::Start(e) | Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                return Err(CodecError::MalformedNamespace {
                    name: format!("{name} (expected XHTML div)"),
                    location: Some(lines.locate(span)),
                });
            }
            Ok(Event::Text(text)) if text.iter().all(u8::is_ascii_whitespace) => {}
            Ok(Event::Text(_) | Event::CData(_) | Event::GeneralRef(_)) => {
                return Err(CodecError::UnexpectedContent {
                    location: Some(lines.locate(span)),
                });
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(CodecError::Xml {
                    message: e.to_string(),
                    location: Some(lines.locate(span)),
                });
            }
        }
        buf.clear();
    }
    if seen_root {
        Ok(())
    } else {
        Err(CodecError::Xml {
            message: "narrative has no div element".to_string(),
            location: None,
        })
    }
}

fn multiple_roots(location: Option<SourceLocation>) -> CodecError {
    CodecError::Xml {
        message: "document has more than one root element".to_string(),
        location,
    }
}

fn close_element(
    element: XmlElement,
    stack: &mut [(XmlElement, Scope)],
    root: &mut Option<XmlElement>,
) -> Result<()> {
    match stack.last_mut() {
        Some((parent, _)) => parent.push_child(element),
        None => {
            if root.is_some() {
                return Err(multiple_roots(element.location));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

fn open_element(
    start: &BytesStart<'_>,
    parent: &Scope,
    location: SourceLocation,
) -> Result<(XmlElement, Scope)> {
    let mut scope = parent.clone();
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| CodecError::Xml {
            message: e.to_string(),
            location: Some(location.clone()),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = quick_xml::escape::unescape(&raw)
            .map_err(|e| CodecError::Xml {
                message: e.to_string(),
                location: Some(location.clone()),
            })?
            .to_string();

        if key == "xmlns" {
            if value != FHIR_NAMESPACE {
                return Err(CodecError::MalformedNamespace {
                    name: value,
                    location: Some(location),
                });
            }
            scope.default_is_fhir = true;
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            if value != FHIR_NAMESPACE {
                return Err(CodecError::MalformedNamespace {
                    name: value,
                    location: Some(location),
                });
            }
            scope.fhir_prefixes.push(prefix.to_string());
        } else if key.contains(':') {
            return Err(CodecError::MalformedAttribute {
                name: key,
                location: Some(location),
            });
        } else {
            attributes.push((key, value));
        }
    }

    let qualified = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let name = match qualified.split_once(':') {
        Some((prefix, local)) => {
            if !scope.fhir_prefixes.iter().any(|bound| bound == prefix) {
                return Err(CodecError::MalformedNamespace {
                    name: prefix.to_string(),
                    location: Some(location),
                });
            }
            local.to_string()
        }
        None => {
            if !scope.default_is_fhir {
                return Err(CodecError::MalformedNamespace {
                    name: format!("{qualified} (unqualified)"),
                    location: Some(location),
                });
            }
            qualified
        }
    };

    log::trace!("xml element <{}> at {}", name, location);
    let element = XmlElement {
        name,
        attributes,
        location: Some(location),
        ..XmlElement::default()
    };
    Ok((element, scope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_parse_tree() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
        <Patient xmlns="http://hl7.org/fhir">
            <id value="p1"/>
            <name>
                <given value="Jim"/>
                <given value="Bob"/>
            </name>
        </Patient>"#;

        let root = parse(xml).unwrap();
        assert_eq!(root.name, "Patient");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].attribute("value"), Some("p1"));
        assert_eq!(root.children[1].children_named("given").count(), 2);
        assert_eq!(root.location.as_ref().map(|l| l.line), Some(2));
    }

    #[test]
    fn test_prefixed_fhir_namespace() {
        let xml = r#"<f:Patient xmlns:f="http://hl7.org/fhir"><f:active value="true"/></f:Patient>"#;
        let root = parse(xml).unwrap();
        assert_eq!(root.name, "Patient");
        assert_eq!(root.children[0].name, "active");
    }

    #[rstest]
    #[case(r#"<Patient xmlns="urn:other"/>"#)]
    #[case(r#"<Patient/>"#)]
    #[case(r#"<Patient xmlns="http://hl7.org/fhir"><x:id xmlns:x="urn:x" value="1"/></Patient>"#)]
    #[case(r#"<Patient xmlns="http://hl7.org/fhir"><y:id value="1"/></Patient>"#)]
    fn test_rejects_foreign_namespaces(#[case] xml: &str) {
        let err = parse(xml).unwrap_err();
        assert!(matches!(err, CodecError::MalformedNamespace { .. }), "{err:?}");
    }

    #[test]
    fn test_rejects_prefixed_attribute() {
        let xml = r#"<Patient xmlns="http://hl7.org/fhir" xmlns:xsi="http://hl7.org/fhir" xsi:type="x"/>"#;
        let err = parse(xml).unwrap_err();
        assert!(matches!(err, CodecError::MalformedAttribute { ref name, .. } if name == "xsi:type"));
    }

    #[rstest]
    #[case(r#"<Patient xmlns="http://hl7.org/fhir">hello</Patient>"#)]
    #[case(r#"<Patient xmlns="http://hl7.org/fhir">&amp;<active value="true"/></Patient>"#)]
    #[case(r#"<Patient xmlns="http://hl7.org/fhir"><active value="true"/>&#65;</Patient>"#)]
    #[case(r#"<Patient xmlns="http://hl7.org/fhir"><![CDATA[x]]></Patient>"#)]
    fn test_rejects_text_content(#[case] xml: &str) {
        let err = parse(xml).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedContent { .. }), "{err:?}");
    }

    #[test]
    fn test_locations_cover_the_start_tag() {
        let xml = "<Patient xmlns=\"http://hl7.org/fhir\">\n  <active value=\"true\"/>\n</Patient>";
        let root = parse(xml).unwrap();
        let root_loc = root.location.clone().unwrap();
        assert_eq!((root_loc.line, root_loc.column, root_loc.offset), (1, 1, 0));
        assert_eq!(root_loc.length, r#"<Patient xmlns="http://hl7.org/fhir">"#.len());

        let active = root.children[0].location.clone().unwrap();
        assert_eq!((active.line, active.column), (2, 3));
        assert_eq!(active.length, r#"<active value="true"/>"#.len());
    }

    #[test]
    fn test_xhtml_div_is_kept_raw() {
        let div = r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>Jim &amp; <b>Bob</b></p></div>"#;
        let xml = format!(
            r#"<Patient xmlns="http://hl7.org/fhir"><text><status value="generated"/>{div}</text></Patient>"#
        );
        let root = parse(&xml).unwrap();
        let text = &root.children[0];
        assert_eq!(text.children[1].name, "div");
        assert_eq!(text.children[1].xhtml.as_deref(), Some(div));
        assert!(text.children[1].children.is_empty());

        let written = root.to_document(false);
        assert!(written.contains(div));
        assert_eq!(parse(&written).unwrap().children[0].children[1].xhtml.as_deref(), Some(div));
    }

    #[test]
    fn test_xhtml_only_below_fhir_elements() {
        let xml = r#"<div xmlns="http://www.w3.org/1999/xhtml"/>"#;
        assert!(matches!(parse(xml), Err(CodecError::MalformedNamespace { .. })));

        let xml = r#"<Patient xmlns="http://hl7.org/fhir"><p xmlns="http://www.w3.org/1999/xhtml"/></Patient>"#;
        assert!(matches!(parse(xml), Err(CodecError::MalformedNamespace { .. })));
    }

    #[rstest]
    #[case(r#"<div xmlns="http://www.w3.org/1999/xhtml">ok</div>"#, true)]
    #[case(r#"<div xmlns="http://www.w3.org/1999/xhtml"/>"#, true)]
    #[case(r#"<div>no namespace</div>"#, false)]
    #[case(r#"<p xmlns="http://www.w3.org/1999/xhtml">x</p>"#, false)]
    #[case(r#"<div xmlns="http://www.w3.org/1999/xhtml"><p></div>"#, false)]
    #[case(r#"plain text"#, false)]
    fn test_check_xhtml(#[case] markup: &str, #[case] valid: bool) {
        assert_eq!(check_xhtml(markup).is_ok(), valid, "{markup}");
    }

    #[test]
    fn test_syntax_error_propagates() {
        let xml = r#"<Patient xmlns="http://hl7.org/fhir"><id value="1"></Patient>"#;
        assert!(matches!(parse(xml), Err(CodecError::Xml { .. })));
    }

    #[test]
    fn test_single_child_rejects_repeats() {
        let mut el = XmlElement::new("Patient");
        el.push_child(XmlElement::new("gender"));
        el.push_child(XmlElement::new("gender"));
        assert!(matches!(
            el.single_child("gender"),
            Err(CodecError::RepeatedElement { .. })
        ));
        assert!(el.single_child("active").unwrap().is_none());
    }

    #[test]
    fn test_check_attributes() {
        let mut el = XmlElement::new("birthDate");
        el.push_attribute("value", "1970");
        el.push_attribute("foo", "bar");
        let err = el.check_attributes(&["id", "value"]).unwrap_err();
        assert!(matches!(err, CodecError::MalformedAttribute { ref name, .. } if name == "foo"));
    }

    #[test]
    fn test_write_document() {
        let mut root = XmlElement::new("Patient");
        let mut id = XmlElement::new("id");
        id.push_attribute("value", "a&b \"c\"\nd");
        root.push_child(id);

        let xml = root.to_document(false);
        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8"?><Patient xmlns="http://hl7.org/fhir"><id value="a&amp;b &quot;c&quot;&#10;d"/></Patient>"#
        );

        let parsed = parse(&xml).unwrap();
        assert_eq!(parsed.children[0].attribute("value"), Some("a&b \"c\"\nd"));
    }

    #[test]
    fn test_write_pretty_document() {
        let mut root = XmlElement::new("Patient");
        root.push_child(XmlElement::new("active"));
        let xml = root.to_document(true);
        assert!(xml.contains("\n   <active/>\n"));
        assert!(parse(&xml).is_ok());
    }
}
