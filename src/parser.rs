// src/parser.rs

//! Builds a [`Document`] from XML text using the `quick-xml` event reader.
//!
//! The reader is configured to expand empty elements (`<a/>` behaves like
//! `<a></a>`), so every element is seen as a start/end pair while the tree
//! is assembled. Text is accumulated across text/CDATA/reference events and
//! trimmed once when the element closes, so whitespace around an entity
//! reference inside a value survives intact.

use std::fs;
use std::path::Path;

use log::debug;
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;

use crate::error::ConfigError;
use crate::model::{Document, Element, ElementId};

/// Reads the file at `path` and parses it into a [`Document`].
///
/// # Errors
/// Returns [`ConfigError::Io`] if the file cannot be read, or any of the
/// parse-time errors from [`parse_str`] if it is not well-formed XML.
pub(crate) fn parse_file(path: &Path) -> Result<Document, ConfigError> {
    let xml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&xml)
}

/// Parses an XML string into a [`Document`].
///
/// The document must contain exactly one top-level element; anything else
/// (including an empty input) is rejected as malformed.
pub(crate) fn parse_str(xml: &str) -> Result<Document, ConfigError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().expand_empty_elements = true;

    let mut elements: Vec<Element> = Vec::new();
    let mut stack: Vec<ElementId> = Vec::new();
    let mut root: Option<ElementId> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                let mut attributes = Vec::new();
                for attr in start.attributes() {
                    let attr = attr?;
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let value = attr.unescape_value()?.into_owned();
                    attributes.push((key, value));
                }

                let id = elements.len();
                elements.push(Element {
                    name,
                    text: String::new(),
                    attributes,
                    children: Vec::new(),
                });
                match stack.last() {
                    Some(&parent) => elements[parent].children.push(id),
                    None => {
                        if root.is_some() {
                            return Err(ConfigError::Malformed(
                                "more than one top-level element",
                            ));
                        }
                        root = Some(id);
                    }
                }
                stack.push(id);
            }
            Event::End(_) => {
                // Name matching against the open tag is already enforced
                // by the reader. Trim the accumulated text exactly once,
                // now that it is complete.
                if let Some(id) = stack.pop() {
                    let trimmed = elements[id].text.trim().to_owned();
                    elements[id].text = trimmed;
                }
            }
            Event::Text(text) => {
                if let Some(&id) = stack.last() {
                    elements[id].text.push_str(&text.decode()?);
                }
            }
            Event::CData(data) => {
                if let Some(&id) = stack.last() {
                    let raw = data.into_inner();
                    elements[id].text.push_str(&String::from_utf8_lossy(&raw));
                }
            }
            // Entity and character references inside text are reported as
            // their own events and resolved here.
            Event::GeneralRef(reference) => {
                if let Some(&id) = stack.last() {
                    if let Some(ch) = reference.resolve_char_ref()? {
                        elements[id].text.push(ch);
                    } else {
                        let name = String::from_utf8_lossy(&reference).into_owned();
                        match resolve_predefined_entity(&name) {
                            Some(resolved) => elements[id].text.push_str(resolved),
                            None => {
                                return Err(ConfigError::Malformed(
                                    "unknown entity reference",
                                ));
                            }
                        }
                    }
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry no configuration data.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ConfigError::Malformed(
            "document ended before all elements were closed",
        ));
    }
    let root = root.ok_or(ConfigError::Malformed("document has no top-level element"))?;

    debug!(
        "parsed configuration document with {} elements",
        elements.len()
    );
    Ok(Document::new(elements, root))
}

#[cfg(test)]
mod tests {
    use super::parse_str;
    use crate::error::ConfigError;

    #[test]
    fn test_parse_basic_structure() {
        let doc = parse_str("<config><a>1</a><b x=\"y\">2</b></config>").unwrap();
        let root = doc.root();
        assert_eq!(doc.name(root), "config");
        let children = doc.children(root);
        assert_eq!(children.len(), 2);
        assert_eq!(doc.name(children[0]), "a");
        assert_eq!(doc.text(children[0]), "1");
        assert_eq!(doc.attribute(children[1], "x"), Some("y"));
    }

    #[test]
    fn test_text_is_trimmed() {
        let doc = parse_str("<config><a>\n   padded   \n</a></config>").unwrap();
        let a = doc.first_child_named(doc.root(), "a").unwrap();
        assert_eq!(doc.text(a), "padded");
    }

    #[test]
    fn test_empty_element_has_empty_text() {
        let doc = parse_str("<config><a/></config>").unwrap();
        let a = doc.first_child_named(doc.root(), "a").unwrap();
        assert_eq!(doc.text(a), "");
        assert!(doc.children(a).is_empty());
    }

    #[test]
    fn test_entities_are_unescaped() {
        let doc = parse_str("<config><a name=\"x&amp;y\">fish&amp;chips</a></config>").unwrap();
        let a = doc.first_child_named(doc.root(), "a").unwrap();
        assert_eq!(doc.text(a), "fish&chips");
        assert_eq!(doc.attribute(a, "name"), Some("x&y"));
    }

    #[test]
    fn test_entity_keeps_adjacent_whitespace() {
        let doc = parse_str("<config><v>fish &amp; chips</v></config>").unwrap();
        let v = doc.first_child_named(doc.root(), "v").unwrap();
        assert_eq!(doc.text(v), "fish & chips");
    }

    #[test]
    fn test_character_references() {
        let doc = parse_str("<config><a>&#65;&#x42;</a></config>").unwrap();
        let a = doc.first_child_named(doc.root(), "a").unwrap();
        assert_eq!(doc.text(a), "AB");
    }

    #[test]
    fn test_cdata_text() {
        let doc = parse_str("<config><a><![CDATA[<raw>]]></a></config>").unwrap();
        let a = doc.first_child_named(doc.root(), "a").unwrap();
        assert_eq!(doc.text(a), "<raw>");
    }

    #[test]
    fn test_empty_input_is_malformed() {
        assert!(matches!(parse_str(""), Err(ConfigError::Malformed(_))));
    }

    #[test]
    fn test_second_top_level_element_is_malformed() {
        assert!(matches!(
            parse_str("<a></a><b></b>"),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn test_mismatched_tags_are_rejected() {
        let result = parse_str("<a><b></a></b>");
        assert!(
            matches!(
                result,
                Err(ConfigError::Xml(_)) | Err(ConfigError::Malformed(_))
            ),
            "expected a parse failure, got {:?}",
            result
        );
    }
}
