// src/reader.rs

//! Section-scoped typed accessors over a parsed configuration document.
//!
//! A [`ConfigReader`] owns the parsed [`Document`], remembers the configured
//! section name, and resolves every lookup against the *current section*
//! (initially the named child of the document's top-level element). The
//! current section can be redirected manually with
//! [`set_current_section`](ConfigReader::set_current_section) or by walking a
//! [`Cursor`] over repeated child elements.
//!
//! A reader is plain single-threaded mutable state: it has no interior
//! mutability and no locking, and is not meant to be shared across threads.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};

use crate::error::ConfigError;
use crate::model::{Document, ElementId};
use crate::parser;

/// Reads an XML configuration file and answers typed lookups against one
/// named section of it.
///
/// ```
/// use xml_config_reader::ConfigReader;
///
/// let xml = r#"
/// <config>
///   <server>
///     <host>example.net</host>
///     <port>8080</port>
///   </server>
/// </config>"#;
///
/// let reader = ConfigReader::from_str(xml, "server")?;
/// assert_eq!(reader.get_string("host")?, "example.net");
/// assert_eq!(reader.get_i32("port")?, 8080);
/// assert_eq!(reader.get_i32_or(30, "timeout"), 30);
/// # Ok::<(), xml_config_reader::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct ConfigReader {
    doc: Document,
    section_name: String,
    current: ElementId,
}

impl ConfigReader {
    /// Parses the file at `path` and scopes the reader to the top-level
    /// child element named `section_name`.
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, a parse-time error if
    /// it is not well-formed XML, or [`ConfigError::ElementNotFound`] if the
    /// section does not exist.
    pub fn open(path: impl AsRef<Path>, section_name: &str) -> Result<Self, ConfigError> {
        let doc = parser::parse_file(path.as_ref())?;
        Self::with_document(doc, section_name)
    }

    /// Same as [`open`](Self::open), but parses an in-memory XML string.
    pub fn from_str(xml: &str, section_name: &str) -> Result<Self, ConfigError> {
        let doc = parser::parse_str(xml)?;
        Self::with_document(doc, section_name)
    }

    fn with_document(doc: Document, section_name: &str) -> Result<Self, ConfigError> {
        let current = resolve_section(&doc, section_name)?;
        debug!("configuration section '{}' resolved", section_name);
        Ok(ConfigReader {
            doc,
            section_name: section_name.to_owned(),
            current,
        })
    }

    /// The parsed document, for callers that navigate the tree manually.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The element all lookups currently resolve against.
    pub fn current_section(&self) -> ElementId {
        self.current
    }

    /// The section name the reader was constructed with.
    pub fn section_name(&self) -> &str {
        &self.section_name
    }

    /// Redirects the current section.
    ///
    /// `Some(id)` points lookups at an arbitrary element of this document
    /// (typically one yielded by a [`Cursor`] or by manual navigation via
    /// [`document`](Self::document)). `None` re-resolves the configured
    /// top-level section, with the same failure rule as construction.
    ///
    /// # Errors
    /// [`ConfigError::Read`] if `id` does not belong to this document;
    /// [`ConfigError::ElementNotFound`] if resolving `None` and the
    /// configured section no longer matches. The current section is left
    /// unchanged on error.
    pub fn set_current_section(&mut self, element: Option<ElementId>) -> Result<(), ConfigError> {
        match element {
            Some(id) if self.doc.contains(id) => {
                self.current = id;
                Ok(())
            }
            Some(_) => Err(ConfigError::Read(
                "element id does not belong to this document".to_owned(),
            )),
            None => {
                self.current = resolve_section(&self.doc, &self.section_name)?;
                Ok(())
            }
        }
    }

    /// Restores the current section to the configured top-level section.
    ///
    /// Equivalent to `set_current_section(None)`; the usual way to finish a
    /// cursor walk.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.set_current_section(None)
    }

    /// Takes a snapshot cursor over the current section's children named
    /// `element_name` (possibly empty), positioned before the first one.
    ///
    /// The cursor is an owned value; taking another one does not invalidate
    /// it, and advancing it does not move the current section. To read from
    /// a visited element, point the reader at it:
    ///
    /// ```
    /// use xml_config_reader::ConfigReader;
    ///
    /// let xml = r#"
    /// <config>
    ///   <people>
    ///     <person><name>ada</name><age>36</age></person>
    ///     <person><name>bob</name><age>41</age></person>
    ///   </people>
    /// </config>"#;
    ///
    /// let mut reader = ConfigReader::from_str(xml, "people")?;
    /// let mut cursor = reader.step_into("person");
    /// while let Some(person) = cursor.next() {
    ///     reader.set_current_section(Some(person))?;
    ///     let _name = reader.get_string("name")?;
    ///     let _age = reader.get_i32("age")?;
    /// }
    /// reader.reset()?;
    /// # Ok::<(), xml_config_reader::ConfigError>(())
    /// ```
    pub fn step_into(&self, element_name: &str) -> Cursor {
        let items: Vec<ElementId> = self.doc.children_named(self.current, element_name).collect();
        Cursor {
            items: items.into_iter(),
        }
    }

    /// Retrieves an `i32` from the single child named `element_name`.
    ///
    /// If several children share the name, only the first one is read.
    ///
    /// # Errors
    /// [`ConfigError::ElementNotFound`] if no such child exists;
    /// [`ConfigError::ParseValue`] if its text is not an optionally signed
    /// base-10 integer in range (overflow included).
    pub fn get_i32(&self, element_name: &str) -> Result<i32, ConfigError> {
        self.parse_scalar(element_name, "32-bit integer")
    }

    /// Like [`get_i32`](Self::get_i32), but returns `default` instead of
    /// failing when the element is missing or unparseable.
    pub fn get_i32_or(&self, default: i32, element_name: &str) -> i32 {
        self.get_i32(element_name).unwrap_or(default)
    }

    /// Retrieves an `i64` from the single child named `element_name`.
    ///
    /// # Errors
    /// Same as [`get_i32`](Self::get_i32), for the 64-bit range.
    pub fn get_i64(&self, element_name: &str) -> Result<i64, ConfigError> {
        self.parse_scalar(element_name, "64-bit integer")
    }

    /// Like [`get_i64`](Self::get_i64), but returns `default` instead of
    /// failing when the element is missing or unparseable.
    pub fn get_i64_or(&self, default: i64, element_name: &str) -> i64 {
        self.get_i64(element_name).unwrap_or(default)
    }

    /// Retrieves a `bool` from the single child named `element_name`.
    ///
    /// Parsing is deliberately lenient: text matching `true`
    /// case-insensitively is `true`, anything else is `false`. There is no
    /// parse failure for booleans.
    ///
    /// # Errors
    /// [`ConfigError::ElementNotFound`] if no such child exists.
    pub fn get_bool(&self, element_name: &str) -> Result<bool, ConfigError> {
        Ok(self.child_text(element_name)?.eq_ignore_ascii_case("true"))
    }

    /// Like [`get_bool`](Self::get_bool), but returns `default` instead of
    /// failing when the element is missing.
    pub fn get_bool_or(&self, default: bool, element_name: &str) -> bool {
        self.get_bool(element_name).unwrap_or(default)
    }

    /// Retrieves the text of the single child named `element_name`.
    ///
    /// # Errors
    /// [`ConfigError::ElementNotFound`] if no such child exists. Any text,
    /// including empty, is a valid string.
    pub fn get_string(&self, element_name: &str) -> Result<String, ConfigError> {
        self.child_text(element_name).map(str::to_owned)
    }

    /// Like [`get_string`](Self::get_string), but returns `default` instead
    /// of failing when the element is missing.
    pub fn get_string_or(&self, default: &str, element_name: &str) -> String {
        self.get_string(element_name)
            .unwrap_or_else(|_| default.to_owned())
    }

    /// Text content of every child named `element_name`, in document order.
    ///
    /// Returns an empty vector (not an error) when no such children exist.
    pub fn get_list(&self, element_name: &str) -> Vec<String> {
        self.doc
            .children_named(self.current, element_name)
            .map(|id| self.doc.text(id).to_owned())
            .collect()
    }

    /// Builds a map over every child named `element_name`, keyed by the
    /// value of its `attribute_name` attribute, with the element text as
    /// the value. Duplicate keys are last-write-wins.
    ///
    /// A matching child without that attribute is skipped when
    /// `continue_if_possible` is true.
    ///
    /// # Errors
    /// [`ConfigError::Read`] if a matching child lacks the attribute and
    /// `continue_if_possible` is false.
    pub fn get_map(
        &self,
        element_name: &str,
        attribute_name: &str,
        continue_if_possible: bool,
    ) -> Result<HashMap<String, String>, ConfigError> {
        let mut result = HashMap::new();
        for id in self.doc.children_named(self.current, element_name) {
            match self.doc.attribute(id, attribute_name) {
                Some(key) => {
                    result.insert(key.to_owned(), self.doc.text(id).to_owned());
                }
                None if continue_if_possible => {
                    warn!(
                        "skipping <{}> entry without a '{}' attribute",
                        element_name, attribute_name
                    );
                }
                None => {
                    return Err(ConfigError::Read(format!(
                        "element <{}> lacks an attribute '{}'",
                        element_name, attribute_name
                    )));
                }
            }
        }
        Ok(result)
    }

    /// Builds a map over every child named `element_name`, keyed by the
    /// element text, where each entry collects that child's full attribute
    /// map. Children sharing the same text accumulate their attribute maps
    /// under one key, in encounter order.
    pub fn get_maps(&self, element_name: &str) -> HashMap<String, Vec<HashMap<String, String>>> {
        let mut result: HashMap<String, Vec<HashMap<String, String>>> = HashMap::new();
        for id in self.doc.children_named(self.current, element_name) {
            let attributes: HashMap<String, String> = self
                .doc
                .attributes(id)
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            result
                .entry(self.doc.text(id).to_owned())
                .or_default()
                .push(attributes);
        }
        result
    }

    /// Text of the first child named `element_name`, or `ElementNotFound`.
    fn child_text(&self, element_name: &str) -> Result<&str, ConfigError> {
        self.doc
            .first_child_named(self.current, element_name)
            .map(|id| self.doc.text(id))
            .ok_or_else(|| ConfigError::ElementNotFound {
                element: element_name.to_owned(),
            })
    }

    fn parse_scalar<T: FromStr>(
        &self,
        element_name: &str,
        target: &'static str,
    ) -> Result<T, ConfigError> {
        let text = self.child_text(element_name)?;
        // Malformed literals and out-of-range values both surface here as
        // a ParseValue, never as a panic.
        text.parse().map_err(|_| ConfigError::ParseValue {
            element: element_name.to_owned(),
            value: text.to_owned(),
            target,
        })
    }
}

fn resolve_section(doc: &Document, name: &str) -> Result<ElementId, ConfigError> {
    doc.first_child_named(doc.root(), name)
        .ok_or_else(|| ConfigError::ElementNotFound {
            element: name.to_owned(),
        })
}

/// A caller-owned snapshot of same-named children of the section it was
/// taken from.
///
/// Obtained from [`ConfigReader::step_into`]. It is an ordinary iterator
/// over [`ElementId`]s; stepping past the last element yields `None` rather
/// than anything undefined, and any number of cursors can be live at once.
#[derive(Debug, Clone)]
pub struct Cursor {
    items: std::vec::IntoIter<ElementId>,
}

impl Cursor {
    /// True while unconsumed elements remain.
    pub fn has_next(&self) -> bool {
        self.items.len() > 0
    }
}

impl Iterator for Cursor {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl ExactSizeIterator for Cursor {}

#[cfg(test)]
mod tests {
    use super::ConfigReader;
    use crate::error::ConfigError;

    const XML: &str = r#"<config>
        <s>
            <name>first</name>
            <name>second</name>
        </s>
    </config>"#;

    #[test]
    fn test_scalar_reads_first_duplicate() {
        let reader = ConfigReader::from_str(XML, "s").unwrap();
        assert_eq!(reader.get_string("name").unwrap(), "first");
    }

    #[test]
    fn test_missing_section_fails_at_construction() {
        let result = ConfigReader::from_str(XML, "nope");
        assert!(matches!(
            result,
            Err(ConfigError::ElementNotFound { element }) if element == "nope"
        ));
    }

    #[test]
    fn test_cursor_is_a_detached_snapshot() {
        let mut reader = ConfigReader::from_str(XML, "s").unwrap();
        let mut cursor = reader.step_into("name");
        assert_eq!(cursor.len(), 2);

        // Moving the current section does not disturb the snapshot.
        let first = cursor.next().unwrap();
        reader.set_current_section(Some(first)).unwrap();
        assert!(cursor.has_next());
        assert!(cursor.next().is_some());
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), None);
    }
}
