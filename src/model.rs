// src/model.rs

//! Arena-backed element tree for a parsed configuration document.
//!
//! Elements are stored in a flat `Vec` and addressed by [`ElementId`], so the
//! public navigation API hands out cheap copyable ids instead of borrowed
//! node references. The tree is immutable once built.

/// Index of an element within its owning [`Document`].
///
/// Ids are only meaningful for the document that produced them; passing an id
/// from one document to another is a caller error.
pub type ElementId = usize;

/// A single element: name, accumulated text, attributes and child ids,
/// all in document order.
#[derive(Debug)]
pub(crate) struct Element {
    pub(crate) name: String,
    pub(crate) text: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) children: Vec<ElementId>,
}

/// A fully parsed configuration document.
///
/// Owned exclusively by the reader that created it and immutable after
/// parsing. All navigation methods expect ids obtained from this same
/// document; an out-of-range id is an internal invariant violation and
/// will panic.
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
    root: ElementId,
}

impl Document {
    pub(crate) fn new(elements: Vec<Element>, root: ElementId) -> Self {
        Document { elements, root }
    }

    /// Id of the single top-level element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// True if `id` refers to an element of this document.
    pub fn contains(&self, id: ElementId) -> bool {
        id < self.elements.len()
    }

    /// The element's tag name.
    pub fn name(&self, id: ElementId) -> &str {
        &self.elements[id].name
    }

    /// The text directly inside the element (surrounding whitespace trimmed).
    pub fn text(&self, id: ElementId) -> &str {
        &self.elements[id].text
    }

    /// All attributes of the element, in document order.
    pub fn attributes(&self, id: ElementId) -> &[(String, String)] {
        &self.elements[id].attributes
    }

    /// Value of the named attribute, if present.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements[id]
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All child elements, in document order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.elements[id].children
    }

    /// Child elements with the given tag name, in document order.
    pub fn children_named<'a>(
        &'a self,
        id: ElementId,
        name: &'a str,
    ) -> impl Iterator<Item = ElementId> + 'a {
        self.elements[id]
            .children
            .iter()
            .copied()
            .filter(move |&child| self.elements[child].name == name)
    }

    /// First child element with the given tag name, if any.
    pub fn first_child_named(&self, id: ElementId, name: &str) -> Option<ElementId> {
        self.children_named(id, name).next()
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_str;

    const XML: &str = r#"<root>
        <item kind="a">one</item>
        <item kind="b">two</item>
        <other/>
    </root>"#;

    #[test]
    fn test_navigation() {
        let doc = parse_str(XML).unwrap();
        let root = doc.root();
        assert_eq!(doc.name(root), "root");
        assert_eq!(doc.children(root).len(), 3);

        let items: Vec<_> = doc.children_named(root, "item").collect();
        assert_eq!(items.len(), 2);
        assert_eq!(doc.text(items[0]), "one");
        assert_eq!(doc.text(items[1]), "two");
        assert_eq!(doc.attribute(items[0], "kind"), Some("a"));
        assert_eq!(doc.attribute(items[0], "missing"), None);

        let first = doc.first_child_named(root, "item").unwrap();
        assert_eq!(first, items[0]);
        assert_eq!(doc.first_child_named(root, "nothing"), None);
    }

    #[test]
    fn test_contains() {
        let doc = parse_str(XML).unwrap();
        assert!(doc.contains(doc.root()));
        assert!(!doc.contains(1000));
    }
}
