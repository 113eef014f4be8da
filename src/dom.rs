//! Order-preserving XML element model.
//!
//! SVG tooling needs a mutable tree that can be written back out without
//! disturbing anything it did not touch, so elements keep their children in
//! document order and carry interleaved character data explicitly: `text` is
//! the run before the first child, `tail` the run after the element's own
//! closing tag. Attributes use an [`IndexMap`] so they round-trip in the
//! order the source document declared them.

use std::fmt;

use indexmap::IndexMap;

/// The SVG namespace URI.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// The XLink namespace URI (SVG 1.1 hyperlinks).
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

// ─────────────────────────────────────────────────────────────────────────────
// Qualified names
// ─────────────────────────────────────────────────────────────────────────────

/// An expanded XML name: optional namespace URI plus local part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: Option<String>,
    pub name: String,
}

impl QName {
    /// A name inside a namespace.
    pub fn ns(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        QName {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// A name with no namespace (plain attributes like `fill` or `height`).
    pub fn bare(name: impl Into<String>) -> Self {
        QName {
            namespace: None,
            name: name.into(),
        }
    }

    pub fn matches(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }
}

impl fmt::Display for QName {
    /// Clark notation, `{uri}local`, as used in diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(uri) => write!(f, "{{{uri}}}{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Elements
// ─────────────────────────────────────────────────────────────────────────────

/// A single element node.
///
/// `text` holds the character data between the start tag and the first child;
/// `tail` holds the character data between this element's end tag and the
/// next sibling. Both may legitimately be pure whitespace in pretty-printed
/// documents, so they are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlNode {
    pub tag: QName,
    pub attrs: IndexMap<QName, String>,
    pub text: Option<String>,
    pub tail: Option<String>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(tag: QName) -> Self {
        XmlNode {
            tag,
            attrs: IndexMap::new(),
            text: None,
            tail: None,
            children: Vec::new(),
        }
    }

    /// True if this element has the given namespace and local name.
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.tag.matches(namespace, name)
    }

    /// Look up an un-namespaced attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .get(&QName::bare(name))
            .map(String::as_str)
    }

    /// Look up a namespaced attribute.
    pub fn attr_ns(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attrs
            .get(&QName::ns(namespace, name))
            .map(String::as_str)
    }

    pub fn set_attr(&mut self, name: QName, value: impl Into<String>) {
        self.attrs.insert(name, value.into());
    }

    /// Direct text content with surrounding whitespace removed, if any
    /// non-whitespace is present.
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Namespace registry
// ─────────────────────────────────────────────────────────────────────────────

/// Maps namespace URIs to the prefixes the output document should use.
///
/// An empty prefix marks the default namespace. The first declaration for a
/// URI wins, which keeps the prefixes of the source document stable across a
/// rewrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespaces {
    by_uri: IndexMap<String, String>,
}

impl Namespaces {
    pub fn new() -> Self {
        Namespaces::default()
    }

    /// Map a URI to `prefix` unless the URI is already mapped. When the
    /// prefix is already taken by another URI (a document may bind the same
    /// prefix to different URIs in different subtrees), a generated `ns{i}`
    /// prefix is used instead, so every mapping stays unambiguous on the
    /// root element.
    pub fn declare(&mut self, uri: &str, prefix: &str) {
        if self.by_uri.contains_key(uri) {
            return;
        }
        if !self.prefix_taken(prefix) {
            self.by_uri.insert(uri.to_string(), prefix.to_string());
            return;
        }
        let mut i = 0usize;
        loop {
            let candidate = format!("ns{i}");
            if !self.prefix_taken(&candidate) {
                self.by_uri.insert(uri.to_string(), candidate);
                return;
            }
            i += 1;
        }
    }

    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.by_uri.get(uri).map(String::as_str)
    }

    /// Declared mappings as `(uri, prefix)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_uri
            .iter()
            .map(|(uri, prefix)| (uri.as_str(), prefix.as_str()))
    }

    fn prefix_taken(&self, prefix: &str) -> bool {
        self.by_uri.values().any(|p| p == prefix)
    }
}
