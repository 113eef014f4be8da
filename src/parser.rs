//! Parse an SVG document into the mutable [`XmlNode`] tree.
//!
//! roxmltree gives us a read-only view, so the parser converts it into the
//! crate's own element model: character data becomes the `text`/`tail` runs
//! of the surrounding elements, attributes keep their declared order, and
//! every namespace declaration is recorded so the writer can re-emit the
//! same prefixes. Comments and processing instructions are not part of the
//! model and are dropped.
//!
//! Parsing also harvests the document's label strings: the direct text of
//! every `<text>` element, in document order, trimmed. These drive the
//! annotation table reconciliation.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::config::Config;
use crate::dom::{Namespaces, QName, XmlNode};

/// A parsed SVG document plus everything needed to write it back out.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    /// The root element, usually `<svg>`.
    pub root: XmlNode,
    /// Namespace prefixes declared by the source document.
    pub namespaces: Namespaces,
    /// Trimmed text-label strings in document order. May contain duplicates
    /// if the document repeats a label.
    pub labels: Vec<String>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("SVG file {path} not found")]
    NotFound {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Readable path, unreadable content: permissions, not UTF-8, ...
    #[error("cannot read SVG file {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("SVG file {path} is not well-formed XML")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

/// Read and parse the SVG document at `path`.
pub fn load_svg(path: &Utf8Path, config: &Config) -> Result<SvgDocument, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_owned(),
            source,
        },
        _ => LoadError::Read {
            path: path.to_owned(),
            source,
        },
    })?;
    parse_svg(&text, path, config)
}

/// Parse SVG text. `path` is only used in error messages and diagnostics.
pub fn parse_svg(text: &str, path: &Utf8Path, config: &Config) -> Result<SvgDocument, LoadError> {
    let doc = roxmltree::Document::parse(text).map_err(|source| LoadError::Parse {
        path: path.to_owned(),
        source,
    })?;

    let mut namespaces = Namespaces::new();
    for node in doc.descendants().filter(|n| n.is_element()) {
        for ns in node.namespaces() {
            namespaces.declare(ns.uri(), ns.name().unwrap_or(""));
        }
    }
    // The rewriter injects tooltip and hyperlink elements in these two
    // namespaces, so both must be serializable even when the source document
    // never declared them.
    namespaces.declare(&config.svg_namespace, "");
    namespaces.declare(&config.xlink_namespace, "xlink");

    let root = convert(doc.root_element());

    let mut labels = Vec::new();
    collect_labels(&root, config, &mut labels);
    tracing::info!("parsed {}: {} text label(s)", path, labels.len());

    Ok(SvgDocument {
        root,
        namespaces,
        labels,
    })
}

fn convert(node: roxmltree::Node<'_, '_>) -> XmlNode {
    let tag = QName {
        namespace: node.tag_name().namespace().map(str::to_string),
        name: node.tag_name().name().to_string(),
    };
    let mut el = XmlNode::new(tag);

    for attr in node.attributes() {
        let name = QName {
            namespace: attr.namespace().map(str::to_string),
            name: attr.name().to_string(),
        };
        el.attrs.insert(name, attr.value().to_string());
    }

    for child in node.children() {
        if child.is_element() {
            el.children.push(convert(child));
        } else if child.is_text() {
            if let Some(chunk) = child.text() {
                append_run(&mut el, chunk);
            }
        }
    }
    el
}

/// Attach a run of character data to the element it belongs to: the parent's
/// `text` before any child element exists, the previous sibling's `tail`
/// afterwards. Adjacent runs (e.g. around a CDATA section) concatenate.
fn append_run(el: &mut XmlNode, chunk: &str) {
    let slot = match el.children.last_mut() {
        Some(prev) => prev.tail.get_or_insert_with(String::new),
        None => el.text.get_or_insert_with(String::new),
    };
    slot.push_str(chunk);
}

fn collect_labels(node: &XmlNode, config: &Config, labels: &mut Vec<String>) {
    if node.is(&config.svg_namespace, "text") {
        match node.trimmed_text() {
            Some(label) => labels.push(label.to_string()),
            None => tracing::debug!("skipping <text> element without direct text content"),
        }
    }
    for child in &node.children {
        collect_labels(child, config, labels);
    }
}
