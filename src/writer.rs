//! Generate SVG/XML text from an [`XmlNode`] tree.
//!
//! The writer re-emits exactly what the tree carries: attribute order,
//! element order, and the interleaved `text`/`tail` runs. No indentation is
//! invented, so a document that was only partially rewritten keeps its
//! original formatting everywhere else. Namespace declarations are collected
//! onto the root element, using the prefixes recorded at parse time.

use indexmap::IndexSet;

use crate::dom::{Namespaces, QName, XmlNode};

/// The reserved `xml` namespace (e.g. `xml:space`). Its prefix is fixed by
/// the XML standard and must never be declared.
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Generate the XML text for a document rooted at `root`.
///
/// The output starts with an XML declaration (`utf-8`, as browsers and SVG
/// viewers expect) and declares every namespace the tree actually uses on
/// the root element. URIs not present in `namespaces` get generated `ns{i}`
/// prefixes.
pub fn serialize_document(root: &XmlNode, namespaces: &Namespaces) -> String {
    let mut used = IndexSet::new();
    collect_uris(root, &mut used);

    let mut ns = namespaces.clone();
    ns.declare(XML_NS, "xml");
    for uri in &used {
        ns.declare(uri, "");
    }

    let mut out = String::with_capacity(4096);
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    write_element(&mut out, root, &ns, Some(&used));
    out
}

fn collect_uris(node: &XmlNode, used: &mut IndexSet<String>) {
    if let Some(uri) = &node.tag.namespace {
        used.insert(uri.clone());
    }
    for name in node.attrs.keys() {
        if let Some(uri) = &name.namespace {
            used.insert(uri.clone());
        }
    }
    for child in &node.children {
        collect_uris(child, used);
    }
}

/// Qualified form of an element tag: `local`, or `prefix:local` when the
/// tag's namespace is mapped to a non-empty prefix.
fn tag_name(tag: &QName, ns: &Namespaces) -> String {
    let prefix = tag
        .namespace
        .as_deref()
        .and_then(|uri| ns.prefix_for(uri))
        .unwrap_or("");
    if prefix.is_empty() {
        tag.name.clone()
    } else {
        format!("{prefix}:{}", tag.name)
    }
}

fn write_element(out: &mut String, node: &XmlNode, ns: &Namespaces, root_uris: Option<&IndexSet<String>>) {
    let name = tag_name(&node.tag, ns);
    out.push('<');
    out.push_str(&name);

    // Only the root element declares namespaces, and only those in use.
    if let Some(used) = root_uris {
        for (uri, prefix) in ns.iter() {
            if !used.contains(uri) || uri == XML_NS {
                continue;
            }
            if prefix.is_empty() {
                out.push_str(&format!(" xmlns=\"{}\"", xml_escape_attr(uri)));
            } else {
                out.push_str(&format!(" xmlns:{}=\"{}\"", prefix, xml_escape_attr(uri)));
            }
        }
    }

    for (attr, value) in &node.attrs {
        out.push(' ');
        out.push_str(&tag_name(attr, ns));
        out.push_str(&format!("=\"{}\"", xml_escape_attr(value)));
    }

    if node.text.is_none() && node.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    if let Some(text) = &node.text {
        out.push_str(&xml_escape(text));
    }
    for child in &node.children {
        write_element(out, child, ns, None);
        if let Some(tail) = &child.tail {
            out.push_str(&xml_escape(tail));
        }
    }
    out.push_str(&format!("</{name}>"));
}

/// Escape text content for XML. Encodes `&`, `<`, `>`, `"`, and `'` even in
/// text content, so the output never depends on context.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape an attribute value for XML. Like [`xml_escape`] but also encodes
/// newlines as `&#xA;` and carriage returns as `&#xD;`.
fn xml_escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            _ => out.push(ch),
        }
    }
    out
}
