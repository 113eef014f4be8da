//! Resolve the fill color the caption text should use.
//!
//! SVG text color is usually not set on the `<text>` elements themselves but
//! inherited from a parent, either as a `fill` presentation attribute or
//! inside an inline `style`. To blend in with the existing labels, the
//! caption borrows the effective color of the document's first text element:
//! walk from that element up to the root and take the first fill found,
//! checking the inline style before the attribute on each level.

use crate::config::Config;
use crate::dom::XmlNode;

/// Effective fill color of the first `<text>` element under `root`, falling
/// back to the configured default when the document provides none (or has no
/// text at all).
pub fn resolve_fill_color(root: &XmlNode, config: &Config) -> String {
    let mut path = Vec::new();
    if !find_first_text(root, &config.svg_namespace, &mut path) {
        tracing::debug!("document has no text element, using default fill");
        return config.default_fill.clone();
    }

    // Innermost level first.
    for node in path.iter().rev() {
        if let Some(style) = node.attr("style") {
            if let Some(fill) = fill_from_style(style) {
                return fill;
            }
        }
        if let Some(fill) = node.attr("fill") {
            return fill.to_string();
        }
    }
    config.default_fill.clone()
}

/// Depth-first search for the first text element; on success `path` holds
/// the chain from `node` down to the match, both inclusive.
fn find_first_text<'a>(node: &'a XmlNode, svg_ns: &str, path: &mut Vec<&'a XmlNode>) -> bool {
    path.push(node);
    if node.is(svg_ns, "text") {
        return true;
    }
    for child in &node.children {
        if find_first_text(child, svg_ns, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Extract the value of the `fill` declaration from an inline CSS style.
fn fill_from_style(style: &str) -> Option<String> {
    for declaration in style.split(';') {
        if let Some((property, value)) = declaration.split_once(':') {
            if property.trim() == "fill" {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}
