//! Inject tooltips and hyperlink wrappers into the document tree.
//!
//! For every annotated label the rewriter mutates the matching `<text>`
//! element in place: the balloon text becomes a `<title>` child (SVG's
//! native hover tooltip), and a link turns the element into a child of a
//! freshly inserted `<a xlink:href=...>` at the exact position the text
//! element occupied, so sibling order and surrounding whitespace survive.
//!
//! Only direct children of the document root and of `<g>` containers are
//! candidates; `<defs>`, symbols and other structural containers keep their
//! text untouched.

use std::collections::HashMap;

use crate::config::Config;
use crate::dom::{QName, XmlNode};
use crate::store::AnnotationRecord;

/// `label -> (balloon, link)` for records that carry any content.
type Lookup = HashMap<String, (String, String)>;

/// Apply `records` to the tree rooted at `root`.
///
/// Returns the number of text elements that were annotated. Records with
/// neither balloon nor link are ignored; when a label occurs several times
/// in the table, the last record wins.
pub fn apply_annotations(root: &mut XmlNode, records: &[AnnotationRecord], config: &Config) -> usize {
    let lookup = build_lookup(records);
    if lookup.is_empty() {
        tracing::info!("no annotation content to apply, document left unchanged");
        return 0;
    }

    let mut modified = 0;
    rewrite_container(root, &lookup, config, &mut modified);
    tracing::info!("annotated {} text element(s)", modified);
    modified
}

fn build_lookup(records: &[AnnotationRecord]) -> Lookup {
    let mut lookup = Lookup::new();
    for record in records {
        if record.is_blank() {
            continue;
        }
        lookup.insert(
            record.element.clone(),
            (record.balloon.clone(), record.link.clone()),
        );
    }
    lookup
}

fn rewrite_container(container: &mut XmlNode, lookup: &Lookup, config: &Config, modified: &mut usize) {
    for index in 0..container.children.len() {
        let annotation = {
            let child = &container.children[index];
            if !child.is(&config.svg_namespace, "text") {
                continue;
            }
            let Some(label) = child.trimmed_text() else {
                continue;
            };
            match lookup.get(label) {
                Some(annotation) => annotation.clone(),
                None => continue,
            }
        };
        let (balloon, link) = annotation;
        annotate_text(&mut container.children[index], &balloon, config);
        if !link.is_empty() {
            wrap_in_anchor(container, index, &link, config);
        }
        *modified += 1;
    }

    for child in container.children.iter_mut() {
        if child.is(&config.svg_namespace, "g") {
            rewrite_container(child, lookup, config, modified);
        }
    }
}

/// Replace the element's direct text with a `<title>` child carrying the
/// balloon; the original text lives on as the title's tail, so the rendered
/// label does not change. An empty balloon leaves the text in place and only
/// clears out a tooltip from a previous run.
fn annotate_text(text_el: &mut XmlNode, balloon: &str, config: &Config) {
    if let Some(pos) = text_el
        .children
        .iter()
        .position(|child| is_title(child, config))
    {
        text_el.children.remove(pos);
    }

    let original = text_el.text.take();
    if balloon.is_empty() {
        text_el.text = original;
        return;
    }

    let mut title = XmlNode::new(QName::ns(&config.svg_namespace, "title"));
    title.text = Some(balloon.to_string());
    title.tail = original;
    text_el.children.insert(0, title);
}

/// `<title>` either in the SVG namespace or un-namespaced, as documents from
/// various exporters spell it.
fn is_title(node: &XmlNode, config: &Config) -> bool {
    node.tag.name == "title"
        && (node.tag.namespace.is_none()
            || node.tag.namespace.as_deref() == Some(config.svg_namespace.as_str()))
}

/// Swap the text element at `index` for an `<a>` wrapping it, preserving the
/// position among its siblings.
fn wrap_in_anchor(container: &mut XmlNode, index: usize, link: &str, config: &Config) {
    let text_el = container.children.remove(index);
    let mut anchor = XmlNode::new(QName::ns(&config.svg_namespace, "a"));
    anchor.set_attr(QName::ns(&config.xlink_namespace, "href"), link);
    anchor.set_attr(QName::bare("target"), "_blank");
    anchor.children.push(text_el);
    container.children.insert(index, anchor);
}
