use camino::Utf8Path;
use svgballoon::config::Config;
use svgballoon::dom::{SVG_NS, XLINK_NS};
use svgballoon::parser::{SvgDocument, parse_svg};
use svgballoon::rewrite::apply_annotations;
use svgballoon::store::AnnotationRecord;
use svgballoon::writer::serialize_document;

fn parse(xml: &str) -> SvgDocument {
    parse_svg(xml, Utf8Path::new("inline.svg"), &Config::default()).expect("parse fixture")
}

fn record(element: &str, balloon: &str, link: &str) -> AnnotationRecord {
    AnnotationRecord {
        element: element.to_string(),
        balloon: balloon.to_string(),
        link: link.to_string(),
    }
}

#[test]
fn balloon_becomes_title_child_keeping_the_label_visible() {
    let mut doc = parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><text x="10" y="20">Hello</text></svg>"#);
    let records = vec![record("Hello", "Tooltip text", "")];

    let modified = apply_annotations(&mut doc.root, &records, &Config::default());
    assert_eq!(modified, 1);

    let text_el = &doc.root.children[0];
    // The direct text moved onto the tail of the injected <title>, so the
    // rendered label is unchanged while hovering shows the balloon.
    assert_eq!(text_el.text, None);
    let title = &text_el.children[0];
    assert!(title.is(SVG_NS, "title"));
    assert_eq!(title.text.as_deref(), Some("Tooltip text"));
    assert_eq!(title.tail.as_deref(), Some("Hello"));

    let xml = serialize_document(&doc.root, &doc.namespaces);
    assert!(xml.contains("<text x=\"10\" y=\"20\"><title>Tooltip text</title>Hello</text>"));
}

#[test]
fn link_wraps_the_text_element_in_place() {
    let mut doc = parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="5" height="5"/><text>Docs</text><circle r="2"/></svg>"#,
    );
    let records = vec![record("Docs", "", "https://docs.example.com")];

    let modified = apply_annotations(&mut doc.root, &records, &Config::default());
    assert_eq!(modified, 1);

    // Sibling order: rect, anchor (wrapping the text), circle.
    assert!(doc.root.children[0].is(SVG_NS, "rect"));
    let anchor = &doc.root.children[1];
    assert!(anchor.is(SVG_NS, "a"));
    assert_eq!(anchor.attr_ns(XLINK_NS, "href"), Some("https://docs.example.com"));
    assert_eq!(anchor.attr("target"), Some("_blank"));
    assert!(anchor.children[0].is(SVG_NS, "text"));
    assert_eq!(anchor.children[0].text.as_deref(), Some("Docs"));
    assert!(doc.root.children[2].is(SVG_NS, "circle"));

    let xml = serialize_document(&doc.root, &doc.namespaces);
    assert!(xml.contains(
        "<a xlink:href=\"https://docs.example.com\" target=\"_blank\"><text>Docs</text></a>"
    ));
    assert!(xml.contains("xmlns:xlink=\"http://www.w3.org/1999/xlink\""));
}

#[test]
fn balloon_and_link_combine_on_one_label() {
    let mut doc = parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><text>Build</text></svg>"#);
    let records = vec![record("Build", "CI pipeline", "https://ci.example.com")];

    apply_annotations(&mut doc.root, &records, &Config::default());

    let anchor = &doc.root.children[0];
    assert!(anchor.is(SVG_NS, "a"));
    let text_el = &anchor.children[0];
    let title = &text_el.children[0];
    assert_eq!(title.text.as_deref(), Some("CI pipeline"));
    assert_eq!(title.tail.as_deref(), Some("Build"));
}

#[test]
fn labels_match_after_trimming_but_content_is_preserved() {
    let mut doc = parse("<svg xmlns=\"http://www.w3.org/2000/svg\"><text>\n    Hello  </text></svg>");
    let records = vec![record("Hello", "Tip", "")];

    let modified = apply_annotations(&mut doc.root, &records, &Config::default());
    assert_eq!(modified, 1);

    // The untrimmed original text survives as the title's tail.
    let title = &doc.root.children[0].children[0];
    assert_eq!(title.tail.as_deref(), Some("\n    Hello  "));
}

#[test]
fn unmatched_document_serializes_unchanged() {
    let xml = r#"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="400">
  <g style="fill:#1a1a2e">
    <rect x="10" y="10" width="120" height="24"/>
    <text x="20" y="26">Deployment</text>
  </g>
</svg>"#;
    let doc = parse(xml);
    let before = serialize_document(&doc.root, &doc.namespaces);

    let mut doc = parse(xml);
    let records = vec![record("Some other label", "tip", "")];
    let modified = apply_annotations(&mut doc.root, &records, &Config::default());
    let after = serialize_document(&doc.root, &doc.namespaces);

    assert_eq!(modified, 0);
    assert_eq!(before, after);
}

#[test]
fn blank_records_leave_the_tree_alone() {
    let xml = r#"<svg xmlns="http://www.w3.org/2000/svg"><text>Hello</text></svg>"#;
    let mut doc = parse(xml);
    let before = serialize_document(&doc.root, &doc.namespaces);

    let records = vec![record("Hello", "", "")];
    let modified = apply_annotations(&mut doc.root, &records, &Config::default());

    assert_eq!(modified, 0);
    assert_eq!(serialize_document(&doc.root, &doc.namespaces), before);
}

#[test]
fn nested_groups_are_traversed() {
    let mut doc = parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g><g><text>Deep</text></g></g></svg>"#,
    );
    let records = vec![record("Deep", "nested tooltip", "")];

    let modified = apply_annotations(&mut doc.root, &records, &Config::default());
    assert_eq!(modified, 1);

    let text_el = &doc.root.children[0].children[0].children[0];
    assert_eq!(text_el.children[0].text.as_deref(), Some("nested tooltip"));
}

#[test]
fn text_under_defs_is_left_alone() {
    // Only the document root and <g> containers are searched; a matching
    // label under <defs> stays untouched.
    let mut doc = parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><defs><text>Hello</text></defs><text>Hello</text></svg>"#,
    );
    let records = vec![record("Hello", "Tip", "")];

    let modified = apply_annotations(&mut doc.root, &records, &Config::default());
    assert_eq!(modified, 1);

    let defs_text = &doc.root.children[0].children[0];
    assert!(defs_text.children.is_empty());
    assert_eq!(defs_text.text.as_deref(), Some("Hello"));

    let root_text = &doc.root.children[1];
    assert_eq!(root_text.children[0].text.as_deref(), Some("Tip"));
}

#[test]
fn existing_tooltip_is_replaced_not_stacked() {
    let mut doc = parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><text>Hello<title>stale tooltip</title></text></svg>"#,
    );
    let records = vec![record("Hello", "fresh tooltip", "")];

    apply_annotations(&mut doc.root, &records, &Config::default());

    let text_el = &doc.root.children[0];
    let titles: Vec<_> = text_el
        .children
        .iter()
        .filter(|c| c.is(SVG_NS, "title"))
        .collect();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].text.as_deref(), Some("fresh tooltip"));
    assert_eq!(titles[0].tail.as_deref(), Some("Hello"));
}

#[test]
fn empty_balloon_with_link_only_wraps_without_title() {
    let mut doc = parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><text>Hello</text></svg>"#);
    let records = vec![record("Hello", "", "https://example.com")];

    let modified = apply_annotations(&mut doc.root, &records, &Config::default());
    assert_eq!(modified, 1);

    let anchor = &doc.root.children[0];
    let text_el = &anchor.children[0];
    assert_eq!(text_el.text.as_deref(), Some("Hello"));
    assert!(text_el.children.is_empty());
}

#[test]
fn last_record_wins_when_a_label_is_listed_twice() {
    let mut doc = parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><text>Hello</text></svg>"#);
    let records = vec![record("Hello", "first", ""), record("Hello", "second", "")];

    apply_annotations(&mut doc.root, &records, &Config::default());

    let title = &doc.root.children[0].children[0];
    assert_eq!(title.text.as_deref(), Some("second"));
}

#[test]
fn every_occurrence_of_a_duplicate_label_is_annotated() {
    let mut doc = parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><text>Node</text><g><text>Node</text></g></svg>"#,
    );
    let records = vec![record("Node", "shared", "")];

    let modified = apply_annotations(&mut doc.root, &records, &Config::default());
    assert_eq!(modified, 2);
}

#[test]
fn annotated_output_reparses_cleanly() {
    let mut doc = parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
  <g><text>A &amp; B</text></g>
</svg>"#,
    );
    let records = vec![record("A & B", "50% <fast>", "https://example.com/?a=1&b=2")];

    let modified = apply_annotations(&mut doc.root, &records, &Config::default());
    assert_eq!(modified, 1);

    let xml = serialize_document(&doc.root, &doc.namespaces);
    let reparsed = parse(&xml);
    let anchor = &reparsed.root.children[0].children[0];
    assert_eq!(
        anchor.attr_ns(XLINK_NS, "href"),
        Some("https://example.com/?a=1&b=2")
    );
    assert_eq!(
        anchor.children[0].children[0].text.as_deref(),
        Some("50% <fast>")
    );
}
