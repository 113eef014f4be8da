//! Minimal HTML page embedding the annotated SVG.
//!
//! Browsers only show SVG `<title>` tooltips and follow `xlink:href` links
//! when the graphic is part of an HTML document, so the tool can emit a
//! wrapper page next to the SVG output. The SVG text is embedded verbatim;
//! it is already a well-formed fragment.

/// Wrap `svg` in a standalone HTML page titled `title`.
pub fn wrap_svg(title: &str, svg: &str) -> String {
    let mut out = String::with_capacity(svg.len() + 128);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    out.push_str(&escape_text(title));
    out.push_str("</title>\n</head>\n<body>\n");
    out.push_str(svg);
    out.push_str("\n</body>\n</html>\n");
    out
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
