//! Append caption lines below the graphic.
//!
//! The canvas is grown by exactly the space the caption needs, so the new
//! text never overlaps existing content: the `height` attribute of the root
//! is raised by `lines * lineSpacing + offsetY`, and the first caption line
//! starts right at the old bottom edge. An optional link caption occupies
//! one extra line and is wrapped in `<a>` like an annotated label.

use crate::config::Config;
use crate::dom::{QName, XmlNode};
use crate::style;

/// Append `lines` (and, if given, a `[url, display text]` link caption) to
/// the bottom of the document.
///
/// A malformed link caption is reported and skipped; the caption lines are
/// still emitted. With no lines and no link this is a no-op.
pub fn append_caption(root: &mut XmlNode, lines: &[String], link: Option<&[String]>, config: &Config) {
    let link_requested = link.is_some_and(|values| !values.is_empty());
    let line_count = lines.len() + usize::from(link_requested);
    if line_count == 0 {
        return;
    }

    let fill = style::resolve_fill_color(root, config);
    let caption = &config.caption;
    let spacing = caption.line_spacing();
    let [offset_x, offset_y] = caption.offset;

    let height = match root.attr("height") {
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(height) => height,
            Err(_) => {
                tracing::warn!(
                    "cannot parse root height attribute {:?}, assuming {}",
                    raw,
                    caption.default_height
                );
                caption.default_height
            }
        },
        None => {
            tracing::warn!(
                "document root has no height attribute, assuming {}",
                caption.default_height
            );
            caption.default_height
        }
    };

    let new_height = height + line_count as f64 * spacing + offset_y;
    root.set_attr(QName::bare("height"), fmt_number(new_height));

    let first_line_y = new_height - offset_y - line_count as f64 * spacing;

    for (i, line) in lines.iter().enumerate() {
        let text_el = caption_line(line, offset_x, first_line_y, i as f64 * spacing, &fill, config);
        root.children.push(text_el);
    }

    if let Some(values) = link {
        if link_requested {
            append_link_caption(root, values, offset_x, first_line_y, (line_count - 1) as f64 * spacing, &fill, config);
        }
    }

    tracing::info!(
        "appended {} caption line(s), height {} -> {}",
        line_count,
        fmt_number(height),
        fmt_number(new_height)
    );
}

/// The link caption is a caption line wrapped in `<a xlink:href>`, sitting
/// in the last line slot. Anything other than exactly `[url, display text]`
/// is reported and skipped (the slot stays reserved).
fn append_link_caption(
    root: &mut XmlNode,
    values: &[String],
    x: f64,
    y: f64,
    dy: f64,
    fill: &str,
    config: &Config,
) {
    let [url, display] = values else {
        tracing::warn!(
            "link caption needs exactly [url, display text], got {} value(s), skipping it",
            values.len()
        );
        return;
    };

    let text_el = caption_line(display, x, y, dy, fill, config);
    let mut anchor = XmlNode::new(QName::ns(&config.svg_namespace, "a"));
    anchor.set_attr(QName::ns(&config.xlink_namespace, "href"), url.as_str());
    anchor.set_attr(QName::bare("target"), "_blank");
    anchor.children.push(text_el);
    root.children.push(anchor);
}

fn caption_line(content: &str, x: f64, y: f64, dy: f64, fill: &str, config: &Config) -> XmlNode {
    let mut text_el = XmlNode::new(QName::ns(&config.svg_namespace, "text"));
    text_el.set_attr(QName::bare("x"), fmt_number(x));
    text_el.set_attr(QName::bare("y"), fmt_number(y));
    text_el.set_attr(QName::bare("dy"), fmt_number(dy));
    text_el.set_attr(QName::bare("fill"), fill);
    text_el.set_attr(QName::bare("stroke"), "none");
    text_el.set_attr(QName::bare("font-size"), fmt_number(config.caption.font_size));
    text_el.set_attr(QName::bare("font-family"), config.caption.font_family.as_str());
    text_el.text = Some(content.to_string());
    text_el
}

/// Format a coordinate with at most two decimals and no trailing zeros, so
/// `400.0` comes out as `400` and `434.4` stays `434.4`.
fn fmt_number(value: f64) -> String {
    let mut out = format!("{value:.2}");
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    out
}
