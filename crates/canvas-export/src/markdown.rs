//! Markdown rendering of a canvas's shapes.
//!
//! Shapes are grouped into four buckets (text, links/embeds, images,
//! notes) and emitted as bulleted sections in a fixed order. Geometric
//! shapes that carry a label land in the notes bucket alongside sticky
//! notes, since both convey short annotated content.

use crate::rich_text::extract_rich_text;
use crate::snapshot::Shape;

/// Placeholder emitted when no shape produced any content.
const EMPTY_CANVAS: &str = "(canvas is empty)";

/// Render a Markdown summary of the given shapes.
///
/// Shape order is the order of the slice (canvas-defined). `saved_at` is
/// embedded verbatim in the header quote line, so output is fully
/// deterministic for a given input.
pub fn render_markdown(shapes: &[Shape], name: &str, saved_at: &str) -> String {
    let mut lines: Vec<String> = vec![
        format!("# {}", name),
        String::new(),
        format!("> Saved: {}", saved_at),
        String::new(),
    ];

    let mut texts: Vec<String> = Vec::new();
    let mut embeds: Vec<String> = Vec::new();
    let mut images: Vec<String> = Vec::new();
    let mut notes: Vec<String> = Vec::new();

    for shape in shapes {
        match shape.shape_type.as_str() {
            "text" => {
                if let Some(text) = shape_text(shape) {
                    texts.push(format!("- {}", indent_continuations(&text)));
                }
            }
            "embed" => {
                if let Some(url) = shape.prop_str("url").filter(|u| !u.is_empty()) {
                    embeds.push(format!("- [{}]({})", url, url));
                }
            }
            "image" => {
                let label = shape
                    .prop_str("name")
                    .or_else(|| shape.prop_str("url"))
                    .filter(|s| !s.is_empty())
                    .unwrap_or("(unnamed)");
                images.push(format!("- Image: {}", label));
            }
            "note" => {
                if let Some(text) = shape_text(shape) {
                    notes.push(format!("- 📝 {}", indent_continuations(&text)));
                }
            }
            "geo" => {
                if let Some(text) = shape_text(shape) {
                    notes.push(format!("- {}", indent_continuations(&text)));
                }
            }
            _ => {}
        }
    }

    let mut emitted = false;
    for (heading, bucket) in [
        ("## Text", &texts),
        ("## Links / Embeds", &embeds),
        ("## Images", &images),
        ("## Notes", &notes),
    ] {
        if bucket.is_empty() {
            continue;
        }
        emitted = true;
        lines.push(heading.to_string());
        lines.push(String::new());
        lines.extend(bucket.iter().cloned());
        lines.push(String::new());
    }

    if !emitted {
        lines.push(EMPTY_CANVAS.to_string());
    }

    lines.join("\n")
}

/// Text of a text-bearing shape: rich text preferred, plain `text` prop
/// as fallback. Empty text is treated as absent.
fn shape_text(shape: &Shape) -> Option<String> {
    shape
        .props
        .get("richText")
        .and_then(extract_rich_text)
        .or_else(|| shape.prop_str("text").map(str::to_string))
        .filter(|t| !t.is_empty())
}

/// Indent internal newlines so multi-line text stays one list item.
fn indent_continuations(text: &str) -> String {
    text.replace('\n', "\n  ")
}
