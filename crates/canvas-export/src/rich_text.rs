//! Plain-text extraction from tldraw rich-text trees.
//!
//! tldraw stores shape labels as ProseMirror-style documents: an object
//! whose `content` array holds paragraph nodes, which in turn hold leaf
//! nodes of type `"text"` carrying the literal text.

use serde_json::Value;

/// Flatten a rich-text node tree to plain text.
///
/// Extraction is depth-first, left-to-right. Sibling leaves are joined
/// with no separator; top-level `content` items are joined with a
/// newline. Returns `None` when the value is not a rich-text object or
/// the extracted text is empty.
pub fn extract_rich_text(value: &Value) -> Option<String> {
    let content = value.as_object()?.get("content")?.as_array()?;

    let result = content
        .iter()
        .map(extract_node)
        .collect::<Vec<_>>()
        .join("\n");

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

/// Extract text from a single node, recursing into containers.
fn extract_node(node: &Value) -> String {
    let Some(obj) = node.as_object() else {
        return String::new();
    };

    if obj.get("type").and_then(Value::as_str) == Some("text") {
        if let Some(text) = obj.get("text").and_then(Value::as_str) {
            return text.to_string();
        }
    }

    if let Some(children) = obj.get("content").and_then(Value::as_array) {
        return children.iter().map(extract_node).collect::<Vec<_>>().join("");
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_single_paragraph() {
        let rich = json!({
            "type": "doc",
            "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "hello"}]}
            ]
        });
        assert_eq!(extract_rich_text(&rich).as_deref(), Some("hello"));
    }

    #[test]
    fn test_siblings_join_without_separator_paragraphs_with_newline() {
        // Two sibling leaves "A" and "B" under one container, then a
        // second top-level container with leaf "C" -> "AB\nC".
        let rich = json!({
            "type": "doc",
            "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "A"},
                    {"type": "text", "text": "B"}
                ]},
                {"type": "paragraph", "content": [{"type": "text", "text": "C"}]}
            ]
        });
        assert_eq!(extract_rich_text(&rich).as_deref(), Some("AB\nC"));
    }

    #[test]
    fn test_nested_marks_are_flattened() {
        let rich = json!({
            "content": [
                {"type": "paragraph", "content": [
                    {"type": "bold", "content": [{"type": "text", "text": "strong"}]},
                    {"type": "text", "text": " tail"}
                ]}
            ]
        });
        assert_eq!(extract_rich_text(&rich).as_deref(), Some("strong tail"));
    }

    #[test]
    fn test_non_object_input_is_none() {
        assert_eq!(extract_rich_text(&json!("plain string")), None);
        assert_eq!(extract_rich_text(&json!(null)), None);
        assert_eq!(extract_rich_text(&json!(42)), None);
    }

    #[test]
    fn test_missing_or_invalid_content_is_none() {
        assert_eq!(extract_rich_text(&json!({"type": "doc"})), None);
        assert_eq!(extract_rich_text(&json!({"content": "not an array"})), None);
    }

    #[test]
    fn test_empty_tree_is_none() {
        assert_eq!(extract_rich_text(&json!({"content": []})), None);
    }
}
