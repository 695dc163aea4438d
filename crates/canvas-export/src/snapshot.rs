//! Shape extraction from a tldraw store snapshot.
//!
//! A snapshot produced by tldraw's `getSnapshot` looks like
//! `{ "document": { "store": { "<record id>": {...} } }, "session": {...} }`.
//! Older saves may be the bare document (`{ "store": {...} }`). Records
//! carry a `typeName`; shapes additionally carry a `type`, a fractional
//! `index` string and a `props` object.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read-only view of one shape record, as much of it as export needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// The shape kind tag ("text", "note", "geo", "embed", "image", ...)
    pub shape_type: String,
    /// Type-specific properties, untouched
    pub props: Value,
}

impl Shape {
    /// Look up a string property.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }
}

/// Collect the shape records out of a store snapshot, in canvas order.
///
/// tldraw orders same-parent shapes by their fractional `index` string,
/// which compares lexicographically. Records without an index keep their
/// map insertion order, after the indexed ones.
pub fn shapes_from_snapshot(snapshot: &Value) -> Vec<Shape> {
    let store = snapshot
        .get("document")
        .and_then(|doc| doc.get("store"))
        .or_else(|| snapshot.get("store"));

    let Some(records) = store.and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut indexed: Vec<(String, Shape)> = Vec::new();
    let mut unindexed: Vec<Shape> = Vec::new();

    for record in records.values() {
        if record.get("typeName").and_then(Value::as_str) != Some("shape") {
            continue;
        }
        let Some(shape_type) = record.get("type").and_then(Value::as_str) else {
            continue;
        };
        let shape = Shape {
            shape_type: shape_type.to_string(),
            props: record.get("props").cloned().unwrap_or(Value::Null),
        };
        match record.get("index").and_then(Value::as_str) {
            Some(index) => indexed.push((index.to_string(), shape)),
            None => unindexed.push(shape),
        }
    }

    indexed.sort_by(|(a, _), (b, _)| a.cmp(b));

    indexed
        .into_iter()
        .map(|(_, shape)| shape)
        .chain(unindexed)
        .collect()
}
