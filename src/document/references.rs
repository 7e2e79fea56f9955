//! Reference scanning
//!
//! Collects the image ids and citation keys a content tree actually uses.

use crate::document::{ContentNode, SchemaHints};
use serde_json::Value;
use std::collections::BTreeSet;

/// Ids of all images referenced anywhere in the tree
pub fn image_ids(root: &ContentNode, hints: &SchemaHints) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    root.walk(&mut |node| {
        if let Some(id) = node.attrs.get(&hints.image_attr).and_then(reference_key) {
            ids.insert(id);
        }
    });
    ids
}

/// Bibliography keys of all citations in the tree
pub fn citation_keys(root: &ContentNode, hints: &SchemaHints) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    root.walk(&mut |node| {
        if node.node_type != hints.citation_node {
            return;
        }
        let Some(Value::Array(refs)) = node.attrs.get(&hints.citation_refs_attr) else {
            return;
        };
        keys.extend(
            refs.iter()
                .filter_map(|r| r.get(&hints.citation_key_field))
                .filter_map(reference_key),
        );
    });
    keys
}

// Ids may be stored as strings or numbers; `false`, null and "" mean "none".
fn reference_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
