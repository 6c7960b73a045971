/*
 * walk.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Document traversal.
//!
//! Pandoc JSON nodes are `{"t": tag, "c": content}` objects nested inside
//! arrays, so a walk only needs to recurse through objects and arrays and
//! stop at the tags it cares about. Traversal is pre-order in document
//! order; the content of a visited node (e.g. the prefix of a citation) is
//! walked after the node itself.

use serde::Deserialize;
use serde_json::Value;

use crate::citation::Cite;
use crate::node_type;

/// Visit every `Cite` node below `value`.
///
/// Cite nodes that do not have the expected shape are skipped with a
/// warning; their children are still walked.
pub fn walk_cites<F>(value: &Value, f: &mut F)
where
    F: FnMut(&Cite),
{
    match value {
        Value::Object(obj) => {
            if node_type(value) == Some("Cite") {
                if let Some(content) = obj.get("c") {
                    match Cite::deserialize(content) {
                        Ok(cite) => f(&cite),
                        Err(err) => {
                            tracing::warn!(error = %err, "Skipping malformed Cite node");
                        }
                    }
                }
            }
            for child in obj.values() {
                walk_cites(child, f);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_cites(item, f);
            }
        }
        _ => {}
    }
}

/// Visit every `Cite` node below `value`, allowing in-place edits.
///
/// The callback returns whether it changed the cite; only changed cites are
/// written back, so untouched nodes keep their exact JSON.
pub fn walk_cites_mut<F>(value: &mut Value, f: &mut F)
where
    F: FnMut(&mut Cite) -> bool,
{
    if node_type(value) == Some("Cite") {
        if let Some(content) = value.get_mut("c") {
            rewrite_cite(content, f);
        }
    }
    match value {
        Value::Object(obj) => {
            for child in obj.values_mut() {
                walk_cites_mut(child, f);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                walk_cites_mut(item, f);
            }
        }
        _ => {}
    }
}

fn rewrite_cite<F>(content: &mut Value, f: &mut F)
where
    F: FnMut(&mut Cite) -> bool,
{
    let mut cite = match Cite::deserialize(&*content) {
        Ok(cite) => cite,
        Err(err) => {
            tracing::warn!(error = %err, "Skipping malformed Cite node");
            return;
        }
    };
    if !f(&mut cite) {
        return;
    }
    match serde_json::to_value(&cite) {
        Ok(rewritten) => *content = rewritten,
        Err(err) => tracing::warn!(error = %err, "Failed to write back Cite node"),
    }
}

/// Visit every node with tag `tag` below `value`, allowing in-place edits.
///
/// Nested matches are visited after their enclosing match has been edited.
pub fn walk_nodes_mut<F>(value: &mut Value, tag: &str, f: &mut F)
where
    F: FnMut(&mut Value),
{
    if node_type(value) == Some(tag) {
        f(value);
    }
    match value {
        Value::Object(obj) => {
            for child in obj.values_mut() {
                walk_nodes_mut(child, tag, f);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                walk_nodes_mut(item, tag, f);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cite(ids: &[&str]) -> Value {
        let citations: Vec<Value> = ids
            .iter()
            .map(|id| {
                json!({
                    "citationId": id,
                    "citationPrefix": [],
                    "citationSuffix": [],
                    "citationMode": {"t": "NormalCitation"},
                    "citationNoteNum": 1,
                    "citationHash": 0
                })
            })
            .collect();
        json!({"t": "Cite", "c": [citations, []]})
    }

    #[test]
    fn test_walk_cites_finds_nested_cites_in_order() {
        let doc = json!([
            {"t": "Para", "c": [cite(&["a", "b"])]},
            {"t": "BlockQuote", "c": [
                {"t": "Para", "c": [{"t": "Emph", "c": [cite(&["c"])]}]}
            ]},
            {"t": "Para", "c": [{"t": "Note", "c": [{"t": "Plain", "c": [cite(&["d"])]}]}]}
        ]);

        let mut seen = Vec::new();
        walk_cites(&doc, &mut |cite: &Cite| {
            seen.extend(cite.ids().into_iter().map(String::from));
        });
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_walk_cites_skips_malformed() {
        let doc = json!([
            {"t": "Para", "c": [{"t": "Cite", "c": "not a cite"}, cite(&["ok"])]}
        ]);
        let mut count = 0;
        walk_cites(&doc, &mut |_: &Cite| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_walk_cites_mut_writes_back_changes() {
        let mut doc = json!([{"t": "Para", "c": [cite(&["a", "b"])]}]);
        walk_cites_mut(&mut doc, &mut |cite: &mut Cite| {
            cite.citations.reverse();
            true
        });
        let ids: Vec<&str> = doc[0]["c"][0]["c"][0]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["citationId"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_walk_cites_mut_leaves_unchanged_nodes_alone() {
        // extra field would be dropped by a round trip through Citation
        let mut doc = json!([{"t": "Cite", "c": [[{"citationId": "a", "extra": 1}], []]}]);
        let before = doc.clone();
        walk_cites_mut(&mut doc, &mut |_: &mut Cite| false);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_walk_nodes_mut() {
        let mut doc = json!([
            {"t": "Div", "c": [["", [], []], [{"t": "Div", "c": [["inner", [], []], []]}]]}
        ]);
        let mut ids = Vec::new();
        walk_nodes_mut(&mut doc, "Div", &mut |node: &mut Value| {
            ids.push(node["c"][0][0].as_str().unwrap().to_string());
        });
        assert_eq!(ids, vec!["", "inner"]);
    }
}
