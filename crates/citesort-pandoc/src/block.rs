/*
 * block.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Blocks;

/// Pandoc attributes: `[id, [classes], [[key, value]]]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "AttrRepr", into = "AttrRepr")]
pub struct Attr {
    pub id: String,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
}

impl Attr {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct AttrRepr(String, Vec<String>, Vec<(String, String)>);

impl From<AttrRepr> for Attr {
    fn from(repr: AttrRepr) -> Self {
        Attr {
            id: repr.0,
            classes: repr.1,
            attributes: repr.2,
        }
    }
}

impl From<Attr> for AttrRepr {
    fn from(attr: Attr) -> Self {
        AttrRepr(attr.id, attr.classes, attr.attributes)
    }
}

/// The `t` tag of a node, if the value is a Pandoc node.
pub fn node_type(node: &Value) -> Option<&str> {
    node.get("t").and_then(Value::as_str)
}

fn div_attr(node: &Value) -> Option<Attr> {
    if node_type(node) != Some("Div") {
        return None;
    }
    let attr = node.get("c")?.get(0)?;
    Attr::deserialize(attr).ok()
}

/// Whether the node is a `Div` carrying the given class.
pub fn div_has_class(node: &Value, class: &str) -> bool {
    div_attr(node).is_some_and(|attr| attr.has_class(class))
}

/// Mutable access to the block content of a `Div` node.
pub fn div_content_mut(node: &mut Value) -> Option<&mut Blocks> {
    if node_type(node) != Some("Div") {
        return None;
    }
    node.get_mut("c")?.get_mut(1)?.as_array_mut()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn refs_div() -> Value {
        json!({
            "t": "Div",
            "c": [["refs", ["references", "csl-bib-body"], [["entry-spacing", "0"]]], [
                {"t": "Div", "c": [["ref-a", ["csl-entry"], []], []]}
            ]]
        })
    }

    #[test]
    fn test_div_has_class() {
        let div = refs_div();
        assert!(div_has_class(&div, "references"));
        assert!(!div_has_class(&div, "csl-entry"));
        assert!(!div_has_class(&json!({"t": "Para", "c": []}), "references"));
    }

    #[test]
    fn test_div_content_mut() {
        let mut div = refs_div();
        let content = div_content_mut(&mut div).unwrap();
        assert_eq!(content.len(), 1);
        content.clear();
        assert_eq!(div["c"][1], json!([]));
    }

    #[test]
    fn test_attr_round_trip() {
        let attr: Attr = serde_json::from_value(json!(["x", ["a", "b"], [["k", "v"]]])).unwrap();
        assert_eq!(attr.id, "x");
        assert!(attr.has_class("b"));
        assert_eq!(serde_json::to_value(&attr).unwrap(), json!(["x", ["a", "b"], [["k", "v"]]]));
    }
}
