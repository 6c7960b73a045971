/*
 * stringify.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Plain-text rendering of Pandoc JSON nodes, in the spirit of Pandoc's
//! `stringify`: formatting is dropped, spaces and breaks become spaces,
//! notes and raw content are skipped.

use serde_json::Value;

/// Plain text of a single inline or block node.
pub fn stringify(node: &Value) -> String {
    let mut out = String::new();
    push_text(node, &mut out);
    out
}

/// Plain text of a list of nodes.
pub fn stringify_all(nodes: &[Value]) -> String {
    let mut out = String::new();
    for node in nodes {
        push_text(node, &mut out);
    }
    out
}

fn push_text(node: &Value, out: &mut String) {
    match node {
        Value::Array(items) => {
            for item in items {
                push_text(item, out);
            }
        }
        Value::Object(obj) => {
            let content = obj.get("c");
            match obj.get("t").and_then(Value::as_str) {
                Some("Str") => {
                    if let Some(text) = content.and_then(Value::as_str) {
                        out.push_str(text);
                    }
                }
                Some("Space") | Some("SoftBreak") | Some("LineBreak") => out.push(' '),
                // [attr, text] and [mathType, text]
                Some("Code") | Some("Math") => {
                    if let Some(text) = content.and_then(|c| c.get(1)).and_then(Value::as_str) {
                        out.push_str(text);
                    }
                }
                // [citations, inlines]: the rendered inlines are the visible text
                Some("Cite") => {
                    if let Some(inlines) = content.and_then(|c| c.get(1)) {
                        push_text(inlines, out);
                    }
                }
                Some("Note") | Some("RawInline") | Some("RawBlock") | Some("CodeBlock") => {}
                Some(_) => {
                    // attrs, targets and list styles are bare strings
                    if let Some(content) = content {
                        push_text(content, out);
                    }
                }
                None => {}
            }
        }
        _ => {}
    }
}
