/*
 * references.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Regrouping of a rendered reference list.
 */

//! After citeproc has rendered the bibliography into a `references` div of
//! `csl-entry` divs, Chinese entries are moved behind the others. Entries
//! are compared on their rendered text: lowercased for non-Chinese entries,
//! pinyin for Chinese ones. The sort is stable. Children of the div that
//! are not entries stay in front, in their original order.

use citesort_pandoc::{Blocks, div_content_mut, div_has_class, stringify, walk_nodes_mut};
use serde_json::Value;

use crate::text::TextKeys;

/// Regroup every reference list in `blocks`. Returns the number of lists
/// that were rewritten.
pub fn sort_reference_lists(blocks: &mut Blocks, keys: &mut TextKeys) -> usize {
    let mut rewritten = 0;
    for block in blocks.iter_mut() {
        walk_nodes_mut(block, "Div", &mut |div: &mut Value| {
            if div_has_class(div, "references") {
                if let Some(content) = div_content_mut(div) {
                    sort_entries(content, keys);
                    rewritten += 1;
                }
            }
        });
    }
    rewritten
}

fn sort_entries(content: &mut Blocks, keys: &mut TextKeys) {
    let mut others = Vec::new();
    let mut western: Vec<(String, Value)> = Vec::new();
    let mut chinese: Vec<(String, Value)> = Vec::new();

    for block in std::mem::take(content) {
        if !div_has_class(&block, "csl-entry") {
            others.push(block);
            continue;
        }
        let text = stringify(&block);
        if keys.is_chinese(&text) {
            chinese.push((keys.pinyin(&text), block));
        } else {
            western.push((text.to_lowercase(), block));
        }
    }

    western.sort_by(|a, b| a.0.cmp(&b.0));
    chinese.sort_by(|a, b| a.0.cmp(&b.0));

    content.extend(others);
    content.extend(western.into_iter().map(|(_, block)| block));
    content.extend(chinese.into_iter().map(|(_, block)| block));
}
