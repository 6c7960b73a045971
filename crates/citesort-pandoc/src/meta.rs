/*
 * meta.rs
 * Copyright (c) 2025 Posit, PBC
 */

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

use crate::stringify::stringify_all;
use crate::{Blocks, Inlines};

// Pandoc's MetaValue notably does not support numbers or nulls, so we don't either
// https://pandoc.org/lua-filters.html#type-metavalue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum MetaValue {
    MetaString(String),
    MetaBool(bool),
    MetaInlines(Inlines),
    MetaBlocks(Blocks),
    MetaList(Vec<MetaValue>),
    MetaMap(LinkedHashMap<String, MetaValue>),
}

impl Default for MetaValue {
    fn default() -> Self {
        MetaValue::MetaMap(LinkedHashMap::new())
    }
}

pub type Meta = LinkedHashMap<String, MetaValue>;

impl MetaValue {
    /// Plain text of a scalar metadata value.
    ///
    /// Strings are returned as-is, inline and block content is stringified.
    /// Lists, maps and booleans have no text form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            MetaValue::MetaString(s) => Some(s.clone()),
            MetaValue::MetaInlines(inlines) => Some(stringify_all(inlines)),
            MetaValue::MetaBlocks(blocks) => Some(stringify_all(blocks)),
            _ => None,
        }
    }

    /// Text values of a scalar or a list of scalars.
    ///
    /// `bibliography: refs.json` and `bibliography: [a.json, b.json]` both
    /// come out as a list here.
    pub fn as_text_list(&self) -> Vec<String> {
        match self {
            MetaValue::MetaList(items) => items.iter().filter_map(MetaValue::as_text).collect(),
            other => other.as_text().into_iter().collect(),
        }
    }

    /// Boolean value, accepting the `true`/`false` strings YAML front matter
    /// sometimes turns into inlines.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::MetaBool(b) => Some(*b),
            other => match other.as_text()?.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        match self {
            MetaValue::MetaMap(map) => map.get(key),
            _ => None,
        }
    }
}
