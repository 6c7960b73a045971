/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::citation::Cite;
use crate::meta::{Meta, MetaValue};
use crate::walk::{walk_cites, walk_cites_mut};
use crate::{Blocks, Inlines};

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Invalid Pandoc JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to write Pandoc JSON: {0}")]
    Write(#[source] serde_json::Error),
}

/// A Pandoc document as exchanged with JSON filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pandoc {
    #[serde(rename = "pandoc-api-version")]
    pub api_version: Vec<u32>,
    #[serde(default)]
    pub meta: Meta,
    pub blocks: Blocks,
}

impl Default for Pandoc {
    fn default() -> Self {
        Pandoc {
            api_version: vec![1, 23, 1],
            meta: Meta::new(),
            blocks: Vec::new(),
        }
    }
}

impl Pandoc {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, JsonError> {
        serde_json::from_reader(reader).map_err(JsonError::Parse)
    }

    pub fn from_json_str(json: &str) -> Result<Self, JsonError> {
        serde_json::from_str(json).map_err(JsonError::Parse)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), JsonError> {
        serde_json::to_writer(writer, self).map_err(JsonError::Write)
    }

    pub fn to_json_string(&self) -> Result<String, JsonError> {
        serde_json::to_string(self).map_err(JsonError::Write)
    }

    pub fn meta_value(&self, key: &str) -> Option<&MetaValue> {
        self.meta.get(key)
    }

    /// Visit every citation cluster in metadata and body, in document order.
    pub fn walk_cites<F>(&self, mut f: F)
    where
        F: FnMut(&Cite),
    {
        for value in self.meta.values() {
            walk_meta_cites(value, &mut f);
        }
        for block in &self.blocks {
            walk_cites(block, &mut f);
        }
    }

    /// Visit every citation cluster, allowing in-place edits.
    ///
    /// See [`walk_cites_mut`] for the write-back contract.
    pub fn walk_cites_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Cite) -> bool,
    {
        for value in self.meta.values_mut() {
            walk_meta_cites_mut(value, &mut f);
        }
        for block in self.blocks.iter_mut() {
            walk_cites_mut(block, &mut f);
        }
    }
}

fn meta_nodes(value: &MetaValue) -> Option<&Inlines> {
    match value {
        MetaValue::MetaInlines(nodes) | MetaValue::MetaBlocks(nodes) => Some(nodes),
        _ => None,
    }
}

fn walk_meta_cites<F>(value: &MetaValue, f: &mut F)
where
    F: FnMut(&Cite),
{
    match value {
        MetaValue::MetaList(items) => {
            for item in items {
                walk_meta_cites(item, f);
            }
        }
        MetaValue::MetaMap(map) => {
            for item in map.values() {
                walk_meta_cites(item, f);
            }
        }
        other => {
            if let Some(nodes) = meta_nodes(other) {
                for node in nodes {
                    walk_cites(node, f);
                }
            }
        }
    }
}

fn walk_meta_cites_mut<F>(value: &mut MetaValue, f: &mut F)
where
    F: FnMut(&mut Cite) -> bool,
{
    match value {
        MetaValue::MetaList(items) => {
            for item in items.iter_mut() {
                walk_meta_cites_mut(item, f);
            }
        }
        MetaValue::MetaMap(map) => {
            for (_, item) in map.iter_mut() {
                walk_meta_cites_mut(item, f);
            }
        }
        MetaValue::MetaInlines(nodes) | MetaValue::MetaBlocks(nodes) => {
            for node in nodes.iter_mut() {
                walk_cites_mut(node, f);
            }
        }
        MetaValue::MetaString(_) | MetaValue::MetaBool(_) => {}
    }
}
