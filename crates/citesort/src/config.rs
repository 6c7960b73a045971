/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

use std::path::PathBuf;

use citesort_pandoc::{Meta, MetaValue};

/// Filter configuration, extracted from document metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SortConfig {
    /// Bibliography paths (CSL-JSON), as written in metadata.
    pub bibliography: Vec<String>,
    /// Directory relative bibliography paths are resolved against, when the
    /// document names one (`quarto-input-dir`, then `working-directory`).
    pub base_dir: Option<PathBuf>,
    /// Whether to reorder citation clusters.
    pub sort_citations: bool,
    /// Whether to regroup entries of a rendered reference list.
    pub sort_references: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            bibliography: Vec::new(),
            base_dir: None,
            sort_citations: true,
            sort_references: false,
        }
    }
}

impl SortConfig {
    pub fn from_meta(meta: &Meta) -> Self {
        let mut config = SortConfig::default();

        if let Some(value) = meta.get("bibliography") {
            config.bibliography = value.as_text_list();
        }

        config.base_dir = ["quarto-input-dir", "working-directory"]
            .iter()
            .filter_map(|key| meta.get(*key).and_then(MetaValue::as_text))
            .map(|dir| dir.trim().to_string())
            .find(|dir| !dir.is_empty())
            .map(PathBuf::from);

        if let Some(flag) = meta.get("sort-citations").and_then(MetaValue::as_bool) {
            config.sort_citations = flag;
        }
        if let Some(flag) = meta.get("sort-references").and_then(MetaValue::as_bool) {
            config.sort_references = flag;
        }

        config
    }
}
