/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Locale-aware ordering of citation clusters.
 */

//! Reorders the citations inside each Pandoc citation cluster so that
//! non-Chinese references come first and Chinese references follow, each
//! group sorted by author, year and title. Chinese text is compared on its
//! tone-numbered pinyin reading.
//!
//! The crate is organised bottom-up:
//!
//! - [`text`] - script detection, normalization, transliteration
//! - [`bibliography`] - CSL-JSON loading and field extraction
//! - [`sort_key`] - composite keys per cited reference
//! - [`reorder`] - sorting one cluster
//! - [`references`] - regrouping a rendered reference list
//! - [`filter`] - the transform pipeline and filter entry point

pub mod bibliography;
pub mod config;
pub mod error;
pub mod filter;
pub mod references;
pub mod reorder;
pub mod sort_key;
pub mod text;

pub use bibliography::{BibEntry, Bibliography, BibliographyLoader};
pub use config::SortConfig;
pub use error::{BibliographyError, FilterError, Result};
pub use filter::{
    CitationOrderTransform, DocumentTransform, FilterContext, FilterReport,
    ReferenceListTransform, TransformPipeline, default_pipeline, filter_document, run_filter,
};
pub use reorder::reorder_cite;
pub use sort_key::{EntryKey, LocaleGroup, SortKey, SortKeyBuilder, SortTable, UNKNOWN_YEAR};
pub use text::TextKeys;
