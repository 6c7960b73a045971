/*
 * filter.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Document transform pipeline.
 */

//! Document transform pipeline.
//!
//! - [`DocumentTransform`] - a single pass over a [`Pandoc`] document
//! - [`TransformPipeline`] - ordered collection of transforms to execute
//! - [`FilterContext`] - state shared by the transforms and kept across
//!   documents (text key cache, parsed bibliography files)
//!
//! [`run_filter`] is the Pandoc filter entry point: JSON in, the default
//! pipeline, JSON out.

use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use citesort_pandoc::Pandoc;

use crate::Result;
use crate::bibliography::BibliographyLoader;
use crate::config::SortConfig;
use crate::references::sort_reference_lists;
use crate::reorder::reorder_cite;
use crate::sort_key::SortKeyBuilder;
use crate::text::TextKeys;

/// Counts of what a run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Citation clusters seen in the document.
    pub clusters: usize,
    /// Clusters whose order changed.
    pub reordered: usize,
    /// Reference list divs that were regrouped.
    pub reference_lists: usize,
}

/// State shared by the transforms of a run.
#[derive(Debug)]
pub struct FilterContext {
    working_dir: PathBuf,
    home_dir: Option<PathBuf>,
    /// Configuration of the document being filtered.
    pub config: SortConfig,
    pub text: TextKeys,
    pub report: FilterReport,
    loader: Option<BibliographyLoader>,
}

impl FilterContext {
    /// A context resolving bibliography paths against `working_dir` unless
    /// a document names its own directory.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        FilterContext {
            working_dir: working_dir.into(),
            home_dir: dirs::home_dir(),
            config: SortConfig::default(),
            text: TextKeys::new(),
            report: FilterReport::default(),
            loader: None,
        }
    }

    /// Override the directory `~` expands to in bibliography paths.
    pub fn with_home_dir(mut self, home_dir: Option<PathBuf>) -> Self {
        self.home_dir = home_dir;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Reset per-document state and read the configuration of `doc`.
    pub fn begin_document(&mut self, doc: &Pandoc) {
        self.config = SortConfig::from_meta(&doc.meta);
        self.report = FilterReport::default();
    }

    /// Directory relative bibliography paths resolve against for the
    /// current document.
    pub fn base_dir(&self) -> PathBuf {
        match &self.config.base_dir {
            Some(dir) => self.working_dir.join(dir),
            None => self.working_dir.clone(),
        }
    }

    /// The bibliography loader for the current document's base directory.
    ///
    /// The loader (and the files it has parsed) survives across documents
    /// that share a base directory.
    pub fn loader(&mut self) -> &mut BibliographyLoader {
        let base_dir = self.base_dir();
        if self
            .loader
            .as_ref()
            .is_some_and(|loader| loader.base_dir() != base_dir)
        {
            self.loader = None;
        }
        let home_dir = self.home_dir.clone();
        self.loader.get_or_insert_with(|| {
            tracing::debug!(base_dir = %base_dir.display(), "New bibliography loader");
            BibliographyLoader::new(base_dir).with_home_dir(home_dir)
        })
    }
}

/// A single pass over a document.
pub trait DocumentTransform: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    fn transform(&self, doc: &mut Pandoc, ctx: &mut FilterContext) -> Result<()>;
}

/// A pipeline of transforms, run in insertion order.
pub struct TransformPipeline {
    transforms: Vec<Box<dyn DocumentTransform>>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    pub fn push(&mut self, transform: Box<dyn DocumentTransform>) {
        self.transforms.push(transform);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Execute all transforms in insertion order, stopping at the first
    /// error.
    pub fn execute(&self, doc: &mut Pandoc, ctx: &mut FilterContext) -> Result<()> {
        for transform in &self.transforms {
            tracing::debug!(transform = transform.name(), "Running transform");
            transform.transform(doc, ctx)?;
        }
        Ok(())
    }

    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Reorders every citation cluster of the document.
///
/// Runs in two phases: an immutable walk collects the cited ids, then the
/// bibliography is loaded for exactly those ids and a mutable walk sorts
/// each cluster.
pub struct CitationOrderTransform;

impl DocumentTransform for CitationOrderTransform {
    fn name(&self) -> &str {
        "citation-order"
    }

    fn transform(&self, doc: &mut Pandoc, ctx: &mut FilterContext) -> Result<()> {
        if !ctx.config.sort_citations {
            tracing::debug!("Citation sorting disabled by metadata");
            return Ok(());
        }

        let mut cited = BTreeSet::new();
        let mut clusters = 0;
        doc.walk_cites(|cite| {
            clusters += 1;
            cited.extend(cite.citations.iter().map(|c| c.id.clone()));
        });
        ctx.report.clusters += clusters;
        if cited.is_empty() {
            return Ok(());
        }

        let paths = ctx.config.bibliography.clone();
        let bibliography = ctx.loader().load(&paths, &cited);
        tracing::debug!(
            cited = cited.len(),
            resolved = bibliography.len(),
            "Resolved cited references"
        );

        let mut builder = SortKeyBuilder::with_text_keys(std::mem::take(&mut ctx.text));
        let table = builder.build_table(&bibliography);
        ctx.text = builder.into_text_keys();

        let mut reordered = 0;
        doc.walk_cites_mut(|cite| {
            let changed = reorder_cite(cite, &table);
            if changed {
                reordered += 1;
            }
            changed
        });
        ctx.report.reordered += reordered;
        tracing::info!(clusters, reordered, "Sorted citation clusters");
        Ok(())
    }
}

/// Regroups rendered reference lists, when the document asks for it.
pub struct ReferenceListTransform;

impl DocumentTransform for ReferenceListTransform {
    fn name(&self) -> &str {
        "reference-list"
    }

    fn transform(&self, doc: &mut Pandoc, ctx: &mut FilterContext) -> Result<()> {
        if !ctx.config.sort_references {
            return Ok(());
        }
        let lists = sort_reference_lists(&mut doc.blocks, &mut ctx.text);
        ctx.report.reference_lists += lists;
        tracing::info!(lists, "Sorted reference lists");
        Ok(())
    }
}

pub fn default_pipeline() -> TransformPipeline {
    let mut pipeline = TransformPipeline::new();
    pipeline.push(Box::new(CitationOrderTransform));
    pipeline.push(Box::new(ReferenceListTransform));
    pipeline
}

/// Run the default pipeline over an in-memory document.
pub fn filter_document(doc: &mut Pandoc, ctx: &mut FilterContext) -> Result<FilterReport> {
    ctx.begin_document(doc);
    default_pipeline().execute(doc, ctx)?;
    Ok(ctx.report)
}

/// Read a Pandoc JSON document from `reader`, filter it, and write the
/// result to `writer`.
pub fn run_filter<R: Read, W: Write>(
    reader: R,
    mut writer: W,
    ctx: &mut FilterContext,
) -> Result<FilterReport> {
    let mut doc = Pandoc::from_reader(reader)?;
    let report = filter_document(&mut doc, ctx)?;
    doc.to_writer(&mut writer)?;
    writer.flush()?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use citesort_pandoc::{Citation, Cite, MetaValue};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    struct RecordingTransform {
        name: &'static str,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    impl DocumentTransform for RecordingTransform {
        fn name(&self) -> &str {
            self.name
        }

        fn transform(&self, _doc: &mut Pandoc, _ctx: &mut FilterContext) -> Result<()> {
            self.seen.lock().unwrap().push(self.name);
            Ok(())
        }
    }

    fn cite_block(ids: &[&str]) -> serde_json::Value {
        let cite = Cite::new(ids.iter().map(|id| Citation::new(*id)).collect());
        json!({"t": "Para", "c": [{"t": "Cite", "c": serde_json::to_value(cite).unwrap()}]})
    }

    fn cited_ids(doc: &Pandoc) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        doc.walk_cites(|cite| out.push(cite.ids().iter().map(|s| s.to_string()).collect()));
        out
    }

    #[test]
    fn test_pipeline_runs_in_insertion_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = TransformPipeline::new();
        for name in ["first", "second", "third"] {
            pipeline.push(Box::new(RecordingTransform {
                name,
                seen: seen.clone(),
            }));
        }
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.transform_names(), vec!["first", "second", "third"]);

        let mut doc = Pandoc::default();
        let mut ctx = FilterContext::new("/tmp");
        pipeline.execute(&mut doc, &mut ctx).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_default_pipeline_names() {
        assert_eq!(
            default_pipeline().transform_names(),
            vec!["citation-order", "reference-list"]
        );
        assert!(TransformPipeline::default().is_empty());
    }

    #[test]
    fn test_without_bibliography_ids_sort_by_id() {
        let mut doc = Pandoc {
            blocks: vec![cite_block(&["zeta", "alpha", "mid"])],
            ..Pandoc::default()
        };
        let mut ctx = FilterContext::new("/nonexistent");
        let report = filter_document(&mut doc, &mut ctx).unwrap();
        assert_eq!(cited_ids(&doc), vec![vec!["alpha", "mid", "zeta"]]);
        assert_eq!(
            report,
            FilterReport {
                clusters: 1,
                reordered: 1,
                reference_lists: 0,
            }
        );
    }

    #[test]
    fn test_sort_citations_false_leaves_document_alone() {
        let mut doc = Pandoc {
            blocks: vec![cite_block(&["zeta", "alpha"])],
            ..Pandoc::default()
        };
        doc.meta
            .insert("sort-citations".into(), MetaValue::MetaBool(false));
        let before = doc.clone();
        let report = filter_document(&mut doc, &mut FilterContext::new("/tmp")).unwrap();
        assert_eq!(doc, before);
        assert_eq!(report, FilterReport::default());
    }

    #[test]
    fn test_base_dir_from_metadata() {
        let mut doc = Pandoc::default();
        doc.meta.insert(
            "quarto-input-dir".into(),
            MetaValue::MetaString("docs".into()),
        );
        let mut ctx = FilterContext::new("/project");
        ctx.begin_document(&doc);
        assert_eq!(ctx.base_dir(), PathBuf::from("/project/docs"));
        assert_eq!(ctx.loader().base_dir(), Path::new("/project/docs"));

        ctx.begin_document(&Pandoc::default());
        assert_eq!(ctx.loader().base_dir(), Path::new("/project"));
    }

    #[test]
    fn test_run_filter_rejects_invalid_json() {
        let mut out = Vec::new();
        let result = run_filter("not json".as_bytes(), &mut out, &mut FilterContext::new("/tmp"));
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
