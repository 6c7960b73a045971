/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Loading CSL-JSON bibliographies named in document metadata.
 */

//! Bibliography loading.
//!
//! Only entries that the document actually cites are kept: shared
//! bibliographies are often thousands of entries long and a document cites
//! a handful. Loading never fails. A file that is missing, unreadable or
//! not CSL-JSON contributes nothing, and a citation that resolves to no
//! entry still gets a sort key from its id.

pub mod entry;

use std::collections::{BTreeSet, HashMap};
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

pub use entry::{BibEntry, DatePart, DateSpec, Name};

use crate::error::BibliographyError;

/// Entries keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Bibliography {
    entries: HashMap<String, BibEntry>,
}

impl Bibliography {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&BibEntry> {
        self.entries.get(id)
    }

    /// Add an entry, replacing any entry with the same id.
    pub fn insert(&mut self, entry: BibEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &BibEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<BibEntry> for Bibliography {
    fn from_iter<I: IntoIterator<Item = BibEntry>>(iter: I) -> Self {
        let mut bibliography = Bibliography::new();
        for entry in iter {
            bibliography.insert(entry);
        }
        bibliography
    }
}

/// Resolves and reads bibliography files.
///
/// Parsed files are kept for the lifetime of the loader, so a file named
/// twice in metadata (or by several documents sharing a loader) is read
/// once.
#[derive(Debug)]
pub struct BibliographyLoader {
    base_dir: PathBuf,
    home_dir: Option<PathBuf>,
    parsed: HashMap<PathBuf, Vec<BibEntry>>,
    reads: usize,
}

impl BibliographyLoader {
    /// A loader resolving relative paths against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        BibliographyLoader {
            base_dir: base_dir.into(),
            home_dir: dirs::home_dir(),
            parsed: HashMap::new(),
            reads: 0,
        }
    }

    /// Override the directory `~` expands to.
    pub fn with_home_dir(mut self, home_dir: Option<PathBuf>) -> Self {
        self.home_dir = home_dir;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Number of files actually read from disk so far.
    pub fn read_count(&self) -> usize {
        self.reads
    }

    /// Absolute path for a metadata path: `~` is expanded, relative paths
    /// are joined onto the base directory, and `.`/`..` are folded.
    pub fn resolve(&self, raw: &str) -> PathBuf {
        let expanded = match (raw, raw.strip_prefix("~/"), &self.home_dir) {
            ("~", _, Some(home)) => home.clone(),
            (_, Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(raw),
        };
        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            self.base_dir.join(expanded)
        };
        fold_dots(&absolute)
    }

    /// Load the cited entries of every file in `paths`.
    ///
    /// With an empty `cited` set every entry is kept. When two files define
    /// the same id the later file wins.
    pub fn load(&mut self, paths: &[String], cited: &BTreeSet<String>) -> Bibliography {
        let mut bibliography = Bibliography::new();
        for raw in paths.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
            let path = self.resolve(raw);
            let entries = match self.entries_for(&path) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!("{}", err);
                    continue;
                }
            };
            let before = bibliography.len();
            for entry in entries {
                if cited.is_empty() || cited.contains(&entry.id) {
                    bibliography.insert(entry.clone());
                }
            }
            tracing::debug!(
                path = %path.display(),
                available = entries.len(),
                added = bibliography.len().saturating_sub(before),
                "Loaded bibliography"
            );
        }
        bibliography
    }

    fn entries_for(&mut self, path: &Path) -> Result<&[BibEntry], BibliographyError> {
        if !self.parsed.contains_key(path) {
            // failures are not cached; a missing file costs one stat per mention
            let entries = read_bibliography_file(path)?;
            self.reads += 1;
            self.parsed.insert(path.to_path_buf(), entries);
        }
        Ok(self.parsed.get(path).map(Vec::as_slice).unwrap_or_default())
    }
}

/// Read a CSL-JSON file into entries.
///
/// A file holding a single record object is accepted as a list of one.
/// Records without a usable id are skipped.
pub fn read_bibliography_file(path: &Path) -> Result<Vec<BibEntry>, BibliographyError> {
    if !path.exists() {
        return Err(BibliographyError::NotFound(path.to_path_buf()));
    }
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(BibliographyError::UnsupportedFormat(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| BibliographyError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let data: Value = serde_json::from_str(&content).map_err(|source| BibliographyError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let records = match data {
        Value::Array(records) => records,
        Value::Object(_) => vec![data],
        Value::Null => Vec::new(),
        _ => return Err(BibliographyError::NotAList(path.to_path_buf())),
    };

    Ok(records.iter().filter_map(parse_record).collect())
}

fn parse_record(record: &Value) -> Option<BibEntry> {
    match BibEntry::deserialize(record) {
        Ok(entry) if !entry.id.is_empty() => Some(entry),
        Ok(_) => {
            tracing::debug!("Skipping bibliography record with empty id");
            None
        }
        Err(err) => {
            tracing::debug!(error = %err, "Skipping malformed bibliography record");
            None
        }
    }
}

fn fold_dots(path: &Path) -> PathBuf {
    let mut folded = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                folded.pop();
            }
            other => folded.push(other),
        }
    }
    folded
}
