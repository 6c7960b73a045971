//! Error types for citesort

use std::path::PathBuf;

use thiserror::Error;

/// Why a bibliography file contributed no entries.
///
/// These never abort a run: the loader logs them and carries on with the
/// remaining files.
#[derive(Error, Debug)]
pub enum BibliographyError {
    #[error("Bibliography file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported bibliography format (expected CSL-JSON): {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to read bibliography {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse bibliography {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Bibliography {} is not a list of records", .0.display())]
    NotAList(PathBuf),
}

/// Errors that stop a filter run: the document itself could not be read or
/// written.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Document(#[from] citesort_pandoc::JsonError),
}

pub type Result<T> = std::result::Result<T, FilterError>;
