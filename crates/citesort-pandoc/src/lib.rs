/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pandoc JSON AST model for citation filters.
 *
 * Only the parts of the AST that citation filters inspect are typed:
 * document metadata, `Cite` nodes with their citations, and `Div`
 * attributes. Every other node is carried as raw JSON so that a document
 * passes through a filter unchanged apart from the edits the filter makes.
 */

pub mod block;
pub mod citation;
pub mod document;
pub mod meta;
pub mod stringify;
pub mod walk;

pub use block::{Attr, div_content_mut, div_has_class, node_type};
pub use citation::{Citation, CitationMode, Cite};
pub use document::{JsonError, Pandoc};
pub use meta::{Meta, MetaValue};
pub use stringify::{stringify, stringify_all};
pub use walk::{walk_cites, walk_cites_mut, walk_nodes_mut};

/// A list of inline nodes in Pandoc JSON form.
pub type Inlines = Vec<serde_json::Value>;

/// A list of block nodes in Pandoc JSON form.
pub type Blocks = Vec<serde_json::Value>;
