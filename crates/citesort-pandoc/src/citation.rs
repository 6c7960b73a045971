/*
 * citation.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Typed view of Pandoc `Cite` nodes.
//!
//! In Pandoc JSON a cite is `{"t": "Cite", "c": [[citation...], [inline...]]}`
//! where each citation is an object with `citationId`, `citationPrefix`,
//! `citationSuffix`, `citationMode`, `citationNoteNum` and `citationHash`.
//! Prefix, suffix and rendered content stay as raw inline JSON.

use serde::{Deserialize, Serialize};

use crate::Inlines;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(rename = "citationId")]
    pub id: String,
    #[serde(rename = "citationPrefix", default)]
    pub prefix: Inlines,
    #[serde(rename = "citationSuffix", default)]
    pub suffix: Inlines,
    #[serde(rename = "citationMode", default)]
    pub mode: CitationMode,
    #[serde(rename = "citationNoteNum", default)]
    pub note_num: usize,
    #[serde(rename = "citationHash", default)]
    pub hash: usize,
}

impl Citation {
    /// A normal citation with no prefix or suffix.
    pub fn new(id: impl Into<String>) -> Self {
        Citation {
            id: id.into(),
            prefix: Vec::new(),
            suffix: Vec::new(),
            mode: CitationMode::NormalCitation,
            note_num: 0,
            hash: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum CitationMode {
    AuthorInText,
    SuppressAuthor,
    #[default]
    NormalCitation,
}

/// A citation cluster such as `[see @a, p. 3; @b]`.
///
/// `content` is the inline rendering Pandoc keeps alongside the citations
/// (the original source text before citeproc runs). Filters that reorder
/// `citations` leave it alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CiteRepr", into = "CiteRepr")]
pub struct Cite {
    pub citations: Vec<Citation>,
    pub content: Inlines,
}

impl Cite {
    pub fn new(citations: Vec<Citation>) -> Self {
        Cite {
            citations,
            content: Vec::new(),
        }
    }

    /// Ids of the citations in cluster order.
    pub fn ids(&self) -> Vec<&str> {
        self.citations.iter().map(|c| c.id.as_str()).collect()
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct CiteRepr(Vec<Citation>, Inlines);

impl From<CiteRepr> for Cite {
    fn from(repr: CiteRepr) -> Self {
        Cite {
            citations: repr.0,
            content: repr.1,
        }
    }
}

impl From<Cite> for CiteRepr {
    fn from(cite: Cite) -> Self {
        CiteRepr(cite.citations, cite.content)
    }
}
