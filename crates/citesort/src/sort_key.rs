/*
 * sort_key.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Composite sort keys for cited references.
//!
//! A reference sorts by `(locale group, author, year, title, position)`.
//! Non-Chinese references come first and, since keys compare with the
//! original cluster position last, references with otherwise equal keys keep
//! the order the author wrote them in.

use std::collections::HashMap;

use crate::bibliography::{BibEntry, Bibliography};
use crate::text::{TextKeys, normalize};

/// Year used when an entry has no usable date; sorts after every real year.
pub const UNKNOWN_YEAR: i64 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocaleGroup {
    NonChinese = 0,
    Chinese = 1,
}

/// The position-independent part of a reference's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryKey {
    pub group: LocaleGroup,
    pub author: String,
    pub year: i64,
    pub title: String,
}

impl EntryKey {
    /// Key for a citation id with no bibliography entry: non-Chinese,
    /// keyed on the id itself, undated.
    pub fn unresolved(id: &str) -> Self {
        let key = normalize(id);
        EntryKey {
            group: LocaleGroup::NonChinese,
            author: key.clone(),
            year: UNKNOWN_YEAR,
            title: key,
        }
    }

    pub fn at(&self, position: usize) -> SortKey {
        SortKey {
            group: self.group,
            author: self.author.clone(),
            year: self.year,
            title: self.title.clone(),
            position,
        }
    }
}

/// Total order over the references of one cluster. Field order is the
/// comparison order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    pub group: LocaleGroup,
    pub author: String,
    pub year: i64,
    pub title: String,
    pub position: usize,
}

/// Entry keys for the cited entries of one document.
#[derive(Debug, Clone, Default)]
pub struct SortTable {
    keys: HashMap<String, EntryKey>,
}

impl SortTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, key: EntryKey) {
        self.keys.insert(id.into(), key);
    }

    pub fn get(&self, id: &str) -> Option<&EntryKey> {
        self.keys.get(id)
    }

    /// Sort key of citation `id` at `position` in its cluster. Ids missing
    /// from the table fall back to [`EntryKey::unresolved`].
    pub fn key_for(&self, id: &str, position: usize) -> SortKey {
        match self.keys.get(id) {
            Some(key) => key.at(position),
            None => EntryKey::unresolved(id).at(position),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Derives entry keys, memoizing text work in a [`TextKeys`] cache.
#[derive(Debug, Default)]
pub struct SortKeyBuilder {
    text: TextKeys,
}

impl SortKeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build on an existing cache, e.g. one kept from a previous document.
    pub fn with_text_keys(text: TextKeys) -> Self {
        SortKeyBuilder { text }
    }

    pub fn into_text_keys(self) -> TextKeys {
        self.text
    }

    pub fn text_keys(&mut self) -> &mut TextKeys {
        &mut self.text
    }

    /// Whether the entry is Chinese-language: its title, container title
    /// or any author name contains Chinese characters.
    pub fn is_chinese(&mut self, entry: &BibEntry) -> bool {
        let names = entry.names();
        [entry.title(), entry.container_title()]
            .into_iter()
            .chain(names.iter().map(String::as_str))
            .filter(|field| !field.is_empty())
            .any(|field| self.text.is_chinese(field))
    }

    pub fn entry_key(&mut self, entry: &BibEntry) -> EntryKey {
        let chinese = self.is_chinese(entry);
        let title = self.text.key(entry.title(), chinese);

        let names = entry.names();
        let author = if names.is_empty() {
            title.clone()
        } else {
            // each name is keyed on its own script: a Chinese entry may list
            // romanized co-authors
            names
                .iter()
                .map(|name| self.text.key(name, chinese))
                .collect::<String>()
        };

        EntryKey {
            group: if chinese {
                LocaleGroup::Chinese
            } else {
                LocaleGroup::NonChinese
            },
            author,
            year: entry.year().unwrap_or(UNKNOWN_YEAR),
            title,
        }
    }

    pub fn build_table(&mut self, bibliography: &Bibliography) -> SortTable {
        let mut table = SortTable::new();
        for entry in bibliography.iter() {
            let key = self.entry_key(entry);
            table.insert(entry.id.clone(), key);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bibliography::{DateSpec, Name};

    fn entry(id: &str, authors: &[(&str, &str)], title: &str, year: Option<i64>) -> BibEntry {
        BibEntry {
            author: authors
                .iter()
                .map(|(family, given)| Name::person(*family, *given))
                .collect(),
            title: Some(title.to_string()),
            issued: year.map(DateSpec::PlainYear),
            ..BibEntry::new(id)
        }
    }

    #[test]
    fn test_western_entry_key() {
        let mut builder = SortKeyBuilder::new();
        let key = builder.entry_key(&entry(
            "smith2019",
            &[("Smith", "John")],
            "The Title",
            Some(2019),
        ));
        assert_eq!(
            key,
            EntryKey {
                group: LocaleGroup::NonChinese,
                author: "smith john".into(),
                year: 2019,
                title: "the title".into(),
            }
        );
    }

    #[test]
    fn test_chinese_entry_key() {
        let mut builder = SortKeyBuilder::new();
        let key = builder.entry_key(&entry("zhang2020", &[("张", "三")], "中国", Some(2020)));
        assert_eq!(key.group, LocaleGroup::Chinese);
        assert_eq!(key.author, "zhang1san1");
        assert_eq!(key.year, 2020);
        assert_eq!(key.title, "zhong1guo2");
    }

    #[test]
    fn test_chinese_detected_from_container_title_only() {
        let mut builder = SortKeyBuilder::new();
        let mut e = entry("x", &[("Wang", "Li")], "English title", None);
        e.container_title = Some("中国社会科学".into());
        let key = builder.entry_key(&e);
        assert_eq!(key.group, LocaleGroup::Chinese);
        // romanized parts are still normalized
        assert_eq!(key.author, "wang li");
        assert_eq!(key.title, "english title");
        assert_eq!(key.year, UNKNOWN_YEAR);
    }

    #[test]
    fn test_mixed_script_authors_are_keyed_per_name() {
        let mut builder = SortKeyBuilder::new();
        let mut e = entry("x", &[], "标题", None);
        e.author = vec![Name::literal("李四"), Name::person("Smith", "J.")];
        let key = builder.entry_key(&e);
        assert_eq!(key.author, "li3si4smith j.");
    }

    #[test]
    fn test_no_authors_uses_title_key() {
        let mut builder = SortKeyBuilder::new();
        let key = builder.entry_key(&entry("x", &[], "Annual Report", Some(2001)));
        assert_eq!(key.author, "annual report");
        assert_eq!(key.author, key.title);
    }

    #[test]
    fn test_unresolved_key() {
        let table = SortTable::new();
        let key = table.key_for("Unknown99", 3);
        assert_eq!(
            key,
            SortKey {
                group: LocaleGroup::NonChinese,
                author: "unknown99".into(),
                year: UNKNOWN_YEAR,
                title: "unknown99".into(),
                position: 3,
            }
        );
    }

    #[test]
    fn test_group_dominates_everything_else() {
        let western = SortKey {
            group: LocaleGroup::NonChinese,
            author: "zzz".into(),
            year: UNKNOWN_YEAR,
            title: "zzz".into(),
            position: 9,
        };
        let chinese = SortKey {
            group: LocaleGroup::Chinese,
            author: "a".into(),
            year: 1,
            title: "a".into(),
            position: 0,
        };
        assert!(western < chinese);
    }

    #[test]
    fn test_build_table() {
        let bib: Bibliography = vec![
            entry("a", &[("Smith", "J")], "T", Some(2000)),
            entry("b", &[("李", "四")], "书", None),
        ]
        .into_iter()
        .collect();
        let mut builder = SortKeyBuilder::new();
        let table = builder.build_table(&bib);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("b").unwrap().group, LocaleGroup::Chinese);
        assert_eq!(table.key_for("a", 1).position, 1);
        assert!(!builder.into_text_keys().is_empty());
    }
}
