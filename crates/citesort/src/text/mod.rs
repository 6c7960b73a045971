/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Script detection, normalization and transliteration.
//!
//! The functions in the submodules are pure. [`TextKeys`] memoizes them:
//! the same author names and titles recur across entries and documents, and
//! transliteration is the most expensive step of building sort keys.

pub mod normalize;
pub mod pinyin;
pub mod script;
pub mod surnames;

use std::collections::HashMap;

pub use normalize::normalize;
pub use pinyin::to_pinyin;
pub use script::contains_chinese;

/// Read-through cache over the text key functions.
///
/// Owned by whoever builds sort keys; it can be kept and reused across
/// documents since every cached value depends only on its input string.
#[derive(Debug, Default)]
pub struct TextKeys {
    script: HashMap<String, bool>,
    normalized: HashMap<String, String>,
    pinyin: HashMap<String, String>,
}

impl TextKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_chinese(&mut self, text: &str) -> bool {
        if let Some(hit) = self.script.get(text) {
            return *hit;
        }
        let value = contains_chinese(text);
        self.script.insert(text.to_string(), value);
        value
    }

    pub fn normalize(&mut self, text: &str) -> String {
        cached(&mut self.normalized, text, normalize)
    }

    pub fn pinyin(&mut self, text: &str) -> String {
        cached(&mut self.pinyin, text, to_pinyin)
    }

    /// Pinyin key if `chinese` and the text itself contains Chinese,
    /// otherwise the normalized text.
    pub fn key(&mut self, text: &str, chinese: bool) -> String {
        if chinese && self.is_chinese(text) {
            self.pinyin(text)
        } else {
            self.normalize(text)
        }
    }

    /// Number of distinct strings held across all caches.
    pub fn len(&self) -> usize {
        self.script.len() + self.normalized.len() + self.pinyin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn cached(cache: &mut HashMap<String, String>, text: &str, f: fn(&str) -> String) -> String {
    if let Some(hit) = cache.get(text) {
        return hit.clone();
    }
    let value = f(text);
    cache.insert(text.to_string(), value.clone());
    value
}
