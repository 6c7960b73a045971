/*
 * normalize.rs
 * Copyright (c) 2025 Posit, PBC
 */

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

/// Comparison key for non-Chinese text.
///
/// Compatibility-decomposes, drops combining marks, collapses whitespace
/// runs to one space, trims and lowercases. `"  Émile\tZOLA "` becomes
/// `"emile zola"`.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
