/*
 * script.rs
 * Copyright (c) 2025 Posit, PBC
 */

use std::ops::RangeInclusive;

/// CJK Unified Ideographs.
pub const CJK_UNIFIED_IDEOGRAPHS: RangeInclusive<char> = '\u{4e00}'..='\u{9fff}';

pub fn is_han(c: char) -> bool {
    CJK_UNIFIED_IDEOGRAPHS.contains(&c)
}

/// Whether any character of `text` is a CJK unified ideograph.
pub fn contains_chinese(text: &str) -> bool {
    text.chars().any(is_han)
}
