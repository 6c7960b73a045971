/*
 * pinyin.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tone-numbered pinyin keys for Chinese text.
//!
//! A key is every readable character's default reading, tone number at the
//! end, concatenated without separators: `张三` → `zhang1san1`. Text is
//! assumed to start with a family name, so a leading surname from
//! [`SURNAME_READINGS`](super::surnames::SURNAME_READINGS) has its
//! syllable replaced by the surname reading.

use pinyin::ToPinyin;

use super::normalize::normalize;
use super::surnames::surname_reading;

/// Default tone-numbered reading of one character.
pub fn reading(c: char) -> Option<&'static str> {
    c.to_pinyin().map(|p| p.with_tone_num_end())
}

/// Pinyin sort key of `text`.
///
/// In `family, given` form only the part before the first comma is used.
/// Characters without a reading are dropped. If nothing is readable the
/// normalized text is returned instead, so non-empty input never yields an
/// empty key.
pub fn to_pinyin(text: &str) -> String {
    let name = match text.split_once(',') {
        Some((head, _)) => head,
        None => text,
    };

    let mut joined: String = name
        .to_pinyin()
        .flatten()
        .map(|p| p.with_tone_num_end())
        .collect();

    if joined.is_empty() {
        return normalize(text);
    }

    if let Some(surname) = name.chars().next() {
        if let (Some(override_reading), Some(default_reading)) =
            (surname_reading(surname), reading(surname))
        {
            if let Some(rest) = joined.strip_prefix(default_reading) {
                joined = format!("{override_reading}{rest}");
            }
        }
    }

    joined
}
