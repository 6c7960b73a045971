/*
 * surnames.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Surnames read differently from the character's common reading.
//!
//! 单 is `dan1` in running text but `shan4` as a family name; 曾 is `ceng2`
//! as a word and `zeng1` as a name. Dictionary transliteration picks the
//! common reading, so these names would sort under the wrong letter.

/// Surname readings, sorted by character so lookups can binary search.
pub static SURNAME_READINGS: &[(char, &str)] = &[
    ('乐', "yue4"),
    ('仇', "qiu2"),
    ('任', "ren2"),
    ('区', "ou1"),
    ('单', "shan4"),
    ('尉', "yu4"),
    ('曾', "zeng1"),
    ('朴', "piao2"),
    ('查', "zha1"),
    ('燕', "yan1"),
    ('葛', "ge3"),
    ('覃', "qin2"),
    ('解', "xie4"),
    ('阚', "kan4"),
];

/// Tone-numbered reading of `c` when used as a family name, if it differs
/// from the dictionary default.
pub fn surname_reading(c: char) -> Option<&'static str> {
    SURNAME_READINGS
        .binary_search_by_key(&c, |(ch, _)| *ch)
        .ok()
        .map(|idx| SURNAME_READINGS[idx].1)
}
