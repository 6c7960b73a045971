/*
 * entry.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! CSL-JSON records, reduced to what ordering needs.
//!
//! Bibliographies exported by different tools disagree on field shapes, so
//! every field except `id` is read leniently: a value of an unexpected shape
//! is treated as absent instead of rejecting the whole record.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

static FOUR_DIGIT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{4}").expect("valid year pattern"));

/// A bibliography record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BibEntry {
    /// CSL-JSON allows both string and integer ids.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient_names")]
    pub author: Vec<Name>,
    #[serde(default, deserialize_with = "lenient_names")]
    pub editor: Vec<Name>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(rename = "container-title", default, deserialize_with = "lenient_text")]
    pub container_title: Option<String>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub issued: Option<DateSpec>,
    #[serde(rename = "original-date", default, deserialize_with = "lenient_date")]
    pub original_date: Option<DateSpec>,
    #[serde(rename = "event-date", default, deserialize_with = "lenient_date")]
    pub event_date: Option<DateSpec>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub year: Option<DateSpec>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateSpec>,
}

impl BibEntry {
    pub fn new(id: impl Into<String>) -> Self {
        BibEntry {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn container_title(&self) -> &str {
        self.container_title.as_deref().unwrap_or("")
    }

    /// Display names of the authors, or of the editors when there are no
    /// authors. Names that render empty are left out.
    pub fn names(&self) -> Vec<String> {
        let people = if self.author.is_empty() {
            &self.editor
        } else {
            &self.author
        };
        people
            .iter()
            .map(Name::display_name)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Publication year, taken from the first date field that yields one.
    ///
    /// Fields are tried in the order `issued`, `original-date`,
    /// `event-date`, `year`, `date`.
    pub fn year(&self) -> Option<i64> {
        [
            &self.issued,
            &self.original_date,
            &self.event_date,
            &self.year,
            &self.date,
        ]
        .into_iter()
        .flatten()
        .find_map(DateSpec::year)
    }
}

/// A person or organisation name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    pub family: Option<String>,
    pub given: Option<String>,
    /// Institutional names, or names given as a single string.
    pub literal: Option<String>,
}

impl Name {
    pub fn literal(text: impl Into<String>) -> Self {
        Name {
            literal: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn person(family: impl Into<String>, given: impl Into<String>) -> Self {
        Name {
            family: Some(family.into()),
            given: Some(given.into()),
            literal: None,
        }
    }

    /// The literal name if present, else `"family given"`.
    ///
    /// Family comes first so that Chinese names read in their natural order
    /// and Western names sort by surname.
    pub fn display_name(&self) -> String {
        if let Some(literal) = self.literal.as_deref().filter(|l| !l.is_empty()) {
            return literal.to_string();
        }
        let family = self.family.as_deref().unwrap_or("");
        let given = self.given.as_deref().unwrap_or("");
        format!("{family} {given}").trim().to_string()
    }

    fn from_value(value: &Value) -> Option<Name> {
        match value {
            Value::Object(obj) => Some(Name {
                family: obj.get("family").and_then(text_of),
                given: obj.get("given").and_then(text_of),
                literal: obj.get("literal").and_then(text_of),
            }),
            Value::String(s) if !s.is_empty() => Some(Name::literal(s.clone())),
            _ => None,
        }
    }
}

/// The shapes a CSL-JSON date field is found in.
#[derive(Debug, Clone, PartialEq)]
pub enum DateSpec {
    /// `{"date-parts": [[2018, 5]], "literal": "..."}`, or a bare
    /// `[[2018, 5]]` list.
    Structured {
        parts: Vec<Vec<DatePart>>,
        literal: Option<String>,
    },
    /// `"circa 1990s"`, `"2018-05-01"`.
    Literal(String),
    /// `2018`.
    PlainYear(i64),
}

/// One element of a date-parts list; exporters write both numbers and
/// numeric strings.
#[derive(Debug, Clone, PartialEq)]
pub enum DatePart {
    Number(i64),
    Text(String),
}

impl DateSpec {
    /// The year this date names, if any. A year of zero counts as none.
    pub fn year(&self) -> Option<i64> {
        let year = match self {
            DateSpec::Structured { parts, literal } => {
                structured_year(parts).or_else(|| literal.as_deref().and_then(literal_year))
            }
            DateSpec::Literal(text) => literal_year(text),
            DateSpec::PlainYear(year) => Some(*year),
        };
        year.filter(|y| *y != 0)
    }

    fn from_value(value: &Value) -> Option<DateSpec> {
        match value {
            Value::Object(obj) => {
                let parts = obj.get("date-parts").map(parse_parts).unwrap_or_default();
                let literal = ["literal", "raw"]
                    .iter()
                    .find_map(|key| obj.get(*key).and_then(Value::as_str))
                    .or_else(|| obj.get("date-parts").and_then(Value::as_str))
                    .map(String::from);
                Some(DateSpec::Structured { parts, literal })
            }
            Value::Array(_) => Some(DateSpec::Structured {
                parts: parse_parts(value),
                literal: None,
            }),
            Value::String(s) => Some(DateSpec::Literal(s.clone())),
            Value::Number(n) => n.as_i64().map(DateSpec::PlainYear),
            _ => None,
        }
    }
}

/// First part of the first date-parts list.
fn structured_year(parts: &[Vec<DatePart>]) -> Option<i64> {
    match parts.first()?.first()? {
        DatePart::Number(n) => Some(*n),
        DatePart::Text(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => {
            s.parse().ok()
        }
        DatePart::Text(_) => None,
    }
}

/// First run of four digits in free text.
fn literal_year(text: &str) -> Option<i64> {
    FOUR_DIGIT_YEAR
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Reads `[[y, m, d], [y, m, d]]`; a flat `[y, m, d]` counts as one list.
fn parse_parts(value: &Value) -> Vec<Vec<DatePart>> {
    let Some(outer) = value.as_array() else {
        return Vec::new();
    };
    if outer.iter().all(|v| !v.is_array()) {
        return vec![outer.iter().filter_map(parse_part).collect()];
    }
    outer
        .iter()
        .filter_map(Value::as_array)
        .map(|inner| inner.iter().filter_map(parse_part).collect())
        .collect()
}

fn parse_part(value: &Value) -> Option<DatePart> {
    match value {
        Value::Number(n) => n.as_i64().map(DatePart::Number),
        Value::String(s) => Some(DatePart::Text(s.trim().to_string())),
        _ => None,
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(Error::custom("expected string or number for id")),
    }
}

fn lenient_names<'de, D>(deserializer: D) -> Result<Vec<Name>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Array(items) => items.iter().filter_map(Name::from_value).collect(),
        other => Name::from_value(other).into_iter().collect(),
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_of(&value))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(DateSpec::from_value(&value))
}
