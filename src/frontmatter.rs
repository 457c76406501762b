//! Front matter parsing and rendering.
//!
//! A content document is a TOML metadata block delimited by `+++` lines,
//! followed by a free-form body:
//!
//! ```text
//! +++
//! title = "Welcome to the Rapina Blog"
//! date = 2026-02-10
//!
//! [taxonomies]
//! tags = ["meta"]
//! +++
//!
//! We're excited to launch the Rapina blog!
//! ```
//!
//! The schema is closed: `title`, `description`, `date`, `taxonomies`, and
//! `extra` are the only recognized top-level keys. Site-specific fields live
//! under `[extra]`. The body is opaque payload; nothing after the closing
//! delimiter is interpreted.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use toml::{Table, Value};

use crate::error::{Error, ParseError, Result};

/// Delimiter line marking the start and end of the metadata block.
pub const DELIMITER: &str = "+++";

/// Date format accepted when `date` is given as a string.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The validated metadata block of a content document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontMatter {
    /// Document title; never empty.
    pub title: String,
    /// Optional one-line summary.
    pub description: Option<String>,
    /// Publication date.
    pub date: NaiveDate,
    /// Taxonomy name to its labels, in declared order.
    pub taxonomies: BTreeMap<String, Vec<String>>,
    /// Site-specific scalar fields outside the core schema.
    pub extra: BTreeMap<String, Value>,
}

/// Split raw document text into its metadata block and body.
///
/// The first line must be the delimiter; the block runs until the next line
/// that is exactly the delimiter (trailing whitespace tolerated, so CRLF
/// files work). The body is everything after the closing delimiter with
/// leading whitespace trimmed.
pub fn split(text: &str) -> Result<(&str, &str), ParseError> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next().unwrap_or("");
    if !is_delimiter(first) {
        return Err(ParseError::MissingOpeningDelimiter);
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if is_delimiter(line) {
            let block = &text[block_start..offset];
            let body = text[offset + line.len()..].trim_start();
            return Ok((block, body));
        }
        offset += line.len();
    }

    Err(ParseError::MissingClosingDelimiter)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Parse raw document text into front matter and body.
///
/// The whole pipeline: delimiter split, TOML parse, then a schema walk with
/// one precise error per failure reason. Parsing is all-or-nothing; a
/// failure never yields a partial result.
///
/// # Examples
///
/// ```
/// use masthead::frontmatter;
///
/// let text = "+++\ntitle = \"Hello\"\ndate = 2026-02-10\n+++\nHi.";
/// let (fm, body) = frontmatter::parse(text).unwrap();
/// assert_eq!(fm.title, "Hello");
/// assert_eq!(fm.date.to_string(), "2026-02-10");
/// assert_eq!(body, "Hi.");
/// ```
pub fn parse(text: &str) -> Result<(FrontMatter, String), ParseError> {
    let (block, body) = split(text)?;
    let mut table: Table = block.parse()?;

    let title = match table.remove("title") {
        Some(Value::String(title)) => {
            if title.trim().is_empty() {
                return Err(ParseError::EmptyTitle);
            }
            title
        }
        Some(_) => return Err(wrong_type("title", "a string")),
        None => return Err(ParseError::MissingField("title")),
    };

    let description = match table.remove("description") {
        Some(Value::String(description)) => Some(description),
        Some(_) => return Err(wrong_type("description", "a string")),
        None => None,
    };

    let date = match table.remove("date") {
        Some(value) => parse_date(&value)?,
        None => return Err(ParseError::MissingField("date")),
    };

    let taxonomies = match table.remove("taxonomies") {
        Some(Value::Table(taxonomies)) => parse_taxonomies(taxonomies)?,
        Some(_) => {
            return Err(wrong_type("taxonomies", "a table of label arrays"));
        }
        None => BTreeMap::new(),
    };

    let extra = match table.remove("extra") {
        Some(Value::Table(extra)) => parse_extra(extra)?,
        Some(_) => return Err(wrong_type("extra", "a table of scalars")),
        None => BTreeMap::new(),
    };

    // The schema is closed; anything left over was not recognized.
    if let Some(key) = table.keys().next() {
        return Err(ParseError::UnknownKey(key.clone()));
    }

    let front_matter = FrontMatter {
        title,
        description,
        date,
        taxonomies,
        extra,
    };
    Ok((front_matter, body.to_string()))
}

fn wrong_type(field: impl Into<String>, expected: &'static str) -> ParseError {
    ParseError::WrongType {
        field: field.into(),
        expected,
    }
}

fn parse_date(value: &Value) -> Result<NaiveDate, ParseError> {
    match value {
        Value::Datetime(datetime) => {
            if datetime.time.is_some() || datetime.offset.is_some() {
                return Err(ParseError::InvalidDate(datetime.to_string()));
            }
            let date = datetime
                .date
                .ok_or_else(|| ParseError::InvalidDate(datetime.to_string()))?;
            NaiveDate::from_ymd_opt(
                i32::from(date.year),
                u32::from(date.month),
                u32::from(date.day),
            )
            .ok_or_else(|| ParseError::InvalidDate(datetime.to_string()))
        }
        Value::String(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map_err(|_| ParseError::InvalidDate(text.clone())),
        _ => Err(wrong_type("date", "a YYYY-MM-DD date")),
    }
}

fn parse_taxonomies(
    table: Table,
) -> Result<BTreeMap<String, Vec<String>>, ParseError> {
    let mut taxonomies = BTreeMap::new();
    for (name, value) in table {
        let Value::Array(values) = value else {
            return Err(wrong_type(
                format!("taxonomies.{name}"),
                "an array of strings",
            ));
        };

        let mut labels = Vec::with_capacity(values.len());
        for value in values {
            let Value::String(label) = value else {
                return Err(wrong_type(
                    format!("taxonomies.{name}"),
                    "an array of strings",
                ));
            };
            if label.trim().is_empty() {
                return Err(ParseError::EmptyLabel(name));
            }
            if labels.contains(&label) {
                return Err(ParseError::DuplicateLabel {
                    taxonomy: name,
                    label,
                });
            }
            labels.push(label);
        }
        taxonomies.insert(name, labels);
    }
    Ok(taxonomies)
}

fn parse_extra(table: Table) -> Result<BTreeMap<String, Value>, ParseError> {
    let mut extra = BTreeMap::new();
    for (key, value) in table {
        if matches!(value, Value::Array(_) | Value::Table(_)) {
            return Err(ParseError::NonScalarExtra(key));
        }
        extra.insert(key, value);
    }
    Ok(extra)
}

/// Serializable view fixing the field order of rendered front matter.
#[derive(Serialize)]
struct RenderedFrontMatter<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    date: toml::value::Datetime,
    #[serde(skip_serializing_if = "Option::is_none")]
    taxonomies: Option<&'a BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra: Option<&'a BTreeMap<String, Value>>,
}

fn toml_date(date: NaiveDate) -> Result<toml::value::Datetime> {
    // TOML dates carry four-digit years.
    let year = u16::try_from(date.year())
        .ok()
        .filter(|year| *year <= 9999)
        .ok_or(Error::DateOutOfRange(date))?;
    Ok(toml::value::Datetime {
        date: Some(toml::value::Date {
            year,
            month: date.month() as u8,
            day: date.day() as u8,
        }),
        time: None,
        offset: None,
    })
}

/// Render front matter and a body back into delimited document text.
///
/// The inverse of [`parse`]: the output starts with the delimiter pair and
/// parses back to the same front matter. The body is emitted verbatim after
/// a blank separator line, so a body with no leading whitespace round-trips
/// exactly. Empty `taxonomies`/`extra` tables and an absent description are
/// omitted from the block.
///
/// A date whose year falls outside 0000-9999 has no TOML representation and
/// fails with [`Error::DateOutOfRange`] rather than rendering a wrapped
/// value.
pub fn render(front_matter: &FrontMatter, body: &str) -> Result<String> {
    let rendered = RenderedFrontMatter {
        title: &front_matter.title,
        description: front_matter.description.as_deref(),
        date: toml_date(front_matter.date)?,
        taxonomies: (!front_matter.taxonomies.is_empty())
            .then_some(&front_matter.taxonomies),
        extra: (!front_matter.extra.is_empty()).then_some(&front_matter.extra),
    };
    let block = toml::to_string(&rendered)?;
    Ok(format!("{DELIMITER}\n{block}{DELIMITER}\n\n{body}"))
}
