use std::path::PathBuf;

use chrono::NaiveDate;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path}: {source}")]
    Document { path: PathBuf, source: ParseError },

    #[error("front matter serialization error: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("date `{0}` has no TOML representation: years must be 0000-9999")]
    DateOutOfRange(NaiveDate),
}

/// A front matter parse failure.
///
/// Reasons fall into three classes: structural (the delimiter pair or the
/// TOML between the delimiters), schema (missing or ill-typed fields), and
/// semantic (fields that are present and well-typed but carry an impossible
/// value). [`ParseError::category`] reports the class.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("missing opening `+++` delimiter on the first line")]
    MissingOpeningDelimiter,

    #[error("missing closing `+++` delimiter")]
    MissingClosingDelimiter,

    #[error("malformed front matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("invalid date `{0}`: expected a valid YYYY-MM-DD calendar date")]
    InvalidDate(String),

    #[error("field `title` must not be empty")]
    EmptyTitle,

    #[error("empty label in taxonomy `{0}`")]
    EmptyLabel(String),

    #[error("duplicate label `{label}` in taxonomy `{taxonomy}`")]
    DuplicateLabel { taxonomy: String, label: String },

    #[error("unknown key `{0}`: site-specific fields belong under `[extra]`")]
    UnknownKey(String),

    #[error("`extra.{0}` must be a scalar value")]
    NonScalarExtra(String),
}

impl ParseError {
    /// The failure class: `"structural"`, `"schema"`, or `"semantic"`.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::MissingOpeningDelimiter
            | Self::MissingClosingDelimiter
            | Self::Toml(_) => "structural",
            Self::MissingField(_)
            | Self::WrongType { .. }
            | Self::InvalidDate(_)
            | Self::UnknownKey(_)
            | Self::NonScalarExtra(_) => "schema",
            Self::EmptyTitle
            | Self::EmptyLabel(_)
            | Self::DuplicateLabel { .. } => "semantic",
        }
    }
}
