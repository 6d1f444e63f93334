//! Quote Store: reads the dataset once at startup and keeps it as an
//! immutable, ordered collection for the rest of the process.
//!
//! The asset reader is injected through [`QuoteSource`] so tests can feed
//! inline JSON and the binary can swap the bundled dataset for a file named in
//! the config. Every failure is reported as a [`DataLoadError`]; the caller is
//! expected to abort startup because a quote screen without quotes has nothing
//! to show.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::models::Quote;

/// Dataset compiled into the binary.
const BUNDLED_QUOTES: &str = include_str!("../assets/quotes.json");

/// Errors raised while turning the raw resource into quotes.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read quotes from {origin}")]
    Unreadable {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("quote data in {origin} is empty")]
    EmptyDocument { origin: String },

    #[error("quote data in {origin} is not valid JSON")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("quote data in {origin} must be a JSON array, found {found}")]
    NotAnArray { origin: String, found: &'static str },

    #[error("record {index} in {origin} is not a quote")]
    InvalidRecord {
        origin: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {index} in {origin} has an empty `{field}` field")]
    EmptyField {
        origin: String,
        index: usize,
        field: &'static str,
    },

    #[error("quote data in {origin} contains no quotes")]
    NoQuotes { origin: String },
}

/// Anything that can hand over the raw JSON text of a dataset.
pub trait QuoteSource {
    /// Human readable description used in errors and logs.
    fn origin(&self) -> String;

    fn read(&self) -> io::Result<String>;
}

/// The dataset shipped inside the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledQuotes;

impl QuoteSource for BundledQuotes {
    fn origin(&self) -> String {
        "bundled dataset".to_string()
    }

    fn read(&self) -> io::Result<String> {
        Ok(BUNDLED_QUOTES.to_string())
    }
}

/// A UTF-8 JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileQuotes {
    path: PathBuf,
}

impl FileQuotes {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuoteSource for FileQuotes {
    fn origin(&self) -> String {
        format!("'{}'", self.path.display())
    }

    fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}

impl QuoteSource for str {
    fn origin(&self) -> String {
        "inline data".to_string()
    }

    fn read(&self) -> io::Result<String> {
        Ok(self.to_string())
    }
}

impl QuoteSource for String {
    fn origin(&self) -> String {
        self.as_str().origin()
    }

    fn read(&self) -> io::Result<String> {
        Ok(self.clone())
    }
}

/// Read `source` and parse it into an ordered list of quotes.
pub fn load<S: QuoteSource + ?Sized>(source: &S) -> Result<Vec<Quote>, DataLoadError> {
    let origin = source.origin();
    let raw = source.read().map_err(|source| DataLoadError::Unreadable {
        origin: origin.clone(),
        source,
    })?;

    let quotes = parse_quotes(&raw, &origin)?;
    tracing::info!(origin = %origin, count = quotes.len(), "loaded quotes");
    Ok(quotes)
}

/// Parse the dataset text. Values are kept verbatim; nothing is trimmed.
fn parse_quotes(raw: &str, origin: &str) -> Result<Vec<Quote>, DataLoadError> {
    if raw.trim().is_empty() {
        return Err(DataLoadError::EmptyDocument {
            origin: origin.to_string(),
        });
    }

    let document: Value = serde_json::from_str(raw).map_err(|source| DataLoadError::Malformed {
        origin: origin.to_string(),
        source,
    })?;

    let records = match document {
        Value::Array(records) => records,
        other => {
            return Err(DataLoadError::NotAnArray {
                origin: origin.to_string(),
                found: json_kind(&other),
            })
        }
    };

    if records.is_empty() {
        return Err(DataLoadError::NoQuotes {
            origin: origin.to_string(),
        });
    }

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let quote: Quote =
                serde_json::from_value(record).map_err(|source| DataLoadError::InvalidRecord {
                    origin: origin.to_string(),
                    index,
                    source,
                })?;
            check_fields(&quote, index, origin)?;
            Ok(quote)
        })
        .collect()
}

fn check_fields(quote: &Quote, index: usize, origin: &str) -> Result<(), DataLoadError> {
    let empty = if quote.text.is_empty() {
        Some("quote")
    } else if quote.author.is_empty() {
        Some("author")
    } else {
        None
    };

    match empty {
        Some(field) => Err(DataLoadError::EmptyField {
            origin: origin.to_string(),
            index,
            field,
        }),
        None => Ok(()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The loaded, read-only collection. Built once and never reloaded.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    origin: String,
    quotes: Vec<Quote>,
}

impl QuoteStore {
    pub fn load<S: QuoteSource + ?Sized>(source: &S) -> Result<Self, DataLoadError> {
        let quotes = load(source)?;
        Ok(Self {
            origin: source.origin(),
            quotes,
        })
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Where the quotes came from, e.g. `bundled dataset` or a file path.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}
