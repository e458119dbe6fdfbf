//! Listing filters
//!
//! Filters compose as a conjunction: a book is listed only when it
//! satisfies every filter that is present.

use super::{Book, ValidationError};

/// Boolean query flag encoded as `"0"` / `"1"`
pub struct FilterFlag;

impl FilterFlag {
    /// Decode a flag value, naming the offending field on failure.
    pub fn parse(field: &'static str, value: &str) -> Result<bool, ValidationError> {
        match value {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(ValidationError::InvalidFlag {
                field,
                value: other.to_owned(),
            }),
        }
    }
}

/// Decoded listing filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub reading: Option<bool>,
    pub finished: Option<bool>,
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
}

impl BookFilter {
    /// Decode raw query values.
    pub fn parse(
        reading: Option<&str>,
        finished: Option<&str>,
        name: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            reading: reading
                .map(|v| FilterFlag::parse("reading", v))
                .transpose()?,
            finished: finished
                .map(|v| FilterFlag::parse("finished", v))
                .transpose()?,
            name: name.map(str::to_owned),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.reading.is_none() && self.finished.is_none() && self.name.is_none()
    }

    pub fn matches(&self, book: &Book) -> bool {
        if self.reading.is_some_and(|r| r != book.reading) {
            return false;
        }
        if self.finished.is_some_and(|f| f != book.finished) {
            return false;
        }
        match &self.name {
            Some(needle) => book
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}
