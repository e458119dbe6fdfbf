//! Book records and the validated pieces they are built from

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::ValidationError;

/// Opaque book identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated book name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookName(String);

impl BookName {
    /// Create a book name, rejecting the empty string.
    ///
    /// # Example
    /// ```
    /// use bookshelf_server::models::BookName;
    ///
    /// assert!(BookName::new("Dicoding").is_ok());
    /// assert!(BookName::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::MissingName);
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Page count and read page, with `read_page <= page_count` guaranteed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingProgress {
    page_count: u32,
    read_page: u32,
}

impl ReadingProgress {
    pub fn new(page_count: u32, read_page: u32) -> Result<Self, ValidationError> {
        if read_page > page_count {
            return Err(ValidationError::ReadPageExceedsPageCount {
                read_page,
                page_count,
            });
        }
        Ok(Self {
            page_count,
            read_page,
        })
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn read_page(&self) -> u32 {
        self.read_page
    }

    /// A book is finished once every page has been read.
    pub fn finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// Create/update payload as sent by clients.
///
/// Every field is optional so an absent `name` surfaces as a validation
/// failure instead of a parse failure. Client-supplied `finished`, `id`
/// and timestamps are not part of the payload and are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    pub reading: Option<bool>,
}

impl BookInput {
    /// Validate the payload. The name is checked before page ordering.
    pub fn validate(self) -> Result<BookDraft, ValidationError> {
        let name = BookName::new(self.name.as_deref().unwrap_or_default())?;
        let progress =
            ReadingProgress::new(self.page_count.unwrap_or(0), self.read_page.unwrap_or(0))?;

        Ok(BookDraft {
            name,
            year: self.year.unwrap_or(0),
            author: self.author.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            publisher: self.publisher.unwrap_or_default(),
            progress,
            reading: self.reading.unwrap_or(false),
        })
    }
}

/// Validated field set, ready to become or replace a stored record
#[derive(Debug, Clone)]
pub struct BookDraft {
    pub name: BookName,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub progress: ReadingProgress,
    pub reading: bool,
}

/// Stored book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    pub finished: bool,
    pub reading: bool,
    #[serde(serialize_with = "serialize_timestamp")]
    pub inserted_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub(crate) fn from_draft(id: BookId, draft: BookDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.into_string(),
            year: draft.year,
            author: draft.author,
            summary: draft.summary,
            publisher: draft.publisher,
            page_count: draft.progress.page_count(),
            read_page: draft.progress.read_page(),
            finished: draft.progress.finished(),
            reading: draft.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every field except `id` and `inserted_at`.
    pub(crate) fn apply(&mut self, draft: BookDraft, now: DateTime<Utc>) {
        self.name = draft.name.into_string();
        self.year = draft.year;
        self.author = draft.author;
        self.summary = draft.summary;
        self.publisher = draft.publisher;
        self.page_count = draft.progress.page_count();
        self.read_page = draft.progress.read_page();
        self.finished = draft.progress.finished();
        self.reading = draft.reading;
        self.updated_at = now;
    }

    pub fn to_summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Listing projection: id, name and publisher only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: BookId,
    pub name: String,
    pub publisher: String,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-01T12:00:00.000Z`
fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
