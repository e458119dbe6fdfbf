//! Record store - the in-memory shelf of books
//!
//! # Design Principles
//!
//! - One ordered `Vec<Book>`; insertion order is listing order
//! - Validate before mutating: a rejected create/update leaves the shelf untouched
//! - `finished` is always derived, never taken from input
//! - Ids are never reused, even after the book that held them is deleted
//! - Clock and id generation are injected so tests stay deterministic

pub mod clock;
pub mod ids;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::models::{Book, BookFilter, BookId, BookInput, BookSummary, ValidationError};

pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::{IdGenerator, NanoIdGenerator, SequentialIds, DEFAULT_ID_LEN};

/// Draws from the id generator before giving up on a create
const MAX_ID_ATTEMPTS: usize = 16;

/// Why a listing came back empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoMatch {
    /// The shelf holds no books at all
    EmptyShelf,
    /// Books exist but none satisfied the filter
    Filtered { name: Option<String> },
}

impl fmt::Display for NoMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyShelf => write!(f, "shelf is empty"),
            Self::Filtered { name: Some(name) } => {
                write!(f, "no book name contains '{}'", name)
            }
            Self::Filtered { name: None } => write!(f, "no book matches the filter"),
        }
    }
}

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("not found: book '{id}'")]
    NotFound { id: String },

    #[error("no results: {0}")]
    NoMatch(NoMatch),

    #[error("could not issue a unique id after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },
}

/// Ordered in-memory collection of books
pub struct Shelf {
    books: Vec<Book>,
    issued: HashSet<BookId>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Shelf {
    /// Empty shelf using the wall clock and random 16-character ids.
    pub fn new() -> Self {
        Self::with_ports(Arc::new(SystemClock), Arc::new(NanoIdGenerator::default()))
    }

    /// Empty shelf with explicit clock and id generator.
    pub fn with_ports(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            books: Vec::new(),
            issued: HashSet::new(),
            clock,
            ids,
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Books in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    /// Validate and append a new book, returning its id.
    pub fn create(&mut self, input: BookInput) -> Result<BookId, StoreError> {
        let draft = input.validate()?;
        let id = self.issue_id()?;
        let now = self.clock.now();

        self.books.push(Book::from_draft(id.clone(), draft, now));
        tracing::info!(book_id = %id, total = self.books.len(), "book added");
        Ok(id)
    }

    /// List projections of every book that passes `filter`.
    ///
    /// An empty result is reported as [`StoreError::NoMatch`] so callers
    /// can tell an empty shelf apart from a filter that matched nothing.
    pub fn list(&self, filter: &BookFilter) -> Result<Vec<BookSummary>, StoreError> {
        if self.books.is_empty() {
            return Err(StoreError::NoMatch(NoMatch::EmptyShelf));
        }

        let books: Vec<BookSummary> = self
            .books
            .iter()
            .filter(|book| filter.matches(book))
            .map(Book::to_summary)
            .collect();
        tracing::debug!(?filter, matched = books.len(), "books listed");

        if books.is_empty() {
            return Err(StoreError::NoMatch(NoMatch::Filtered {
                name: filter.name.clone(),
            }));
        }
        Ok(books)
    }

    pub fn get(&self, id: &str) -> Result<&Book, StoreError> {
        self.books
            .iter()
            .find(|book| book.id.as_str() == id)
            .ok_or_else(|| not_found(id))
    }

    /// Replace every field except `id` and `inserted_at`.
    ///
    /// Fails with `NotFound` before validating; a validation failure
    /// leaves the stored book unmodified.
    pub fn update(&mut self, id: &str, input: BookInput) -> Result<&Book, StoreError> {
        let index = self.position(id)?;
        let draft = input.validate()?;
        let now = self.clock.now();

        let book = &mut self.books[index];
        book.apply(draft, now);
        tracing::info!(book_id = %book.id, finished = book.finished, "book updated");
        Ok(book)
    }

    /// Remove a book, keeping the order of the rest.
    pub fn delete(&mut self, id: &str) -> Result<Book, StoreError> {
        let index = self.position(id)?;
        let book = self.books.remove(index);
        tracing::info!(book_id = %book.id, total = self.books.len(), "book deleted");
        Ok(book)
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.books
            .iter()
            .position(|book| book.id.as_str() == id)
            .ok_or_else(|| not_found(id))
    }

    fn issue_id(&mut self) -> Result<BookId, StoreError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.generate();
            if self.issued.insert(id.clone()) {
                return Ok(id);
            }
            tracing::warn!(book_id = %id, "generated id already issued, retrying");
        }
        Err(StoreError::IdSpaceExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

impl Default for Shelf {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: &str) -> StoreError {
    StoreError::NotFound { id: id.to_owned() }
}
