//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod book;
pub mod filter;
pub mod validation;

pub use book::{Book, BookDraft, BookId, BookInput, BookName, BookSummary, ReadingProgress};
pub use filter::{BookFilter, FilterFlag};
pub use validation::ValidationError;
