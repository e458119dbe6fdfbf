//! Validation error types

use std::fmt;

/// Validation error for book input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is absent or empty
    MissingName,

    /// More pages read than the book has
    ReadPageExceedsPageCount { read_page: u32, page_count: u32 },

    /// Boolean query flag that is neither "0" nor "1"
    InvalidFlag { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "missing name"),
            Self::ReadPageExceedsPageCount {
                read_page,
                page_count,
            } => write!(
                f,
                "readPage exceeds pageCount ({} > {})",
                read_page, page_count
            ),
            Self::InvalidFlag { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
