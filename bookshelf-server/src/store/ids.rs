//! IdGenerator port - book identifier generation
//!
//! # Implementations
//! - **NanoIdGenerator**: random URL-safe string (production)
//! - **SequentialIds**: `book-1`, `book-2`, ... (tests)

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

use crate::models::BookId;

/// Default identifier length
pub const DEFAULT_ID_LEN: usize = 16;

/// URL-safe alphabet (64 symbols)
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Produces candidate book identifiers.
///
/// Uniqueness across the shelf is enforced by the shelf itself; a
/// generator only has to make collisions unlikely.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> BookId;
}

/// Random fixed-length identifiers over a URL-safe alphabet
#[derive(Debug, Clone, Copy)]
pub struct NanoIdGenerator {
    len: usize,
}

impl NanoIdGenerator {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Default for NanoIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_LEN)
    }
}

impl IdGenerator for NanoIdGenerator {
    fn generate(&self) -> BookId {
        let mut rng = rand::thread_rng();
        let id: String = (0..self.len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        BookId::new(id)
    }
}

/// Deterministic identifiers for tests
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> BookId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        BookId::new(format!("book-{}", n))
    }
}
