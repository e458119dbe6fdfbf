//! Command implementations for the bookshelf CLI

pub mod serve;

pub use serve::run_serve;
