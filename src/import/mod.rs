// File: src/import/mod.rs
//! Bulk import sources.

pub mod joukahainen;

pub use joukahainen::{parse_vocabulary, VocabularyImporter};
