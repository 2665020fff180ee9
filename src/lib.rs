// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod import;
pub mod merger;
pub mod persistence;

pub use crate::config::Settings;
pub use crate::core::encoding::TextEncoding;
pub use crate::core::engine::MaintenanceEngine;
pub use crate::core::queue::PendingWords;
pub use crate::core::sanitizer::Sanitizer;
pub use crate::core::types::{CandidateWord, ImportBatch, MergeSummary, SanitizeReport};
pub use crate::error::{DictError, ErrorKind, Result};
pub use crate::import::VocabularyImporter;
pub use crate::merger::WordMerger;
pub use crate::persistence::DictionaryFile;
