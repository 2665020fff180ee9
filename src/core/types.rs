// src/core/types.rs
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A single word proposed for addition, trimmed and known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateWord(String);

impl CandidateWord {
    /// Trims surrounding whitespace. Returns `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// A word with a line break inside cannot be stored one-per-line.
    pub fn is_representable(&self) -> bool {
        fits_on_one_line(&self.0)
    }
}

/// True when `entry` survives a write and re-read of the line-based format.
pub fn fits_on_one_line(entry: &str) -> bool {
    !entry.contains(['\n', '\r'])
}

impl fmt::Display for CandidateWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Counts produced by one sanitize pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    /// Word count as declared by the header, possibly wrong.
    pub original_count: usize,
    /// Lines actually found in the body.
    pub sorted_count: usize,
    /// Distinct lines remaining.
    pub final_count: usize,
}

impl SanitizeReport {
    pub fn duplicates_removed(&self) -> usize {
        self.sorted_count - self.final_count
    }

    /// True when the header did not match the body.
    pub fn header_drift(&self) -> bool {
        self.original_count != self.sorted_count
    }
}

/// Words extracted from one vocabulary source, in document order.
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    pub source: PathBuf,
    /// Number of vocabulary entries the words were taken from.
    pub entries_read: usize,
    pub words: Vec<CandidateWord>,
}

impl ImportBatch {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl IntoIterator for ImportBatch {
    type Item = CandidateWord;
    type IntoIter = std::vec::IntoIter<CandidateWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.into_iter()
    }
}

/// Outcome of merging a batch into a dictionary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub added: usize,
    /// Candidates already in the dictionary or earlier in the same batch.
    pub already_present: usize,
    /// Empty after trimming, or containing a line break.
    pub rejected: usize,
    /// Entry count written to the header.
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_is_trimmed() {
        assert_eq!(CandidateWord::new("  kissa\t").unwrap().as_str(), "kissa");
        assert!(CandidateWord::new(" \n ").is_none());
        assert!(!CandidateWord::new("a\nb").unwrap().is_representable());
    }

    #[test]
    fn report_helpers() {
        let report = SanitizeReport {
            original_count: 99,
            sorted_count: 4,
            final_count: 3,
        };
        assert_eq!(report.duplicates_removed(), 1);
        assert!(report.header_drift());
    }
}
