// File: src/core/sanitizer.rs
use crate::core::encoding::TextEncoding;
use crate::core::types::SanitizeReport;
use crate::error::{DictError, Result};
use crate::persistence::{load_from_disk, save_to_disk};
use std::path::Path;
use tracing::{debug, info, warn};

/// Brings a dictionary into sorted, deduplicated, correctly counted form.
///
/// `sanitize` only stages the result; nothing is written until `commit`.
#[derive(Debug, Default)]
pub struct Sanitizer {
    staged: Option<Vec<String>>,
}

impl Sanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and cleans the dictionary, staging the result for `commit`. Any
    /// earlier stage is dropped first, so a failed call leaves nothing to commit.
    pub fn sanitize(&mut self, path: &Path, encoding: TextEncoding) -> Result<SanitizeReport> {
        self.staged = None;
        let file = load_from_disk(path, encoding)?;
        let (distinct, report) = sort_and_dedup(file.declared_count, file.entries);

        if report.header_drift() {
            warn!(
                path = %path.display(),
                declared = report.original_count,
                actual = report.sorted_count,
                "dictionary header does not match its body"
            );
        }
        info!(
            path = %path.display(),
            original = report.original_count,
            sorted = report.sorted_count,
            distinct = report.final_count,
            "sanitized dictionary"
        );

        self.staged = Some(distinct);
        Ok(report)
    }

    /// The sorted, distinct entries from the last `sanitize`, if any.
    pub fn staged_entries(&self) -> Option<&[String]> {
        self.staged.as_deref()
    }

    /// Writes the staged entries with their count as header. The stage is
    /// cleared only once the write succeeded.
    pub fn commit(&mut self, path: &Path, encoding: TextEncoding) -> Result<()> {
        let entries = self.staged.as_ref().ok_or(DictError::NotSanitized)?;
        save_to_disk(path, encoding, entries.len(), entries)?;
        info!(path = %path.display(), count = entries.len(), "committed sanitized dictionary");
        self.staged = None;
        Ok(())
    }
}

/// Sorts by raw content and drops exact duplicates. Case variants stay distinct.
pub fn sort_and_dedup(declared_count: usize, mut entries: Vec<String>) -> (Vec<String>, SanitizeReport) {
    entries.sort();
    let sorted_count = entries.len();
    entries.dedup();
    debug!(removed = sorted_count - entries.len(), "removed duplicate entries");

    let report = SanitizeReport {
        original_count: declared_count,
        sorted_count,
        final_count: entries.len(),
    };
    (entries, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn owned(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn sorts_and_removes_exact_duplicates() {
        let (distinct, report) = sort_and_dedup(99, owned(&["b", "a", "a", "c"]));
        assert_eq!(distinct, owned(&["a", "b", "c"]));
        assert_eq!(
            report,
            SanitizeReport {
                original_count: 99,
                sorted_count: 4,
                final_count: 3
            }
        );
    }

    #[test]
    fn case_variants_are_kept() {
        let (distinct, report) = sort_and_dedup(2, owned(&["apple", "Apple"]));
        assert_eq!(distinct, owned(&["Apple", "apple"]));
        assert_eq!(report.final_count, 2);
    }

    #[test]
    fn order_is_by_code_point() {
        let (distinct, _) = sort_and_dedup(3, owned(&["öljy", "zeta", "äes"]));
        assert_eq!(distinct, owned(&["zeta", "äes", "öljy"]));
    }

    #[test]
    fn commit_without_sanitize_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fi.dic");
        let mut sanitizer = Sanitizer::new();
        let err = sanitizer.commit(&path, TextEncoding::utf8()).unwrap_err();
        assert!(matches!(err, DictError::NotSanitized));
        assert!(!path.exists());
    }

    #[test]
    fn sanitize_stages_and_commit_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fi.dic");
        fs::write(&path, "1\nkoira\nkissa\nkoira\n").unwrap();

        let mut sanitizer = Sanitizer::new();
        let report = sanitizer.sanitize(&path, TextEncoding::utf8()).unwrap();
        assert_eq!((report.original_count, report.sorted_count, report.final_count), (1, 3, 2));
        // Nothing written yet.
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\nkoira\nkissa\nkoira\n");
        assert_eq!(sanitizer.staged_entries(), Some(&owned(&["kissa", "koira"])[..]));

        sanitizer.commit(&path, TextEncoding::utf8()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "2\nkissa\nkoira\n");
        assert!(sanitizer.staged_entries().is_none());
    }

    #[test]
    fn failed_sanitize_drops_the_earlier_stage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fi.dic");
        fs::write(&path, "2\nb\na\n").unwrap();

        let mut sanitizer = Sanitizer::new();
        sanitizer.sanitize(&path, TextEncoding::utf8()).unwrap();
        assert!(sanitizer.staged_entries().is_some());

        // Someone else rewrote the file in another code page meanwhile.
        fs::write(&path, b"3\nb\na\n\xe4iti\n").unwrap();
        let err = sanitizer.sanitize(&path, TextEncoding::utf8()).unwrap_err();
        assert!(matches!(err, DictError::Decode { .. }));
        assert!(sanitizer.staged_entries().is_none());

        let err = sanitizer.commit(&path, TextEncoding::utf8()).unwrap_err();
        assert!(matches!(err, DictError::NotSanitized));
        assert_eq!(fs::read(&path).unwrap(), b"3\nb\na\n\xe4iti\n");
    }
}
