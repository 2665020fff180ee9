// File: src/merger.rs
use crate::core::encoding::TextEncoding;
use crate::core::types::{CandidateWord, MergeSummary};
use crate::error::Result;
use crate::persistence::{load_from_disk, DictionaryFile};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Adds candidate words to an existing dictionary without re-sorting it.
/// New words are appended in first-seen order; a later sanitize restores order.
#[derive(Debug, Default)]
pub struct WordMerger;

impl WordMerger {
    pub fn new() -> Self {
        Self
    }

    /// Loads the dictionary, merges `candidates` and writes it back with the new
    /// count. An empty batch still rewrites the file unchanged.
    pub fn add_words<I, S>(
        &self,
        path: &Path,
        encoding: TextEncoding,
        candidates: I,
    ) -> Result<MergeSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut file = load_from_disk(path, encoding)?;
        let summary = self.merge_into(&mut file, candidates);
        file.save(path, encoding)?;

        info!(
            path = %path.display(),
            added = summary.added,
            already_present = summary.already_present,
            rejected = summary.rejected,
            total = summary.total,
            "merged words into dictionary"
        );
        Ok(summary)
    }

    /// In-memory part of `add_words`. Afterwards the header equals the body length.
    pub fn merge_into<I, S>(&self, file: &mut DictionaryFile, candidates: I) -> MergeSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known: HashSet<String> = file.entries.iter().cloned().collect();
        let mut summary = MergeSummary::default();

        for raw in candidates {
            let Some(word) = CandidateWord::new(raw.as_ref()) else {
                summary.rejected += 1;
                continue;
            };
            if !word.is_representable() {
                warn!(word = %word.as_str().escape_debug(), "skipping word containing a line break");
                summary.rejected += 1;
                continue;
            }
            if known.contains(word.as_str()) {
                debug!(word = %word, "already in dictionary");
                summary.already_present += 1;
                continue;
            }
            let word = word.into_string();
            known.insert(word.clone());
            file.entries.push(word);
            summary.added += 1;
        }

        file.declared_count = file.entries.len();
        summary.total = file.declared_count;
        summary
    }
}
