use crate::core::encoding::TextEncoding;
use crate::core::sanitizer::Sanitizer;
use crate::core::types::{MergeSummary, SanitizeReport};
use crate::error::Result;
use crate::import::VocabularyImporter;
use crate::merger::WordMerger;
use std::path::{Path, PathBuf};
use tracing::info;

// The maintenance engine binds one dictionary file and its encoding to the
// operations. Every call re-reads the file; nothing is cached between calls
// except a sanitize result waiting for commit.
#[derive(Debug)]
pub struct MaintenanceEngine {
    dictionary_path: PathBuf,
    encoding: TextEncoding,
    sanitizer: Sanitizer,
    merger: WordMerger,
    importer: VocabularyImporter,
}

impl MaintenanceEngine {
    pub fn new(dictionary_path: impl Into<PathBuf>, encoding: TextEncoding) -> Self {
        Self {
            dictionary_path: dictionary_path.into(),
            encoding,
            sanitizer: Sanitizer::new(),
            merger: WordMerger::new(),
            importer: VocabularyImporter::new(),
        }
    }

    pub fn dictionary_path(&self) -> &Path {
        &self.dictionary_path
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn sanitize(&mut self) -> Result<SanitizeReport> {
        self.sanitizer.sanitize(&self.dictionary_path, self.encoding)
    }

    pub fn staged_entries(&self) -> Option<&[String]> {
        self.sanitizer.staged_entries()
    }

    pub fn commit(&mut self) -> Result<()> {
        self.sanitizer.commit(&self.dictionary_path, self.encoding)
    }

    pub fn add_words<I, S>(&self, words: I) -> Result<MergeSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.merger
            .add_words(&self.dictionary_path, self.encoding, words)
    }

    /// Imports a vocabulary file and merges its words. The dictionary is not
    /// touched when the import fails.
    pub fn import_vocabulary(&self, xml_path: &Path) -> Result<MergeSummary> {
        let batch = self.importer.import_from(xml_path)?;
        info!(
            source = %batch.source.display(),
            words = batch.len(),
            "merging imported vocabulary"
        );
        self.add_words(batch.into_iter().map(|w| w.into_string()))
    }
}
