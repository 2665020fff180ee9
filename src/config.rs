// File: src/config.rs
//! The application's JSON settings file.
//!
//! The file is shared with the graphical shell, which keeps its own keys
//! (`theme`, `scale`) in it. Keys this crate does not know are carried through
//! a load/save cycle unchanged.

use crate::core::encoding::TextEncoding;
use crate::core::engine::MaintenanceEngine;
use crate::error::{DictError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

pub const DEFAULT_DICTIONARY: &str = "default.dic";
pub const DEFAULT_ENCODING: &str = "utf-8";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the spelling dictionary file.
    pub dictionary: PathBuf,
    /// Code page label of the dictionary file.
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dictionary: PathBuf::from(DEFAULT_DICTIONARY),
            encoding: default_encoding(),
            other: serde_json::Map::new(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| DictError::io(path, e))?;
        let settings = serde_json::from_str(&content).map_err(|source| DictError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(DictError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| DictError::io(path, e))?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, self).map_err(|source| {
                DictError::Settings {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            writer.flush().map_err(|e| DictError::io(path, e))?;
        }
        temp_file
            .persist(path)
            .map_err(|e| DictError::io(path, e.error))?;
        debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    pub fn text_encoding(&self) -> Result<TextEncoding> {
        TextEncoding::for_label(&self.encoding)
    }

    /// An engine for the configured dictionary.
    pub fn engine(&self) -> Result<MaintenanceEngine> {
        Ok(MaintenanceEngine::new(
            self.dictionary.clone(),
            self.text_encoding()?,
        ))
    }
}
