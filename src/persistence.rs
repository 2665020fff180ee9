// File: src/persistence.rs
//! The on-disk dictionary format: a decimal word count on the first line,
//! then one entry per line.

use crate::core::encoding::TextEncoding;
use crate::core::types::fits_on_one_line;
use crate::error::{DictError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// An in-memory dictionary file. `declared_count` is the header as read and is
/// not checked against `entries`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryFile {
    pub declared_count: usize,
    pub entries: Vec<String>,
}

impl DictionaryFile {
    /// A dictionary whose header matches its body.
    pub fn from_entries(entries: Vec<String>) -> Self {
        Self {
            declared_count: entries.len(),
            entries,
        }
    }

    /// Parses decoded file content. Line terminators may be `\n` or `\r\n`; a
    /// missing newline after the last entry is tolerated. A completely empty
    /// file is read as an empty dictionary.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut lines = text.split('\n');
        let header = lines.next().unwrap_or("");
        let declared_count = header
            .trim()
            .parse::<usize>()
            .map_err(|_| DictError::MalformedHeader {
                path: path.to_path_buf(),
                line: header.trim_end_matches('\r').to_string(),
            })?;

        let mut entries: Vec<String> = lines
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        // The piece after the final newline is not an entry.
        if text.ends_with('\n') {
            entries.pop();
        }

        Ok(Self {
            declared_count,
            entries,
        })
    }

    /// Encodes the file content: count, newline, then each entry and a newline.
    /// An entry holding `\n` or `\r` would not read back as written and is refused.
    pub fn render(&self, encoding: TextEncoding) -> Result<Vec<u8>> {
        render(encoding, self.declared_count, &self.entries)
    }

    pub fn load(path: &Path, encoding: TextEncoding) -> Result<Self> {
        load_from_disk(path, encoding)
    }

    pub fn save(&self, path: &Path, encoding: TextEncoding) -> Result<()> {
        save_to_disk(path, encoding, self.declared_count, &self.entries)
    }
}

fn render(encoding: TextEncoding, count: usize, entries: &[String]) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(entries.iter().map(|e| e.len() + 1).sum::<usize>() + 8);
    encoding.encode_into(&format!("{count}\n"), &mut bytes)?;
    for entry in entries {
        if !fits_on_one_line(entry) {
            return Err(DictError::LineBreak {
                word: entry.clone(),
            });
        }
        encoding.encode_into(entry, &mut bytes)?;
        encoding.encode_into("\n", &mut bytes)?;
    }
    Ok(bytes)
}

pub fn load_from_disk(path: &Path, encoding: TextEncoding) -> Result<DictionaryFile> {
    let bytes = fs::read(path).map_err(|e| DictError::io(path, e))?;
    let text = encoding.decode(&bytes, path)?;
    let file = DictionaryFile::parse(&text, path)?;
    debug!(
        path = %path.display(),
        %encoding,
        declared = file.declared_count,
        entries = file.entries.len(),
        "loaded dictionary"
    );
    Ok(file)
}

/// Writes `count` and `entries` over the existing content of `path`. Everything
/// is encoded before the file is touched, so an unencodable entry leaves storage
/// unchanged. The file is truncated in place: its permissions stay as they were
/// and a symlinked path updates the link target.
pub fn save_to_disk(
    path: &Path,
    encoding: TextEncoding,
    count: usize,
    entries: &[String],
) -> Result<()> {
    let bytes = render(encoding, count, entries)?;
    fs::write(path, &bytes).map_err(|e| DictError::io(path, e))?;

    debug!(path = %path.display(), %encoding, count, bytes = bytes.len(), "saved dictionary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn header_is_returned_without_validation() {
        let file = DictionaryFile::parse("99\nb\na\n", Path::new("t")).unwrap();
        assert_eq!(file.declared_count, 99);
        assert_eq!(file.entries, words(&["b", "a"]));
    }

    #[test]
    fn crlf_and_missing_final_newline_are_tolerated() {
        let file = DictionaryFile::parse("2\r\nkissa\r\nkoira", Path::new("t")).unwrap();
        assert_eq!(file.declared_count, 2);
        assert_eq!(file.entries, words(&["kissa", "koira"]));
    }

    #[test]
    fn blank_lines_inside_the_body_are_entries() {
        let file = DictionaryFile::parse("3\na\n\nb\n", Path::new("t")).unwrap();
        assert_eq!(file.entries, words(&["a", "", "b"]));
    }

    #[test]
    fn header_only_and_empty_file() {
        let file = DictionaryFile::parse("0\n", Path::new("t")).unwrap();
        assert_eq!(file, DictionaryFile::default());
        let file = DictionaryFile::parse("", Path::new("t")).unwrap();
        assert_eq!(file, DictionaryFile::default());
    }

    #[test]
    fn non_numeric_header_is_rejected() {
        let err = DictionaryFile::parse("kissa\nkoira\n", Path::new("t")).unwrap_err();
        assert!(matches!(err, DictError::MalformedHeader { ref line, .. } if line == "kissa"));
    }

    #[test]
    fn render_matches_the_format() {
        let file = DictionaryFile::from_entries(words(&["a", "b"]));
        let bytes = file.render(TextEncoding::utf8()).unwrap();
        assert_eq!(bytes, b"2\na\nb\n");
    }

    #[test]
    fn save_overwrites_and_load_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fi.dic");
        fs::write(&path, "old content that is longer than the new one").unwrap();

        let latin = TextEncoding::for_label("iso-8859-1").unwrap();
        save_to_disk(&path, latin, 7, &words(&["äes", "öljy"])).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"7\n\xE4es\n\xF6ljy\n");

        let loaded = load_from_disk(&path, latin).unwrap();
        assert_eq!(loaded.declared_count, 7);
        assert_eq!(loaded.entries, words(&["äes", "öljy"]));
    }

    #[test]
    fn unencodable_entry_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fi.dic");
        fs::write(&path, "1\nvanha\n").unwrap();
        let latin = TextEncoding::for_label("windows-1252").unwrap();

        let err = save_to_disk(&path, latin, 1, &words(&["汉字"])).unwrap_err();
        assert!(matches!(err, DictError::Encode { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\nvanha\n");
    }

    #[test]
    fn entry_with_line_break_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fi.dic");
        fs::write(&path, "1\nvanha\n").unwrap();

        for bad in ["kala\r", "kala\nhauki"] {
            let err = save_to_disk(&path, TextEncoding::utf8(), 2, &words(&["ahven", bad])).unwrap_err();
            assert!(matches!(err, DictError::LineBreak { ref word } if word == bad));
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\nvanha\n");
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fi.dic");
        fs::write(&path, "0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        save_to_disk(&path, TextEncoding::utf8(), 1, &words(&["kala"])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\nkala\n");
        assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn save_through_symlink_writes_the_target() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.dic");
        let link = dir.path().join("fi.dic");
        fs::write(&real, "1\nkala\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        save_to_disk(&link, TextEncoding::utf8(), 2, &words(&["kala", "hauki"])).unwrap();
        assert_eq!(fs::read_to_string(&real).unwrap(), "2\nkala\nhauki\n");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_from_disk(&dir.path().join("none.dic"), TextEncoding::utf8()).unwrap_err();
        assert!(matches!(err, DictError::Io { .. }));
    }
}
