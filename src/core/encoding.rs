// File: src/core/encoding.rs
use crate::error::{DictError, Result};
use encoding_rs::Encoding;
use std::fmt;
use std::path::Path;

/// A text encoding resolved from a code page label such as `utf-8` or `iso-8859-1`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    pub fn utf8() -> Self {
        Self(encoding_rs::UTF_8)
    }

    /// Resolves a label using WHATWG label rules (case-insensitive, surrounding
    /// whitespace ignored). Note that `iso-8859-1` and `latin1` resolve to windows-1252.
    pub fn for_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| DictError::UnknownEncoding(label.to_string()))?;
        // UTF-16 and `replacement` decode fine but encode as UTF-8.
        if encoding.output_encoding() != encoding {
            return Err(DictError::UnsupportedEncoding(label.to_string()));
        }
        Ok(Self(encoding))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Decodes the whole file content. A leading BOM for this encoding is skipped.
    pub fn decode(&self, bytes: &[u8], path: &Path) -> Result<String> {
        let (text, had_errors) = self.0.decode_with_bom_removal(bytes);
        if had_errors {
            return Err(DictError::Decode {
                path: path.to_path_buf(),
                encoding: self.name(),
            });
        }
        Ok(text.into_owned())
    }

    /// Appends `text` encoded to `out`. Unmappable characters are an error rather
    /// than being replaced with numeric character references.
    pub fn encode_into(&self, text: &str, out: &mut Vec<u8>) -> Result<()> {
        let (bytes, _, had_unmappable) = self.0.encode(text);
        if had_unmappable {
            return Err(DictError::Encode {
                word: text.to_string(),
                encoding: self.name(),
            });
        }
        out.extend_from_slice(&bytes);
        Ok(())
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextEncoding({})", self.name())
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn resolves_common_code_pages() {
        assert_eq!(TextEncoding::for_label("UTF-8").unwrap().name(), "UTF-8");
        assert_eq!(
            TextEncoding::for_label(" iso-8859-1 ").unwrap().name(),
            "windows-1252"
        );
        assert_eq!(
            TextEncoding::for_label("iso-8859-15").unwrap().name(),
            "ISO-8859-15"
        );
    }

    #[test]
    fn rejects_unknown_and_write_incapable_labels() {
        let err = TextEncoding::for_label("ebcdic-fi").unwrap_err();
        assert!(matches!(err, DictError::UnknownEncoding(_)));
        let err = TextEncoding::for_label("utf-16le").unwrap_err();
        assert!(matches!(err, DictError::UnsupportedEncoding(_)));
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn latin1_round_trips_finnish_letters() {
        let latin = TextEncoding::for_label("latin1").unwrap();
        let mut bytes = Vec::new();
        latin.encode_into("äyriäinen", &mut bytes).unwrap();
        assert_eq!(bytes[0], 0xE4);
        assert_eq!(latin.decode(&bytes, Path::new("x")).unwrap(), "äyriäinen");
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let err = TextEncoding::utf8()
            .decode(&[b'1', b'\n', 0xE4, b'\n'], Path::new("fi.dic"))
            .unwrap_err();
        assert!(matches!(err, DictError::Decode { .. }));
    }

    #[test]
    fn unmappable_character_is_an_encode_error() {
        let latin = TextEncoding::for_label("windows-1252").unwrap();
        let mut out = Vec::new();
        let err = latin.encode_into("日本", &mut out).unwrap_err();
        assert!(matches!(err, DictError::Encode { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn utf8_bom_is_skipped() {
        let text = TextEncoding::utf8()
            .decode(b"\xEF\xBB\xBF0\n", Path::new("fi.dic"))
            .unwrap();
        assert_eq!(text, "0\n");
    }
}
