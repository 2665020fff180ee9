// File: src/import/joukahainen.rs
//! Reader for Joukahainen vocabulary exports.
//!
//! ```xml
//! <wordlist xml:lang="fi">
//!   <word id="1">
//!     <forms><form>aakkos=järjestys</form></forms>
//!     <classes><wclass>noun</wclass></classes>
//!     <inflection><infclass>kala</infclass></inflection>
//!   </word>
//! </wordlist>
//! ```
//!
//! Only `<form>` text is spellable. `=` marks a compound boundary and `|` an
//! inflection stem boundary; both are stripped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, info};

use crate::core::types::{CandidateWord, ImportBatch};
use crate::error::{DictError, Result};

const ROOT: &[u8] = b"wordlist";
const ENTRY: &[u8] = b"word";
const FORMS: &[u8] = b"forms";
const FORM: &[u8] = b"form";
const BOUNDARY_MARKERS: [char; 2] = ['=', '|'];

#[derive(Debug, Default)]
pub struct VocabularyImporter;

impl VocabularyImporter {
    pub fn new() -> Self {
        Self
    }

    /// Reads every entry's forms from the XML file at `xml_path`.
    pub fn import_from(&self, xml_path: &Path) -> Result<ImportBatch> {
        let file = File::open(xml_path).map_err(|e| DictError::io(xml_path, e))?;
        let batch = parse_vocabulary(BufReader::new(file), xml_path)?;
        info!(
            source = %xml_path.display(),
            entries = batch.entries_read,
            words = batch.len(),
            "imported vocabulary"
        );
        Ok(batch)
    }
}

/// Entry being read: its id for error messages and the forms collected so far.
struct PendingEntry {
    id: Option<String>,
    forms: Vec<CandidateWord>,
}

impl PendingEntry {
    fn new(start: &BytesStart<'_>) -> Self {
        let id = start
            .try_get_attribute("id")
            .ok()
            .flatten()
            .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()));
        Self {
            id,
            forms: Vec::new(),
        }
    }

    fn add_form(&mut self, raw: &str) {
        let spelled: String = raw.chars().filter(|c| !BOUNDARY_MARKERS.contains(c)).collect();
        if let Some(word) = CandidateWord::new(&spelled) {
            if !self.forms.contains(&word) {
                self.forms.push(word);
            }
        }
    }
}

/// Parses a Joukahainen export from `reader`. `source` is used for error
/// messages and recorded in the batch.
pub fn parse_vocabulary<R: BufRead>(reader: R, source: &Path) -> Result<ImportBatch> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut root_seen = false;
    let mut entry: Option<PendingEntry> = None;
    let mut form_text: Option<String> = None;
    let mut batch = ImportBatch {
        source: source.to_path_buf(),
        ..ImportBatch::default()
    };

    loop {
        let event = xml.read_event_into(&mut buf).map_err(|e| match e {
            quick_xml::Error::Io(io_err) => {
                DictError::io(source, io::Error::new(io_err.kind(), io_err.to_string()))
            }
            other => DictError::parse(
                source,
                format!("malformed XML at byte {}: {}", xml.error_position(), other),
            ),
        })?;

        match event {
            Event::Start(ref e) => {
                let name = e.local_name().as_ref().to_vec();
                enter(&open, &name, root_seen, source)?;
                root_seen = true;
                match (name.as_slice(), open.last().map(Vec::as_slice)) {
                    (ENTRY, Some(ROOT)) => entry = Some(PendingEntry::new(e)),
                    (FORM, Some(FORMS)) if entry.is_some() => form_text = Some(String::new()),
                    _ => {}
                }
                open.push(name);
            }
            Event::Empty(ref e) => {
                let name = e.local_name().as_ref().to_vec();
                enter(&open, &name, root_seen, source)?;
                root_seen = true;
                if name == ENTRY && open.last().map(Vec::as_slice) == Some(ROOT) {
                    batch.entries_read += 1;
                    return Err(missing_forms(source, &PendingEntry::new(e), batch.entries_read));
                }
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape()
                    .map_err(|err| DictError::parse(source, err.to_string()))?;
                text_content(&open, &text, source)?;
                if let Some(form) = form_text.as_mut() {
                    form.push_str(&text);
                }
            }
            Event::CData(ref e) => {
                let text = std::str::from_utf8(e)
                    .map_err(|err| DictError::parse(source, err.to_string()))?;
                text_content(&open, text, source)?;
                if let Some(form) = form_text.as_mut() {
                    form.push_str(text);
                }
            }
            Event::End(_) => {
                let Some(name) = open.pop() else {
                    return Err(DictError::parse(source, "unexpected closing tag"));
                };
                match name.as_slice() {
                    FORM => {
                        if let (Some(text), Some(current)) = (form_text.take(), entry.as_mut()) {
                            current.add_form(&text);
                        }
                    }
                    ENTRY if open.len() == 1 => {
                        if let Some(finished) = entry.take() {
                            batch.entries_read += 1;
                            if finished.forms.is_empty() {
                                return Err(missing_forms(source, &finished, batch.entries_read));
                            }
                            debug!(id = ?finished.id, forms = finished.forms.len(), "vocabulary entry");
                            batch.words.extend(finished.forms);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(name) = open.last() {
        return Err(DictError::parse(
            source,
            format!(
                "document ends inside <{}>",
                String::from_utf8_lossy(name)
            ),
        ));
    }
    if !root_seen {
        return Err(DictError::parse(source, "missing <wordlist> root element"));
    }
    if batch.entries_read == 0 {
        return Err(DictError::parse(source, "vocabulary contains no <word> entries"));
    }
    Ok(batch)
}

/// Checks a new element against the expected document shape.
fn enter(open: &[Vec<u8>], name: &[u8], root_seen: bool, source: &Path) -> Result<()> {
    if !open.is_empty() {
        return Ok(());
    }
    if root_seen {
        return Err(DictError::parse(source, "content after the root element"));
    }
    if name != ROOT {
        return Err(DictError::parse(
            source,
            format!(
                "expected <wordlist> root element, found <{}>",
                String::from_utf8_lossy(name)
            ),
        ));
    }
    Ok(())
}

fn text_content(open: &[Vec<u8>], text: &str, source: &Path) -> Result<()> {
    if open.is_empty() && !text.trim().is_empty() {
        return Err(DictError::parse(source, "text outside the root element"));
    }
    Ok(())
}

fn missing_forms(source: &Path, entry: &PendingEntry, position: usize) -> DictError {
    let which = match &entry.id {
        Some(id) => format!("id {id}"),
        None => format!("#{position}"),
    };
    DictError::parse(source, format!("word entry {which} has no <form>"))
}
