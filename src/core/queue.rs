// File: src/core/queue.rs
use crate::core::types::CandidateWord;

/// Words typed in by the user, waiting to be saved into the dictionary.
#[derive(Debug, Default, Clone)]
pub struct PendingWords {
    words: Vec<String>,
}

impl PendingWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `raw` trimmed. Blank input is ignored and returns false.
    pub fn push(&mut self, raw: &str) -> bool {
        match CandidateWord::new(raw) {
            Some(word) => {
                self.words.push(word.into_string());
                true
            }
            None => false,
        }
    }

    /// Takes a word back out of the queue, e.g. to edit it.
    pub fn take(&mut self, index: usize) -> Option<String> {
        (index < self.words.len()).then(|| self.words.remove(index))
    }

    /// Removes the selected rows and returns them in queue order.
    /// Out-of-range and repeated indices are ignored.
    pub fn take_selected(&mut self, selected: &[usize]) -> Vec<String> {
        let mut taken = Vec::new();
        let mut kept = Vec::with_capacity(self.words.len());
        for (index, word) in self.words.drain(..).enumerate() {
            if selected.contains(&index) {
                taken.push(word);
            } else {
                kept.push(word);
            }
        }
        self.words = kept;
        taken
    }

    /// Hands the chosen rows to `save` in queue order and removes them only
    /// when `save` succeeds. `None` chooses every row.
    pub fn save_with<T, E>(
        &mut self,
        rows: Option<&[usize]>,
        save: impl FnOnce(Vec<&str>) -> Result<T, E>,
    ) -> Result<T, E> {
        let chosen: Vec<&str> = self
            .words
            .iter()
            .enumerate()
            .filter(|(index, _)| rows.map_or(true, |rows| rows.contains(index)))
            .map(|(_, word)| word.as_str())
            .collect();
        let saved = save(chosen)?;
        match rows {
            Some(rows) => {
                self.take_selected(rows);
            }
            None => self.words.clear(),
        }
        Ok(saved)
    }

    /// Whether any of `rows` names a queued word.
    pub fn has_any(&self, rows: &[usize]) -> bool {
        rows.iter().any(|&index| index < self.words.len())
    }

    pub fn take_all(&mut self) -> Vec<String> {
        std::mem::take(&mut self.words)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
