//! Card storage backed by a plain text file.
//!
//! ## File Format
//!
//! Two lines per card, front then back:
//!
//! ```text
//! hola
//! hello
//! gato
//! cat
//! ```
//!
//! A trailing front line without a back reads as a card with an empty
//! back. Carriage returns are stripped so files edited on Windows load
//! cleanly.

use std::path::{Path, PathBuf};

use flashdeck_core::{Card, NewCard};

/// Errors from the card store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Front text must not be empty")]
    EmptyFront,

    #[error("No card with id {0}")]
    NotFound(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    front: String,
    back: String,
}

/// Ordered cards; a card's id is its position.
#[derive(Debug, Default)]
pub struct CardStore {
    path: Option<PathBuf>,
    entries: Vec<Entry>,
}

impl CardStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store at `path`; a missing file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => parse(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No card file at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All cards, with positional ids.
    pub fn cards(&self) -> Vec<Card> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| Card::new(i, e.front.as_str(), e.back.as_str()))
            .collect()
    }

    /// Appends a card and persists. Returns its id.
    ///
    /// Nothing changes in memory unless the write succeeds.
    pub fn add(&mut self, card: NewCard) -> Result<usize, StoreError> {
        if card.front.is_empty() {
            return Err(StoreError::EmptyFront);
        }
        let mut entries = self.entries.clone();
        entries.push(Entry {
            front: single_line(&card.front),
            back: single_line(&card.back),
        });
        self.commit(entries)?;
        Ok(self.entries.len() - 1)
    }

    /// Removes the card at `index` and persists.
    pub fn remove(&mut self, index: usize) -> Result<(), StoreError> {
        if index >= self.entries.len() {
            return Err(StoreError::NotFound(index));
        }
        let mut entries = self.entries.clone();
        entries.remove(index);
        self.commit(entries)
    }

    /// Writes `entries` out, then makes them current.
    fn commit(&mut self, entries: Vec<Entry>) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            save(path, &entries)?;
        }
        self.entries = entries;
        Ok(())
    }
}

/// Writes to a sibling temp file, then renames it over the card file.
fn save(path: &Path, entries: &[Entry]) -> Result<(), StoreError> {
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, render(entries))?;
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }
    tracing::debug!(cards = entries.len(), "Saved {}", path.display());
    Ok(())
}

fn parse(text: &str) -> Vec<Entry> {
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r').to_string());
    let mut entries = Vec::new();
    while let Some(front) = lines.next() {
        let back = lines.next().unwrap_or_default();
        entries.push(Entry { front, back });
    }
    entries
}

fn render(entries: &[Entry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.front);
        out.push('\n');
        out.push_str(&entry.back);
        out.push('\n');
    }
    out
}

/// Keeps the two-lines-per-card layout intact.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
