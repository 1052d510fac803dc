//! Render model derived from the viewer state.
//!
//! A `Frame` is everything a front end needs to draw: it is rebuilt after
//! every transition, so drawing code never reads the viewer directly.

use crate::viewer::Viewer;

/// One row of the card list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Position in the deck; selecting the entry dispatches `Select(position)`
    pub position: usize,
    /// `"{position + 1}. {front}"`
    pub label: String,
    pub current: bool,
}

/// What the display shows for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Front of the current card, or the placeholder when the deck is empty
    pub front: String,
    /// Back of the current card, present only while flipped
    pub back: Option<String>,
    pub flipped: bool,
    pub entries: Vec<ListEntry>,
}

impl Frame {
    pub fn render(viewer: &Viewer) -> Self {
        let view = viewer.view();

        let (front, back) = match viewer.current() {
            Some(card) => (
                card.front.clone(),
                view.flipped.then(|| card.back.clone()),
            ),
            None => (viewer.placeholder().to_string(), None),
        };

        let entries = viewer
            .deck()
            .iter()
            .enumerate()
            .map(|(position, card)| ListEntry {
                position,
                label: format!("{}. {}", position + 1, card.front),
                current: position == view.current_index,
            })
            .collect();

        Self {
            flipped: back.is_some(),
            front,
            back,
            entries,
        }
    }

    /// Returns the highlighted entry, if any.
    pub fn current_entry(&self) -> Option<&ListEntry> {
        self.entries.iter().find(|e| e.current)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
