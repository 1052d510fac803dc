//! Actions, effects and completions.
//!
//! ## The Dispatch Loop
//!
//! ```text
//! Action ──dispatch──▶ Option<Effect> ──(caller runs it)──▶ Completion
//!                            ▲                                   │
//!                            └──────────────complete─────────────┘
//! ```
//!
//! Actions are plain values, so a front end only has to map its own
//! events onto them. Effects describe remote work without performing it,
//! which keeps the viewer free of I/O.

use crate::card::{Card, CardId, NewCard};
use crate::service::ServiceError;

/// Everything a user can ask the viewer to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch the authoritative card list
    Load,
    Next,
    Prev,
    Flip,
    /// Jump to a list position
    Select(usize),
    /// Create a card, then reload
    Add(NewCard),
    /// Delete the current card, then reload
    Delete,
}

impl Action {
    /// Returns the action's display name.
    pub fn display_name(&self) -> &str {
        match self {
            Action::Load => "Reload",
            Action::Next => "Next",
            Action::Prev => "Previous",
            Action::Flip => "Flip",
            Action::Select(_) => "Select",
            Action::Add(_) => "Add Card",
            Action::Delete => "Delete Card",
        }
    }

    /// Parses a binding target such as `viewer.next`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "viewer.reload" | "viewer.load" => Some(Action::Load),
            "viewer.next" => Some(Action::Next),
            "viewer.prev" | "viewer.previous" => Some(Action::Prev),
            "viewer.flip" => Some(Action::Flip),
            "viewer.delete" => Some(Action::Delete),
            _ => None,
        }
    }
}

/// Remote work requested by the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// GET the card list
    Fetch,
    /// POST a new card
    Create(NewCard),
    /// DELETE a card by id
    Remove(CardId),
}

/// Outcome of an [`Effect`], fed back into the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Fetched(Result<Vec<Card>, ServiceError>),
    Created(Result<(), ServiceError>),
    Removed(Result<(), ServiceError>),
}
