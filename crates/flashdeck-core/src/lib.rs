//! # Flashdeck Core
//!
//! Card model and the viewer state machine.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Session                            │
//! │  ┌──────────────────────────────┐   ┌──────────────────┐ │
//! │  │            Viewer            │   │   CardService    │ │
//! │  │  ┌──────┐  ┌─────────────┐   │──▶│  (HTTP, memory)  │ │
//! │  │  │ Deck │  │  ViewState  │   │◀──│                  │ │
//! │  │  └──────┘  └─────────────┘   │   └──────────────────┘ │
//! │  └──────────────────────────────┘                        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! `Viewer::dispatch` applies an [`Action`] and hands back an [`Effect`]
//! whenever the server has to be involved. The caller runs the effect and
//! returns the outcome through `Viewer::complete`. Navigation never leaves
//! the process.

pub mod action;
pub mod card;
pub mod config;
pub mod deck;
pub mod frame;
pub mod keymap;
pub mod service;
pub mod session;
pub mod viewer;

pub use action::{Action, Completion, Effect};
pub use card::{Card, CardId, NewCard};
pub use config::Config;
pub use deck::Deck;
pub use frame::{Frame, ListEntry};
pub use keymap::{Key, KeyPress, Keymap, Modifiers};
pub use service::{CardService, ServiceError};
pub use session::Session;
pub use viewer::{Phase, ViewState, Viewer};

/// Result type for viewer operations
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Errors surfaced by the viewer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewerError {
    #[error("Front text must not be empty")]
    EmptyFront,

    #[error("Another request is still in progress")]
    Busy,

    #[error(transparent)]
    Transport(#[from] ServiceError),
}

impl ViewerError {
    /// Returns true for errors caught before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, ViewerError::EmptyFront)
    }
}
