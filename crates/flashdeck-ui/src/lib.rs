//! # Flashdeck UI
//!
//! Desktop viewer built on iced.
//!
//! ## Architecture
//!
//! The UI follows the Elm architecture:
//! - **Model**: [`App`] owns a [`flashdeck_core::Viewer`] plus the text of
//!   the add-card inputs
//! - **Message**: button presses, key presses and request completions
//! - **Update**: turns messages into viewer actions and runs the returned
//!   effects as `Task`s
//! - **View**: draws the cached [`flashdeck_core::Frame`]
//!
//! The viewer never sees iced types, so everything it decides can be
//! tested without a window.

pub mod app;
pub mod theme;

pub use app::{App, Flags, run};
pub use theme::Palette;
