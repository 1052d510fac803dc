//! # Flashdeck Client
//!
//! HTTP client for the card server.
//!
//! ## Transport Contract
//!
//! - Any non-success status is an error; nothing is applied locally.
//! - A `Content-Type` containing `application/json` means the body is
//!   parsed as JSON. Anything else is kept as text, which only matters
//!   when an error body is shown to the user.
//! - Create and delete ignore the response body on success.

mod client;
mod payload;

pub use client::{ClientError, HttpCardService};
pub use payload::Payload;
