//! The remote card service seam.
//!
//! `CardService` is implemented over HTTP by `flashdeck-client`; tests use
//! an in-memory implementation.

use async_trait::async_trait;

use crate::card::{Card, CardId, NewCard};

/// Failures talking to the card service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Server returned {status}{}", body_suffix(.body))]
    Status { status: u16, body: Option<String> },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref().map(|b| format!(": {b}")).unwrap_or_default()
}

/// Operations the viewer needs from the server.
#[async_trait]
pub trait CardService: Send + Sync {
    /// Lists all cards in server order.
    async fn list(&self) -> Result<Vec<Card>, ServiceError>;

    /// Creates a card. The response body is ignored.
    async fn create(&self, card: &NewCard) -> Result<(), ServiceError>;

    /// Deletes a card. The response body is ignored.
    async fn delete(&self, id: &CardId) -> Result<(), ServiceError>;
}
