//! HTTP implementation of [`CardService`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, header};
use serde_json::Value;

use flashdeck_core::{Card, CardId, CardService, NewCard, ServiceError};

use crate::payload::Payload;

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}")]
    Status { status: u16, body: Option<String> },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status, body } => ServiceError::Status { status, body },
            ClientError::Json(e) => ServiceError::Decode(e.to_string()),
            ClientError::Http(e) if e.is_decode() => ServiceError::Decode(e.to_string()),
            other => ServiceError::Request(other.to_string()),
        }
    }
}

/// Talks to a card server's `/cards` endpoints.
#[derive(Debug, Clone)]
pub struct HttpCardService {
    client: Client,
    base_url: String,
}

impl HttpCardService {
    /// Creates a client with no request timeout.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, None)
    }

    /// Creates a client; `timeout` bounds each whole request.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "{base_url} (must start with http:// or https://)"
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn cards_url(&self) -> String {
        format!("{}/cards", self.base_url)
    }

    /// Sends a request and fails on any non-success status.
    ///
    /// Returns the declared content type and the raw body.
    async fn execute(&self, request: RequestBuilder) -> Result<(Option<String>, Vec<u8>), ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            let body = Payload::negotiate(content_type.as_deref(), &body)
                .ok()
                .and_then(|p| p.summary());
            tracing::debug!(status = status.as_u16(), ?body, "Request rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok((content_type, body))
    }

    /// `GET /cards`
    pub async fn list_cards(&self) -> Result<Vec<Card>, ClientError> {
        let (content_type, body) = self.execute(self.client.get(self.cards_url())).await?;
        let payload = Payload::negotiate(content_type.as_deref(), &body)?;
        cards_from_payload(payload)
    }

    /// `POST /cards` with a JSON body. The response body is ignored.
    pub async fn create_card(&self, card: &NewCard) -> Result<(), ClientError> {
        self.execute(self.client.post(self.cards_url()).json(card))
            .await?;
        Ok(())
    }

    /// `DELETE /cards?id=<id>`. The response body is ignored.
    pub async fn delete_card(&self, id: &CardId) -> Result<(), ClientError> {
        self.execute(
            self.client
                .delete(self.cards_url())
                .query(&[("id", id.as_str())]),
        )
        .await?;
        Ok(())
    }
}

/// Anything other than a JSON array is treated as an empty deck.
fn cards_from_payload(payload: Payload) -> Result<Vec<Card>, ClientError> {
    match payload {
        Payload::Json(value @ Value::Array(_)) => Ok(serde_json::from_value(value)?),
        other => {
            tracing::warn!(
                "Card list was not a JSON array ({}), showing an empty deck",
                other.summary().unwrap_or_else(|| "empty body".to_string())
            );
            Ok(Vec::new())
        }
    }
}

#[async_trait]
impl CardService for HttpCardService {
    async fn list(&self) -> Result<Vec<Card>, ServiceError> {
        Ok(self.list_cards().await?)
    }

    async fn create(&self, card: &NewCard) -> Result<(), ServiceError> {
        Ok(self.create_card(card).await?)
    }

    async fn delete(&self, id: &CardId) -> Result<(), ServiceError> {
        Ok(self.delete_card(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_core::{Action, Session, ViewerError};
    use flashdeck_server::{CardServer, ServerOptions, start_server};

    async fn server() -> CardServer {
        start_server(ServerOptions {
            addr: "127.0.0.1:0".parse().unwrap(),
            data_file: None,
        })
        .await
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            HttpCardService::new("localhost:8080"),
            Err(ClientError::InvalidUrl(_))
        ));
        let service = HttpCardService::new("http://localhost:8080/").unwrap();
        assert_eq!(service.base_url(), "http://localhost:8080");
        assert_eq!(service.cards_url(), "http://localhost:8080/cards");
    }

    #[test]
    fn test_non_array_list_is_empty() {
        let text = cards_from_payload(Payload::Text("<html>".to_string())).unwrap();
        assert!(text.is_empty());

        let error = cards_from_payload(Payload::Json(serde_json::json!({"error": "db down"}))).unwrap();
        assert!(error.is_empty());

        let cards = cards_from_payload(Payload::Json(serde_json::json!([
            {"id": 0, "front": "hola", "back": "hello"}
        ])))
        .unwrap();
        assert_eq!(cards[0].front, "hola");
    }

    #[test]
    fn test_error_mapping() {
        let err: ServiceError = ClientError::Status {
            status: 404,
            body: None,
        }
        .into();
        assert_eq!(err, ServiceError::Status { status: 404, body: None });

        let json_err = serde_json::from_str::<Value>("{").unwrap_err();
        assert!(matches!(
            ServiceError::from(ClientError::Json(json_err)),
            ServiceError::Decode(_)
        ));
    }

    #[tokio::test]
    async fn test_round_trip_against_server() {
        let server = server().await;
        let service = HttpCardService::new(&server.base_url()).unwrap();

        assert!(service.list_cards().await.unwrap().is_empty());
        service.create_card(&NewCard::new("hola", "hello")).await.unwrap();
        service.create_card(&NewCard::new("gato", "cat")).await.unwrap();

        let cards = service.list_cards().await.unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].back, "cat");

        service.delete_card(&cards[0].id).await.unwrap();
        let cards = service.list_cards().await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "gato");
    }

    #[tokio::test]
    async fn test_status_errors() {
        let server = server().await;
        let service = HttpCardService::new(&server.base_url()).unwrap();

        let err = service.delete_card(&CardId::from(9usize)).await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 404, .. }));

        let err = service
            .create_card(&NewCard {
                front: String::new(),
                back: "x".to_string(),
            })
            .await
            .unwrap_err();
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body.as_deref(), Some("Front text must not be empty"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Bind then drop to get a port nobody listens on.
        let mut server = server().await;
        let url = server.base_url();
        server.stop();
        drop(server);
        tokio::time::sleep(Duration::from_millis(50)).await;

        let service = HttpCardService::with_timeout(&url, Some(Duration::from_secs(2))).unwrap();
        let err: ServiceError = service.list_cards().await.unwrap_err().into();
        assert!(matches!(err, ServiceError::Request(_)));
    }

    #[tokio::test]
    async fn test_session_over_http() {
        let server = server().await;
        let service = HttpCardService::new(&server.base_url()).unwrap();
        let mut session = Session::new(service);

        session.handle(Action::Load).await.unwrap();
        assert!(session.viewer().deck().is_empty());

        let err = session
            .handle(Action::Add(NewCard::new(" ", "nothing")))
            .await
            .unwrap_err();
        assert_eq!(err, ViewerError::EmptyFront);

        session.handle(Action::Add(NewCard::new("Q1", "A1"))).await.unwrap();
        session.handle(Action::Add(NewCard::new("Q2", "A2"))).await.unwrap();
        session.handle(Action::Next).await.unwrap();
        session.handle(Action::Flip).await.unwrap();

        let frame = session.viewer().frame();
        assert_eq!(frame.front, "Q2");
        assert_eq!(frame.back.as_deref(), Some("A2"));

        let viewer = session.handle(Action::Delete).await.unwrap();
        assert_eq!(viewer.deck().len(), 1);
        assert_eq!(viewer.view().current_index, 0);
        assert!(!viewer.view().flipped);
        assert_eq!(viewer.frame().front, "Q1");
    }
}
