use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use flashdeck_core::{Card, NewCard};

use crate::store::{CardStore, StoreError};

/// State shared across requests.
pub type SharedStore = Arc<RwLock<CardStore>>;

/// Request body for `POST /cards`. Missing fields read as empty.
#[derive(Debug, Deserialize)]
pub struct CreateCard {
    #[serde(default)]
    front: String,
    #[serde(default)]
    back: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    id: String,
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match self {
            StoreError::EmptyFront => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Io(ref e) => {
                tracing::error!("Card store write failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/cards", get(list_cards).post(create_card).delete(delete_card))
        .fallback(not_found)
        .with_state(store)
}

async fn list_cards(State(store): State<SharedStore>) -> Json<Vec<Card>> {
    Json(store.read().await.cards())
}

/// Reads the body as JSON whatever the declared content type; anything
/// without a usable front is a 400.
async fn create_card(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<StatusCode, Response> {
    let payload: CreateCard = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejecting card body: {}", e);
        (StatusCode::BAD_REQUEST, "Body must be a JSON object with a front").into_response()
    })?;
    let card = NewCard::new(&payload.front, &payload.back);
    let id = store
        .write()
        .await
        .add(card)
        .map_err(IntoResponse::into_response)?;
    tracing::info!(id, "Card created");
    Ok(StatusCode::CREATED)
}

async fn delete_card(
    State(store): State<SharedStore>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, Response> {
    let index: usize = query
        .id
        .trim()
        .parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Card id must be a number").into_response())?;
    store
        .write()
        .await
        .remove(index)
        .map_err(IntoResponse::into_response)?;
    tracing::info!(id = index, "Card deleted");
    Ok(StatusCode::OK)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
