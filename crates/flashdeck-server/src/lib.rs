//! # Flashdeck Server
//!
//! Small HTTP server exposing the card endpoints the viewer talks to:
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | GET | `/cards` | JSON array of `{id, front, back}` |
//! | POST | `/cards` | `201`, or `400` without front text |
//! | DELETE | `/cards?id=<n>` | `200`, or `404` for an unknown id |
//!
//! Ids are positions, so they shift after a delete. Clients are expected to
//! re-read the list after every change.

mod routes;
pub mod store;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::{RwLock, oneshot};

pub use routes::router;
pub use store::{CardStore, StoreError};

/// Server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How and where to run the server.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub addr: SocketAddr,
    /// `None` keeps cards in memory only
    pub data_file: Option<PathBuf>,
}

/// Handle to a server running in the background.
pub struct CardServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl CardServer {
    /// Address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for clients.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stops the server gracefully.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for CardServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn open_store(options: &ServerOptions) -> Result<CardStore, StoreError> {
    match &options.data_file {
        Some(path) => CardStore::open(path),
        None => Ok(CardStore::in_memory()),
    }
}

/// Starts the server on a background task.
///
/// Bind to port 0 to get an ephemeral port; [`CardServer::addr`] reports
/// the one chosen.
pub async fn start_server(options: ServerOptions) -> Result<CardServer, ServerError> {
    let store = open_store(&options)?;
    let cards = store.len();
    let app = router(Arc::new(RwLock::new(store)));

    let listener = TcpListener::bind(options.addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!(cards, "Card server started on http://{}", addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("Card server shutting down");
            })
            .await;
        if let Err(e) = result {
            tracing::error!("Card server stopped: {}", e);
        }
    });

    Ok(CardServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Runs the server in the foreground until Ctrl+C.
pub async fn serve(options: ServerOptions) -> Result<(), ServerError> {
    let store = open_store(&options)?;
    let cards = store.len();
    let app = router(Arc::new(RwLock::new(store)));

    let listener = TcpListener::bind(options.addr).await?;
    tracing::info!(cards, "Serving cards on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Received Ctrl+C, shutting down");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_on_ephemeral_port() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cards.txt"), "hola\nhello\n").unwrap();

        let mut server = start_server(ServerOptions {
            addr: "127.0.0.1:0".parse().unwrap(),
            data_file: Some(dir.path().join("cards.txt")),
        })
        .await
        .unwrap();

        assert_ne!(server.addr().port(), 0);
        assert!(server.base_url().starts_with("http://127.0.0.1:"));
        server.stop();
    }
}
