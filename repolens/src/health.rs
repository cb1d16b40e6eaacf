//! Liveness endpoint.
//!
//! `GET /api/health` is the only server-side endpoint this crate
//! implements; every other backend route belongs to external
//! collaborators.

use std::net::SocketAddr;

use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Health check payload.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: DateTime<Utc>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "frontend",
        timestamp: Utc::now(),
    })
}

/// Build the health router.
pub fn router() -> Router {
    Router::new().route("/api/health", get(health))
}

/// Serve the health endpoint until `cancel` fires.
pub async fn serve(addr: SocketAddr, cancel: CancellationToken) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "health endpoint listening");

    axum::serve(listener, router())
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_payload() {
        let response = health().await.0;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "frontend");
    }

    #[tokio::test]
    async fn test_serve_shuts_down_on_cancel() {
        let cancel = CancellationToken::new();
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();

        let server = tokio::spawn(serve(addr, cancel.clone()));
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        cancel.cancel();
        server.await.unwrap().unwrap();
    }
}
