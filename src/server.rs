//! HTTP surface
//!
//! Thin transport wrapper over `QaService`. Degraded answers (sentinel,
//! AI error text) are still HTTP 200 with an ordinary answer body; only
//! genuine internal faults such as a broken history store return 500.

use crate::service::QaService;
use anyhow::Result;
use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Build the application router
pub fn app(service: Arc<QaService>) -> Router {
    Router::new()
        .route(
            "/api/ask",
            post({
                let service = Arc::clone(&service);
                move |Json(payload): Json<AskRequest>| {
                    let service = Arc::clone(&service);
                    async move {
                        match service.answer(&payload.question).await {
                            Ok(answer) => (StatusCode::OK, Json(json!({ "answer": answer }))),
                            Err(e) => (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                Json(json!({ "error": e.to_string() })),
                            ),
                        }
                    }
                }
            }),
        )
        .route(
            "/api/history",
            get({
                let service = Arc::clone(&service);
                move || {
                    let service = Arc::clone(&service);
                    async move {
                        match service.history().list() {
                            Ok(pairs) => (StatusCode::OK, Json(json!(pairs))),
                            Err(e) => (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                Json(json!({ "error": e.to_string() })),
                            ),
                        }
                    }
                }
            }),
        )
        .route("/health", get(|| async { "OK" }))
        .layer(CorsLayer::permissive())
}

/// Serve the API on the given port until the process exits
pub async fn run_server(service: Arc<QaService>, port: u16) -> Result<()> {
    let router = app(service);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server running on http://localhost:{}", port);

    axum::serve(listener, router).await?;
    Ok(())
}
