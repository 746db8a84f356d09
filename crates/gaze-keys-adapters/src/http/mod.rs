//! HTTP API.
//!
//! | Method | Path              | Body                         |
//! |--------|-------------------|------------------------------|
//! | GET    | `/health`         | none                         |
//! | POST   | `/initialize`     | none                         |
//! | POST   | `/capture-gaze`   | multipart, field `image`     |
//! | POST   | `/translate-gaze` | `{"x", "y"}`                 |
//! | POST   | `/calibrate`      | `{"gaze_data", "screen_points"}` |
//! | POST   | `/update-model`   | `[{"x", "y"}, ...]`          |
//!
//! Errors are returned as `{"kind", "detail"}`.

mod error;
mod handlers;
pub mod types;

use std::future::Future;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use gaze_keys_core::{GazePredictor, KeyboardLayout};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;

/// Default cap on request bodies.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Model wrapper; may hold no model.
    pub predictor: GazePredictor,
    /// Layout used by `/translate-gaze`.
    pub layout: &'static KeyboardLayout,
    /// Largest accepted request body.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Creates state with the QWERTY layout and the default upload cap.
    #[must_use]
    pub fn new(predictor: GazePredictor) -> Self {
        Self {
            predictor,
            layout: KeyboardLayout::qwerty(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Sets the upload cap.
    #[must_use]
    pub const fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }
}

/// Builds the application router.
///
/// Cross-origin requests are allowed from any origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/initialize", post(handlers::initialize))
        .route("/capture-gaze", post(handlers::capture_gaze))
        .route("/translate-gaze", post(handlers::translate_gaze))
        .route("/calibrate", post(handlers::calibrate))
        .route("/update-model", post(handlers::update_model))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves `app` on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish after the signal.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{addr}");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}
