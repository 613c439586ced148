// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{DefaultBodyLimit, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::analyze::analyze_handler;
use super::handlers::HealthResponse;
use crate::verdict::VerdictEvaluator;
use crate::vision::image_utils::MAX_IMAGE_SIZE;
use crate::vision::{ObjectDetector, VisionModelManager};

/// Room for the JSON envelope around the `image` field
pub const JSON_BODY_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub vision_model_manager: Arc<RwLock<Option<Arc<VisionModelManager>>>>,
    pub evaluator: VerdictEvaluator,
    /// Maximum length of the posted `image` field
    pub max_image_bytes: usize,
}

impl AppState {
    pub fn new(manager: VisionModelManager, max_image_bytes: usize) -> Self {
        Self {
            vision_model_manager: Arc::new(RwLock::new(Some(Arc::new(manager)))),
            evaluator: VerdictEvaluator::default(),
            max_image_bytes,
        }
    }

    /// State with no vision manager installed
    pub fn new_for_test() -> Self {
        Self {
            vision_model_manager: Arc::new(RwLock::new(None)),
            evaluator: VerdictEvaluator::default(),
            max_image_bytes: MAX_IMAGE_SIZE,
        }
    }

    /// Currently loaded detector, if any
    pub async fn detector(&self) -> Option<Arc<dyn ObjectDetector>> {
        self.vision_model_manager
            .read()
            .await
            .as_ref()
            .and_then(|m| m.get_detector())
    }
}

pub fn create_app(state: AppState) -> Router {
    // oversized images are rejected by request validation, not the extractor
    let body_limit = state.max_image_bytes.saturating_add(JSON_BODY_OVERHEAD);

    Router::new()
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        // browser client is served from a different origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until ctrl-c
pub async fn start_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let detector = state.detector().await;
    axum::response::Json(HealthResponse::new(
        detector.as_deref(),
        state.evaluator.rules(),
    ))
}
