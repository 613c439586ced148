// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::request::AnalyzeRequest;
use super::response::AnalyzeResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::verdict::Detection;
use crate::vision::decode_base64_image;

/// POST /analyze - Check a proctoring frame for suspicious objects
///
/// # Request
/// - `image`: JPEG/PNG frame as a data URL or bare base64 (required)
///
/// # Response
/// - `suspicious`: true when a phone or more than one person is visible
/// - `reasons`: why the frame was flagged
/// - `detections`: every detected object with its rounded confidence
///
/// # Errors
/// - 400 Bad Request: unreadable body; missing, oversized or undecodable image
/// - 503 Service Unavailable: detection model not loaded
/// - 500 Internal Server Error: inference failed
pub async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected analyze body: {}", rejection.body_text());
        ApiError::InvalidRequest(rejection.body_text())
    })?;

    let encoded = request.into_image(state.max_image_bytes).map_err(|e| {
        warn!("Analyze validation failed: {}", e);
        e
    })?;

    let detector = state.detector().await.ok_or_else(|| {
        warn!("Detection model not loaded");
        ApiError::ModelNotLoaded
    })?;

    let start = Instant::now();
    let detections = tokio::task::spawn_blocking(move || {
        let (image, image_info) = decode_base64_image(&encoded).map_err(|e| {
            warn!("Failed to decode image: {}", e);
            ApiError::InvalidImage(e.to_string())
        })?;

        info!(
            "--- Analysis request ({}x{}, {} bytes) ---",
            image_info.width, image_info.height, image_info.size_bytes
        );

        detector.detect(&image).map_err(|e| {
            warn!("Detection failed: {:#}", e);
            ApiError::InternalError(format!("Detection failed: {}", e))
        })
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("Detection task failed: {}", e)))??;
    let inference_ms = start.elapsed().as_millis() as u64;

    debug!(inference_ms, detections = detections.len(), "Inference complete");
    log_detections(&detections);

    let verdict = state.evaluator.evaluate(&detections);

    if verdict.suspicious {
        warn!(
            reasons = ?verdict.reasons,
            inference_ms,
            "[RESULT] Suspicious: true"
        );
    } else {
        info!(inference_ms, "[RESULT] Suspicious: false");
    }

    Ok(Json(AnalyzeResponse::from(verdict)))
}

fn log_detections(detections: &[Detection]) {
    for detection in detections {
        info!(
            " > Detected: {} ({:.1}%) at {:?}",
            detection.label(),
            detection.confidence() * 100.0,
            detection.bbox().as_array()
        );
    }
}
