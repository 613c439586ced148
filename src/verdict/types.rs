// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection and verdict types shared by the detector and the evaluator

use serde::{Deserialize, Serialize};

/// Axis-aligned box in original-image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BoundingBox {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// `[x_min, y_min, x_max, y_max]`, the layout used in request logs
    pub fn as_array(&self) -> [f32; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }
}

/// One labeled, scored object reported by the detector for a single image
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    label: String,
    confidence: f32,
    bbox: BoundingBox,
}

impl Detection {
    pub fn new(label: impl Into<String>, confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
        }
    }

    /// Class label from the detector vocabulary (e.g. "person")
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Raw score (0.0-1.0), unrounded
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Location of the object; carried for logging only
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }
}

/// Label and rounded confidence of a detection, as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub label: String,
    pub confidence: f32,
}

/// Outcome of evaluating one image's detections
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Verdict {
    /// True when at least one heuristic rule fired
    pub suspicious: bool,
    /// Human-readable reasons, deduplicated, in the order they were found
    pub reasons: Vec<String>,
    /// One entry per input detection, same order
    pub detections: Vec<DetectionSummary>,
}
