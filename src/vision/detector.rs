// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Object detector interface

use anyhow::Result;
use image::DynamicImage;

use crate::verdict::Detection;

/// Something that finds labeled objects in an image
///
/// Implementations apply their own confidence threshold and return
/// detections in emission order.
pub trait ObjectDetector: Send + Sync {
    /// Model name reported by `/health` and in logs
    fn name(&self) -> &str;

    /// Minimum score (exclusive) a detection needs to be reported
    fn confidence_threshold(&self) -> f32;

    /// Run detection on a decoded image
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>>;
}
