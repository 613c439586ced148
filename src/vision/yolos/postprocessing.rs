// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YOLOS output decoding
//!
//! The model emits, per detection query:
//! - `logits`: `[num_classes + 1]` scores, the last slot meaning "no object"
//! - `pred_boxes`: normalized `(cx, cy, w, h)`

use anyhow::Result;
use ndarray::{ArrayView1, ArrayView2};

use super::labels::LabelMap;
use crate::verdict::{BoundingBox, Detection};

/// Numerically stable softmax over one row of logits
pub fn softmax(logits: ArrayView1<f32>) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Convert a normalized center box to pixel corners
pub fn center_to_corners(cx: f32, cy: f32, w: f32, h: f32, image_size: (u32, u32)) -> BoundingBox {
    let (img_w, img_h) = (image_size.0 as f32, image_size.1 as f32);
    BoundingBox::new(
        (cx - 0.5 * w) * img_w,
        (cy - 0.5 * h) * img_h,
        (cx + 0.5 * w) * img_w,
        (cy + 0.5 * h) * img_h,
    )
}

/// Turn raw model outputs for one image into detections
///
/// # Arguments
/// - `logits`: `[num_queries, num_classes + 1]`
/// - `boxes`: `[num_queries, 4]`
/// - `threshold`: scores must be strictly greater than this to be kept
/// - `image_size`: original `(width, height)` the boxes are scaled to
///
/// Query order is preserved.
pub fn postprocess_detections(
    logits: ArrayView2<f32>,
    boxes: ArrayView2<f32>,
    labels: &LabelMap,
    threshold: f32,
    image_size: (u32, u32),
) -> Result<Vec<Detection>> {
    let (num_queries, num_slots) = logits.dim();

    if num_slots < 2 {
        anyhow::bail!(
            "Unexpected logits shape: [{}, {}], need at least one class plus no-object",
            num_queries,
            num_slots
        );
    }
    if boxes.dim() != (num_queries, 4) {
        anyhow::bail!(
            "Box output shape {:?} does not match {} queries",
            boxes.dim(),
            num_queries
        );
    }

    let mut detections = Vec::new();

    for (query, row) in logits.outer_iter().enumerate() {
        let probs = softmax(row);

        // last slot is "no object"
        let (class_id, score) = probs[..num_slots - 1]
            .iter()
            .enumerate()
            .fold((0usize, f32::NEG_INFINITY), |best, (i, &p)| {
                if p > best.1 {
                    (i, p)
                } else {
                    best
                }
            });

        if score <= threshold {
            continue;
        }

        let b = boxes.row(query);
        let bbox = center_to_corners(b[0], b[1], b[2], b[3], image_size);

        detections.push(Detection::new(
            labels.label_or_unused(class_id),
            score,
            bbox,
        ));
    }

    Ok(detections)
}
