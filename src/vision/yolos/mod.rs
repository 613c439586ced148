// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YOLOS-tiny object detection
//!
//! Components:
//! - `labels` - COCO class vocabulary
//! - `preprocessing` - Resize/normalize into an NCHW tensor
//! - `postprocessing` - Softmax, thresholding, box conversion
//! - `model` - ONNX Runtime session and the `ObjectDetector` impl

pub mod labels;
pub mod model;
pub mod postprocessing;
pub mod preprocessing;

pub use labels::LabelMap;
pub use model::{YolosDetectionModel, YolosModelConfig, DEFAULT_CONFIDENCE_THRESHOLD};
pub use preprocessing::ResizePolicy;
