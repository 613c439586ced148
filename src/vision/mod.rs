// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module for CPU-based object detection
//!
//! This module provides:
//! - Base64 / data URL image decoding
//! - The `ObjectDetector` interface
//! - A YOLOS-tiny detector via ONNX Runtime
//!
//! Inference runs on CPU only.

pub mod detector;
pub mod image_utils;
pub mod model_manager;
pub mod yolos;

pub use detector::ObjectDetector;
pub use image_utils::{decode_base64_image, decode_image_bytes, detect_format, ImageError, ImageInfo};
pub use model_manager::{VisionModelConfig, VisionModelInfo, VisionModelManager};
