// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Vision Model Manager tests
//!
//! These tests verify that the VisionModelManager correctly:
//! - Starts without a detector when none is configured
//! - Survives a missing model file
//! - Hands out an injected detector
//! - Lists the detector and its availability

use image::DynamicImage;
use proctor_vision_node::verdict::{BoundingBox, Detection};
use proctor_vision_node::vision::{
    ObjectDetector, VisionModelConfig, VisionModelInfo, VisionModelManager,
};
use std::sync::Arc;

/// Fixed-output detector for manager tests
struct StaticDetector;

impl ObjectDetector for StaticDetector {
    fn name(&self) -> &str {
        "static-detector"
    }

    fn confidence_threshold(&self) -> f32 {
        0.5
    }

    fn detect(&self, _image: &DynamicImage) -> anyhow::Result<Vec<Detection>> {
        Ok(vec![Detection::new(
            "person",
            0.8,
            BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        )])
    }
}

#[cfg(test)]
mod model_manager_tests {
    use super::*;

    // =============================================================================
    // Loading Tests
    // =============================================================================

    /// Test 1: No detector configured
    #[tokio::test]
    async fn test_manager_without_detector_config() {
        let manager = VisionModelManager::new(VisionModelConfig::default())
            .await
            .unwrap();

        assert!(!manager.has_detector());
        assert!(manager.get_detector().is_none());
    }

    /// Test 2: Missing model file does not fail startup
    #[tokio::test]
    async fn test_manager_missing_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = VisionModelConfig::with_model_path(dir.path().join("missing.onnx"));

        let manager = VisionModelManager::new(config).await.unwrap();
        assert!(!manager.has_detector());
    }

    /// Test 3: Corrupt model file does not fail startup
    #[tokio::test]
    async fn test_manager_corrupt_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, b"not an onnx graph").unwrap();

        let manager = VisionModelManager::new(VisionModelConfig::with_model_path(path))
            .await
            .unwrap();
        assert!(!manager.has_detector());
    }

    // =============================================================================
    // Injected Detector Tests
    // =============================================================================

    /// Test 4: Injected detector is returned and usable
    #[test]
    fn test_with_detector() {
        let manager = VisionModelManager::with_detector(Arc::new(StaticDetector));
        assert!(manager.has_detector());

        let detector = manager.get_detector().unwrap();
        assert_eq!(detector.name(), "static-detector");

        let detections = detector.detect(&DynamicImage::new_rgb8(4, 4)).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].label(), "person");
    }

    /// Test 5: Detector handle is shared, not copied
    #[test]
    fn test_detector_shared() {
        let detector: Arc<dyn ObjectDetector> = Arc::new(StaticDetector);
        let manager = VisionModelManager::with_detector(detector.clone());

        let handed_out = manager.get_detector().unwrap();
        assert!(Arc::ptr_eq(&detector, &handed_out));
    }

    // =============================================================================
    // Listing Tests
    // =============================================================================

    /// Test 6: Listing with a detector
    #[test]
    fn test_list_models_available() {
        let manager = VisionModelManager::with_detector(Arc::new(StaticDetector));
        let models: Vec<VisionModelInfo> = manager.list_models();

        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "static-detector");
        assert_eq!(models[0].model_type, "object-detection");
        assert!(models[0].available);
    }

    /// Test 7: Listing without a detector
    #[test]
    fn test_list_models_unavailable() {
        let manager = VisionModelManager::default();
        let models = manager.list_models();

        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "yolos-tiny");
        assert!(!models[0].available);
    }
}
