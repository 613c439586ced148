// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision model manager for loading and holding the object detector

use std::path::PathBuf;
use std::sync::Arc;

use crate::vision::detector::ObjectDetector;
use crate::vision::yolos::{YolosDetectionModel, YolosModelConfig};

/// Configuration for loading vision models
#[derive(Debug, Clone, Default)]
pub struct VisionModelConfig {
    /// Detector settings; `None` starts the manager without a detector
    pub detector: Option<YolosModelConfig>,
}

impl VisionModelConfig {
    /// Config that loads the YOLOS model from `model_path` with defaults
    pub fn with_model_path(model_path: impl Into<PathBuf>) -> Self {
        Self {
            detector: Some(YolosModelConfig {
                model_path: model_path.into(),
                ..Default::default()
            }),
        }
    }
}

/// Information about a loaded vision model
#[derive(Debug, Clone)]
pub struct VisionModelInfo {
    /// Model name
    pub name: String,
    /// Model type
    pub model_type: String,
    /// Whether the model is available
    pub available: bool,
}

/// Holds the object detector shared by all requests
///
/// A detector that fails to load is logged and left out; the server keeps
/// running and reports the model as unavailable.
#[derive(Default)]
pub struct VisionModelManager {
    detector: Option<Arc<dyn ObjectDetector>>,
}

impl std::fmt::Debug for VisionModelManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionModelManager")
            .field("detector", &self.detector.as_ref().map(|d| d.name().to_string()))
            .finish()
    }
}

impl VisionModelManager {
    /// Create a new VisionModelManager with the given configuration
    pub async fn new(config: VisionModelConfig) -> anyhow::Result<Self> {
        let detector: Option<Arc<dyn ObjectDetector>> = if let Some(ref cfg) = config.detector {
            match YolosDetectionModel::new(cfg).await {
                Ok(model) => {
                    tracing::info!("✅ YOLOS detector loaded from {}", cfg.model_path.display());
                    Some(Arc::new(model))
                }
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Failed to load detector from {}: {:#}",
                        cfg.model_path.display(),
                        e
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(Self { detector })
    }

    /// Manager backed by an already-built detector
    pub fn with_detector(detector: Arc<dyn ObjectDetector>) -> Self {
        Self {
            detector: Some(detector),
        }
    }

    /// Get the detector if available
    pub fn get_detector(&self) -> Option<Arc<dyn ObjectDetector>> {
        self.detector.clone()
    }

    /// Check if a detector is loaded
    pub fn has_detector(&self) -> bool {
        self.detector.is_some()
    }

    /// List all vision models and their availability
    pub fn list_models(&self) -> Vec<VisionModelInfo> {
        let name = self
            .detector
            .as_ref()
            .map(|d| d.name().to_string())
            .unwrap_or_else(|| crate::vision::yolos::model::MODEL_NAME.to_string());

        vec![VisionModelInfo {
            name,
            model_type: "object-detection".to_string(),
            available: self.detector.is_some(),
        }]
    }
}
