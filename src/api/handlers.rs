// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

use crate::verdict::HeuristicRule;
use crate::version;
use crate::vision::ObjectDetector;

/// Loaded detector as reported by `/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorHealth {
    pub name: String,
    pub confidence_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub build: String,
    pub build_date: String,
    pub features: Vec<String>,
    pub detector_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detector: Option<DetectorHealth>,
    /// Verdict rules in evaluation order
    pub rules: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<String>>,
}

impl HealthResponse {
    pub fn new(detector: Option<&dyn ObjectDetector>, rules: &[HeuristicRule]) -> Self {
        let detector_loaded = detector.is_some();
        let issues = if detector_loaded {
            None
        } else {
            Some(vec!["Detection model not loaded".to_string()])
        };

        Self {
            status: if detector_loaded { "ok" } else { "degraded" }.to_string(),
            version: version::VERSION_NUMBER.to_string(),
            build: version::VERSION.to_string(),
            build_date: version::BUILD_DATE.to_string(),
            features: version::FEATURES.iter().map(|f| f.to_string()).collect(),
            detector_loaded,
            detector: detector.map(|d| DetectorHealth {
                name: d.name().to_string(),
                confidence_threshold: d.confidence_threshold(),
            }),
            rules: rules.iter().map(|r| r.name.to_string()).collect(),
            issues,
        }
    }
}
