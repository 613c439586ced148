// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze response types

use serde::{Deserialize, Serialize};

use crate::verdict::{DetectionSummary, Verdict};

/// Response body for `POST /analyze`
///
/// Serializes to exactly `suspicious`, `reasons` and `detections`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub suspicious: bool,
    pub reasons: Vec<String>,
    pub detections: Vec<DetectionSummary>,
}

impl From<Verdict> for AnalyzeResponse {
    fn from(verdict: Verdict) -> Self {
        Self {
            suspicious: verdict.suspicious,
            reasons: verdict.reasons,
            detections: verdict.detections,
        }
    }
}
