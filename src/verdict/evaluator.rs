// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Verdict evaluator
//!
//! Pure, stateless mapping from a detection set to a [`Verdict`]. Safe to call
//! concurrently from any number of requests.

use super::rules::{HeuristicRule, DEFAULT_RULES};
use super::types::{Detection, DetectionSummary, Verdict};

/// Applies an ordered rule list to a detection set
#[derive(Debug, Clone, Copy)]
pub struct VerdictEvaluator {
    rules: &'static [HeuristicRule],
}

impl Default for VerdictEvaluator {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES,
        }
    }
}

impl VerdictEvaluator {
    /// Rules this evaluator applies, in order
    pub fn rules(&self) -> &'static [HeuristicRule] {
        self.rules
    }

    /// Evaluate a detection set. Never fails; an empty set is not suspicious.
    pub fn evaluate(&self, detections: &[Detection]) -> Verdict {
        let mut reasons: Vec<String> = Vec::new();

        for rule in self.rules {
            if let Some(reason) = rule.apply(detections) {
                if !reasons.contains(&reason) {
                    reasons.push(reason);
                }
            }
        }

        let detections = detections
            .iter()
            .map(|d| DetectionSummary {
                label: d.label().to_string(),
                confidence: round_confidence(d.confidence()),
            })
            .collect();

        Verdict {
            suspicious: !reasons.is_empty(),
            reasons,
            detections,
        }
    }
}

/// Evaluate with the default rule set
pub fn evaluate(detections: &[Detection]) -> Verdict {
    VerdictEvaluator::default().evaluate(detections)
}

/// Round to two decimal places, half away from zero
pub fn round_confidence(confidence: f32) -> f32 {
    (confidence * 100.0).round() / 100.0
}
