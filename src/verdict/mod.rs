// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Suspicion verdicts for proctoring frames
//!
//! Turns the detector's output into a yes/no verdict plus reasons:
//! - a phone anywhere in frame
//! - more than one person in frame

pub mod evaluator;
pub mod rules;
pub mod types;

pub use evaluator::{evaluate, round_confidence, VerdictEvaluator};
pub use rules::{HeuristicRule, DEFAULT_RULES};
pub use types::{BoundingBox, Detection, DetectionSummary, Verdict};
