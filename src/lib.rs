// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod verdict;
pub mod version;
pub mod vision;

pub use config::{ConfigError, NodeConfig};
pub use verdict::{evaluate, BoundingBox, Detection, DetectionSummary, Verdict, VerdictEvaluator};
pub use vision::{ObjectDetector, VisionModelManager};
