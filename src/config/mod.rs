// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Node configuration
//!
//! Layering, lowest priority first:
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config`)
//! 3. CLI flags / environment variables

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::vision::image_utils::MAX_IMAGE_SIZE;
use crate::vision::yolos::preprocessing::{DEFAULT_LONGEST_EDGE, DEFAULT_SHORTEST_EDGE};
use crate::vision::yolos::{ResizePolicy, YolosModelConfig, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::vision::VisionModelConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {field}: {message}")]
    Invalid { field: String, message: String },
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.into(),
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
    /// Maximum length of the posted `image` field
    pub max_image_bytes: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_image_bytes: MAX_IMAGE_SIZE,
        }
    }
}

/// Object detector settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    pub model_path: PathBuf,
    pub labels_path: Option<PathBuf>,
    pub confidence_threshold: f32,
    pub shortest_edge: u32,
    pub longest_edge: u32,
    /// Fixed input width for static-shape exports (requires `input_height`)
    pub input_width: Option<u32>,
    pub input_height: Option<u32>,
    pub intra_threads: usize,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./models/yolos-tiny-onnx/model.onnx"),
            labels_path: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            shortest_edge: DEFAULT_SHORTEST_EDGE,
            longest_edge: DEFAULT_LONGEST_EDGE,
            input_width: None,
            input_height: None,
            intra_threads: 4,
        }
    }
}

impl DetectorSettings {
    pub fn resize_policy(&self) -> ResizePolicy {
        match (self.input_width, self.input_height) {
            (Some(width), Some(height)) => ResizePolicy::Fixed { width, height },
            _ => ResizePolicy::ShortestEdge {
                shortest: self.shortest_edge,
                longest: self.longest_edge,
            },
        }
    }
}

/// Full node configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub api: ApiSettings,
    pub detector: DetectorSettings,
}

impl NodeConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.detector.confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(invalid(
                "detector.confidence_threshold",
                format!("must be within [0, 1], got {}", threshold),
            ));
        }

        if self.api.port == 0 {
            return Err(invalid("api.port", "must be non-zero"));
        }

        if self.api.max_image_bytes == 0 {
            return Err(invalid("api.max_image_bytes", "must be non-zero"));
        }

        if self.detector.shortest_edge == 0 || self.detector.longest_edge == 0 {
            return Err(invalid(
                "detector.shortest_edge",
                "shortest_edge and longest_edge must be non-zero",
            ));
        }

        match (self.detector.input_width, self.detector.input_height) {
            (Some(0), _) | (_, Some(0)) => {
                return Err(invalid("detector.input_width", "fixed input size must be non-zero"));
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(invalid(
                    "detector.input_width",
                    "input_width and input_height must be set together",
                ));
            }
            _ => {}
        }

        if self.detector.intra_threads == 0 {
            return Err(invalid("detector.intra_threads", "must be at least 1"));
        }

        Ok(())
    }

    /// Socket address the API binds to
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.api.host, self.api.port)
            .parse()
            .map_err(|e| invalid("api.host", format!("{}", e)))
    }

    /// Model manager settings derived from the detector section
    pub fn vision_model_config(&self) -> VisionModelConfig {
        VisionModelConfig {
            detector: Some(YolosModelConfig {
                model_path: self.detector.model_path.clone(),
                labels_path: self.detector.labels_path.clone(),
                confidence_threshold: self.detector.confidence_threshold,
                resize: self.detector.resize_policy(),
                intra_threads: self.detector.intra_threads,
            }),
        }
    }
}
