// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigError, NodeConfig};

/// Proctor Vision Node
#[derive(Parser, Debug, Default)]
#[command(name = "proctor-vision-node")]
#[command(version)]
#[command(about = "Flags suspicious proctoring frames using an object detector", long_about = None)]
pub struct Cli {
    /// TOML config file; flags and env vars override its values
    #[arg(long, env = "PROCTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind the HTTP API to
    #[arg(long, env = "API_HOST")]
    pub host: Option<String>,

    /// Port for the HTTP API
    #[arg(long, env = "API_PORT")]
    pub port: Option<u16>,

    /// Path to the YOLOS ONNX model
    #[arg(long, env = "DETECTOR_MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Hugging Face config.json providing id2label
    #[arg(long, env = "DETECTOR_LABELS_PATH")]
    pub labels_path: Option<PathBuf>,

    /// Minimum detection score, exclusive (0.0-1.0)
    #[arg(long, env = "CONFIDENCE_THRESHOLD")]
    pub threshold: Option<f32>,
}

impl Cli {
    /// Resolve the effective configuration and validate it
    pub fn load_config(&self) -> Result<NodeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => NodeConfig::from_file(path)?,
            None => NodeConfig::default(),
        };

        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut NodeConfig) {
        if let Some(host) = &self.host {
            config.api.host = host.clone();
        }
        if let Some(port) = self.port {
            config.api.port = port;
        }
        if let Some(path) = &self.model_path {
            config.detector.model_path = path.clone();
        }
        if let Some(path) = &self.labels_path {
            config.detector.labels_path = Some(path.clone());
        }
        if let Some(threshold) = self.threshold {
            config.detector.confidence_threshold = threshold;
        }
    }
}
