// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use proctor_vision_node::{
    api::{start_server, AppState},
    cli::Cli,
    logging, version,
    vision::VisionModelManager,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    logging::init_tracing();

    tracing::info!(
        "🚀 Starting {} [{}]",
        version::get_version_string(),
        version::VERSION
    );
    tracing::info!("Features: {}", version::FEATURES.join(", "));

    let cli = Cli::parse();
    let config = cli.load_config().context("Invalid configuration")?;
    let addr = config.listen_addr()?;

    tracing::info!(
        "Loading AI model (YOLOS) from {} - this may take a moment",
        config.detector.model_path.display()
    );
    let manager = VisionModelManager::new(config.vision_model_config()).await?;
    match manager.get_detector() {
        Some(detector) => tracing::info!(
            "Detector {} ready (confidence > {:.2})",
            detector.name(),
            detector.confidence_threshold()
        ),
        None => tracing::warn!("⚠️ Starting without a detector; /analyze will return 503"),
    }

    let state = AppState::new(manager, config.api.max_image_bytes);
    let rules: Vec<&str> = state.evaluator.rules().iter().map(|r| r.name).collect();
    tracing::info!("Verdict rules: {}", rules.join(", "));

    start_server(state, addr).await
}
