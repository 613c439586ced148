// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YOLOS object detection model (ONNX Runtime, CPU)

use anyhow::{Context, Result};
use image::{DynamicImage, GenericImageView};
use ndarray::{ArrayViewD, Axis, Ix2};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info};

use super::labels::LabelMap;
use super::postprocessing::postprocess_detections;
use super::preprocessing::{preprocess_for_detection, ResizePolicy};
use crate::verdict::Detection;
use crate::vision::detector::ObjectDetector;

/// Default score threshold (strictly greater than)
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.9;

/// Name reported for this detector
pub const MODEL_NAME: &str = "yolos-tiny";

/// Settings for loading [`YolosDetectionModel`]
#[derive(Debug, Clone)]
pub struct YolosModelConfig {
    /// Path to the exported ONNX file
    pub model_path: PathBuf,
    /// Optional Hugging Face `config.json` with `id2label`; COCO when absent
    pub labels_path: Option<PathBuf>,
    /// Detections at or below this score are dropped
    pub confidence_threshold: f32,
    pub resize: ResizePolicy,
    /// ONNX Runtime intra-op threads
    pub intra_threads: usize,
}

impl Default for YolosModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./models/yolos-tiny-onnx/model.onnx"),
            labels_path: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            resize: ResizePolicy::default(),
            intra_threads: 4,
        }
    }
}

/// YOLOS-tiny detector
///
/// Wraps an ONNX export of `hustvl/yolos-tiny` with two outputs:
/// `logits` `[1, Q, C+1]` and `pred_boxes` `[1, Q, 4]`.
#[derive(Clone)]
pub struct YolosDetectionModel {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    input_name: String,
    logits_name: String,
    boxes_name: String,
    labels: LabelMap,
    resize: ResizePolicy,
    confidence_threshold: f32,
}

impl std::fmt::Debug for YolosDetectionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YolosDetectionModel")
            .field("input_name", &self.input_name)
            .field("logits_name", &self.logits_name)
            .field("boxes_name", &self.boxes_name)
            .field("num_labels", &self.labels.len())
            .field("resize", &self.resize)
            .field("confidence_threshold", &self.confidence_threshold)
            .finish_non_exhaustive()
    }
}

impl YolosDetectionModel {
    /// Load the detector from disk
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found
    /// - Label config cannot be read
    /// - ONNX Runtime initialization fails
    /// - Model exposes fewer than two outputs
    pub async fn new(config: &YolosModelConfig) -> Result<Self> {
        let model_path: &Path = config.model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("Detection model not found: {}", model_path.display());
        }

        let labels = match &config.labels_path {
            Some(path) => LabelMap::from_hf_config_file(path)?,
            None => LabelMap::coco(),
        };

        info!("Loading detection model from {}", model_path.display());

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(config.intra_threads)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load detection model from {}",
                model_path.display()
            ))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "pixel_values".to_string());

        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let (logits_name, boxes_name) = resolve_output_names(&output_names)?;

        debug!(
            "Detection model loaded - input: {}, logits: {}, boxes: {}",
            input_name, logits_name, boxes_name
        );

        info!(
            "✅ Detection model loaded ({} labels, threshold {:.2}, CPU-only)",
            labels.len(),
            config.confidence_threshold
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            logits_name,
            boxes_name,
            labels,
            resize: config.resize,
            confidence_threshold: config.confidence_threshold.clamp(0.0, 1.0),
        })
    }
}

impl ObjectDetector for YolosDetectionModel {
    fn name(&self) -> &str {
        MODEL_NAME
    }

    fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>> {
        let image_size = image.dimensions();
        let input = preprocess_for_detection(image, self.resize);

        let start = Instant::now();
        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("Detection session lock poisoned: {}", e))?;

        let input_value =
            Value::from_array(input).context("Failed to create input tensor")?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .context("Detection inference failed")?;

        let logits = outputs[self.logits_name.as_str()]
            .try_extract_array::<f32>()
            .context("Failed to extract logits tensor")?;
        let boxes = outputs[self.boxes_name.as_str()]
            .try_extract_array::<f32>()
            .context("Failed to extract box tensor")?;

        debug!(
            "Detection output shapes: logits {:?}, boxes {:?} ({}ms)",
            logits.shape(),
            boxes.shape(),
            start.elapsed().as_millis()
        );

        let logits = first_batch(logits).context("Unexpected logits output")?;
        let boxes = first_batch(boxes).context("Unexpected box output")?;

        let detections = postprocess_detections(
            logits.view(),
            boxes.view(),
            &self.labels,
            self.confidence_threshold,
            image_size,
        )?;

        Ok(detections)
    }
}

/// Pick the logits and box outputs, by name when exported with HF names
fn resolve_output_names(outputs: &[String]) -> Result<(String, String)> {
    if outputs.len() < 2 {
        anyhow::bail!(
            "Detection model must expose logits and box outputs, found {:?}",
            outputs
        );
    }

    let logits = outputs
        .iter()
        .find(|n| n.as_str() == "logits")
        .unwrap_or(&outputs[0])
        .clone();
    let boxes = outputs
        .iter()
        .find(|n| n.as_str() == "pred_boxes")
        .unwrap_or(&outputs[1])
        .clone();

    Ok((logits, boxes))
}

/// Drop the leading batch axis, accepting `[1, Q, N]` or `[Q, N]`
fn first_batch(view: ArrayViewD<'_, f32>) -> Result<ndarray::ArrayView2<'_, f32>> {
    let view = match view.ndim() {
        3 => view.index_axis_move(Axis(0), 0),
        2 => view,
        n => anyhow::bail!("expected 2 or 3 dimensions, got {}", n),
    };
    Ok(view.into_dimensionality::<Ix2>()?)
}
