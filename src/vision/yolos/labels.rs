// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Class id -> label vocabulary for DETR-family detectors

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Placeholder used by COCO for ids with no class
pub const UNUSED_LABEL: &str = "N/A";

/// COCO 2017 detection vocabulary as indexed by DETR / YOLOS (91 slots)
const COCO_LABELS: [&str; 91] = [
    "N/A", "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck", "boat",
    "traffic light", "fire hydrant", "N/A", "stop sign", "parking meter", "bench", "bird", "cat",
    "dog", "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe", "N/A", "backpack",
    "umbrella", "N/A", "N/A", "handbag", "tie", "suitcase", "frisbee", "skis", "snowboard",
    "sports ball", "kite", "baseball bat", "baseball glove", "skateboard", "surfboard",
    "tennis racket", "bottle", "N/A", "wine glass", "cup", "fork", "knife", "spoon", "bowl",
    "banana", "apple", "sandwich", "orange", "broccoli", "carrot", "hot dog", "pizza", "donut",
    "cake", "chair", "couch", "potted plant", "bed", "N/A", "dining table", "N/A", "N/A",
    "toilet", "N/A", "tv", "laptop", "mouse", "remote", "keyboard", "cell phone", "microwave",
    "oven", "toaster", "sink", "refrigerator", "N/A", "book", "clock", "vase", "scissors",
    "teddy bear", "hair drier", "toothbrush",
];

/// Hugging Face `config.json`, only the part we need
#[derive(Debug, Deserialize)]
struct HfModelConfig {
    id2label: HashMap<String, String>,
}

/// Maps model class ids to label strings
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap {
    labels: Vec<String>,
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::coco()
    }
}

impl LabelMap {
    /// Built-in COCO vocabulary (`hustvl/yolos-tiny`)
    pub fn coco() -> Self {
        Self {
            labels: COCO_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Build from an explicit list, index = class id
    pub fn from_labels(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Parse the `id2label` object out of a Hugging Face `config.json`
    ///
    /// Gaps in the id range are filled with `"N/A"`.
    pub fn from_hf_config_str(json: &str) -> Result<Self> {
        let config: HfModelConfig =
            serde_json::from_str(json).context("config.json has no valid id2label object")?;

        let mut entries = Vec::with_capacity(config.id2label.len());
        for (id, label) in config.id2label {
            let id: usize = id
                .parse()
                .with_context(|| format!("id2label key '{}' is not a class index", id))?;
            entries.push((id, label));
        }

        let len = entries.iter().map(|(id, _)| id + 1).max().unwrap_or(0);
        let mut labels = vec![UNUSED_LABEL.to_string(); len];
        for (id, label) in entries {
            labels[id] = label;
        }

        Ok(Self { labels })
    }

    /// Load a Hugging Face `config.json` from disk
    pub fn from_hf_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read label config {}", path.display()))?;
        Self::from_hf_config_str(&content)
    }

    /// Label for `class_id`, or None when the id is out of range
    pub fn get(&self, class_id: usize) -> Option<&str> {
        self.labels.get(class_id).map(String::as_str)
    }

    /// Label for `class_id`, falling back to `"N/A"`
    pub fn label_or_unused(&self, class_id: usize) -> &str {
        self.get(class_id).unwrap_or(UNUSED_LABEL)
    }

    /// Number of object classes (excluding the "no object" slot)
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
