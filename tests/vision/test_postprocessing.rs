// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! YOLOS pipeline tests without a model file
//!
//! These tests feed synthetic model outputs through:
//! - preprocessing (tensor layout and size)
//! - postprocessing (class selection, thresholding, boxes)
//! - the verdict evaluator

use image::DynamicImage;
use ndarray::Array2;
use proctor_vision_node::verdict::evaluate;
use proctor_vision_node::vision::yolos::{
    postprocessing::postprocess_detections,
    preprocessing::{preprocess_for_detection, ResizePolicy},
    LabelMap, DEFAULT_CONFIDENCE_THRESHOLD,
};

const NUM_SLOTS: usize = 92;

/// Helper: logits for `queries` rows, each dominated by the given class
fn logits_for(classes: &[usize]) -> Array2<f32> {
    let mut logits = Array2::<f32>::zeros((classes.len(), NUM_SLOTS));
    for (row, &class_id) in classes.iter().enumerate() {
        logits[[row, class_id]] = 15.0;
    }
    logits
}

fn centered_boxes(n: usize) -> Array2<f32> {
    let mut boxes = Array2::<f32>::zeros((n, 4));
    for mut row in boxes.outer_iter_mut() {
        row.assign(&ndarray::arr1(&[0.5, 0.5, 0.25, 0.5]));
    }
    boxes
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    /// Test 1: Webcam frame becomes a 1x3xHxW tensor
    #[test]
    fn test_preprocess_webcam_frame() {
        let frame = DynamicImage::new_rgb8(640, 480);
        let tensor = preprocess_for_detection(&frame, ResizePolicy::default());
        assert_eq!(tensor.shape(), &[1, 3, 512, 682]);
    }

    /// Test 2: Fixed resize ignores aspect ratio
    #[test]
    fn test_preprocess_fixed_size() {
        let frame = DynamicImage::new_rgb8(640, 480);
        let tensor = preprocess_for_detection(
            &frame,
            ResizePolicy::Fixed {
                width: 800,
                height: 608,
            },
        );
        assert_eq!(tensor.shape(), &[1, 3, 608, 800]);
    }

    /// Test 3: Phone and two people produce both reasons
    #[test]
    fn test_model_output_to_verdict() {
        // 77 = cell phone, 1 = person, 91 = no object, 62 = chair
        let classes = [1, 91, 77, 62, 1, 91];
        let logits = logits_for(&classes);
        let boxes = centered_boxes(classes.len());

        let detections = postprocess_detections(
            logits.view(),
            boxes.view(),
            &LabelMap::coco(),
            DEFAULT_CONFIDENCE_THRESHOLD,
            (640, 480),
        )
        .unwrap();

        let labels: Vec<&str> = detections.iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["person", "cell phone", "chair", "person"]);

        let verdict = evaluate(&detections);
        assert!(verdict.suspicious);
        assert_eq!(
            verdict.reasons,
            vec!["Cell phone detected", "Multiple people detected (2)"]
        );
        assert!(verdict.detections.iter().all(|d| d.confidence == 1.0));
    }

    /// Test 4: All no-object queries give a clean verdict
    #[test]
    fn test_empty_scene() {
        let logits = logits_for(&[91, 91, 91]);
        let boxes = centered_boxes(3);

        let detections = postprocess_detections(
            logits.view(),
            boxes.view(),
            &LabelMap::coco(),
            DEFAULT_CONFIDENCE_THRESHOLD,
            (640, 480),
        )
        .unwrap();

        assert!(detections.is_empty());
        assert!(!evaluate(&detections).suspicious);
    }

    /// Test 5: Boxes are in original pixel coordinates
    #[test]
    fn test_boxes_in_pixels() {
        let logits = logits_for(&[1]);
        let boxes = centered_boxes(1);

        let detections = postprocess_detections(
            logits.view(),
            boxes.view(),
            &LabelMap::coco(),
            DEFAULT_CONFIDENCE_THRESHOLD,
            (640, 480),
        )
        .unwrap();

        assert_eq!(detections[0].bbox().as_array(), [240.0, 120.0, 400.0, 360.0]);
    }

    /// Test 6: Custom id2label vocabulary
    #[test]
    fn test_custom_labels() {
        let labels = LabelMap::from_hf_config_str(
            r#"{"id2label": {"0": "N/A", "1": "person", "2": "cell phone"}}"#,
        )
        .unwrap();
        let mut logits = Array2::<f32>::zeros((1, 4));
        logits[[0, 2]] = 15.0;

        let detections = postprocess_detections(
            logits.view(),
            centered_boxes(1).view(),
            &labels,
            DEFAULT_CONFIDENCE_THRESHOLD,
            (100, 100),
        )
        .unwrap();

        assert_eq!(detections[0].label(), "cell phone");
        assert_eq!(evaluate(&detections).reasons, vec!["Cell phone detected"]);
    }
}
