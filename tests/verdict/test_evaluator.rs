// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Verdict evaluator tests
//!
//! These tests verify that evaluate():
//! - Flags any cell phone with a single reason
//! - Flags more than one person with the count in the reason
//! - Keeps detections in detector order with rounded confidences
//! - Derives `suspicious` from the reasons list

use proctor_vision_node::verdict::{
    evaluate, round_confidence, BoundingBox, Detection, Verdict, VerdictEvaluator, DEFAULT_RULES,
};

fn det(label: &str, confidence: f32) -> Detection {
    Detection::new(label, confidence, BoundingBox::new(0.0, 0.0, 10.0, 10.0))
}

fn frames() -> Vec<Vec<Detection>> {
    vec![
        vec![],
        vec![det("person", 0.97)],
        vec![det("person", 0.97), det("cell phone", 0.93)],
        vec![det("person", 0.95), det("person", 0.92), det("person", 0.91)],
        vec![det("cell phone", 0.99), det("cell phone", 0.96)],
        vec![det("laptop", 0.94), det("book", 0.91), det("cup", 0.995)],
        vec![
            det("cell phone", 0.91),
            det("person", 0.98),
            det("person", 0.96),
        ],
    ]
}

#[cfg(test)]
mod evaluator_tests {
    use super::*;

    // =============================================================================
    // Scenario Tests
    // =============================================================================

    /// Test 1: Single person is not suspicious
    #[test]
    fn test_single_person() {
        let verdict = evaluate(&[det("person", 0.9712)]);

        assert!(!verdict.suspicious);
        assert!(verdict.reasons.is_empty());
        assert_eq!(verdict.detections.len(), 1);
        assert_eq!(verdict.detections[0].label, "person");
        assert_eq!(verdict.detections[0].confidence, 0.97);
    }

    /// Test 2: Person with phone
    #[test]
    fn test_person_with_phone() {
        let verdict = evaluate(&[det("person", 0.97), det("cell phone", 0.93)]);

        assert!(verdict.suspicious);
        assert_eq!(verdict.reasons, vec!["Cell phone detected"]);
    }

    /// Test 3: Three people
    #[test]
    fn test_three_people() {
        let verdict = evaluate(&[det("person", 0.95), det("person", 0.92), det("person", 0.91)]);

        assert!(verdict.suspicious);
        assert_eq!(verdict.reasons, vec!["Multiple people detected (3)"]);
        assert_eq!(verdict.detections.len(), 3);
    }

    /// Test 4: Two phones give one reason
    #[test]
    fn test_two_phones_one_reason() {
        let verdict = evaluate(&[det("cell phone", 0.99), det("cell phone", 0.96)]);

        assert!(verdict.suspicious);
        assert_eq!(verdict.reasons, vec!["Cell phone detected"]);
        assert_eq!(verdict.detections.len(), 2);
    }

    /// Test 5: Empty frame
    #[test]
    fn test_empty_frame() {
        assert_eq!(evaluate(&[]), Verdict::default());
    }

    /// Test 6: Unrelated objects are listed but not flagged
    #[test]
    fn test_unrelated_objects() {
        let verdict = evaluate(&[det("laptop", 0.94), det("book", 0.91)]);

        assert!(!verdict.suspicious);
        let labels: Vec<&str> = verdict.detections.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["laptop", "book"]);
    }

    /// Test 7: Labels match exactly
    #[test]
    fn test_label_match_is_exact() {
        let verdict = evaluate(&[det("Cell Phone", 0.95), det("persons", 0.95), det("person", 0.95)]);
        assert!(!verdict.suspicious);
    }

    // =============================================================================
    // Property Tests
    // =============================================================================

    /// Test 8: suspicious iff reasons is non-empty
    #[test]
    fn test_suspicious_matches_reasons() {
        for frame in frames() {
            let verdict = evaluate(&frame);
            assert_eq!(verdict.suspicious, !verdict.reasons.is_empty());
        }
    }

    /// Test 9: One summary per detection, same order
    #[test]
    fn test_detections_preserve_order() {
        for frame in frames() {
            let verdict = evaluate(&frame);
            assert_eq!(verdict.detections.len(), frame.len());
            for (summary, detection) in verdict.detections.iter().zip(&frame) {
                assert_eq!(summary.label, detection.label());
                assert_eq!(summary.confidence, round_confidence(detection.confidence()));
            }
        }
    }

    /// Test 10: Reasons never repeat and never exceed the rule count
    #[test]
    fn test_reasons_unique() {
        for frame in frames() {
            let verdict = evaluate(&frame);
            let mut seen = verdict.reasons.clone();
            seen.dedup();
            assert_eq!(seen, verdict.reasons);
            assert!(verdict.reasons.len() <= DEFAULT_RULES.len());
        }
    }

    /// Test 11: Evaluation is deterministic
    #[test]
    fn test_evaluate_idempotent() {
        let evaluator = VerdictEvaluator::default();
        for frame in frames() {
            assert_eq!(evaluator.evaluate(&frame), evaluator.evaluate(&frame));
        }
    }

    /// Test 12: Both reasons appear with phone first
    #[test]
    fn test_reason_order() {
        let verdict = evaluate(&[det("person", 0.98), det("person", 0.96), det("cell phone", 0.91)]);
        assert_eq!(
            verdict.reasons,
            vec!["Cell phone detected", "Multiple people detected (2)"]
        );
    }

    /// Test 13: Rounded confidences serialize with two decimals
    #[test]
    fn test_rounded_confidence_json() {
        let verdict = evaluate(&[det("cup", 0.995), det("person", 0.91234)]);
        let json = serde_json::to_string(&verdict).unwrap();

        assert!(json.contains(r#"{"label":"cup","confidence":1.0}"#));
        assert!(json.contains(r#"{"label":"person","confidence":0.91}"#));
    }
}
