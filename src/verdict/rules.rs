// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Heuristic rules applied to a detection set
//!
//! Each rule is a predicate over the whole set that yields a reason string
//! when it fires. The rule list is fixed at compile time.

use super::types::Detection;

/// Label emitted by the COCO vocabulary for phones
pub const CELL_PHONE_LABEL: &str = "cell phone";

/// Label emitted by the COCO vocabulary for people
pub const PERSON_LABEL: &str = "person";

/// Reason reported when a phone is visible
pub const CELL_PHONE_REASON: &str = "Cell phone detected";

/// A named predicate + reason pair
#[derive(Debug, Clone, Copy)]
pub struct HeuristicRule {
    pub name: &'static str,
    pub check: fn(&[Detection]) -> Option<String>,
}

impl HeuristicRule {
    /// Run the rule, returning its reason if it fires
    pub fn apply(&self, detections: &[Detection]) -> Option<String> {
        (self.check)(detections)
    }
}

/// Rules in evaluation order
pub const DEFAULT_RULES: &[HeuristicRule] = &[
    HeuristicRule {
        name: "cell_phone",
        check: cell_phone_present,
    },
    HeuristicRule {
        name: "multiple_people",
        check: multiple_people,
    },
];

fn cell_phone_present(detections: &[Detection]) -> Option<String> {
    detections
        .iter()
        .any(|d| d.label() == CELL_PHONE_LABEL)
        .then(|| CELL_PHONE_REASON.to_string())
}

fn multiple_people(detections: &[Detection]) -> Option<String> {
    let person_count = count_label(detections, PERSON_LABEL);
    (person_count > 1).then(|| format!("Multiple people detected ({})", person_count))
}

/// Number of detections carrying exactly `label`
pub fn count_label(detections: &[Detection], label: &str) -> usize {
    detections.iter().filter(|d| d.label() == label).count()
}
