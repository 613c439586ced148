// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

/// Request to analyze one frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Data URL (`data:image/jpeg;base64,...`) or bare base64 image
    #[serde(default)]
    pub image: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
        }
    }

    /// Validate the request and return the encoded image
    pub fn validate(&self, max_image_bytes: usize) -> Result<&str, ApiError> {
        let image = match self.image.as_deref() {
            Some(image) if !image.trim().is_empty() => image,
            _ => {
                return Err(ApiError::ValidationError {
                    field: "image".to_string(),
                    message: "No image provided".to_string(),
                })
            }
        };

        if image.len() > max_image_bytes {
            return Err(ApiError::ValidationError {
                field: "image".to_string(),
                message: format!("image exceeds maximum size of {} bytes", max_image_bytes),
            });
        }

        Ok(image)
    }

    /// Validate and take ownership of the encoded image
    pub fn into_image(self, max_image_bytes: usize) -> Result<String, ApiError> {
        self.validate(max_image_bytes)?;
        Ok(self.image.unwrap_or_default())
    }
}
