// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for YOLOS

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use ndarray::Array4;

/// Mean values for normalization (ImageNet)
pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// Std values for normalization (ImageNet)
pub const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Default shortest edge for yolos-tiny
pub const DEFAULT_SHORTEST_EDGE: u32 = 512;

/// Default cap on the longest edge
pub const DEFAULT_LONGEST_EDGE: u32 = 1333;

/// How the input image is resized before inference
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizePolicy {
    /// Scale so the short side hits `shortest`, unless the long side would
    /// then exceed `longest` (dynamic-shape exports)
    ShortestEdge { shortest: u32, longest: u32 },
    /// Stretch to exactly `width x height` (static-shape exports)
    Fixed { width: u32, height: u32 },
}

impl Default for ResizePolicy {
    fn default() -> Self {
        ResizePolicy::ShortestEdge {
            shortest: DEFAULT_SHORTEST_EDGE,
            longest: DEFAULT_LONGEST_EDGE,
        }
    }
}

impl ResizePolicy {
    /// Output `(width, height)` for an image of the given size
    pub fn target_size(&self, width: u32, height: u32) -> (u32, u32) {
        match *self {
            ResizePolicy::Fixed { width, height } => (width, height),
            ResizePolicy::ShortestEdge { shortest, longest } => {
                shortest_edge_size(width, height, shortest, longest)
            }
        }
    }
}

/// DETR-style aspect-preserving size computation
fn shortest_edge_size(width: u32, height: u32, shortest: u32, longest: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (shortest.max(1), shortest.max(1));
    }

    let min_side = width.min(height) as f32;
    let max_side = width.max(height) as f32;

    let mut size = shortest as f32;
    if max_side / min_side * size > longest as f32 {
        size = (longest as f32 * min_side / max_side).round();
    }
    let size = (size as u32).max(1);

    if (width <= height && width == size) || (height <= width && height == size) {
        return (width, height);
    }

    if width < height {
        let new_h = (size as f32 * height as f32 / width as f32) as u32;
        (size, new_h.max(1))
    } else {
        let new_w = (size as f32 * width as f32 / height as f32) as u32;
        (new_w.max(1), size)
    }
}

/// Preprocess an image for YOLOS detection
///
/// Steps:
/// 1. Resize according to `policy` (bilinear)
/// 2. Convert to RGB
/// 3. Normalize with ImageNet mean/std: (pixel/255 - mean) / std
/// 4. Convert to NCHW tensor format [1, 3, H, W]
pub fn preprocess_for_detection(image: &DynamicImage, policy: ResizePolicy) -> Array4<f32> {
    let (orig_w, orig_h) = image.dimensions();
    let (target_w, target_h) = policy.target_size(orig_w, orig_h);

    let resized = if (target_w, target_h) == (orig_w, orig_h) {
        image.clone()
    } else {
        image.resize_exact(target_w, target_h, FilterType::Triangle)
    };
    let rgb = resized.to_rgb8();

    let mut tensor = Array4::zeros((1, 3, target_h as usize, target_w as usize));

    for (x, y, pixel) in rgb.enumerate_pixels() {
        for c in 0..3 {
            let normalized = (pixel[c] as f32 / 255.0 - MEAN[c]) / STD[c];
            tensor[[0, c, y as usize, x as usize]] = normalized;
        }
    }

    tensor
}
