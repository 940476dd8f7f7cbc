//! Thickness field types

use crate::relief_pipeline::common::error::{Result, ReliefError};

/// Row-major grid of panel thickness values in millimetres
#[derive(Debug, Clone, PartialEq)]
pub struct ThicknessField {
    /// Columns in the grid
    pub width: usize,
    /// Rows in the grid
    pub height: usize,
    /// Millimetres per grid step, shared by both axes
    pub px_mm: f64,
    /// Thickness per cell, `data[y * width + x]`
    pub data: Vec<f32>,
}

impl ThicknessField {
    pub fn new(width: usize, height: usize, px_mm: f64, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(data.len()) {
            return Err(ReliefError::InvalidDimensions(format!(
                "{}x{} field cannot hold {} values",
                width,
                height,
                data.len()
            )));
        }
        Ok(Self { width, height, px_mm, data })
    }

    /// Smallest and largest thickness present.
    pub fn range(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &t| {
                (lo.min(t), hi.max(t))
            })
    }
}
