//! Relief mapping parameters

use crate::relief_pipeline::common::error::{Result, ReliefError};

/// Smallest resample width the command line accepts; narrower requests are
/// raised to this value before they reach the field builder.
pub const MIN_TARGET_WIDTH_PX: u32 = 10;

/// Parameters controlling how luminance becomes thickness
#[derive(Debug, Clone, PartialEq)]
pub struct ReliefParams {
    /// Physical width of the panel in millimetres
    pub target_width_mm: f64,
    /// Resample width in pixels; height follows the source aspect ratio
    pub target_width_px: u32,
    /// Thickness everywhere, in millimetres (opaque base)
    pub base_mm: f64,
    /// Extra thickness range above the base, in millimetres
    pub relief_mm: f64,
    /// Linear luminance mapped to the bottom of the clip window
    pub black_cut: f64,
    /// Linear luminance mapped to the top of the clip window
    pub white_cut: f64,
    /// Tone curve exponent, applied as `Y^(1/tone_gamma)`
    pub tone_gamma: f64,
    /// Bright=Thin when true, Bright=Thick when false
    pub invert: bool,
    /// Mirror the field left-right
    pub flip_x: bool,
    /// Mirror the field top-bottom
    pub flip_y: bool,
}

impl Default for ReliefParams {
    fn default() -> Self {
        Self {
            target_width_mm: 100.0,
            target_width_px: 600,
            base_mm: 0.8,
            relief_mm: 1.5,
            black_cut: 0.02,
            white_cut: 0.98,
            tone_gamma: 1.15,
            invert: true,
            flip_x: false,
            flip_y: false,
        }
    }
}

impl ReliefParams {
    pub fn builder() -> ReliefParamsBuilder {
        ReliefParamsBuilder::default()
    }

    /// Millimetres per output pixel for a field `width` pixels wide.
    pub fn px_mm(&self, width: usize) -> f64 {
        self.target_width_mm / width as f64
    }

    /// Upper bound of the thickness range.
    pub fn max_thickness_mm(&self) -> f64 {
        self.base_mm + self.relief_mm
    }

    /// Checks every numeric field against its domain.
    pub fn validate(&self) -> Result<()> {
        if !(self.target_width_mm.is_finite() && self.target_width_mm > 0.0) {
            return Err(ReliefError::InvalidParameter(format!(
                "target_width_mm must be positive, got {}",
                self.target_width_mm
            )));
        }

        if self.target_width_px < 1 {
            return Err(ReliefError::InvalidParameter(
                "target_width_px must be at least 1".to_string(),
            ));
        }

        if !(self.base_mm.is_finite() && self.base_mm >= 0.0) {
            return Err(ReliefError::InvalidParameter(format!(
                "base_mm must be non-negative, got {}",
                self.base_mm
            )));
        }

        if !(self.relief_mm.is_finite() && self.relief_mm >= 0.0) {
            return Err(ReliefError::InvalidParameter(format!(
                "relief_mm must be non-negative, got {}",
                self.relief_mm
            )));
        }

        if !(self.black_cut.is_finite() && self.white_cut.is_finite()) {
            return Err(ReliefError::InvalidParameter(format!(
                "cut window must be finite, got {}..{}",
                self.black_cut, self.white_cut
            )));
        }

        if self.white_cut <= self.black_cut {
            return Err(ReliefError::InvalidParameter(format!(
                "white_cut must be above black_cut, got {}..{}",
                self.black_cut, self.white_cut
            )));
        }

        if !(self.tone_gamma.is_finite() && self.tone_gamma > 0.0) {
            return Err(ReliefError::InvalidParameter(format!(
                "tone_gamma must be positive, got {}",
                self.tone_gamma
            )));
        }

        Ok(())
    }
}

/// Builder for ReliefParams
#[derive(Default)]
pub struct ReliefParamsBuilder {
    target_width_mm: Option<f64>,
    target_width_px: Option<u32>,
    base_mm: Option<f64>,
    relief_mm: Option<f64>,
    black_cut: Option<f64>,
    white_cut: Option<f64>,
    tone_gamma: Option<f64>,
    invert: Option<bool>,
    flip_x: Option<bool>,
    flip_y: Option<bool>,
}

impl ReliefParamsBuilder {
    pub fn target_width_mm(mut self, mm: f64) -> Self {
        self.target_width_mm = Some(mm);
        self
    }

    pub fn target_width_px(mut self, px: u32) -> Self {
        self.target_width_px = Some(px);
        self
    }

    pub fn base_mm(mut self, mm: f64) -> Self {
        self.base_mm = Some(mm);
        self
    }

    pub fn relief_mm(mut self, mm: f64) -> Self {
        self.relief_mm = Some(mm);
        self
    }

    pub fn cuts(mut self, black: f64, white: f64) -> Self {
        self.black_cut = Some(black);
        self.white_cut = Some(white);
        self
    }

    pub fn tone_gamma(mut self, gamma: f64) -> Self {
        self.tone_gamma = Some(gamma);
        self
    }

    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = Some(invert);
        self
    }

    pub fn flip_x(mut self, flip: bool) -> Self {
        self.flip_x = Some(flip);
        self
    }

    pub fn flip_y(mut self, flip: bool) -> Self {
        self.flip_y = Some(flip);
        self
    }

    /// Same as flipping both axes.
    pub fn rotate_180(self) -> Self {
        self.flip_x(true).flip_y(true)
    }

    pub fn build(self) -> ReliefParams {
        let default = ReliefParams::default();
        ReliefParams {
            target_width_mm: self.target_width_mm.unwrap_or(default.target_width_mm),
            target_width_px: self.target_width_px.unwrap_or(default.target_width_px),
            base_mm: self.base_mm.unwrap_or(default.base_mm),
            relief_mm: self.relief_mm.unwrap_or(default.relief_mm),
            black_cut: self.black_cut.unwrap_or(default.black_cut),
            white_cut: self.white_cut.unwrap_or(default.white_cut),
            tone_gamma: self.tone_gamma.unwrap_or(default.tone_gamma),
            invert: self.invert.unwrap_or(default.invert),
            flip_x: self.flip_x.unwrap_or(default.flip_x),
            flip_y: self.flip_y.unwrap_or(default.flip_y),
        }
    }
}
