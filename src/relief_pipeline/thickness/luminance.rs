//! sRGB decoding, relative luminance and the clip/tone curve.

/// Lower bound on the clip window width.
pub const MIN_CUT_SPAN: f64 = 1e-9;

/// Rec.709 luminance weights for linear R, G, B.
const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// sRGB-encoded channel in [0, 1] to linear intensity.
#[inline]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of an 8-bit sRGB pixel. Alpha is ignored.
#[inline]
pub fn luminance(rgba: [u8; 4]) -> f64 {
    LUMA_WEIGHTS
        .iter()
        .zip(&rgba[..3])
        .map(|(w, &c)| w * srgb_to_linear(c as f64 / 255.0))
        .sum()
}

/// Linear luminance lookup for every 8-bit channel value.
pub fn linear_table() -> [f64; 256] {
    let mut table = [0.0; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = srgb_to_linear(i as f64 / 255.0);
    }
    table
}

/// Luminance through a precomputed [`linear_table`].
#[inline]
pub fn luminance_with(table: &[f64; 256], rgba: [u8; 4]) -> f64 {
    LUMA_WEIGHTS[0] * table[rgba[0] as usize]
        + LUMA_WEIGHTS[1] * table[rgba[1] as usize]
        + LUMA_WEIGHTS[2] * table[rgba[2] as usize]
}

/// Clips `y` to the `[black_cut, white_cut]` window, renormalizes to [0, 1]
/// and applies `y^(1/tone_gamma)`.
#[inline]
pub fn tone_map(y: f64, black_cut: f64, white_cut: f64, tone_gamma: f64) -> f64 {
    let span = (white_cut - black_cut).max(MIN_CUT_SPAN);
    let clipped = ((y - black_cut) / span).clamp(0.0, 1.0);

    if (tone_gamma - 1.0).abs() < 1e-12 {
        return clipped;
    }
    clipped.powf(1.0 / tone_gamma).clamp(0.0, 1.0)
}
