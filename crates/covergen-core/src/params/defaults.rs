// crates/covergen-core/src/params/defaults.rs

use crate::params::CoverParams;

pub const DEFAULT_WIDTH: u32 = 3840;
pub const DEFAULT_HEIGHT: u32 = 2160;
pub const DEFAULT_NUM_COLORS: usize = 5;
pub const DEFAULT_NUM_CENTERS: usize = 6;
pub const DEFAULT_DISTORTION: f64 = 0.03;
pub const DEFAULT_BLUR_SIGMA: f64 = 50.0;
pub const DEFAULT_BLUR_SCALES: usize = 3;
pub const DEFAULT_SATURATION: f64 = 1.25;
pub const DEFAULT_CONTRAST: f64 = 1.15;

/// Upper bounds accepted by validation. Larger blurs only converge on the image mean.
pub const MAX_BLUR_SIGMA: f64 = 1000.0;
pub const MAX_BLUR_SCALES: usize = 12;

pub fn default_params() -> CoverParams {
    // 4K UHD canvas, five-color palette with a white highlight.
    CoverParams {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        theme: None,
        num_colors: DEFAULT_NUM_COLORS,
        num_centers: DEFAULT_NUM_CENTERS,
        distortion: DEFAULT_DISTORTION,
        blur_sigma: DEFAULT_BLUR_SIGMA,
        blur_scales: DEFAULT_BLUR_SCALES,
        saturation: DEFAULT_SATURATION,
        contrast: DEFAULT_CONTRAST,
        include_white: true,
        seed: None,
    }
}
