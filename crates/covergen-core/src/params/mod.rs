// crates/covergen-core/src/params/mod.rs

pub mod defaults;
pub mod ratio;

use log::warn;

pub use ratio::AspectRatio;

/// Everything one render needs. Built by the CLI, checked by `validate::validate_params`.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverParams {
    pub width: u32,
    pub height: u32,

    /// `#RRGGBB`, a named hue, or None for a random hue.
    pub theme: Option<String>,

    pub num_colors: usize,
    pub num_centers: usize,

    /// Flow distortion strength in [0, 1]; 0 skips the stage.
    pub distortion: f64,

    /// Base sigma of the multi-scale blur.
    pub blur_sigma: f64,
    /// Number of blur scales (sigma grows x1.5 per scale).
    pub blur_scales: usize,

    pub saturation: f64,
    pub contrast: f64,

    /// Force a pure white highlight entry into the palette.
    pub include_white: bool,

    /// None = draw a seed from OS entropy (the engine reports which one it used).
    pub seed: Option<u64>,
}

impl Default for CoverParams {
    fn default() -> Self {
        defaults::default_params()
    }
}

impl CoverParams {
    /// Override `height` from a `W:H` ratio string.
    ///
    /// A malformed ratio is not fatal: it is logged and the current height is kept.
    /// Returns true if the height was changed.
    pub fn apply_ratio(&mut self, ratio: &str) -> bool {
        match ratio.parse::<AspectRatio>() {
            Ok(r) => {
                self.height = r.height_for(self.width);
                true
            }
            Err(e) => {
                warn!("invalid ratio format {ratio:?} ({e}); keeping height {}", self.height);
                false
            }
        }
    }
}
