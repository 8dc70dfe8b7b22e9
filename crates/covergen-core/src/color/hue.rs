// crates/covergen-core/src/color/hue.rs
//
// Theme color (hex code or name) -> base hue.
// Unknown names and malformed hex codes are not errors: they resolve to a random hue.

use log::warn;

use crate::color::hls::rgb_to_hls;
use crate::color::rgb::Rgb;

/// Fixed named hue table (normalized hue in [0, 1)).
pub const NAMED_HUES: [(&str, f64); 9] = [
    ("red", 0.0),
    ("orange", 0.08),
    ("yellow", 0.16),
    ("green", 0.33),
    ("cyan", 0.5),
    ("blue", 0.6),
    ("purple", 0.75),
    ("magenta", 0.83),
    ("pink", 0.9),
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HueChoice {
    Fixed(f64),
    /// Let the palette generator draw a hue from its generator.
    Random,
}

impl HueChoice {
    pub fn as_option(self) -> Option<f64> {
        match self {
            HueChoice::Fixed(h) => Some(h),
            HueChoice::Random => None,
        }
    }
}

pub fn named_hue(name: &str) -> Option<f64> {
    NAMED_HUES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, h)| h)
}

/// Hue of a color, saturation and lightness discarded.
pub fn hue_of(c: Rgb) -> f64 {
    let (h, _l, _s) = rgb_to_hls(c.r as f64 / 255.0, c.g as f64 / 255.0, c.b as f64 / 255.0);
    h
}

/// Resolve `#RRGGBB`, a named hue, or nothing.
pub fn resolve_theme(theme: Option<&str>) -> HueChoice {
    let Some(raw) = theme.map(str::trim).filter(|s| !s.is_empty()) else {
        return HueChoice::Random;
    };

    if let Some(hex) = raw.strip_prefix('#') {
        return match Rgb::from_hex6(hex) {
            Some(c) => HueChoice::Fixed(hue_of(c)),
            None => {
                warn!("theme color {raw:?} is not a #RRGGBB code; using a random hue");
                HueChoice::Random
            }
        };
    }

    match named_hue(raw) {
        Some(h) => HueChoice::Fixed(h),
        None => HueChoice::Random,
    }
}
