// crates/covergen-core/src/color/palette.rs
//
// Bold palette from one base hue.
//   slot 0: base hue, high saturation
//   slot 1: complement (50%) or analogous (+0.15..0.25)
//   rest:   base +/- 0.3

use rand::Rng;

use crate::color::hls::hls_to_rgb;
use crate::color::rgb::Rgb;

pub type Palette = Vec<Rgb>;

/// Hue/lightness/saturation ranges for one palette slot.
#[derive(Clone, Copy, Debug)]
struct SlotRanges {
    saturation: (f64, f64),
    lightness: (f64, f64),
}

const BASE_SLOT: SlotRanges = SlotRanges {
    saturation: (0.75, 0.95),
    lightness: (0.55, 0.75),
};

const PARTNER_SLOT: SlotRanges = SlotRanges {
    saturation: (0.70, 0.95),
    lightness: (0.50, 0.70),
};

const EXTRA_SLOT: SlotRanges = SlotRanges {
    saturation: (0.65, 0.95),
    lightness: (0.50, 0.75),
};

#[inline]
fn wrap_hue(h: f64) -> f64 {
    h.rem_euclid(1.0)
}

/// Generate a palette of `num_colors` entries.
///
/// With `include_white`, pure white takes the first slot and one fewer color is generated,
/// so `num_colors == 0` still yields `[WHITE]`. Without it, `num_colors == 0` yields an
/// empty palette; callers must reject that before compositing.
pub fn generate_palette<R: Rng + ?Sized>(
    rng: &mut R,
    num_colors: usize,
    base_hue: Option<f64>,
    include_white: bool,
) -> Palette {
    let mut colors = Vec::with_capacity(num_colors.max(1));

    let mut remaining = num_colors;
    if include_white {
        colors.push(Rgb::WHITE);
        remaining = remaining.saturating_sub(1);
    }

    let base_hue = match base_hue {
        Some(h) => wrap_hue(h),
        None => rng.gen::<f64>(),
    };

    for i in 0..remaining {
        let (hue, slot) = match i {
            0 => (base_hue, BASE_SLOT),
            1 => {
                let hue = if rng.gen::<f64>() > 0.5 {
                    wrap_hue(base_hue + 0.5)
                } else {
                    wrap_hue(base_hue + rng.gen_range(0.15..=0.25))
                };
                (hue, PARTNER_SLOT)
            }
            _ => (wrap_hue(base_hue + rng.gen_range(-0.3..=0.3)), EXTRA_SLOT),
        };

        let saturation = rng.gen_range(slot.saturation.0..=slot.saturation.1);
        let lightness = rng.gen_range(slot.lightness.0..=slot.lightness.1);

        let (r, g, b) = hls_to_rgb(hue, lightness, saturation);
        colors.push(Rgb::from_unit(r, g, b));
    }

    colors
}
