// crates/covergen-core/src/stage/gradient.rs
//
// Radial-basis color blending.
//
//   w_k(p) = exp(-(|p - c_k| / radius_k) ^ exponent_k) * strength_k
//   pixel  = sum_k(w_k * color_k) / max(sum_k(w_k), 1e-6)

use log::debug;
use rand::Rng;
use rayon::prelude::*;

use crate::buffer::{quantize_channel, PixelBuffer, CHANNELS};
use crate::color::rgb::Rgb;
use crate::error::{CoverError, Result};

/// Probability that a center snaps to a canonical anchor instead of a free position.
pub const ANCHOR_PROBABILITY: f64 = 0.7;
/// Anchor jitter and free-placement margin, as a fraction of width/height.
pub const PLACEMENT_MARGIN: f64 = 0.2;
/// Floor for the weight sum; pixels nobody influences come out black instead of NaN.
pub const WEIGHT_EPSILON: f64 = 1e-6;

pub const RADIUS_MIN_FRAC: f64 = 0.4;
pub const RADIUS_MAX_FRAC: f64 = 0.9;
pub const STRENGTH_RANGE: (f64, f64) = (0.7, 1.3);
pub const EXPONENT_RANGE: (f64, f64) = (1.5, 2.5);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorCenter {
    /// Canvas coordinates; may lie outside the canvas.
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
    /// Always > 0.
    pub radius: f64,
    pub strength: f64,
    /// Falloff exponent in [1.5, 2.5].
    pub exponent: f64,
}

impl ColorCenter {
    #[inline]
    pub fn weight_at(&self, px: f64, py: f64) -> f64 {
        let dist = (px - self.x).hypot(py - self.y);
        (-(dist / self.radius).powf(self.exponent)).exp() * self.strength
    }
}

/// Four corners, then the four edge midpoints (top, right, bottom, left).
pub fn anchors(width: u32, height: u32) -> [(f64, f64); 8] {
    let w = width as f64;
    let h = height as f64;
    let hw = (width / 2) as f64;
    let hh = (height / 2) as f64;
    [
        (0.0, 0.0),
        (w, 0.0),
        (0.0, h),
        (w, h),
        (hw, 0.0),
        (w, hh),
        (hw, h),
        (0.0, hh),
    ]
}

/// Draw `count` centers. Colors cycle through `palette` by center index.
pub fn place_centers<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    palette: &[Rgb],
    count: usize,
) -> Result<Vec<ColorCenter>> {
    if palette.is_empty() {
        return Err(CoverError::EmptyPalette);
    }

    let w = width as f64;
    let h = height as f64;
    let jx = w * PLACEMENT_MARGIN;
    let jy = h * PLACEMENT_MARGIN;
    let r_lo = w.min(h) * RADIUS_MIN_FRAC;
    let r_hi = w.max(h) * RADIUS_MAX_FRAC;
    let anchors = anchors(width, height);

    let mut centers = Vec::with_capacity(count);
    for i in 0..count {
        let (x, y) = if rng.gen::<f64>() < ANCHOR_PROBABILITY {
            let (ax, ay) = anchors[i % anchors.len()];
            (ax + rng.gen_range(-jx..=jx), ay + rng.gen_range(-jy..=jy))
        } else {
            (
                rng.gen_range(-jx..=w + jx),
                rng.gen_range(-jy..=h + jy),
            )
        };

        let center = ColorCenter {
            x,
            y,
            color: palette[i % palette.len()],
            radius: rng.gen_range(r_lo..=r_hi),
            strength: rng.gen_range(STRENGTH_RANGE.0..=STRENGTH_RANGE.1),
            exponent: rng.gen_range(EXPONENT_RANGE.0..=EXPONENT_RANGE.1),
        };
        debug!(
            "center[{i}] at ({:.1}, {:.1}) color={} radius={:.1} strength={:.3} exponent={:.3}",
            center.x, center.y, center.color, center.radius, center.strength, center.exponent
        );
        centers.push(center);
    }

    Ok(centers)
}

/// Blend `centers` into a fresh, quantized buffer.
pub fn composite(width: u32, height: u32, centers: &[ColorCenter]) -> Result<PixelBuffer> {
    let mut out = PixelBuffer::new(width, height)?;

    out.par_rows_mut().enumerate().for_each(|(y, row)| {
        let py = y as f64;
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let fx = x as f64;
            let mut acc = [0.0f64; 3];
            let mut wsum = 0.0f64;
            for c in centers {
                let wk = c.weight_at(fx, py);
                acc[0] += c.color.r as f64 * wk;
                acc[1] += c.color.g as f64 * wk;
                acc[2] += c.color.b as f64 * wk;
                wsum += wk;
            }
            let denom = wsum.max(WEIGHT_EPSILON);
            for (dst, a) in px.iter_mut().zip(acc) {
                *dst = quantize_channel((a / denom) as f32);
            }
        }
    });

    Ok(out)
}

/// Place centers and blend them: the whole compositor stage.
pub fn render_gradient<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    palette: &[Rgb],
    count: usize,
) -> Result<(Vec<ColorCenter>, PixelBuffer)> {
    let centers = place_centers(rng, width, height, palette, count)?;
    let buf = composite(width, height, &centers)?;
    Ok((centers, buf))
}
