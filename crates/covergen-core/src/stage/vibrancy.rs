// crates/covergen-core/src/stage/vibrancy.rs
//
// Saturation -> contrast -> brightness, each a blend away from a "degenerate" image:
//   out = degenerate + factor * (pixel - degenerate)
// saturation: degenerate = the pixel's own grey (rounded luma)
// contrast:   degenerate = mean grey of the whole image
// brightness: degenerate = black
// Every step is clamped and truncated before the next one runs.

use rayon::prelude::*;

use crate::buffer::{luma, quantize_channel, PixelBuffer, CHANNELS};
use crate::error::Result;

pub const BRIGHTNESS_BOOST: f64 = 1.03;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VibrancyParams {
    pub saturation: f64,
    pub contrast: f64,
}

#[inline]
fn grey_of(px: &[f32]) -> f64 {
    (luma(px[0], px[1], px[2]) + 0.5).floor()
}

/// Apply `out = d + factor * (c - d)` per channel, where `degenerate` picks d for a pixel.
fn blend_from<F>(src: &PixelBuffer, factor: f64, degenerate: F) -> Result<PixelBuffer>
where
    F: Fn(&[f32]) -> f64 + Sync,
{
    let stride = src.stride();
    let data = src.as_slice();

    let mut out = src.new_like()?;
    out.par_rows_mut().enumerate().for_each(|(y, row_out)| {
        let row_in = &data[y * stride..(y + 1) * stride];
        for (po, pi) in row_out
            .chunks_exact_mut(CHANNELS)
            .zip(row_in.chunks_exact(CHANNELS))
        {
            let d = degenerate(pi);
            for (o, &c) in po.iter_mut().zip(pi) {
                *o = quantize_channel((d + factor * (c as f64 - d)) as f32);
            }
        }
    });
    Ok(out)
}

pub fn adjust_saturation(src: &PixelBuffer, factor: f64) -> Result<PixelBuffer> {
    blend_from(src, factor, grey_of)
}

/// Contrast around the image's mean grey level.
pub fn adjust_contrast(src: &PixelBuffer, factor: f64) -> Result<PixelBuffer> {
    let mean = mean_grey(src);
    blend_from(src, factor, move |_| mean)
}

pub fn adjust_brightness(src: &PixelBuffer, factor: f64) -> Result<PixelBuffer> {
    blend_from(src, factor, |_| 0.0)
}

/// Mean of the rounded per-pixel grey levels, itself rounded.
pub fn mean_grey(src: &PixelBuffer) -> f64 {
    let n = (src.width() as usize) * (src.height() as usize);
    if n == 0 {
        return 0.0;
    }
    let stride = src.stride();
    let rows: Vec<f64> = src
        .as_slice()
        .par_chunks(stride)
        .map(|row| {
            row.chunks_exact(CHANNELS)
                .map(grey_of)
                .sum::<f64>()
        })
        .collect();
    let mean = rows.iter().sum::<f64>() / n as f64;
    (mean + 0.5).floor()
}

pub fn enhance_vibrancy(src: &PixelBuffer, params: VibrancyParams) -> Result<PixelBuffer> {
    let saturated = adjust_saturation(src, params.saturation)?;
    let contrasted = adjust_contrast(&saturated, params.contrast)?;
    adjust_brightness(&contrasted, BRIGHTNESS_BOOST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::rgb::Rgb;

    fn two_tone() -> PixelBuffer {
        // Left half dark blue-ish, right half light orange-ish.
        let mut bytes = Vec::new();
        for _y in 0..4 {
            for x in 0..8 {
                if x < 4 {
                    bytes.extend_from_slice(&[40, 60, 140]);
                } else {
                    bytes.extend_from_slice(&[220, 160, 90]);
                }
            }
        }
        PixelBuffer::from_rgb8(8, 4, &bytes).unwrap()
    }

    fn spread(px: [f32; 3]) -> f32 {
        px.iter().cloned().fold(f32::MIN, f32::max) - px.iter().cloned().fold(f32::MAX, f32::min)
    }

    #[test]
    fn unit_factors_leave_image_alone() {
        let src = two_tone();
        assert_eq!(adjust_saturation(&src, 1.0).unwrap(), src);
        assert_eq!(adjust_contrast(&src, 1.0).unwrap(), src);
        assert_eq!(adjust_brightness(&src, 1.0).unwrap(), src);
    }

    #[test]
    fn zero_saturation_is_greyscale() {
        let out = adjust_saturation(&two_tone(), 0.0).unwrap();
        let px = out.get(0, 0);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        // 0.299*40 + 0.587*60 + 0.114*140 = 63.14 -> 63
        assert_eq!(px[0], 63.0);
    }

    #[test]
    fn saturation_boost_widens_channel_spread() {
        let src = two_tone();
        let out = adjust_saturation(&src, 1.5).unwrap();
        assert!(spread(out.get(0, 0)) > spread(src.get(0, 0)));
    }

    #[test]
    fn contrast_pushes_away_from_mean() {
        let src = two_tone();
        let out = adjust_contrast(&src, 1.3).unwrap();
        assert!(out.get(0, 0)[0] < src.get(0, 0)[0]);
        assert!(out.get(0, 0)[2] > src.get(0, 0)[2]);
        assert!(out.get(7, 0)[0] > src.get(7, 0)[0]);
    }

    #[test]
    fn brightness_saturates_at_white() {
        let src = PixelBuffer::filled(2, 2, Rgb::new(250, 100, 0)).unwrap();
        let out = adjust_brightness(&src, BRIGHTNESS_BOOST).unwrap();
        // 250*1.03 = 257.5 -> 255, 100*1.03 = 103
        assert_eq!(out.get(1, 1), [255.0, 103.0, 0.0]);
    }

    #[test]
    fn enhance_keeps_range_even_for_extreme_factors() {
        let out = enhance_vibrancy(
            &two_tone(),
            VibrancyParams {
                saturation: 8.0,
                contrast: 8.0,
            },
        )
        .unwrap();
        assert!(out
            .as_slice()
            .iter()
            .all(|&v| (0.0..=255.0).contains(&v) && v.fract() == 0.0));
    }
}
