// crates/covergen-core/src/stage/blur.rs
//
// Separable Gaussian blur and the multi-scale blend built on it.
// Boundary handling is half-sample symmetric: (d c b a | a b c d | d c b a).

use log::debug;
use rayon::prelude::*;

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::Result;

/// Kernel is cut off at this many standard deviations.
pub const TRUNCATE: f64 = 4.0;
/// sigma_i = base * SCALE_GROWTH^i
pub const SCALE_GROWTH: f64 = 1.5;
/// alpha_i = BLEND_ALPHA / (i + 1)
pub const BLEND_ALPHA: f64 = 0.3;

#[inline]
pub fn kernel_radius(sigma: f64) -> usize {
    if sigma <= 0.0 {
        return 0;
    }
    (TRUNCATE * sigma + 0.5) as usize
}

/// Gaussian taps with tap j added into bucket j % period, normalized over the full kernel.
fn folded_taps(sigma: f64, period: usize) -> Vec<f32> {
    let radius = kernel_radius(sigma);
    if radius == 0 {
        return vec![1.0];
    }
    let len = 2 * radius + 1;
    let s2 = sigma * sigma;
    let buckets = len.min(period.max(1));
    let mut acc = vec![0.0f64; buckets];
    let mut sum = 0.0f64;
    for j in 0..len {
        let x = j as f64 - radius as f64;
        let t = (-0.5 * x * x / s2).exp();
        acc[j % buckets] += t;
        sum += t;
    }
    acc.iter().map(|&t| (t / sum) as f32).collect()
}

/// Normalized 1-D Gaussian taps, length 2r+1 with r = floor(TRUNCATE * sigma + 0.5).
pub fn gaussian_kernel(sigma: f64) -> Vec<f32> {
    folded_taps(sigma, usize::MAX)
}

/// 1-D kernel ready to run over an axis of `n` samples.
///
/// Reflection repeats with period 2n, so taps whose offsets agree mod 2n read the same
/// sample and are summed into one weight. At most 2n weights survive however wide
/// sigma is.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisKernel {
    /// Offset of weight 0 relative to the output sample.
    pub radius: usize,
    pub weights: Vec<f32>,
}

impl AxisKernel {
    pub fn new(sigma: f64, n: usize) -> Self {
        Self {
            radius: kernel_radius(sigma),
            weights: folded_taps(sigma, 2 * n),
        }
    }

    /// Source index for every padded position `p`: index[p] = reflect(p - radius).
    fn padded_indices(&self, n: usize) -> Vec<usize> {
        (0..n + self.weights.len() - 1)
            .map(|p| reflect_index(p as isize - self.radius as isize, n))
            .collect()
    }
}

/// Map any integer position onto [0, n) by mirror reflection (edge sample repeated).
#[inline]
pub fn reflect_index(i: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = i.rem_euclid(period) as usize;
    if m < n {
        m
    } else {
        2 * n - 1 - m
    }
}

fn blur_horizontal(src: &PixelBuffer, kernel: &AxisKernel) -> Result<PixelBuffer> {
    let w = src.width() as usize;
    let idx = kernel.padded_indices(w);
    let stride = src.stride();
    let data = src.as_slice();

    let mut out = src.new_like()?;
    out.par_rows_mut().enumerate().for_each(|(y, row_out)| {
        let row_in = &data[y * stride..(y + 1) * stride];
        for x in 0..w {
            let mut acc = [0.0f32; CHANNELS];
            for (j, &k) in kernel.weights.iter().enumerate() {
                let sx = idx[x + j] * CHANNELS;
                acc[0] += k * row_in[sx];
                acc[1] += k * row_in[sx + 1];
                acc[2] += k * row_in[sx + 2];
            }
            row_out[x * CHANNELS..(x + 1) * CHANNELS].copy_from_slice(&acc);
        }
    });
    Ok(out)
}

fn blur_vertical(src: &PixelBuffer, kernel: &AxisKernel) -> Result<PixelBuffer> {
    let h = src.height() as usize;
    let idx = kernel.padded_indices(h);
    let stride = src.stride();
    let data = src.as_slice();

    let mut out = src.new_like()?;
    out.par_rows_mut().enumerate().for_each(|(y, row_out)| {
        for (j, &k) in kernel.weights.iter().enumerate() {
            let sy = idx[y + j];
            let row_in = &data[sy * stride..(sy + 1) * stride];
            for (o, &v) in row_out.iter_mut().zip(row_in) {
                *o += k * v;
            }
        }
    });
    Ok(out)
}

/// Isotropic Gaussian blur, each channel independently. Output is not quantized.
pub fn gaussian_blur(src: &PixelBuffer, sigma: f64) -> Result<PixelBuffer> {
    if kernel_radius(sigma) == 0 || src.width() == 0 || src.height() == 0 {
        return Ok(src.clone());
    }
    let kx = AxisKernel::new(sigma, src.width() as usize);
    let ky = AxisKernel::new(sigma, src.height() as usize);
    let tmp = blur_horizontal(src, &kx)?;
    blur_vertical(&tmp, &ky)
}

/// Blur at `scales` increasing sigmas, blending each back with a shrinking weight.
///
/// Later, coarser scales contribute less: alpha = 0.3 / (i + 1).
pub fn multi_scale_blur(src: &PixelBuffer, base_sigma: f64, scales: usize) -> Result<PixelBuffer> {
    let mut result = src.clone();

    for i in 0..scales {
        let sigma = base_sigma * SCALE_GROWTH.powi(i as i32);
        let alpha = (BLEND_ALPHA / (i + 1) as f64) as f32;
        debug!("blur scale {i}: sigma={sigma:.2} alpha={alpha:.3}");

        let blurred = gaussian_blur(&result, sigma)?;
        result
            .as_mut_slice()
            .par_iter_mut()
            .zip(blurred.as_slice().par_iter())
            .for_each(|(r, &b)| *r = *r * (1.0 - alpha) + b * alpha);
    }

    result.quantize();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::rgb::Rgb;

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        let k = gaussian_kernel(2.5);
        assert_eq!(k.len(), 2 * 10 + 1);
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..k.len() / 2 {
            assert_eq!(k[i], k[k.len() - 1 - i]);
        }
        assert!(k[10] > k[9]);
    }

    #[test]
    fn reflect_mirrors_edges() {
        // n = 4: ... 1 0 | 0 1 2 3 | 3 2 ...
        assert_eq!(reflect_index(-1, 4), 0);
        assert_eq!(reflect_index(-2, 4), 1);
        assert_eq!(reflect_index(4, 4), 3);
        assert_eq!(reflect_index(5, 4), 2);
        assert_eq!(reflect_index(2, 4), 2);
        // Far outside still lands in range.
        for i in -50..50 {
            assert!(reflect_index(i, 3) < 3);
        }
        assert_eq!(reflect_index(7, 1), 0);
    }

    #[test]
    fn blur_preserves_flat_image() {
        let src = PixelBuffer::filled(9, 7, Rgb::new(100, 150, 200)).unwrap();
        let out = gaussian_blur(&src, 3.0).unwrap();
        for (&a, &b) in out.as_slice().iter().zip(src.as_slice()) {
            assert!((a - b).abs() < 1e-2);
        }
    }

    #[test]
    fn blur_spreads_an_impulse() {
        let mut bytes = vec![0u8; 11 * 11 * 3];
        let c = (5 * 11 + 5) * 3;
        bytes[c] = 255;
        let src = PixelBuffer::from_rgb8(11, 11, &bytes).unwrap();
        let out = gaussian_blur(&src, 1.0).unwrap();
        let center = out.get(5, 5)[0];
        let near = out.get(6, 5)[0];
        let far = out.get(8, 5)[0];
        assert!(center > near && near > far && far > 0.0);
        assert!((out.get(6, 5)[0] - out.get(5, 6)[0]).abs() < 1e-4);
        // Mass is conserved away from the borders.
        let total: f32 = out.as_slice().iter().step_by(3).sum();
        assert!((total - 255.0).abs() < 0.05);
    }

    #[test]
    fn multi_scale_output_is_quantized_and_in_range() {
        let mut bytes = Vec::new();
        for i in 0..(16 * 12) {
            bytes.extend_from_slice(&[(i % 2 * 255) as u8, (i * 3 % 256) as u8, 0]);
        }
        let src = PixelBuffer::from_rgb8(16, 12, &bytes).unwrap();
        let out = multi_scale_blur(&src, 2.0, 3).unwrap();
        assert!(out
            .as_slice()
            .iter()
            .all(|&v| (0.0..=255.0).contains(&v) && v.fract() == 0.0));
        assert_ne!(out, src);
    }

    #[test]
    fn folding_keeps_short_kernels_intact() {
        let k = AxisKernel::new(2.5, 64);
        assert_eq!(k.radius, 10);
        assert_eq!(k.weights, gaussian_kernel(2.5));
    }

    #[test]
    fn wide_kernel_folds_into_reflection_period() {
        let k = AxisKernel::new(40.0, 5);
        assert_eq!(k.radius, 160);
        assert_eq!(k.weights.len(), 10);
        let sum: f32 = k.weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn folded_blur_matches_unfolded_reference() {
        // Direct 2r+1 tap convolution along x, reflect boundary, one row.
        let row: Vec<f32> = (0..6).map(|i| (i * 40) as f32).collect();
        let mut bytes = Vec::new();
        for &v in &row {
            bytes.extend_from_slice(&[v as u8, 0, 0]);
        }
        let src = PixelBuffer::from_rgb8(6, 1, &bytes).unwrap();
        let sigma = 7.0;
        let full = gaussian_kernel(sigma);
        let r = full.len() / 2;

        let out = gaussian_blur(&src, sigma).unwrap();
        for x in 0..6 {
            let want: f32 = full
                .iter()
                .enumerate()
                .map(|(j, &k)| k * row[reflect_index(x as isize + j as isize - r as isize, 6)])
                .sum();
            assert!((out.get(x as u32, 0)[0] - want).abs() < 1e-2, "x={x}");
        }
    }

    #[test]
    fn huge_sigma_on_tiny_image_does_not_panic() {
        let src = PixelBuffer::filled(3, 2, Rgb::new(9, 9, 9)).unwrap();
        let out = multi_scale_blur(&src, 50.0, 3).unwrap();
        assert_eq!((out.width(), out.height()), (3, 2));
    }
}
