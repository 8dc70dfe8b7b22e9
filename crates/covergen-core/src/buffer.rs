// crates/covergen-core/src/buffer.rs
//
// Dense RGB working buffer shared by every pipeline stage.
// Channels are f32 while processing; stages that hand off 8-bit values call quantize().

use rayon::prelude::*;

use crate::color::rgb::Rgb;
use crate::error::{CoverError, Result};

pub const CHANNELS: usize = 3;

/// Luma weights (ITU-R 601-2), same as an RGB -> L conversion.
pub const LUMA_R: f64 = 0.299;
pub const LUMA_G: f64 = 0.587;
pub const LUMA_B: f64 = 0.114;

#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f64 {
    LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64
}

/// Clamp to [0, 255] and truncate toward zero (u8 cast semantics).
#[inline]
pub fn quantize_channel(v: f32) -> f32 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, 255.0).trunc()
}

#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    /// Row-major, interleaved RGB.
    data: Vec<f32>,
}

fn alloc(width: u32, height: u32) -> Result<Vec<f32>> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(CoverError::Alloc { width, height })?;

    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| CoverError::Alloc { width, height })?;
    data.resize(len, 0.0);
    Ok(data)
}

impl PixelBuffer {
    /// All-black buffer. Allocation failure is reported, not aborted on.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            width,
            height,
            data: alloc(width, height)?,
        })
    }

    /// Same dimensions as `self`, zero-filled.
    pub fn new_like(&self) -> Result<Self> {
        Self::new(self.width, self.height)
    }

    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        let mut buf = Self::new(width, height)?;
        let px = color.to_f32();
        buf.data
            .par_chunks_mut(CHANNELS)
            .for_each(|c| c.copy_from_slice(&px));
        Ok(buf)
    }

    pub fn from_rgb8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let mut buf = Self::new(width, height)?;
        if bytes.len() != buf.data.len() {
            return Err(CoverError::Dimensions {
                width,
                height,
                len: bytes.len(),
            });
        }
        for (d, &b) in buf.data.iter_mut().zip(bytes) {
            *d = b as f32;
        }
        Ok(buf)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [f32; 3] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Parallel iterator over `(y, row)` where `row` is `width * 3` interleaved channels.
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksMut<'_, f32> {
        let stride = self.stride().max(1);
        self.data.par_chunks_mut(stride)
    }

    /// Clamp every channel to [0, 255] and truncate to an integer value.
    pub fn quantize(&mut self) {
        self.data
            .par_iter_mut()
            .for_each(|v| *v = quantize_channel(*v));
    }

    /// Quantized 8-bit copy, row-major RGB (what the encoder consumes).
    pub fn to_rgb8(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(self.data.len())
            .map_err(|_| CoverError::Alloc {
                width: self.width,
                height: self.height,
            })?;
        self.data
            .par_iter()
            .map(|&v| quantize_channel(v) as u8)
            .collect_into_vec(&mut bytes);
        Ok(bytes)
    }

    /// (min, max) over every channel of every pixel. Empty buffer -> (0, 0).
    pub fn channel_range(&self) -> (f32, f32) {
        if self.data.is_empty() {
            return (0.0, 0.0);
        }
        self.data
            .par_iter()
            .fold(
                || (f32::INFINITY, f32::NEG_INFINITY),
                |(lo, hi), &v| (lo.min(v), hi.max(v)),
            )
            .reduce(
                || (f32::INFINITY, f32::NEG_INFINITY),
                |(a, b), (c, d)| (a.min(c), b.max(d)),
            )
    }

    /// Mean luma over the whole image.
    pub fn mean_luma(&self) -> f64 {
        let n = self.data.len() / CHANNELS;
        if n == 0 {
            return 0.0;
        }
        // Row sums first, then a sequential total, so the result does not depend on thread count.
        let stride = self.stride().max(1);
        let rows: Vec<f64> = self
            .data
            .par_chunks(stride)
            .map(|row| {
                row.chunks_exact(CHANNELS)
                    .map(|p| luma(p[0], p[1], p[2]))
                    .sum::<f64>()
            })
            .collect();
        rows.iter().sum::<f64>() / n as f64
    }
}
