// crates/covergen-core/src/stage/flow.rs
//
// Sinusoidal flow warp (pull-based, nearest neighbour).
//
//   x' = x * 4pi / (w - 1),  y' = y * 4pi / (h - 1)
//   dx = sin(y' + cos(x')) * s * w
//   dy = cos(x' + sin(y')) * s * h
//   dst(x, y) = src(clamp(x + dx), clamp(y + dy))

use std::f64::consts::PI;

use rayon::prelude::*;

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::{CoverError, Result};

/// Coordinate grids span [0, FLOW_SPAN] (both ends included).
pub const FLOW_SPAN: f64 = 4.0 * PI;

/// Evenly spaced samples over [0, FLOW_SPAN]; a single sample sits at 0.
fn linspace(n: u32) -> Vec<f64> {
    if n <= 1 {
        return vec![0.0; n as usize];
    }
    let step = FLOW_SPAN / (n - 1) as f64;
    (0..n).map(|i| i as f64 * step).collect()
}

/// Per-pixel displacement in pixel units. Lives only for one distortion pass.
#[derive(Clone, Debug)]
pub struct FlowField {
    width: u32,
    height: u32,
    dx: Vec<f64>,
    dy: Vec<f64>,
}

impl FlowField {
    /// Allocation failure is reported as `CoverError::Alloc`.
    pub fn new(width: u32, height: u32, strength: f64) -> Result<Self> {
        let n = (width as usize)
            .checked_mul(height as usize)
            .ok_or(CoverError::Alloc { width, height })?;
        let mut dx = Vec::new();
        let mut dy = Vec::new();
        dx.try_reserve_exact(n)
            .and_then(|_| dy.try_reserve_exact(n))
            .map_err(|_| CoverError::Alloc { width, height })?;

        let xs = linspace(width);
        let ys = linspace(height);
        let sx = strength * width as f64;
        let sy = strength * height as f64;
        for &yy in &ys {
            for &xx in &xs {
                dx.push((yy + xx.cos()).sin() * sx);
                dy.push((xx + yy.sin()).cos() * sy);
            }
        }

        Ok(Self {
            width,
            height,
            dx,
            dy,
        })
    }

    /// (dx, dy) at pixel (x, y).
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> (f64, f64) {
        let i = y as usize * self.width as usize + x as usize;
        (self.dx[i], self.dy[i])
    }

    /// Source pixel sampled for destination (x, y): clamped, then truncated.
    #[inline]
    pub fn source_of(&self, x: u32, y: u32) -> (u32, u32) {
        let (dx, dy) = self.at(x, y);
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;
        let sx = (x as f64 + dx).clamp(0.0, max_x) as u32;
        let sy = (y as f64 + dy).clamp(0.0, max_y) as u32;
        (sx, sy)
    }
}

/// Warp `src` through the flow field. `strength == 0` returns an identical copy.
pub fn flow_distort(src: &PixelBuffer, strength: f64) -> Result<PixelBuffer> {
    if strength == 0.0 || src.width() == 0 || src.height() == 0 {
        return Ok(src.clone());
    }

    let field = FlowField::new(src.width(), src.height(), strength)?;
    let mut out = src.new_like()?;

    out.par_rows_mut().enumerate().for_each(|(y, row)| {
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let (sx, sy) = field.source_of(x as u32, y as u32);
            px.copy_from_slice(&src.get(sx, sy));
        }
    });

    Ok(out)
}
