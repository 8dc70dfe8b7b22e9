// crates/covergen-core/src/params/ratio.rs

use std::fmt;
use std::str::FromStr;

use crate::error::CoverError;

/// `W:H` aspect ratio, both parts positive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AspectRatio {
    pub w: u32,
    pub h: u32,
}

impl AspectRatio {
    /// floor(width * h / w), computed in u64 so large canvases don't overflow.
    pub fn height_for(self, width: u32) -> u32 {
        let h = (width as u64) * (self.h as u64) / (self.w as u64);
        h.min(u32::MAX as u64) as u32
    }
}

impl FromStr for AspectRatio {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CoverError::Validation(format!("ratio must look like W:H, got {s:?}"));

        let (w, h) = s.trim().split_once(':').ok_or_else(bad)?;
        let w: u32 = w.trim().parse().map_err(|_| bad())?;
        let h: u32 = h.trim().parse().map_err(|_| bad())?;
        if w == 0 || h == 0 {
            return Err(CoverError::Validation(format!(
                "ratio parts must be positive, got {s:?}"
            )));
        }
        Ok(Self { w, h })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.w, self.h)
    }
}
