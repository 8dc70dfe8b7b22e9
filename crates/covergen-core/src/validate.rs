use crate::error::{CoverError, Result};
use crate::params::defaults::{MAX_BLUR_SCALES, MAX_BLUR_SIGMA};
use crate::params::CoverParams;

pub fn validate_params(p: &CoverParams) -> Result<()> {
    if p.width == 0 || p.height == 0 {
        return Err(CoverError::Validation(format!(
            "canvas must be at least 1x1, got {}x{}",
            p.width, p.height
        )));
    }

    // Zero colors without the white entry leaves nothing to blend.
    if p.num_colors == 0 && !p.include_white {
        return Err(CoverError::Validation(
            "num_colors must be >= 1 when white is excluded".into(),
        ));
    }

    if p.num_centers == 0 {
        return Err(CoverError::Validation("num_centers must be >= 1".into()));
    }

    if !(0.0..=1.0).contains(&p.distortion) {
        return Err(CoverError::Validation(format!(
            "distortion must be in [0, 1], got {}",
            p.distortion
        )));
    }

    if !p.blur_sigma.is_finite() || p.blur_sigma <= 0.0 || p.blur_sigma > MAX_BLUR_SIGMA {
        return Err(CoverError::Validation(format!(
            "blur must be in (0, {MAX_BLUR_SIGMA}], got {}",
            p.blur_sigma
        )));
    }
    if p.blur_scales == 0 || p.blur_scales > MAX_BLUR_SCALES {
        return Err(CoverError::Validation(format!(
            "blur_scales must be in [1, {MAX_BLUR_SCALES}], got {}",
            p.blur_scales
        )));
    }

    // Enhancement factors: 0 is a legal (grey / flat) result, negatives and NaN are not.
    for (name, v) in [("saturation", p.saturation), ("contrast", p.contrast)] {
        if !v.is_finite() || v < 0.0 {
            return Err(CoverError::Validation(format!(
                "{name} must be a finite value >= 0, got {v}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        validate_params(&CoverParams::default()).unwrap();
    }

    #[test]
    fn rejects_degenerate_inputs() {
        let base = CoverParams::default();
        let cases = [
            CoverParams { width: 0, ..base.clone() },
            CoverParams { height: 0, ..base.clone() },
            CoverParams { num_colors: 0, include_white: false, ..base.clone() },
            CoverParams { num_centers: 0, ..base.clone() },
            CoverParams { distortion: 1.5, ..base.clone() },
            CoverParams { distortion: f64::NAN, ..base.clone() },
            CoverParams { blur_sigma: 0.0, ..base.clone() },
            CoverParams { blur_sigma: 1e12, ..base.clone() },
            CoverParams { blur_scales: 0, ..base.clone() },
            CoverParams { blur_scales: 80, ..base.clone() },
            CoverParams { saturation: -1.0, ..base.clone() },
            CoverParams { contrast: f64::INFINITY, ..base.clone() },
        ];
        for p in cases {
            assert!(
                matches!(validate_params(&p), Err(CoverError::Validation(_))),
                "accepted {p:?}"
            );
        }
    }

    #[test]
    fn blur_bounds_are_inclusive() {
        let p = CoverParams {
            blur_sigma: MAX_BLUR_SIGMA,
            blur_scales: MAX_BLUR_SCALES,
            ..CoverParams::default()
        };
        validate_params(&p).unwrap();
    }

    #[test]
    fn zero_colors_with_white_is_allowed() {
        let p = CoverParams { num_colors: 0, include_white: true, ..CoverParams::default() };
        validate_params(&p).unwrap();
    }
}
