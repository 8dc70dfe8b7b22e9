// crates/covergen-core/src/engine.rs

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::buffer::PixelBuffer;
use crate::color::hue::{resolve_theme, HueChoice};
use crate::color::palette::{generate_palette, Palette};
use crate::error::Result;
use crate::params::CoverParams;
use crate::stage::{blur, flow, gradient, vibrancy};
use crate::stage::gradient::ColorCenter;
use crate::stage::vibrancy::VibrancyParams;
use crate::validate::validate_params;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Gradient,
    Flow,
    Blur,
    Vibrancy,
}

impl Stage {
    pub const fn name(self) -> &'static str {
        match self {
            Stage::Gradient => "gradient",
            Stage::Flow => "flow",
            Stage::Blur => "blur",
            Stage::Vibrancy => "vibrancy",
        }
    }
}

/// Channel range and brightness of a buffer as it left a stage.
#[derive(Clone, Copy, Debug)]
pub struct StageStats {
    pub stage: Stage,
    pub min: f32,
    pub max: f32,
    pub mean_luma: f64,
}

impl StageStats {
    pub fn measure(stage: Stage, buf: &PixelBuffer) -> Self {
        let (min, max) = buf.channel_range();
        Self {
            stage,
            min,
            max,
            mean_luma: buf.mean_luma(),
        }
    }
}

/// Everything one run produced.
#[derive(Clone, Debug)]
pub struct Render {
    pub seed: u64,
    pub hue: HueChoice,
    pub palette: Palette,
    pub centers: Vec<ColorCenter>,
    pub buffer: PixelBuffer,
    /// One entry per stage that ran (flow is absent when distortion is 0).
    pub stats: Vec<StageStats>,
}

/// Owns the validated parameters and the one generator every stage draws from.
pub struct Engine {
    pub params: CoverParams,
    seed: u64,
    rng: ChaCha8Rng,
}

impl Engine {
    pub fn new(params: CoverParams) -> Result<Self> {
        validate_params(&params)?;

        let seed = params.seed.unwrap_or_else(rand::random::<u64>);
        Ok(Self {
            params,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Effective seed (drawn from OS entropy when the params had none).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Hue resolution + palette generation. Advances the generator.
    pub fn palette(&mut self) -> (HueChoice, Palette) {
        let hue = resolve_theme(self.params.theme.as_deref());
        let palette = generate_palette(
            &mut self.rng,
            self.params.num_colors,
            hue.as_option(),
            self.params.include_white,
        );
        (hue, palette)
    }

    /// Run the whole pipeline. Advances the generator; a fresh Engine with the same
    /// seed reproduces the same pixels.
    pub fn render(&mut self) -> Result<Render> {
        let p = self.params.clone();
        let mut stats = Vec::with_capacity(4);

        let (hue, palette) = self.palette();
        info!("palette: {} colors (hue {:?})", palette.len(), hue);

        info!("compositing gradient with {} color centers", p.num_centers);
        let (centers, mut buf) =
            gradient::render_gradient(&mut self.rng, p.width, p.height, &palette, p.num_centers)?;
        record(&mut stats, Stage::Gradient, &buf);

        if p.distortion > 0.0 {
            info!("flow distortion (strength={})", p.distortion);
            buf = flow::flow_distort(&buf, p.distortion)?;
            record(&mut stats, Stage::Flow, &buf);
        }

        info!(
            "multi-scale blur (base sigma={}, scales={})",
            p.blur_sigma, p.blur_scales
        );
        buf = blur::multi_scale_blur(&buf, p.blur_sigma, p.blur_scales)?;
        record(&mut stats, Stage::Blur, &buf);

        info!("enhancing vibrancy and contrast");
        buf = vibrancy::enhance_vibrancy(
            &buf,
            VibrancyParams {
                saturation: p.saturation,
                contrast: p.contrast,
            },
        )?;
        record(&mut stats, Stage::Vibrancy, &buf);

        Ok(Render {
            seed: self.seed,
            hue,
            palette,
            centers,
            buffer: buf,
            stats,
        })
    }
}

fn record(stats: &mut Vec<StageStats>, stage: Stage, buf: &PixelBuffer) {
    let s = StageStats::measure(stage, buf);
    debug!(
        "{:<8} min={} max={} mean_luma={:.2}",
        stage.name(),
        s.min,
        s.max,
        s.mean_luma
    );
    stats.push(s);
}
