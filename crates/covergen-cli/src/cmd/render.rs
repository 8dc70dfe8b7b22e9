// crates/covergen-cli/src/cmd/render.rs

use clap::Args;
use covergen_core::digest::cover_id_hex;
use covergen_core::params::defaults::{
    DEFAULT_BLUR_SCALES, DEFAULT_BLUR_SIGMA, DEFAULT_CONTRAST, DEFAULT_DISTORTION, DEFAULT_HEIGHT,
    DEFAULT_NUM_CENTERS, DEFAULT_SATURATION, DEFAULT_WIDTH,
};
use covergen_core::{CoverParams, Engine};
use log::info;

use crate::cmd::palette::PaletteOpts;
use crate::io::png;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Output PNG path
    #[arg(short, long, default_value = "cover.png")]
    pub output: String,

    /// Image width in pixels (3840 = 4K)
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Image height in pixels (ignored when --ratio parses)
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Aspect ratio W:H (e.g. 16:9, 4:3, 1:1); recomputes height from width
    #[arg(short, long)]
    pub ratio: Option<String>,

    #[command(flatten)]
    pub palette: PaletteOpts,

    /// Number of color centers
    #[arg(long, default_value_t = DEFAULT_NUM_CENTERS)]
    pub num_centers: usize,

    /// Flow distortion strength in [0, 1]; 0 disables the warp
    #[arg(long, default_value_t = DEFAULT_DISTORTION)]
    pub distortion: f64,

    /// Base blur sigma in pixels
    #[arg(long, default_value_t = DEFAULT_BLUR_SIGMA)]
    pub blur: f64,

    /// Number of blur scales (sigma grows x1.5 per scale)
    #[arg(long, default_value_t = DEFAULT_BLUR_SCALES)]
    pub blur_scales: usize,

    /// Saturation multiplier
    #[arg(long, default_value_t = DEFAULT_SATURATION)]
    pub saturation: f64,

    /// Contrast multiplier
    #[arg(long, default_value_t = DEFAULT_CONTRAST)]
    pub contrast: f64,
}

impl RenderArgs {
    pub fn to_params(&self) -> CoverParams {
        let mut p = CoverParams {
            width: self.width,
            height: self.height,
            num_centers: self.num_centers,
            distortion: self.distortion,
            blur_sigma: self.blur,
            blur_scales: self.blur_scales,
            saturation: self.saturation,
            contrast: self.contrast,
            ..CoverParams::default()
        };
        self.palette.apply(&mut p);

        // Bad ratios warn and keep the height.
        if let Some(r) = self.ratio.as_deref() {
            p.apply_ratio(r);
        }
        p
    }
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let params = args.to_params();
    let mut engine = Engine::new(params)?;

    info!(
        "generating {}x{} cover (seed={})",
        engine.params.width,
        engine.params.height,
        engine.seed()
    );
    if let Some(theme) = engine.params.theme.as_deref() {
        info!("using theme color: {theme}");
    }

    let render = engine.render()?;

    let colors: Vec<String> = render.palette.iter().map(|c| c.to_string()).collect();
    info!("colors: [{}]", colors.join(", "));

    info!("saving image...");
    png::write_png(&args.output, &render.buffer)?;

    eprintln!(
        "render ok: out={} width={} height={} colors={} centers={} seed={} cover_id={}",
        args.output,
        render.buffer.width(),
        render.buffer.height(),
        render.palette.len(),
        render.centers.len(),
        render.seed,
        cover_id_hex(&render.buffer)
    );

    Ok(())
}
