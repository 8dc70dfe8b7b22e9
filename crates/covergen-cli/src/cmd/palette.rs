// crates/covergen-cli/src/cmd/palette.rs

use std::io::Write;

use clap::Args;
use covergen_core::params::defaults::DEFAULT_NUM_COLORS;
use covergen_core::{CoverParams, Engine};
use log::info;

/// Palette knobs shared by `render` and `palette`.
#[derive(Args, Debug, Clone)]
pub struct PaletteOpts {
    /// Base theme color: hex like #FF5733 or a name (red, orange, yellow, green,
    /// cyan, blue, purple, magenta, pink). Unknown names pick a random hue.
    #[arg(short = 'c', long)]
    pub theme_color: Option<String>,

    /// Number of colors in the palette (white, if kept, counts as one)
    #[arg(long, default_value_t = DEFAULT_NUM_COLORS)]
    pub num_colors: usize,

    /// Exclude the forced white highlight from the palette
    #[arg(long)]
    pub no_white: bool,

    /// Seed for reproducible output; a random seed is used (and reported) when omitted.
    /// Negative seeds are accepted and map onto the same 64-bit value as their
    /// two's-complement unsigned form.
    #[arg(long, value_parser = parse_seed, allow_negative_numbers = true)]
    pub seed: Option<u64>,
}

/// Accept any 64-bit integer, signed or unsigned.
fn parse_seed(s: &str) -> Result<u64, String> {
    s.parse::<u64>()
        .or_else(|_| s.parse::<i64>().map(|v| v as u64))
        .map_err(|_| format!("{s:?} is not a 64-bit integer"))
}

impl PaletteOpts {
    pub fn apply(&self, params: &mut CoverParams) {
        params.theme = self.theme_color.clone();
        params.num_colors = self.num_colors;
        params.include_white = !self.no_white;
        params.seed = self.seed;
    }
}

#[derive(Args, Debug)]
pub struct PaletteArgs {
    #[command(flatten)]
    pub palette: PaletteOpts,
}

pub fn run(args: PaletteArgs) -> anyhow::Result<()> {
    let mut params = CoverParams::default();
    args.palette.apply(&mut params);

    let mut engine = Engine::new(params)?;
    let (hue, colors) = engine.palette();
    info!("seed={} hue={:?}", engine.seed(), hue);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for c in &colors {
        writeln!(out, "{c}")?;
    }
    out.flush()?;
    Ok(())
}
