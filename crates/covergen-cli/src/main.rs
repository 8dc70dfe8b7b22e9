// crates/covergen-cli/src/main.rs

use clap::{Parser, Subcommand};

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "covergen-cli")]
#[command(about = "Procedural gradient cover generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a cover image to PNG
    Render(cmd::render::RenderArgs),

    /// Print the palette a render would use (one #RRGGBB per line)
    Palette(cmd::palette::PaletteArgs),
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides; progress is shown at info by default.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Render(args) => cmd::render::run(args),
        Commands::Palette(args) => cmd::palette::run(args),
    }
}
