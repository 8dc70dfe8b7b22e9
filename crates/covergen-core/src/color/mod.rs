// crates/covergen-core/src/color/mod.rs

pub mod hls;
pub mod hue;
pub mod palette;
pub mod rgb;

pub use hue::{resolve_theme, HueChoice};
pub use palette::{generate_palette, Palette};
pub use rgb::Rgb;
