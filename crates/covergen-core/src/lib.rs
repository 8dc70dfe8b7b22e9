pub mod error;
pub mod validate;

pub mod buffer;
pub mod color;
pub mod digest;
pub mod engine;
pub mod params;
pub mod stage;

pub use crate::buffer::PixelBuffer;
pub use crate::color::rgb::Rgb;
pub use crate::engine::{Engine, Render};
pub use crate::error::{CoverError, Result};
pub use crate::params::CoverParams;
