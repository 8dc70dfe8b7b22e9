use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoverError>;

#[derive(Debug, Error)]
pub enum CoverError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("palette is empty; at least one color is required to blend")]
    EmptyPalette,

    #[error("cannot allocate a {width}x{height} pixel buffer")]
    Alloc { width: u32, height: u32 },

    #[error("pixel data length {len} does not match {width}x{height}x3")]
    Dimensions { width: u32, height: u32, len: usize },
}
