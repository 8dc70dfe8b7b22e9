// crates/covergen-cli/src/io/png.rs

use anyhow::Context;
use covergen_core::PixelBuffer;
use image::{ImageFormat, RgbImage};

/// Encode the buffer as 8-bit RGB PNG. On failure the partial file is removed.
pub fn write_png(path: &str, buf: &PixelBuffer) -> anyhow::Result<()> {
    let bytes = buf.to_rgb8()?;
    let img = RgbImage::from_raw(buf.width(), buf.height(), bytes).ok_or_else(|| {
        anyhow::anyhow!(
            "pixel data does not fit {}x{} RGB image",
            buf.width(),
            buf.height()
        )
    })?;

    if let Err(e) = img.save_with_format(path, ImageFormat::Png) {
        // Best effort: a truncated PNG is not valid output.
        let _ = std::fs::remove_file(path);
        return Err(e).with_context(|| format!("write png: {path}"));
    }
    Ok(())
}
