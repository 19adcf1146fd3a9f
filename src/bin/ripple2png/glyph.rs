// glyph.rs - Glyph mask from an image file
//
// The image is stretched to grid resolution; its alpha channel decides
// membership, the same threshold the page uses for its canvas raster.

use image::imageops::FilterType;
use ripple_engine::config::RippleParams;
use ripple_engine::sim::Mask;
use std::path::Path;

pub fn load_mask(path: &Path, params: &RippleParams) -> Result<Mask, image::ImageError> {
    let img = image::open(path)?;
    let resized = img.resize_exact(params.width as u32, params.height as u32, FilterType::Lanczos3);
    let rgba = resized.to_rgba8();

    log::info!("loaded glyph {} ({}x{})", path.display(), img.width(), img.height());
    Ok(Mask::from_rgba(params.width, params.height, rgba.as_raw()))
}
