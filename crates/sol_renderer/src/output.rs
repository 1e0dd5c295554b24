//! Tone mapping and image file output.

use std::path::Path;

use crate::renderer::{ImageBuffer, RenderError};

/// Largest color length in the image, or zero for an empty/black image.
pub fn max_luminance(image: &ImageBuffer) -> f32 {
    image
        .pixels
        .iter()
        .map(|color| color.length())
        .filter(|len| len.is_finite())
        .fold(0.0, f32::max)
}

/// Scale colors by the brightest pixel and quantize to 8-bit RGB.
///
/// Every component is divided by the maximum color length in the image,
/// so the brightest pixel keeps its hue and nothing clips.
pub fn tonemap(image: &ImageBuffer) -> Vec<u8> {
    let max = max_luminance(image);
    if max <= 0.0 {
        return vec![0; image.pixels.len() * 3];
    }

    let scale = 255.0 / max;
    image
        .pixels
        .iter()
        .flat_map(|color| color.to_array())
        .map(|c| (c * scale).clamp(0.0, 255.0) as u8)
        .collect()
}

/// Tone map and write the image. The format follows the file extension
/// (`.png`, `.ppm`, ...).
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let path = path.as_ref();
    let bytes = tonemap(image);
    let len = bytes.len();

    let rgb = image::RgbImage::from_raw(image.width, image.height, bytes).ok_or(
        RenderError::InvalidBuffer {
            width: image.width,
            height: image.height,
            len,
        },
    )?;
    rgb.save(path)?;

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
