//! Defines the transcoding core: decode an arbitrary-format image,
//! resample it to the target dimensions, and re-encode it as JPEG.

use crate::error::Error;
use image::imageops::FilterType;
use image::{DynamicImage, ImageOutputFormat};
use std::io::Cursor;

/// Decode an image from raw bytes, sniffing the format from content.
/// Empty, truncated, or unrecognized input fails with [`Error::Decode`].
pub fn decode(data: &[u8]) -> Result<DynamicImage, Error> {
    image::load_from_memory(data).map_err(Error::Decode)
}

/// Produce a new image at the requested dimensions. A zero dimension
/// is derived from the other one preserving the source aspect ratio;
/// both zero is an error. Aspect ratio is otherwise the caller's
/// responsibility. The kernel is fixed, so equal inputs resample to
/// equal outputs across runs.
pub fn resample(image: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage, Error> {
    let (width, height) = target_dimensions(image.width(), image.height(), width, height)?;
    Ok(image.resize_exact(width, height, FilterType::Lanczos3))
}

/// Resolve the requested box against the source dimensions.
fn target_dimensions(
    source_width: u32,
    source_height: u32,
    width: u32,
    height: u32,
) -> Result<(u32, u32), Error> {
    match (width, height) {
        (0, 0) => Err(Error::InvalidDimensions),
        (0, height) => {
            let aspect = source_width as f64 / source_height as f64;
            Ok((((height as f64 * aspect).round() as u32).max(1), height))
        }
        (width, 0) => {
            let aspect = source_height as f64 / source_width as f64;
            Ok((width, ((width as f64 * aspect).round() as u32).max(1)))
        }
        (width, height) => Ok((width, height)),
    }
}

/// Serialize an image as JPEG at the given quality into `buffer`,
/// truncating it first so nothing from a prior pool use leaks into
/// the output. Returns the encoded byte count.
pub fn encode(image: &DynamicImage, quality: u8, buffer: &mut Vec<u8>) -> Result<usize, Error> {
    buffer.clear();
    // JPEG carries no alpha channel.
    let image = if image.color().has_alpha() {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        image.clone()
    };
    image
        .write_to(&mut Cursor::new(&mut *buffer), ImageOutputFormat::Jpeg(quality))
        .map_err(Error::Encode)?;
    Ok(buffer.len())
}
