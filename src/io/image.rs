//! Image open, crop, resize, paste and save on top of the `image` crate

use crate::io::configuration::RESIZE_FILTER;
use crate::io::error::{MosaicError, Result, file_system, image_load};
use crate::spatial::Region;
use image::{ImageError, ImageReader, RgbImage};
use std::path::Path;

/// Open and decode an image, discarding any alpha channel
///
/// The format is sniffed from the file contents, falling back to the
/// extension.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be decoded
pub fn open_rgb(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| image_load(path, ImageError::IoError(e)))?;
    reader
        .decode()
        .map(|img| img.into_rgb8())
        .map_err(|e| image_load(path, e))
}

/// Whether `path` is readable and looks like an image the decoder knows
pub fn has_image_format(path: &Path) -> bool {
    ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .is_ok_and(|reader| reader.format().is_some())
}

/// Copy the pixels of `region` out of `image`
pub fn crop(image: &RgbImage, region: Region) -> RgbImage {
    image::imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image()
}

/// Scale `image` to exactly `width` x `height`
pub fn resize(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    image::imageops::resize(image, width, height, RESIZE_FILTER)
}

/// Overwrite the rectangle of `canvas` at `(x, y)` with `tile`
///
/// Pixels falling outside the canvas are clipped.
pub fn paste(canvas: &mut RgbImage, tile: &RgbImage, x: u32, y: u32) {
    image::imageops::replace(canvas, tile, i64::from(x), i64::from(y));
}

/// Encode and write `image`, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The extension names no known format or the file cannot be written
pub fn save(image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system(parent, "create directory", e))?;
    }

    image.save(path).map_err(|e| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
