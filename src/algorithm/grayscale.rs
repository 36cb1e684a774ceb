//! In-place grayscale conversion of a finished composite

use image::{Rgb, RgbImage};

/// Unweighted intensity of a pixel, `(r + g + b) / 3` in integer arithmetic
pub const fn intensity(pixel: [u8; 3]) -> u8 {
    let [r, g, b] = pixel;
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}

/// Replace every pixel with its intensity on all three channels
///
/// Intentionally not luma-weighted. Applying it twice is the same as once.
pub fn grayscale(image: &mut RgbImage) {
    for pixel in image.pixels_mut() {
        let value = intensity(pixel.0);
        *pixel = Rgb([value; 3]);
    }
}
