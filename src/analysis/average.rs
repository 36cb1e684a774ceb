//! Per-channel histograms and the average color derived from them

use crate::io::error::{Result, computation_error};
use crate::math::Color;
use image::RgbImage;

/// Buckets per channel
pub const BUCKETS_PER_CHANNEL: usize = 256;

/// Total histogram length, red buckets then green then blue
pub const HISTOGRAM_LEN: usize = BUCKETS_PER_CHANNEL * 3;

/// Count pixels per channel intensity
///
/// Index `c * 256 + v` holds the number of pixels whose channel `c`
/// (0 = red, 1 = green, 2 = blue) equals `v`.
pub fn histogram(image: &RgbImage) -> Vec<u64> {
    let mut counts = vec![0u64; HISTOGRAM_LEN];
    for pixel in image.pixels() {
        for (channel, &value) in pixel.0.iter().enumerate() {
            if let Some(count) = counts.get_mut(channel * BUCKETS_PER_CHANNEL + value as usize) {
                *count += 1;
            }
        }
    }
    counts
}

/// Mean intensity of each channel, truncated to a whole value
///
/// # Errors
///
/// Returns an error if the image has no pixels
pub fn average_color(image: &RgbImage) -> Result<Color> {
    let total_pixels = u64::from(image.width()) * u64::from(image.height());
    if total_pixels == 0 {
        return Err(computation_error("average color", &"image has no pixels"));
    }
    average_from_histogram(&histogram(image), total_pixels)
}

/// Average color from a histogram laid out as by [`histogram`]
///
/// # Errors
///
/// Returns an error if `total_pixels` is zero or the histogram is not
/// [`HISTOGRAM_LEN`] long
pub fn average_from_histogram(counts: &[u64], total_pixels: u64) -> Result<Color> {
    if counts.len() != HISTOGRAM_LEN {
        return Err(computation_error(
            "average color",
            &format!("expected {HISTOGRAM_LEN} buckets, got {}", counts.len()),
        ));
    }
    if total_pixels == 0 {
        return Err(computation_error("average color", &"zero pixel count"));
    }

    let mut totals = [0u64; 3];
    for (index, &count) in counts.iter().enumerate() {
        let channel = index / BUCKETS_PER_CHANNEL;
        let value = (index % BUCKETS_PER_CHANNEL) as u64;
        if let Some(total) = totals.get_mut(channel) {
            *total += value * count;
        }
    }

    let [red, green, blue] = totals.map(|total| (total / total_pixels).min(255) as u8);
    Ok(Color::new(red, green, blue))
}
