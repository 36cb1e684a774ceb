//! Tests for the unweighted grayscale post-pass

#[cfg(test)]
mod tests {
    use crate::fixtures::{BLUE, gradient, solid};
    use fractomosaic::algorithm::grayscale::{grayscale, intensity};
    use image::Rgb;

    // Tests intensity is the truncated mean of the three channels
    // Verified by applying luma weights instead
    #[test]
    fn test_intensity_is_unweighted_mean() {
        assert_eq!(intensity([10, 20, 40]), 23);
        assert_eq!(intensity([0, 255, 0]), 85);
        assert_eq!(intensity([255, 255, 255]), 255);
        assert_eq!(intensity([0, 0, 0]), 0);
    }

    // Tests every pixel ends up with equal channels
    // Verified by writing the intensity to the red channel only
    #[test]
    fn test_grayscale_equalizes_channels() {
        let mut image = solid(3, 2, BLUE);
        grayscale(&mut image);
        for pixel in image.pixels() {
            assert_eq!(*pixel, Rgb([85, 85, 85]));
        }
    }

    // Tests converting twice gives the same result as once
    // Verified by dividing each channel by 3 before summing
    #[test]
    fn test_grayscale_is_idempotent() {
        let mut once = gradient(17, 9);
        grayscale(&mut once);
        let mut twice = once.clone();
        grayscale(&mut twice);
        assert_eq!(once, twice);
    }
}
