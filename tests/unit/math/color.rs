//! Tests for the RGB color type and its Euclidean distance

#[cfg(test)]
mod tests {
    use fractomosaic::math::Color;
    use fractomosaic::math::color::MAX_RGB_DISTANCE;

    // Tests distance between identical colors is zero
    // Verified by adding a constant offset to the distance
    #[test]
    fn test_distance_to_self_is_zero() {
        let color = Color::new(12, 200, 99);
        assert!(color.distance(&color).abs() < f64::EPSILON);
    }

    // Tests Euclidean distance between pure red and pure blue
    // Verified by dropping the square root
    #[test]
    fn test_red_blue_distance() {
        let red = Color::new(255, 0, 0);
        let blue = Color::new(0, 0, 255);
        let expected = (2.0_f64 * 255.0 * 255.0).sqrt();
        assert!((red.distance(&blue) - expected).abs() < 1e-9);
    }

    // Tests distance is symmetric
    // Verified by using unsigned subtraction that saturates
    #[test]
    fn test_distance_is_symmetric() {
        let a = Color::new(10, 250, 3);
        let b = Color::new(200, 4, 120);
        assert!((a.distance(&b) - b.distance(&a)).abs() < f64::EPSILON);
    }

    // Tests black to white spans the maximum RGB distance
    // Verified by changing the maximum constant
    #[test]
    fn test_black_white_is_maximum_distance() {
        let black = Color::new(0, 0, 0);
        let white = Color::new(255, 255, 255);
        assert!((black.distance(&white) - MAX_RGB_DISTANCE).abs() < 1e-9);
    }

    // Tests conversion to and from image pixels keeps channel order
    // Verified by swapping red and blue in the conversion
    #[test]
    fn test_pixel_conversion_round_trip() {
        let color = Color::new(1, 2, 3);
        let pixel: image::Rgb<u8> = color.into();
        assert_eq!(pixel.0, [1, 2, 3]);
        assert_eq!(Color::from(pixel), color);
        assert_eq!(Color::from([1, 2, 3]).channels(), [1, 2, 3]);
    }

    // Tests display formatting
    // Verified by omitting the blue channel
    #[test]
    fn test_display() {
        assert_eq!(Color::new(7, 8, 9).to_string(), "rgb(7, 8, 9)");
    }
}
