//! RGB color samples and the Euclidean distance metric used for matching

use std::fmt;

/// Largest possible distance between two RGB colors, `sqrt(3) * 255`
pub const MAX_RGB_DISTANCE: f64 = 441.672_955_930_063_7;

/// An RGB sample with 0-255 channels
///
/// Average colors are truncated to whole intensities, which makes colors
/// hashable and lets exact repeats be memoized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    /// Red intensity
    pub red: u8,
    /// Green intensity
    pub green: u8,
    /// Blue intensity
    pub blue: u8,
}

impl Color {
    /// Create a color from its three channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Euclidean distance to another color in RGB space
    pub fn distance(&self, other: &Self) -> f64 {
        let dr = f64::from(self.red) - f64::from(other.red);
        let dg = f64::from(self.green) - f64::from(other.green);
        let db = f64::from(self.blue) - f64::from(other.blue);
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Channels as an array in R, G, B order
    pub const fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<[u8; 3]> for Color {
    fn from(channels: [u8; 3]) -> Self {
        let [red, green, blue] = channels;
        Self { red, green, blue }
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(pixel: image::Rgb<u8>) -> Self {
        Self::from(pixel.0)
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        Self(color.channels())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}
