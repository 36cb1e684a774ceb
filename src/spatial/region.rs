//! Region geometry for the quadtree walk over the target image

use std::fmt;

/// Axis-aligned rectangle of the target image, in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Region {
    /// Create a region from its offset and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole image of the given size
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exclusive right edge
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the region has no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether recursion must stop here and tile by average color
    ///
    /// A region is a leaf once either side drops below `min_size`, or when
    /// halving a side would produce an empty quadrant.
    pub const fn is_leaf(&self, min_size: u32) -> bool {
        self.width < min_size || self.height < min_size || self.width < 2 || self.height < 2
    }

    /// Split into top-left, top-right, bottom-left and bottom-right quadrants
    ///
    /// Halves use integer division, so the right and bottom quadrants absorb
    /// the extra pixel of an odd dimension.
    pub const fn quadrants(&self) -> [Self; 4] {
        let half_width = self.width / 2;
        let half_height = self.height / 2;
        let rest_width = self.width - half_width;
        let rest_height = self.height - half_height;
        let mid_x = self.x + half_width;
        let mid_y = self.y + half_height;

        [
            Self::new(self.x, self.y, half_width, half_height),
            Self::new(mid_x, self.y, rest_width, half_height),
            Self::new(self.x, mid_y, half_width, rest_height),
            Self::new(mid_x, mid_y, rest_width, rest_height),
        ]
    }

    /// Whether two regions share at least one pixel
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `other` lies entirely within this region
    pub const fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
