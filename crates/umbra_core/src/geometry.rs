//! Geometry types

/// 2D size in host layout units
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Both dimensions reach the given minimum
    pub fn reaches(&self, min: Size) -> bool {
        self.width >= min.width && self.height >= min.height
    }

    /// Both dimensions stay within `max_side`
    pub fn fits_within(&self, max_side: f32) -> bool {
        self.width <= max_side && self.height <= max_side
    }
}
