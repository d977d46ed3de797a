//! Color types and utilities
//!
//! All values are straight (non-premultiplied) RGBA in the 0.0..=1.0 range.
//! The host may hand us values slightly outside that range; blending functions
//! clamp their outputs so written colors always stay valid.

/// Per-channel tolerance below which two colors are considered equal.
pub const COLOR_EPSILON: f32 = 1e-4;

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from hex value (0xRRGGBB)
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Create an opaque color from an `[r, g, b]` triple
    pub fn from_rgb_array(rgb: [f32; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Clamp every channel into 0.0..=1.0
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Linear interpolation between two colors, alpha included
    pub fn lerp(from: &Color, to: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }

    pub fn max_channel(&self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    pub fn min_channel(&self) -> f32 {
        self.r.min(self.g).min(self.b)
    }

    /// Spread between the strongest and weakest RGB channel.
    ///
    /// Cheap saturation proxy: 0.0 for grays, up to 1.0 for pure hues.
    pub fn chroma(&self) -> f32 {
        self.max_channel() - self.min_channel()
    }

    /// Relative luminance (Rec. 709 weights)
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Move the color toward its own gray by `amount` (0 = unchanged, 1 = gray)
    pub fn desaturate(self, amount: f32) -> Self {
        let gray = self.luminance();
        let gray = Color::rgba(gray, gray, gray, self.a);
        Color::lerp(&self, &gray, amount)
    }

    /// Multiply RGB by `factor`, keeping alpha
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
        .clamped()
    }

    /// Shift toward amber (positive) or toward blue (negative).
    ///
    /// `warmth` is expected in -1.0..=1.0.
    pub fn warmed(self, warmth: f32) -> Self {
        let w = warmth.clamp(-1.0, 1.0);
        Self {
            r: self.r + 0.06 * w,
            g: self.g + 0.015 * w,
            b: self.b - 0.06 * w,
            a: self.a,
        }
        .clamped()
    }

    /// Per-channel comparison with a tolerance
    pub fn approx_eq(&self, other: &Color, epsilon: f32) -> bool {
        (self.r - other.r).abs() <= epsilon
            && (self.g - other.g).abs() <= epsilon
            && (self.b - other.b).abs() <= epsilon
            && (self.a - other.a).abs() <= epsilon
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
