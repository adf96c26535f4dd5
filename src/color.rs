//! Color values and conversions.
//!
//! Spawn colors come from the HSL cylinder (`hsl(hue, 100%, 50%)` in the
//! 0-359 hue circle), so the conversion here is HSL rather than HSV.

/// An RGBA color with all channels in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from raw channel values.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from HSL values.
    ///
    /// * `hue` - degrees, wraps around 360
    /// * `saturation` - 0.0 (gray) to 1.0 (vivid)
    /// * `lightness` - 0.0 (black) through 0.5 (pure hue) to 1.0 (white)
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let [r, g, b] = hsl_to_rgb(hue, saturation, lightness);
        Self::new(r, g, b, 1.0)
    }

    /// The same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Channels as an array, for GPU upload.
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Convert HSL to RGB.
///
/// Hue is in degrees and wraps; saturation and lightness are 0.0-1.0.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h / 60.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}
