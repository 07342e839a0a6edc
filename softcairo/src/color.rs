//! Color values and gradient color stops.

/// An RGBA color with floating-point channels.
///
/// Channels are nominally in `[0, 1]` but are not clamped on construction;
/// clamping happens when a pixel is written.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Build from straight-alpha 8-bit channels.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::rgba(
            f64::from(rgba[0]) / 255.0,
            f64::from(rgba[1]) / 255.0,
            f64::from(rgba[2]) / 255.0,
            f64::from(rgba[3]) / 255.0,
        )
    }

    /// Clamp each channel to `[0, 1]` and quantize to straight-alpha bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
            quantize(self.alpha),
        ]
    }

    pub(crate) fn clamped(self) -> Self {
        Self::rgba(
            clamp_unit(self.red),
            clamp_unit(self.green),
            clamp_unit(self.blue),
            clamp_unit(self.alpha),
        )
    }

    /// Channel-wise linear interpolation from `self` (t = 0) to `other` (t = 1).
    pub(crate) fn lerp(self, other: Color, t: f64) -> Color {
        Color::rgba(
            self.red + (other.red - self.red) * t,
            self.green + (other.green - self.green) * t,
            self.blue + (other.blue - self.blue) * t,
            self.alpha + (other.alpha - self.alpha) * t,
        )
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn quantize(v: f64) -> u8 {
    (clamp_unit(v) * 255.0).round() as u8
}

/// A color at a normalized position along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Offset position, nominally in `[0, 1]`.
    pub offset: f64,
    /// Color at this stop.
    pub color: Color,
}
