//! Style enums carried by the graphics state.

/// Antialiasing mode for rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Antialias {
    /// Backend default (the configured supersampling grid).
    #[default]
    Default,
    /// Single sample at the pixel center.
    None,
    /// Grayscale coverage.
    Gray,
    /// Treated as `Gray`; no per-channel subpixel rendering.
    Subpixel,
    /// Reduced sample grid.
    Fast,
    Good,
    Best,
}

impl Antialias {
    /// Samples per pixel axis for this mode, given the configured default grid.
    pub(crate) fn grid(self, default_grid: u32) -> u32 {
        match self {
            Antialias::None => 1,
            Antialias::Fast => default_grid.clamp(1, 2),
            _ => default_grid.max(1),
        }
    }
}

/// Fill rule for fill and clip operations.
///
/// Determines how the interior of a path is calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Non-zero winding rule (default).
    #[default]
    Winding,
    /// Even-odd rule.
    EvenOdd,
}

impl FillRule {
    pub(crate) fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::Winding => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Line cap style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineCap {
    /// Flat edge at the endpoint.
    #[default]
    Butt,
    /// Rounded edge extending past the endpoint.
    Round,
    /// Square edge extending past the endpoint.
    Square,
}

/// Line join style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineJoin {
    /// Sharp corner.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Beveled corner.
    Bevel,
}

/// Compositing operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    Clear,
    Source,
    #[default]
    Over,
    In,
    Out,
    Atop,
    Dest,
    DestOver,
    DestIn,
    DestOut,
    DestAtop,
    Xor,
    Add,
    Saturate,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    HslHue,
    HslSaturation,
    HslColor,
    HslLuminosity,
}

impl Operator {
    /// Whether this operator is a blend mode composited with source-over.
    pub(crate) fn is_blend_mode(self) -> bool {
        matches!(
            self,
            Operator::Multiply
                | Operator::Screen
                | Operator::Overlay
                | Operator::Darken
                | Operator::Lighten
                | Operator::ColorDodge
                | Operator::ColorBurn
                | Operator::HardLight
                | Operator::SoftLight
                | Operator::Difference
                | Operator::Exclusion
                | Operator::HslHue
                | Operator::HslSaturation
                | Operator::HslColor
                | Operator::HslLuminosity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rule_inside() {
        assert!(FillRule::Winding.is_inside(2));
        assert!(!FillRule::EvenOdd.is_inside(2));
        assert!(FillRule::EvenOdd.is_inside(-1));
        assert!(!FillRule::Winding.is_inside(0));
    }

    #[test]
    fn test_antialias_grid() {
        assert_eq!(Antialias::None.grid(4), 1);
        assert_eq!(Antialias::Fast.grid(4), 2);
        assert_eq!(Antialias::Default.grid(4), 4);
        assert_eq!(Antialias::Best.grid(4), 4);
    }
}
