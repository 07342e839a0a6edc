//! Rendering configuration consumed by the context builder.

/// Rendering configuration for a drawing context.
///
/// The defaults reproduce the engine's standard behavior; a context built
/// with [`RenderConfig::default()`] renders exactly like one created with
/// [`Context::new`](crate::Context::new).
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Initial curve-flattening tolerance in device pixels (default: 0.1).
    pub tolerance: f64,
    /// Supersampling grid per pixel axis for the default antialias mode
    /// (default: 4, i.e. 16 samples per pixel).
    pub supersample_grid: u32,
    /// Maximum recursion depth when subdividing Bezier curves (default: 12).
    pub max_subdivision_depth: u32,
    /// Flattening tolerance used for strokes, independent of the state's
    /// tolerance (default: 0.1).
    pub stroke_tolerance: f64,
    /// Initial line width in user units (default: 2.0).
    pub line_width: f64,
    /// Initial miter limit (default: 10.0).
    pub miter_limit: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.1,
            supersample_grid: 4,
            max_subdivision_depth: 12,
            stroke_tolerance: 0.1,
            line_width: 2.0,
            miter_limit: 10.0,
        }
    }
}

impl RenderConfig {
    /// Set the supersampling grid used by the default antialias mode.
    pub fn with_supersample_grid(mut self, grid: u32) -> Self {
        self.supersample_grid = grid.max(1);
        self
    }

    /// Set the initial flattening tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = RenderConfig::default()
            .with_supersample_grid(0)
            .with_tolerance(0.5);
        assert_eq!(config.supersample_grid, 1);
        assert_eq!(config.tolerance, 0.5);
        assert_eq!(config.line_width, 2.0);
    }
}
