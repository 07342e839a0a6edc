//! Paint sources: solid colors, gradients and surface patterns.

use crate::color::{Color, ColorStop};
use crate::error::{CairoError, CairoResult, Status};
use crate::geometry::Point;
use crate::gradient::GradientShape;
use crate::matrix::Matrix;
use crate::surface::{Image, Surface};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Kind of paint source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternType {
    Solid,
    Surface,
    Linear,
    Radial,
}

/// How a pattern is painted outside its natural area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extend {
    /// Surfaces are transparent outside their bounds; gradients clamp.
    None,
    /// Tile the pattern.
    Repeat,
    /// Tile the pattern, mirroring every other tile.
    Reflect,
    /// Extend the edge pixels or end stops.
    Pad,
}

/// Sampling filter for surface patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    Fast,
    #[default]
    Good,
    Best,
    Nearest,
    /// The only filter that interpolates between neighboring pixels.
    Bilinear,
    Gaussian,
}

#[derive(Debug, Clone)]
enum PatternSource {
    Solid(Color),
    Gradient {
        shape: GradientShape,
        stops: Vec<ColorStop>,
    },
    Surface(Surface),
}

#[derive(Debug)]
struct PatternState {
    source: PatternSource,
    matrix: Matrix,
    extend: Extend,
    filter: Filter,
    status: Status,
}

#[derive(Debug)]
struct PatternInner {
    pattern_type: PatternType,
    state: Mutex<PatternState>,
}

impl Drop for PatternInner {
    fn drop(&mut self) {
        log::trace!(target: "cairo", "{:?} pattern released", self.pattern_type);
    }
}

/// Immutable copy of everything the rasterizer needs from a pattern.
#[derive(Debug, Clone)]
pub(crate) enum PaintSource {
    Solid(Color),
    Gradient {
        shape: GradientShape,
        stops: Vec<ColorStop>,
        extend: Extend,
    },
    Surface {
        image: Image,
        /// Maps pattern space into the image's pixel space.
        device: Matrix,
        extend: Extend,
        filter: Filter,
    },
}

/// A reference-counted paint source.
///
/// Handles share state: a matrix or extend change through one handle is
/// seen by every other handle, including graphics states that hold it as
/// their source.
#[derive(Debug, Clone)]
pub struct Pattern {
    inner: Arc<PatternInner>,
}

impl Pattern {
    fn from_source(pattern_type: PatternType, source: PatternSource, extend: Extend) -> Self {
        log::trace!(target: "cairo", "create {pattern_type:?} pattern");
        Self {
            inner: Arc::new(PatternInner {
                pattern_type,
                state: Mutex::new(PatternState {
                    source,
                    matrix: Matrix::identity(),
                    extend,
                    filter: Filter::default(),
                    status: Status::Success,
                }),
            }),
        }
    }

    /// Opaque solid color.
    pub fn create_rgb(red: f64, green: f64, blue: f64) -> Pattern {
        Self::create_rgba(red, green, blue, 1.0)
    }

    /// Translucent solid color.
    pub fn create_rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Pattern {
        Self::create_solid(Color::rgba(red, green, blue, alpha))
    }

    pub fn create_solid(color: Color) -> Pattern {
        Self::from_source(PatternType::Solid, PatternSource::Solid(color), Extend::Pad)
    }

    /// Linear gradient along the line from `(x0, y0)` to `(x1, y1)`.
    pub fn create_linear(x0: f64, y0: f64, x1: f64, y1: f64) -> Pattern {
        Self::from_source(
            PatternType::Linear,
            PatternSource::Gradient {
                shape: GradientShape::Linear {
                    p0: Point::new(x0, y0),
                    p1: Point::new(x1, y1),
                },
                stops: Vec::new(),
            },
            Extend::Pad,
        )
    }

    /// Radial gradient between the start circle `(cx0, cy0, radius0)` and the
    /// end circle `(cx1, cy1, radius1)`.
    pub fn create_radial(
        cx0: f64,
        cy0: f64,
        radius0: f64,
        cx1: f64,
        cy1: f64,
        radius1: f64,
    ) -> Pattern {
        Self::from_source(
            PatternType::Radial,
            PatternSource::Gradient {
                shape: GradientShape::Radial {
                    c0: Point::new(cx0, cy0),
                    r0: radius0,
                    c1: Point::new(cx1, cy1),
                    r1: radius1,
                },
                stops: Vec::new(),
            },
            Extend::Pad,
        )
    }

    /// Pattern that paints the pixels of `surface`.
    pub fn create_for_surface(surface: &Surface) -> Pattern {
        let pattern = Self::from_source(
            PatternType::Surface,
            PatternSource::Surface(surface.reference()),
            Extend::None,
        );
        if !surface.status().is_success() {
            pattern.poison(surface.status());
        }
        pattern
    }

    /// Another handle to the same pattern.
    pub fn reference(&self) -> Pattern {
        self.clone()
    }

    pub fn reference_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Release this handle.
    pub fn destroy(self) {}

    pub fn ptr_eq(&self, other: &Pattern) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn state(&self) -> MutexGuard<'_, PatternState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> Status {
        self.state().status
    }

    fn poison(&self, status: Status) {
        let mut state = self.state();
        if state.status.is_success() {
            log::warn!(target: "cairo", "pattern entered error status: {status}");
            state.status = status;
        }
    }

    /// Return the sticky error, if any, as an `Err`.
    fn check(&self) -> CairoResult<()> {
        self.state().status.to_result()
    }

    fn fail<T>(&self, status: Status, message: impl Into<String>) -> CairoResult<T> {
        self.poison(status);
        Err(CairoError::new(status, message))
    }

    pub fn pattern_type(&self) -> PatternType {
        self.inner.pattern_type
    }

    /// Matrix mapping user space to pattern space.
    pub fn matrix(&self) -> Matrix {
        self.state().matrix
    }

    /// Replace the pattern matrix. It must be invertible.
    pub fn set_matrix(&self, matrix: Matrix) -> CairoResult<()> {
        self.check()?;
        if !matrix.is_invertible() {
            return self.fail(Status::InvalidMatrix, "pattern matrix is not invertible");
        }
        self.state().matrix = matrix;
        Ok(())
    }

    pub fn extend(&self) -> Extend {
        self.state().extend
    }

    pub fn set_extend(&self, extend: Extend) {
        let mut state = self.state();
        if state.status.is_success() {
            state.extend = extend;
        }
    }

    pub fn filter(&self) -> Filter {
        self.state().filter
    }

    pub fn set_filter(&self, filter: Filter) {
        let mut state = self.state();
        if state.status.is_success() {
            state.filter = filter;
        }
    }

    pub fn add_color_stop_rgb(&self, offset: f64, red: f64, green: f64, blue: f64) -> CairoResult<()> {
        self.add_color_stop_rgba(offset, red, green, blue, 1.0)
    }

    /// Append a color stop. Stops keep insertion order; offsets are clamped
    /// to `[0, 1]`.
    pub fn add_color_stop_rgba(
        &self,
        offset: f64,
        red: f64,
        green: f64,
        blue: f64,
        alpha: f64,
    ) -> CairoResult<()> {
        self.check()?;
        {
            let mut state = self.state();
            if let PatternSource::Gradient { stops, .. } = &mut state.source {
                stops.push(ColorStop {
                    offset: offset.clamp(0.0, 1.0),
                    color: Color::rgba(red, green, blue, alpha),
                });
                return Ok(());
            }
        }
        self.fail(
            Status::PatternTypeMismatch,
            "color stops require a gradient pattern",
        )
    }

    pub fn color_stop_count(&self) -> CairoResult<usize> {
        self.check()?;
        match &self.state().source {
            PatternSource::Gradient { stops, .. } => Ok(stops.len()),
            _ => Err(Status::PatternTypeMismatch.into()),
        }
    }

    pub fn color_stop_rgba(&self, index: usize) -> CairoResult<ColorStop> {
        self.check()?;
        match &self.state().source {
            PatternSource::Gradient { stops, .. } => stops
                .get(index)
                .copied()
                .ok_or_else(|| Status::InvalidIndex.into()),
            _ => Err(Status::PatternTypeMismatch.into()),
        }
    }

    /// Color of a solid pattern.
    pub fn rgba(&self) -> CairoResult<Color> {
        self.check()?;
        match &self.state().source {
            PatternSource::Solid(color) => Ok(*color),
            _ => Err(Status::PatternTypeMismatch.into()),
        }
    }

    /// End points of a linear gradient.
    pub fn linear_points(&self) -> CairoResult<(Point, Point)> {
        self.check()?;
        match &self.state().source {
            PatternSource::Gradient {
                shape: GradientShape::Linear { p0, p1 },
                ..
            } => Ok((*p0, *p1)),
            _ => Err(Status::PatternTypeMismatch.into()),
        }
    }

    /// Start and end circles of a radial gradient as `(center, radius)` pairs.
    pub fn radial_circles(&self) -> CairoResult<((Point, f64), (Point, f64))> {
        self.check()?;
        match &self.state().source {
            PatternSource::Gradient {
                shape: GradientShape::Radial { c0, r0, c1, r1 },
                ..
            } => Ok(((*c0, *r0), (*c1, *r1))),
            _ => Err(Status::PatternTypeMismatch.into()),
        }
    }

    /// Surface painted by a surface pattern.
    pub fn surface(&self) -> CairoResult<Surface> {
        self.check()?;
        match &self.state().source {
            PatternSource::Surface(surface) => Ok(surface.reference()),
            _ => Err(Status::PatternTypeMismatch.into()),
        }
    }

    /// Copy out the paint source and pattern matrix for rasterization.
    ///
    /// Surface pixels are copied so the source may be the drawing target.
    pub(crate) fn paint_source(&self) -> CairoResult<(PaintSource, Matrix)> {
        let state = self.state();
        state.status.to_result()?;
        let source = match &state.source {
            PatternSource::Solid(color) => PaintSource::Solid(*color),
            PatternSource::Gradient { shape, stops } => PaintSource::Gradient {
                shape: *shape,
                stops: stops.clone(),
                extend: state.extend,
            },
            PatternSource::Surface(surface) => PaintSource::Surface {
                image: surface.snapshot(),
                device: surface.device_transform(),
                extend: state.extend,
                filter: state.filter,
            },
        };
        Ok((source, state.matrix))
    }
}
