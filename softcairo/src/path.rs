//! Path model: a command list plus current-point tracking.
//!
//! A [`Path`] is coordinate-space agnostic. The drawing context feeds it
//! points already mapped through the current transformation matrix, while a
//! standalone path built by a caller simply holds whatever coordinates it was
//! given.

use crate::arc::{arc_curve, ArcCurve};
use crate::error::{CairoError, CairoResult, Status};
use crate::geometry::{ArcParams, Point};
use crate::matrix::Matrix;

/// A single path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bezier: two control points, then the end point.
    CurveTo(Point, Point, Point),
    ClosePath,
}

impl PathOp {
    fn map_points(self, f: impl Fn(Point) -> Point) -> PathOp {
        match self {
            PathOp::MoveTo(p) => PathOp::MoveTo(f(p)),
            PathOp::LineTo(p) => PathOp::LineTo(f(p)),
            PathOp::CurveTo(c1, c2, p) => PathOp::CurveTo(f(c1), f(c2), f(p)),
            PathOp::ClosePath => PathOp::ClosePath,
        }
    }
}

/// An ordered sequence of path commands with current-point state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    ops: Vec<PathOp>,
    current_point: Option<Point>,
    subpath_start: Option<Point>,
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from SVG path data.
    ///
    /// Supports all SVG path commands (M, L, H, V, Q, T, C, S, A, Z). Arcs and
    /// quadratic curves are converted to cubic Bezier curves.
    ///
    /// # Example
    /// ```
    /// use softcairo::Path;
    ///
    /// let path = Path::from_svg_path_data("M10,10 L50,50 A10,10 0 0 1 100,100 Z").unwrap();
    /// assert!(!path.is_empty());
    /// ```
    pub fn from_svg_path_data(path_data: &str) -> CairoResult<Self> {
        let mut path = Path::new();

        for segment in svgtypes::SimplifyingPathParser::from(path_data) {
            let segment = segment.map_err(|e| {
                CairoError::new(
                    Status::InvalidPathData,
                    format!("invalid SVG path data: {e:?}"),
                )
            })?;

            match segment {
                svgtypes::SimplePathSegment::MoveTo { x, y } => path.move_to(x, y),
                svgtypes::SimplePathSegment::LineTo { x, y } => path.line_to(x, y),
                svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    path.quad_to(x1, y1, x, y)
                }
                svgtypes::SimplePathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => path.curve_to(x1, y1, x2, y2, x, y),
                svgtypes::SimplePathSegment::ClosePath => path.close_path(),
            }
        }

        path.validate()?;
        Ok(path)
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current_point
    }

    pub fn has_current_point(&self) -> bool {
        self.current_point.is_some()
    }

    /// Remove every command and forget the current point.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.current_point = None;
        self.subpath_start = None;
    }

    /// Forget the current point without adding a command, so the next
    /// line or curve starts a fresh subpath.
    pub fn new_sub_path(&mut self) {
        self.current_point = None;
    }

    /// Begin a new subpath at `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let p = Point::new(x, y);
        // Consecutive moves collapse into one.
        if let Some(PathOp::MoveTo(last)) = self.ops.last_mut() {
            *last = p;
        } else {
            self.ops.push(PathOp::MoveTo(p));
        }
        self.current_point = Some(p);
        self.subpath_start = Some(p);
    }

    /// Line from the current point; acts as `move_to` when there is none.
    pub fn line_to(&mut self, x: f64, y: f64) {
        if self.current_point.is_none() {
            self.move_to(x, y);
            return;
        }
        self.reopen_after_close();
        let p = Point::new(x, y);
        self.ops.push(PathOp::LineTo(p));
        self.current_point = Some(p);
    }

    /// Cubic Bezier from the current point. Without a current point, the
    /// first control point becomes the start of a new subpath.
    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        if self.current_point.is_none() {
            self.move_to(x1, y1);
        }
        self.reopen_after_close();
        let end = Point::new(x3, y3);
        self.ops.push(PathOp::CurveTo(
            Point::new(x1, y1),
            Point::new(x2, y2),
            end,
        ));
        self.current_point = Some(end);
    }

    /// Quadratic Bezier, stored as the equivalent cubic.
    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let start = self.current_point.unwrap_or(Point::new(cx, cy));
        let c1x = start.x + 2.0 / 3.0 * (cx - start.x);
        let c1y = start.y + 2.0 / 3.0 * (cy - start.y);
        let c2x = x + 2.0 / 3.0 * (cx - x);
        let c2y = y + 2.0 / 3.0 * (cy - y);
        if self.current_point.is_none() {
            self.move_to(start.x, start.y);
        }
        self.curve_to(c1x, c1y, c2x, c2y, x, y);
    }

    /// Close the current subpath; the current point returns to its start.
    pub fn close_path(&mut self) {
        if self.ops.is_empty() {
            return;
        }
        if !matches!(self.ops.last(), Some(PathOp::ClosePath)) {
            self.ops.push(PathOp::ClosePath);
        }
        self.current_point = self.subpath_start;
    }

    pub fn rel_move_to(&mut self, dx: f64, dy: f64) {
        let (x, y) = self.offset_from_current(dx, dy);
        self.move_to(x, y);
    }

    pub fn rel_line_to(&mut self, dx: f64, dy: f64) {
        let (x, y) = self.offset_from_current(dx, dy);
        self.line_to(x, y);
    }

    pub fn rel_curve_to(&mut self, dx1: f64, dy1: f64, dx2: f64, dy2: f64, dx3: f64, dy3: f64) {
        let (x1, y1) = self.offset_from_current(dx1, dy1);
        let (x2, y2) = self.offset_from_current(dx2, dy2);
        let (x3, y3) = self.offset_from_current(dx3, dy3);
        self.curve_to(x1, y1, x2, y2, x3, y3);
    }

    /// Closed rectangle subpath starting at `(x, y)`.
    pub fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close_path();
    }

    /// Circular arc in increasing angle direction.
    pub fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.append_arc(
            &ArcParams {
                xc,
                yc,
                radius,
                angle1,
                angle2,
                negative: false,
            },
            &Matrix::identity(),
        );
    }

    /// Circular arc in decreasing angle direction.
    pub fn arc_negative(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.append_arc(
            &ArcParams {
                xc,
                yc,
                radius,
                angle1,
                angle2,
                negative: true,
            },
            &Matrix::identity(),
        );
    }

    /// Append an arc whose geometry is given in a space that `matrix` maps
    /// into this path's space.
    ///
    /// The arc's start is joined to the current point with a line, or opens
    /// a new subpath when there is no current point.
    pub(crate) fn append_arc(&mut self, params: &ArcParams, matrix: &Matrix) {
        match arc_curve(params) {
            ArcCurve::Empty => {}
            ArcCurve::Center(center) => {
                let c = matrix.map(center);
                self.line_to(c.x, c.y);
            }
            ArcCurve::Curves { start, segments } => {
                let s = matrix.map(start);
                self.line_to(s.x, s.y);
                for seg in segments {
                    let c1 = matrix.map(seg.ctrl1);
                    let c2 = matrix.map(seg.ctrl2);
                    let end = matrix.map(seg.end);
                    self.curve_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
                }
            }
        }
    }

    /// Append every command of `other`, updating the current point.
    pub fn append(&mut self, other: &Path) {
        for op in &other.ops {
            self.push_op(*op);
        }
    }

    pub(crate) fn push_op(&mut self, op: PathOp) {
        match op {
            PathOp::MoveTo(p) => self.move_to(p.x, p.y),
            PathOp::LineTo(p) => self.line_to(p.x, p.y),
            PathOp::CurveTo(c1, c2, p) => self.curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathOp::ClosePath => self.close_path(),
        }
    }

    /// A copy with every point mapped through `matrix`.
    pub fn transformed(&self, matrix: &Matrix) -> Path {
        Path {
            ops: self
                .ops
                .iter()
                .map(|op| op.map_points(|p| matrix.map(p)))
                .collect(),
            current_point: self.current_point.map(|p| matrix.map(p)),
            subpath_start: self.subpath_start.map(|p| matrix.map(p)),
        }
    }

    /// Fails with `InvalidPathData` if any coordinate is NaN or infinite.
    pub fn validate(&self) -> CairoResult<()> {
        let finite = self.ops.iter().all(|op| match op {
            PathOp::MoveTo(p) | PathOp::LineTo(p) => p.is_finite(),
            PathOp::CurveTo(c1, c2, p) => c1.is_finite() && c2.is_finite() && p.is_finite(),
            PathOp::ClosePath => true,
        });
        if finite {
            Ok(())
        } else {
            Err(CairoError::new(
                Status::InvalidPathData,
                "path contains non-finite coordinates",
            ))
        }
    }

    fn offset_from_current(&self, dx: f64, dy: f64) -> (f64, f64) {
        match self.current_point {
            Some(p) => (p.x + dx, p.y + dy),
            None => (dx, dy),
        }
    }

    /// After a close, drawing continues from the subpath start in a new subpath.
    fn reopen_after_close(&mut self) {
        if matches!(self.ops.last(), Some(PathOp::ClosePath)) {
            if let Some(p) = self.current_point {
                self.ops.push(PathOp::MoveTo(p));
                self.subpath_start = Some(p);
            }
        }
    }
}
