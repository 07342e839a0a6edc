//! Path flattening: curves become polylines in device space.

use crate::geometry::{Bounds, Point};
use crate::matrix::Matrix;
use crate::path::{Path, PathOp};

/// A flattened subpath.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Polyline {
    pub(crate) points: Vec<Point>,
    /// Whether the subpath ended with a close command.
    pub(crate) closed: bool,
}

impl Polyline {
    fn start(p: Point) -> Self {
        Self {
            points: vec![p],
            closed: false,
        }
    }

    /// Consecutive point pairs, including the closing edge for closed lines.
    pub(crate) fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) if self.points.len() > 1 => Some((*last, *first)),
            _ => None,
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }
}

/// Cubic Bezier control polygon.
#[derive(Debug, Clone, Copy)]
struct Cubic([Point; 4]);

impl Cubic {
    /// Whether both control points lie close enough to the chord.
    ///
    /// Compares the squared cross product of each control point against
    /// `tolerance` times the squared chord length. A zero-length chord falls
    /// back to the control points' distance from the start.
    fn is_flat(&self, tolerance: f64) -> bool {
        let [p0, p1, p2, p3] = self.0;
        let dx = p3.x - p0.x;
        let dy = p3.y - p0.y;
        let chord_sq = dx * dx + dy * dy;
        if chord_sq < 1e-12 {
            return p1.distance_sq(p0) <= tolerance && p2.distance_sq(p0) <= tolerance;
        }
        let cross = |p: Point| (p.x - p0.x) * dy - (p.y - p0.y) * dx;
        let c1 = cross(p1);
        let c2 = cross(p2);
        (c1 * c1).max(c2 * c2) <= tolerance * chord_sq
    }

    /// Split at `t = 0.5`.
    fn split(&self) -> (Cubic, Cubic) {
        let [p0, p1, p2, p3] = self.0;
        let mid = |a: Point, b: Point| Point::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5);
        let p01 = mid(p0, p1);
        let p12 = mid(p1, p2);
        let p23 = mid(p2, p3);
        let p012 = mid(p01, p12);
        let p123 = mid(p12, p23);
        let m = mid(p012, p123);
        (Cubic([p0, p01, p012, m]), Cubic([m, p123, p23, p3]))
    }

    /// Append the flattened curve (without its start point) to `out`.
    fn flatten_into(&self, tolerance: f64, depth: u32, out: &mut Vec<Point>) {
        if depth == 0 || self.is_flat(tolerance) {
            out.push(self.0[3]);
            return;
        }
        let (a, b) = self.split();
        a.flatten_into(tolerance, depth - 1, out);
        b.flatten_into(tolerance, depth - 1, out);
    }
}

/// Flatten `path` after mapping its points through `transform`.
///
/// Every subpath becomes one polyline; a lone move produces a single-point
/// polyline.
pub(crate) fn flatten_path(
    path: &Path,
    transform: &Matrix,
    tolerance: f64,
    max_depth: u32,
) -> Vec<Polyline> {
    let tolerance = tolerance.max(1e-6);
    let mut lines: Vec<Polyline> = Vec::new();
    let mut current: Option<Polyline> = None;

    for op in path.ops() {
        match *op {
            PathOp::MoveTo(p) => {
                lines.extend(current.take());
                current = Some(Polyline::start(transform.map(p)));
            }
            PathOp::LineTo(p) => {
                let p = transform.map(p);
                match current.as_mut() {
                    Some(line) => line.points.push(p),
                    None => current = Some(Polyline::start(p)),
                }
            }
            PathOp::CurveTo(c1, c2, end) => {
                let line = current.get_or_insert_with(|| Polyline::start(transform.map(c1)));
                let start = line.points.last().copied().unwrap_or_else(|| transform.map(c1));
                let cubic = Cubic([start, transform.map(c1), transform.map(c2), transform.map(end)]);
                cubic.flatten_into(tolerance, max_depth, &mut line.points);
            }
            PathOp::ClosePath => {
                if let Some(mut line) = current.take() {
                    line.closed = true;
                    lines.push(line);
                }
            }
        }
    }
    lines.extend(current);
    lines
}

/// Bounds of every flattened point.
pub(crate) fn polyline_bounds(lines: &[Polyline]) -> Bounds {
    let mut bounds = Bounds::empty();
    for p in lines.iter().flat_map(|l| l.points.iter()) {
        bounds.add(*p);
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_flattens_to_closed_polyline() {
        let mut path = Path::new();
        path.rectangle(0.0, 0.0, 10.0, 5.0);
        let lines = flatten_path(&path, &Matrix::identity(), 0.1, 12);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].closed);
        assert_eq!(lines[0].points.len(), 4);
        assert_eq!(lines[0].segments().count(), 4);
    }

    #[test]
    fn test_curve_points_stay_near_curve() {
        let mut path = Path::new();
        path.arc(0.0, 0.0, 50.0, 0.0, std::f64::consts::PI);
        let lines = flatten_path(&path, &Matrix::identity(), 0.1, 12);
        assert!(lines[0].points.len() > 8);
        for p in &lines[0].points {
            let r = p.x.hypot(p.y);
            assert!((r - 50.0).abs() < 0.5, "point {p:?} off circle");
        }
    }

    #[test]
    fn test_transform_applied() {
        let mut path = Path::new();
        path.move_to(1.0, 1.0);
        path.line_to(2.0, 2.0);
        let lines = flatten_path(&path, &Matrix::scaling(2.0, 3.0), 0.1, 12);
        assert_eq!(lines[0].points, vec![Point::new(2.0, 3.0), Point::new(4.0, 6.0)]);
    }

    #[test]
    fn test_depth_cap_limits_points() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.curve_to(0.0, 1000.0, 1000.0, 1000.0, 1000.0, 0.0);
        let lines = flatten_path(&path, &Matrix::identity(), 1e-9, 3);
        // At most 2^3 pieces plus the start point.
        assert!(lines[0].points.len() <= 9);
    }
}
