//! Path construction in user space.
//!
//! Points are mapped through the CTM as they are added, so changing the
//! transformation later does not move path segments already built.

use super::Context;
use crate::error::CairoResult;
use crate::geometry::{ArcParams, Bounds, Point};
use crate::matrix::Matrix;
use crate::path::Path;
use crate::raster::flatten::polyline_bounds;

impl Context {
    /// Clear the current path and current point.
    pub fn new_path(&mut self) {
        log::debug!(target: "cairo", "new_path");
        if !self.is_ok() {
            return;
        }
        self.path.clear();
    }

    /// Forget the current point without adding a segment.
    pub fn new_sub_path(&mut self) {
        log::debug!(target: "cairo", "new_sub_path");
        if !self.is_ok() {
            return;
        }
        self.path.new_sub_path();
    }

    fn to_path_space(&self, x: f64, y: f64) -> (f64, f64) {
        self.state.ctm.transform_point(x, y)
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        log::debug!(target: "cairo", "move_to {x} {y}");
        if !self.is_ok() {
            return;
        }
        let (x, y) = self.to_path_space(x, y);
        self.path.move_to(x, y);
    }

    /// Add a line to `(x, y)`; with no current point this only moves there.
    pub fn line_to(&mut self, x: f64, y: f64) {
        log::debug!(target: "cairo", "line_to {x} {y}");
        if !self.is_ok() {
            return;
        }
        let (x, y) = self.to_path_space(x, y);
        self.path.line_to(x, y);
    }

    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        log::debug!(target: "cairo", "curve_to {x1} {y1} {x2} {y2} {x3} {y3}");
        if !self.is_ok() {
            return;
        }
        let (x1, y1) = self.to_path_space(x1, y1);
        let (x2, y2) = self.to_path_space(x2, y2);
        let (x3, y3) = self.to_path_space(x3, y3);
        self.path.curve_to(x1, y1, x2, y2, x3, y3);
    }

    /// Quadratic Bézier, stored as the equivalent cubic.
    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        log::debug!(target: "cairo", "quad_to {cx} {cy} {x} {y}");
        if !self.is_ok() {
            return;
        }
        let (cx, cy) = self.to_path_space(cx, cy);
        let (x, y) = self.to_path_space(x, y);
        self.path.quad_to(cx, cy, x, y);
    }

    /// Close the current subpath back to its start.
    pub fn close_path(&mut self) {
        log::debug!(target: "cairo", "close_path");
        if !self.is_ok() {
            return;
        }
        self.path.close_path();
    }

    /// Relative move. Without a current point the offsets are taken as
    /// absolute user coordinates.
    pub fn rel_move_to(&mut self, dx: f64, dy: f64) {
        if !self.is_ok() {
            return;
        }
        if !self.path.has_current_point() {
            return self.move_to(dx, dy);
        }
        log::debug!(target: "cairo", "rel_move_to {dx} {dy}");
        let (dx, dy) = self.state.ctm.transform_distance(dx, dy);
        self.path.rel_move_to(dx, dy);
    }

    pub fn rel_line_to(&mut self, dx: f64, dy: f64) {
        if !self.is_ok() {
            return;
        }
        if !self.path.has_current_point() {
            return self.line_to(dx, dy);
        }
        log::debug!(target: "cairo", "rel_line_to {dx} {dy}");
        let (dx, dy) = self.state.ctm.transform_distance(dx, dy);
        self.path.rel_line_to(dx, dy);
    }

    pub fn rel_curve_to(&mut self, dx1: f64, dy1: f64, dx2: f64, dy2: f64, dx3: f64, dy3: f64) {
        if !self.is_ok() {
            return;
        }
        if !self.path.has_current_point() {
            return self.curve_to(dx1, dy1, dx2, dy2, dx3, dy3);
        }
        log::debug!(target: "cairo", "rel_curve_to {dx1} {dy1} {dx2} {dy2} {dx3} {dy3}");
        let m = self.state.ctm;
        let (dx1, dy1) = m.transform_distance(dx1, dy1);
        let (dx2, dy2) = m.transform_distance(dx2, dy2);
        let (dx3, dy3) = m.transform_distance(dx3, dy3);
        self.path.rel_curve_to(dx1, dy1, dx2, dy2, dx3, dy3);
    }

    /// Add a closed rectangle as its own subpath.
    pub fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        log::debug!(target: "cairo", "rectangle {x} {y} {width} {height}");
        if !self.is_ok() {
            return;
        }
        self.move_to(x, y);
        self.rel_line_to(width, 0.0);
        self.rel_line_to(0.0, height);
        self.rel_line_to(-width, 0.0);
        self.close_path();
    }

    /// Circular arc in increasing angle direction, joined to the current
    /// point by a line.
    pub fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        log::debug!(target: "cairo", "arc {xc} {yc} {radius} {angle1} {angle2}");
        self.append_arc(xc, yc, radius, angle1, angle2, false);
    }

    /// Circular arc in decreasing angle direction.
    pub fn arc_negative(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        log::debug!(target: "cairo", "arc_negative {xc} {yc} {radius} {angle1} {angle2}");
        self.append_arc(xc, yc, radius, angle1, angle2, true);
    }

    fn append_arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64, negative: bool) {
        if !self.is_ok() {
            return;
        }
        let params = ArcParams {
            xc,
            yc,
            radius,
            angle1,
            angle2,
            negative,
        };
        let ctm = self.state.ctm;
        self.path.append_arc(&params, &ctm);
    }

    pub fn has_current_point(&self) -> bool {
        self.path.has_current_point()
    }

    /// Current point in user space, or `(0, 0)` when there is none.
    pub fn get_current_point(&self) -> (f64, f64) {
        match self.path.current_point() {
            Some(p) => self.from_path_space(p),
            None => (0.0, 0.0),
        }
    }

    fn from_path_space(&self, p: Point) -> (f64, f64) {
        match self.state.ctm.inverted() {
            Ok(inverse) => inverse.transform_point(p.x, p.y),
            Err(_) => (p.x, p.y),
        }
    }

    /// Copy of the current path in user space.
    pub fn copy_path(&self) -> Path {
        match self.state.ctm.inverted() {
            Ok(inverse) => self.path.transformed(&inverse),
            Err(_) => self.path.clone(),
        }
    }

    /// Copy of the current path in user space with curves replaced by line
    /// segments within the current tolerance.
    pub fn copy_path_flat(&self) -> Path {
        let device = self.state.target.device_transform();
        let to_user = self
            .state
            .device_matrix()
            .inverted()
            .unwrap_or_else(|_| Matrix::identity());
        let mut flat = Path::new();
        for line in self.raster.flatten(&self.path, &device, self.state.tolerance) {
            let mut points = line.points.iter().map(|&p| to_user.map(p));
            if let Some(first) = points.next() {
                flat.move_to(first.x, first.y);
            }
            for p in points {
                flat.line_to(p.x, p.y);
            }
            if line.closed {
                flat.close_path();
            }
        }
        flat
    }

    /// Append a user-space path to the current path.
    ///
    /// Fails with `InvalidPathData` when `path` holds non-finite
    /// coordinates.
    pub fn append_path(&mut self, path: &Path) -> CairoResult<()> {
        log::debug!(target: "cairo", "append_path with {} ops", path.len());
        self.check()?;
        if let Err(e) = path.validate() {
            return self.fail(e);
        }
        let mapped = path.transformed(&self.state.ctm);
        self.path.append(&mapped);
        Ok(())
    }

    /// User-space bounding box `(x1, y1, x2, y2)` of the flattened path,
    /// ignoring stroke width. All zeros for an empty path.
    pub fn path_extents(&self) -> (f64, f64, f64, f64) {
        let device = self.state.target.device_transform();
        let lines = self.raster.flatten(&self.path, &device, self.state.tolerance);
        self.device_to_user_extents(polyline_bounds(&lines))
    }

    /// Bounding box in user space of a device-space box.
    pub(super) fn device_to_user_extents(&self, bounds: Bounds) -> (f64, f64, f64, f64) {
        if bounds.is_empty() {
            return (0.0, 0.0, 0.0, 0.0);
        }
        let Ok(to_user) = self.state.device_matrix().inverted() else {
            return (0.0, 0.0, 0.0, 0.0);
        };
        let mut user = Bounds::empty();
        for (x, y) in [
            (bounds.min_x, bounds.min_y),
            (bounds.max_x, bounds.min_y),
            (bounds.max_x, bounds.max_y),
            (bounds.min_x, bounds.max_y),
        ] {
            user.add(to_user.map(Point::new(x, y)));
        }
        (user.min_x, user.min_y, user.max_x, user.max_y)
    }
}
