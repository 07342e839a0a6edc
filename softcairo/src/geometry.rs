//! Small geometry value types shared across the crate.

/// A point in user, device, or pattern space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub(crate) fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A rectangle on the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RectangleInt {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RectangleInt {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersection of two rectangles; empty rectangles collapse to zero size.
    pub fn intersect(&self, other: &RectangleInt) -> RectangleInt {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);
        if x1 <= x0 || y1 <= y0 {
            RectangleInt::new(x0, y0, 0, 0)
        } else {
            RectangleInt::new(x0, y0, x1 - x0, y1 - y0)
        }
    }
}

/// Axis-aligned bounds accumulated from points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) min_x: f64,
    pub(crate) min_y: f64,
    pub(crate) max_x: f64,
    pub(crate) max_y: f64,
}

impl Bounds {
    pub(crate) fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub(crate) fn add(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub(crate) fn expand(&self, by: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - by,
            min_y: self.min_y - by,
            max_x: self.max_x + by,
            max_y: self.max_y + by,
        }
    }

    /// Smallest pixel rectangle covering these bounds.
    pub(crate) fn to_pixels(self) -> RectangleInt {
        if self.is_empty() {
            return RectangleInt::default();
        }
        let clamp = |v: f64| v.clamp(i32::MIN as f64 / 2.0, i32::MAX as f64 / 2.0);
        let x0 = clamp(self.min_x.floor()) as i32;
        let y0 = clamp(self.min_y.floor()) as i32;
        let x1 = clamp(self.max_x.ceil()) as i32;
        let y1 = clamp(self.max_y.ceil()) as i32;
        RectangleInt::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }
}

/// Parameters for a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    /// X coordinate of the arc center.
    pub xc: f64,
    /// Y coordinate of the arc center.
    pub yc: f64,
    /// Radius of the arc.
    pub radius: f64,
    /// Starting angle in radians.
    pub angle1: f64,
    /// Ending angle in radians.
    pub angle2: f64,
    /// If true, sweep in the direction of decreasing angles.
    pub negative: bool,
}
