//! Gradient geometry and color-stop evaluation.

use crate::color::{Color, ColorStop};
use crate::geometry::Point;
use crate::pattern::Extend;

const EPSILON: f64 = 1e-9;

/// Result of mapping a pattern-space point onto a gradient parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum GradientParam {
    /// Gradient parameter before the extend mode is applied.
    At(f64),
    /// The gradient has no direction; the first stop's color is used.
    Degenerate,
    /// No point of the gradient maps here; the sample is transparent.
    Outside,
}

/// Gradient geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum GradientShape {
    Linear {
        p0: Point,
        p1: Point,
    },
    Radial {
        c0: Point,
        r0: f64,
        c1: Point,
        r1: f64,
    },
}

impl GradientShape {
    /// Parameter `t` of the gradient at a point in pattern space.
    pub(crate) fn parameter(&self, p: Point) -> GradientParam {
        match *self {
            GradientShape::Linear { p0, p1 } => linear_parameter(p0, p1, p),
            GradientShape::Radial { c0, r0, c1, r1 } => radial_parameter(c0, r0, c1, r1, p),
        }
    }
}

fn linear_parameter(p0: Point, p1: Point, p: Point) -> GradientParam {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < EPSILON {
        return GradientParam::Degenerate;
    }
    GradientParam::At(((p.x - p0.x) * dx + (p.y - p0.y) * dy) / len_sq)
}

fn radial_parameter(c0: Point, r0: f64, c1: Point, r1: f64, p: Point) -> GradientParam {
    if r1.abs() < EPSILON {
        return GradientParam::At(0.0);
    }
    let dr = r1 - r0;

    // Concentric circles: t is the distance from the center over the outer
    // radius.
    if c0.distance_sq(c1) < EPSILON * EPSILON {
        let dist = p.distance_sq(c0).sqrt();
        return GradientParam::At(dist / r1.abs());
    }

    // Offset circles: find the largest t whose circle
    // (c0 + t*(c1-c0), r0 + t*dr) passes through p with a non-negative radius.
    let cdx = c1.x - c0.x;
    let cdy = c1.y - c0.y;
    let pdx = p.x - c0.x;
    let pdy = p.y - c0.y;

    let a = cdx * cdx + cdy * cdy - dr * dr;
    let b = pdx * cdx + pdy * cdy + r0 * dr;
    let c = pdx * pdx + pdy * pdy - r0 * r0;

    let radius_ok = |t: f64| r0 + t * dr >= 0.0;

    if a.abs() < EPSILON {
        if b.abs() < EPSILON {
            return GradientParam::Outside;
        }
        let t = c / (2.0 * b);
        return if radius_ok(t) {
            GradientParam::At(t)
        } else {
            GradientParam::Outside
        };
    }

    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return GradientParam::Outside;
    }
    let root = discriminant.sqrt();
    let t1 = (b + root) / a;
    let t2 = (b - root) / a;
    let (hi, lo) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };

    if radius_ok(hi) {
        GradientParam::At(hi)
    } else if radius_ok(lo) {
        GradientParam::At(lo)
    } else {
        GradientParam::Outside
    }
}

/// Map a raw gradient parameter into `[0, 1]` per the extend mode.
pub(crate) fn apply_extend(extend: Extend, t: f64) -> f64 {
    match extend {
        Extend::None | Extend::Pad => t.clamp(0.0, 1.0),
        Extend::Repeat => t.rem_euclid(1.0),
        Extend::Reflect => {
            let t = t.rem_euclid(2.0);
            if t > 1.0 {
                2.0 - t
            } else {
                t
            }
        }
    }
}

/// Interpolate the stop list at `t`.
///
/// Stops are scanned in insertion order. With no stops the result is black,
/// with one stop it is that stop's color. Parameters before the first stop
/// or after the last take the nearest end stop's color.
pub(crate) fn interpolate_stops(stops: &[ColorStop], t: f64) -> Color {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Color::BLACK,
    };
    if stops.len() == 1 || t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }

    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t >= a.offset && t <= b.offset {
            let span = b.offset - a.offset;
            if span.abs() < EPSILON {
                return b.color;
            }
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    last.color
}

/// Color of a gradient at an already-computed parameter.
pub(crate) fn evaluate(stops: &[ColorStop], extend: Extend, param: GradientParam) -> Color {
    match param {
        GradientParam::At(t) if t.is_finite() => interpolate_stops(stops, apply_extend(extend, t)),
        GradientParam::At(_) | GradientParam::Outside => Color::TRANSPARENT,
        GradientParam::Degenerate => stops.first().map_or(Color::BLACK, |s| s.color),
    }
}
