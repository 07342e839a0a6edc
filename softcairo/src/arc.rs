//! Circular arcs approximated by cubic Bezier curves.

use crate::geometry::{ArcParams, Point};
use std::f64::consts::{FRAC_PI_2, PI};

/// Upper bound on whole turns kept when normalizing the sweep.
const MAX_FULL_CIRCLES: f64 = 65536.0;

/// One cubic segment of an arc approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ArcSegment {
    pub(crate) ctrl1: Point,
    pub(crate) ctrl2: Point,
    pub(crate) end: Point,
}

/// Bezier approximation of an arc, in the arc's own coordinate space.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ArcCurve {
    /// Start and end angles coincide; nothing is added to the path.
    Empty,
    /// Non-positive radius; the arc collapses to its center.
    Center(Point),
    /// Start point followed by at most quarter-turn cubic segments.
    Curves {
        start: Point,
        segments: Vec<ArcSegment>,
    },
}

/// Bring `angle2` onto the sweep direction of the arc.
///
/// Positive arcs end at or after `angle1`; negative arcs end at or before it.
fn normalize_sweep(angle1: f64, angle2: f64, negative: bool) -> f64 {
    let mut sweep = angle2 - angle1;
    let limit = 2.0 * PI * MAX_FULL_CIRCLES;
    if sweep.abs() > limit {
        sweep = sweep.signum() * (limit + sweep.abs() % (2.0 * PI));
    }
    if negative {
        if sweep > 0.0 {
            sweep = -(2.0 * PI - sweep.rem_euclid(2.0 * PI));
            if sweep == -2.0 * PI {
                sweep = 0.0;
            }
        }
    } else if sweep < 0.0 {
        sweep = sweep.rem_euclid(2.0 * PI);
    }
    sweep
}

/// Approximate an arc with cubic Bezier segments of at most a quarter turn.
pub(crate) fn arc_curve(params: &ArcParams) -> ArcCurve {
    let ArcParams {
        xc,
        yc,
        radius,
        angle1,
        angle2,
        negative,
    } = *params;

    if !(xc.is_finite() && yc.is_finite() && angle1.is_finite() && angle2.is_finite()) {
        return ArcCurve::Empty;
    }
    if angle1 == angle2 {
        return ArcCurve::Empty;
    }
    if radius <= 0.0 || !radius.is_finite() {
        return ArcCurve::Center(Point::new(xc, yc));
    }

    let sweep = normalize_sweep(angle1, angle2, negative);
    if sweep == 0.0 {
        return ArcCurve::Empty;
    }

    let num_segments = ((sweep.abs() / FRAC_PI_2).ceil() as usize).max(1);
    let delta = sweep / num_segments as f64;

    // Tangent length factor for a cubic spanning `delta` radians.
    let half_tan = (delta / 2.0).tan();
    let alpha = delta.sin() * ((4.0 + 3.0 * half_tan * half_tan).sqrt() - 1.0) / 3.0;

    let on_circle = |angle: f64| -> (f64, f64) {
        let (s, c) = angle.sin_cos();
        (c, s)
    };

    let (c1, s1) = on_circle(angle1);
    let start = Point::new(xc + radius * c1, yc + radius * s1);

    let mut segments = Vec::with_capacity(num_segments);
    for i in 0..num_segments {
        let a = angle1 + i as f64 * delta;
        let b = if i + 1 == num_segments {
            angle1 + sweep
        } else {
            a + delta
        };
        let (ca, sa) = on_circle(a);
        let (cb, sb) = on_circle(b);
        segments.push(ArcSegment {
            ctrl1: Point::new(
                xc + radius * (ca - alpha * sa),
                yc + radius * (sa + alpha * ca),
            ),
            ctrl2: Point::new(
                xc + radius * (cb + alpha * sb),
                yc + radius * (sb - alpha * cb),
            ),
            end: Point::new(xc + radius * cb, yc + radius * sb),
        });
    }

    ArcCurve::Curves { start, segments }
}
