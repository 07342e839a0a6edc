//! Distance-field stroking.
//!
//! Each segment is drawn as a capsule of radius `half_width` around the
//! segment; zero-length segments become discs. Joins and caps are not
//! modeled beyond what the overlapping capsules produce.

use super::flatten::Polyline;
use super::Mask;
use crate::geometry::{Point, RectangleInt};

/// Dash pattern in device units.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Dash {
    /// Alternating on/off lengths; an odd count is repeated once.
    pub(crate) lengths: Vec<f64>,
    pub(crate) offset: f64,
}

/// Walks the on/off phases of a dash pattern.
struct DashCursor<'a> {
    lengths: &'a [f64],
    index: usize,
    remaining: f64,
    on: bool,
}

impl<'a> DashCursor<'a> {
    fn new(dash: &'a Dash) -> Self {
        let mut cursor = DashCursor {
            lengths: &dash.lengths,
            index: 0,
            remaining: dash.lengths[0],
            on: true,
        };
        let period: f64 = dash.lengths.iter().sum::<f64>()
            * if dash.lengths.len() % 2 == 1 { 2.0 } else { 1.0 };
        if period > 0.0 {
            cursor.advance(dash.offset.rem_euclid(period));
        }
        cursor
    }

    fn step(&mut self) {
        self.index = (self.index + 1) % self.lengths.len();
        self.remaining = self.lengths[self.index];
        self.on = !self.on;
    }

    fn advance(&mut self, mut distance: f64) {
        while distance > 0.0 {
            if distance < self.remaining {
                self.remaining -= distance;
                return;
            }
            distance -= self.remaining;
            self.step();
        }
    }
}

/// Split polylines into the segments that are "on" under `dash`.
///
/// The pattern restarts at the beginning of every subpath.
pub(crate) fn apply_dash(lines: &[Polyline], dash: &Dash) -> Vec<(Point, Point)> {
    let mut out = Vec::new();
    for line in lines {
        let mut cursor = DashCursor::new(dash);
        for (a, b) in line.segments() {
            let len = a.distance_sq(b).sqrt();
            if len == 0.0 {
                if cursor.on {
                    out.push((a, b));
                }
                continue;
            }
            let mut pos = 0.0;
            while pos < len {
                let step = cursor.remaining.min(len - pos);
                if cursor.on && step > 0.0 {
                    out.push((along(a, b, len, pos), along(a, b, len, pos + step)));
                }
                pos += step;
                if step >= cursor.remaining {
                    cursor.step();
                } else {
                    cursor.remaining -= step;
                }
            }
        }
    }
    out
}

/// Point `distance` along the segment `a`-`b` of length `len`.
fn along(a: Point, b: Point, len: f64, distance: f64) -> Point {
    let ux = (b.x - a.x) / len;
    let uy = (b.y - a.y) / len;
    Point::new(a.x + ux * distance, a.y + uy * distance)
}

/// Segments of undashed polylines. A lone point contributes nothing.
pub(crate) fn solid_segments(lines: &[Polyline]) -> Vec<(Point, Point)> {
    lines.iter().flat_map(|l| l.segments()).collect()
}

/// Distance from `p` to the segment `a`-`b`.
pub(crate) fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq < 1e-12 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let cx = a.x + t * dx;
    let cy = a.y + t * dy;
    (p.x - cx).hypot(p.y - cy)
}

/// Accumulate the coverage of every segment into `mask`, keeping the
/// maximum per pixel so overlapping capsules are not counted twice.
pub(crate) fn stroke_coverage(
    segments: &[(Point, Point)],
    half_width: f64,
    hard_edges: bool,
    area: RectangleInt,
    mut mask: Mask,
) -> Mask {
    if half_width <= 0.0 || area.is_empty() {
        return mask;
    }
    let reach = half_width + 1.0;
    for &(a, b) in segments {
        let x0 = ((a.x.min(b.x) - reach).floor() as i32).max(area.x);
        let y0 = ((a.y.min(b.y) - reach).floor() as i32).max(area.y);
        let x1 = ((a.x.max(b.x) + reach).ceil() as i32).min(area.x + area.width);
        let y1 = ((a.y.max(b.y) + reach).ceil() as i32).min(area.y + area.height);

        for py in y0..y1 {
            for px in x0..x1 {
                let center = Point::new(px as f64 + 0.5, py as f64 + 0.5);
                let dist = distance_to_segment(center, a, b);
                let mut coverage = 1.0 - (dist - half_width + 0.5).clamp(0.0, 1.0);
                if hard_edges {
                    coverage = if coverage >= 0.5 { 1.0 } else { 0.0 };
                }
                if coverage > 0.0 {
                    mask.max(px, py, coverage as f32);
                }
            }
        }
    }
    mask
}
