//! Supersampled scanline fill.

use super::flatten::Polyline;
use super::Mask;
use crate::geometry::{Point, RectangleInt};
use crate::style::FillRule;

/// A non-horizontal polygon edge with `y0 < y1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    /// +1 for edges that run downward in path order, -1 for upward ones.
    dir: i32,
}

impl Edge {
    fn new(a: Point, b: Point) -> Option<Edge> {
        if a.y == b.y || !a.is_finite() || !b.is_finite() {
            return None;
        }
        Some(if a.y < b.y {
            Edge {
                x0: a.x,
                y0: a.y,
                x1: b.x,
                y1: b.y,
                dir: 1,
            }
        } else {
            Edge {
                x0: b.x,
                y0: b.y,
                x1: a.x,
                y1: a.y,
                dir: -1,
            }
        })
    }

    /// X where the edge crosses the horizontal line at `y`.
    fn x_at(&self, y: f64) -> f64 {
        self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0)
    }

    /// Half-open span test so a vertex shared by two edges is counted once.
    fn spans(&self, y: f64) -> bool {
        self.y0 <= y && y < self.y1
    }
}

/// Edges of the filled polygon. Every subpath is implicitly closed.
pub(crate) fn build_edges(lines: &[Polyline]) -> Vec<Edge> {
    let mut edges = Vec::new();
    for line in lines {
        let points = &line.points;
        if points.len() < 2 {
            continue;
        }
        for pair in points.windows(2) {
            edges.extend(Edge::new(pair[0], pair[1]));
        }
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            edges.extend(Edge::new(*last, *first));
        }
    }
    edges
}

/// Winding number of a horizontal ray from `p` toward +x.
pub(crate) fn winding_at(edges: &[Edge], p: Point) -> i32 {
    edges
        .iter()
        .filter(|e| e.spans(p.y) && e.x_at(p.y) > p.x)
        .map(|e| e.dir)
        .sum()
}

/// Coverage of the polygon over `area`, sampling a `grid`×`grid` lattice of
/// points in every pixel.
pub(crate) fn fill_coverage(
    edges: &[Edge],
    fill_rule: FillRule,
    grid: u32,
    area: RectangleInt,
    mut mask: Mask,
) -> Mask {
    if area.is_empty() || edges.is_empty() {
        return mask;
    }
    let grid = grid.max(1) as usize;
    let samples_per_pixel = (grid * grid) as f32;
    let width = area.width as usize;

    let mut sorted: Vec<Edge> = edges.to_vec();
    sorted.sort_by(|a, b| a.y0.total_cmp(&b.y0));

    let mut next_edge = 0;
    let mut active: Vec<Edge> = Vec::new();
    let mut crossings: Vec<(f64, i32)> = Vec::new();
    let mut counts = vec![0u32; width];

    for row in 0..area.height as usize {
        counts.iter_mut().for_each(|c| *c = 0);
        let py = area.y as f64 + row as f64;

        for sub_y in 0..grid {
            let sy = py + (sub_y as f64 + 0.5) / grid as f64;

            while next_edge < sorted.len() && sorted[next_edge].y0 <= sy {
                active.push(sorted[next_edge]);
                next_edge += 1;
            }
            active.retain(|e| e.y1 > sy);

            crossings.clear();
            crossings.extend(
                active
                    .iter()
                    .filter(|e| e.spans(sy))
                    .map(|e| (e.x_at(sy), e.dir)),
            );
            if crossings.is_empty() {
                continue;
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            // Sweeping left to right, the crossings passed so far are exactly
            // those a ray toward -x would meet; for a closed polygon that sum
            // is the negated winding of the ray toward +x.
            let mut winding = 0;
            let mut ci = 0;
            for sample in 0..width * grid {
                let sx = area.x as f64 + (sample as f64 + 0.5) / grid as f64;
                while ci < crossings.len() && crossings[ci].0 <= sx {
                    winding += crossings[ci].1;
                    ci += 1;
                }
                if fill_rule.is_inside(winding) {
                    counts[sample / grid] += 1;
                }
                if ci == crossings.len() && winding == 0 {
                    break;
                }
            }
        }

        for (col, count) in counts.iter().enumerate() {
            if *count > 0 {
                mask.set(
                    area.x + col as i32,
                    area.y + row as i32,
                    *count as f32 / samples_per_pixel,
                );
            }
        }
    }
    mask
}
