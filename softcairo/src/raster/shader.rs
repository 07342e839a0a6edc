//! Pattern sampling at device pixels.

use crate::color::Color;
use crate::error::CairoResult;
use crate::geometry::Point;
use crate::gradient;
use crate::matrix::Matrix;
use crate::pattern::{Extend, Filter, PaintSource, Pattern};
use crate::surface::Image;

/// A pattern prepared for sampling in device space.
#[derive(Debug, Clone)]
pub(crate) struct Shader {
    source: PaintSource,
    /// Device pixel space to pattern space (or image pixel space for
    /// surface patterns).
    sample_matrix: Matrix,
}

impl Shader {
    /// Prepare `pattern` for a target whose user-to-device transform is
    /// `device_matrix`.
    pub(crate) fn new(pattern: &Pattern, device_matrix: &Matrix) -> CairoResult<Shader> {
        let (source, pattern_matrix) = pattern.paint_source()?;
        let to_user = device_matrix.inverted()?;
        let mut sample_matrix = Matrix::multiply(&to_user, &pattern_matrix);
        if let PaintSource::Surface { device, .. } = &source {
            sample_matrix = Matrix::multiply(&sample_matrix, device);
        }
        Ok(Shader {
            source,
            sample_matrix,
        })
    }

    /// Color at the center of device pixel `(x, y)`.
    pub(crate) fn pixel(&self, x: i32, y: i32) -> Color {
        if let PaintSource::Solid(color) = &self.source {
            return *color;
        }
        let p = self
            .sample_matrix
            .map(Point::new(x as f64 + 0.5, y as f64 + 0.5));
        match &self.source {
            PaintSource::Solid(color) => *color,
            PaintSource::Gradient {
                shape,
                stops,
                extend,
            } => gradient::evaluate(stops, *extend, shape.parameter(p)),
            PaintSource::Surface {
                image,
                extend,
                filter,
                ..
            } => match filter {
                Filter::Bilinear => sample_bilinear(image, *extend, p),
                _ => sample_nearest(image, *extend, p.x.floor(), p.y.floor()),
            },
        }
    }
}

/// Resolve one image coordinate per extend mode, or `None` when the sample
/// falls outside an unextended image.
fn resolve(coord: f64, size: usize, extend: Extend) -> Option<usize> {
    if size == 0 || !coord.is_finite() {
        return None;
    }
    let n = size as f64;
    let c = match extend {
        Extend::None => {
            if coord < 0.0 || coord >= n {
                return None;
            }
            coord
        }
        Extend::Pad => coord.clamp(0.0, n - 1.0),
        Extend::Repeat => coord.rem_euclid(n),
        Extend::Reflect => {
            let m = coord.rem_euclid(2.0 * n);
            if m >= n {
                2.0 * n - 1.0 - m
            } else {
                m
            }
        }
    };
    Some((c as usize).min(size - 1))
}

fn sample_nearest(image: &Image, extend: Extend, x: f64, y: f64) -> Color {
    match (
        resolve(x, image.width, extend),
        resolve(y, image.height, extend),
    ) {
        (Some(ix), Some(iy)) => Color::from_rgba8(image.pixel(ix, iy)),
        _ => Color::TRANSPARENT,
    }
}

/// Bilinear sample, interpolating premultiplied neighbors.
fn sample_bilinear(image: &Image, extend: Extend, p: Point) -> Color {
    let fx = p.x - 0.5;
    let fy = p.y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;

    let mut acc = [0.0f64; 4];
    for (dx, dy, w) in [
        (0.0, 0.0, (1.0 - tx) * (1.0 - ty)),
        (1.0, 0.0, tx * (1.0 - ty)),
        (0.0, 1.0, (1.0 - tx) * ty),
        (1.0, 1.0, tx * ty),
    ] {
        if w == 0.0 {
            continue;
        }
        let c = sample_nearest(image, extend, x0 + dx, y0 + dy);
        acc[0] += c.red * c.alpha * w;
        acc[1] += c.green * c.alpha * w;
        acc[2] += c.blue * c.alpha * w;
        acc[3] += c.alpha * w;
    }
    if acc[3] <= 1e-6 {
        return Color::TRANSPARENT;
    }
    Color::rgba(acc[0] / acc[3], acc[1] / acc[3], acc[2] / acc[3], acc[3])
}
