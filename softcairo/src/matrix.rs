//! Affine transformation matrices.

use crate::error::{CairoError, CairoResult, Status};
use crate::geometry::Point;
use std::ops::Mul;

/// Determinant magnitude below which a matrix is treated as singular.
const DEGENERATE_EPSILON: f64 = 1e-10;

/// A 2D affine transformation.
///
/// Points are row vectors multiplied on the left:
/// ```text
///                       | xx yx 0 |
/// [x' y' 1] = [x y 1] · | xy yy 0 |
///                       | x0 y0 1 |
/// ```
/// so `x' = xx·x + xy·y + x0` and `y' = yx·x + yy·y + y0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// X component of the X basis vector.
    pub xx: f64,
    /// Y component of the X basis vector.
    pub yx: f64,
    /// X component of the Y basis vector.
    pub xy: f64,
    /// Y component of the Y basis vector.
    pub yy: f64,
    /// X translation.
    pub x0: f64,
    /// Y translation.
    pub y0: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Translation, rotation, scale, and shear extracted from a matrix.
///
/// Rebuilding follows `compose`: the X basis is `scale_x·(cos r, sin r)` and
/// the Y basis is `scale_y·(shear·(cos r, sin r) + (−sin r, cos r))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposition {
    pub translate_x: f64,
    pub translate_y: f64,
    /// Rotation in radians, in (−π, π].
    pub rotation: f64,
    /// Negative when the matrix contains a reflection.
    pub scale_x: f64,
    pub scale_y: f64,
    pub shear: f64,
}

impl Decomposition {
    /// Rebuild the matrix this decomposition was taken from.
    pub fn compose(&self) -> Matrix {
        let (sin, cos) = self.rotation.sin_cos();
        Matrix {
            xx: self.scale_x * cos,
            yx: self.scale_x * sin,
            xy: self.scale_y * (self.shear * cos - sin),
            yy: self.scale_y * (self.shear * sin + cos),
            x0: self.translate_x,
            y0: self.translate_y,
        }
    }
}

impl Matrix {
    /// Create a matrix from its six components.
    pub fn new(xx: f64, yx: f64, xy: f64, yy: f64, x0: f64, y0: f64) -> Self {
        Self {
            xx,
            yx,
            xy,
            yy,
            x0,
            y0,
        }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// A pure translation.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// A pure scale.
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// A rotation by `radians`; positive angles turn the X axis toward the Y axis.
    pub fn rotation(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    /// A shear: `x' = x + shx·y`, `y' = shy·x + y`.
    pub fn skewing(shx: f64, shy: f64) -> Self {
        Self::new(1.0, shy, shx, 1.0, 0.0, 0.0)
    }

    /// `a∘b`: the transform that applies `a` first, then `b`.
    pub fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
        Matrix {
            xx: a.xx * b.xx + a.yx * b.xy,
            yx: a.xx * b.yx + a.yx * b.yy,
            xy: a.xy * b.xx + a.yy * b.xy,
            yy: a.xy * b.yx + a.yy * b.yy,
            x0: a.x0 * b.xx + a.y0 * b.xy + b.x0,
            y0: a.x0 * b.yx + a.y0 * b.yy + b.y0,
        }
    }

    /// Prepend a translation, so it applies before the existing transform.
    pub fn translate(&mut self, tx: f64, ty: f64) {
        *self = Matrix::multiply(&Matrix::translation(tx, ty), self);
    }

    /// Prepend a scale.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        *self = Matrix::multiply(&Matrix::scaling(sx, sy), self);
    }

    /// Prepend a rotation.
    pub fn rotate(&mut self, radians: f64) {
        *self = Matrix::multiply(&Matrix::rotation(radians), self);
    }

    /// Prepend a shear.
    pub fn skew(&mut self, shx: f64, shy: f64) {
        *self = Matrix::multiply(&Matrix::skewing(shx, shy), self);
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        self.xx * self.yy - self.yx * self.xy
    }

    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det.abs() >= DEGENERATE_EPSILON
    }

    pub fn is_identity(&self) -> bool {
        *self == Matrix::identity()
    }

    /// Map a point, including translation.
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        let (dx, dy) = self.transform_distance(x, y);
        (dx + self.x0, dy + self.y0)
    }

    /// Map a vector, ignoring translation.
    pub fn transform_distance(&self, dx: f64, dy: f64) -> (f64, f64) {
        (self.xx * dx + self.xy * dy, self.yx * dx + self.yy * dy)
    }

    pub(crate) fn map(&self, p: Point) -> Point {
        let (x, y) = self.transform_point(p.x, p.y);
        Point::new(x, y)
    }

    /// Invert in place. On failure the matrix is left unchanged.
    pub fn invert(&mut self) -> CairoResult<()> {
        *self = self.inverted()?;
        Ok(())
    }

    /// The inverse transform, or `InvalidMatrix` when `|det| < 1e-10`.
    pub fn inverted(&self) -> CairoResult<Matrix> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < DEGENERATE_EPSILON {
            return Err(CairoError::new(
                Status::InvalidMatrix,
                format!("matrix determinant {det} is degenerate"),
            ));
        }
        Ok(Matrix {
            xx: self.yy / det,
            yx: -self.yx / det,
            xy: -self.xy / det,
            yy: self.xx / det,
            x0: (self.xy * self.y0 - self.yy * self.x0) / det,
            y0: (self.yx * self.x0 - self.xx * self.y0) / det,
        })
    }

    /// Split into translation, rotation, scale, and shear.
    ///
    /// Fails with `InvalidMatrix` when either basis vector has zero length or
    /// the two bases are collinear.
    pub fn decompose(&self) -> CairoResult<Decomposition> {
        let len_x = self.xx.hypot(self.yx);
        let len_y = self.xy.hypot(self.yy);
        if len_x == 0.0 || len_y == 0.0 || !len_x.is_finite() || !len_y.is_finite() {
            return Err(CairoError::new(
                Status::InvalidMatrix,
                "cannot decompose a matrix with a zero-length basis vector",
            ));
        }

        let mut scale_x = len_x;
        let (mut nx, mut ny) = (self.xx / len_x, self.yx / len_x);
        // A reflection is folded into a negative X scale.
        if self.determinant() < 0.0 {
            scale_x = -scale_x;
            nx = -nx;
            ny = -ny;
        }
        let rotation = ny.atan2(nx);

        let along = nx * self.xy + ny * self.yy;
        let px = self.xy - along * nx;
        let py = self.yy - along * ny;
        let scale_y = px.hypot(py);
        if scale_y == 0.0 {
            return Err(CairoError::new(
                Status::InvalidMatrix,
                "cannot decompose a matrix with collinear basis vectors",
            ));
        }

        Ok(Decomposition {
            translate_x: self.x0,
            translate_y: self.y0,
            rotation,
            scale_x,
            scale_y,
            shear: along / scale_y,
        })
    }

    /// Average length of the two basis vectors; used to bring user-space
    /// lengths such as the line width into device space.
    pub(crate) fn average_scale(&self) -> f64 {
        (self.xx.hypot(self.yx) + self.xy.hypot(self.yy)) / 2.0
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    /// `a * b` applies `a` first, then `b`.
    fn mul(self, rhs: Matrix) -> Matrix {
        Matrix::multiply(&self, &rhs)
    }
}
