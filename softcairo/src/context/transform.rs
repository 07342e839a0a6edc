//! Current transformation matrix operations.

use super::Context;
use crate::error::{CairoError, CairoResult, Status};
use crate::matrix::Matrix;

impl Context {
    /// Install `ctm` if it is invertible; otherwise poison with `InvalidMatrix`.
    fn apply_ctm(&mut self, ctm: Matrix) -> CairoResult<()> {
        if !ctm.is_invertible() {
            return self.fail(CairoError::new(
                Status::InvalidMatrix,
                "transformation is not invertible",
            ));
        }
        self.state.ctm = ctm;
        Ok(())
    }

    pub fn translate(&mut self, tx: f64, ty: f64) -> CairoResult<()> {
        log::debug!(target: "cairo", "translate {tx} {ty}");
        self.check()?;
        let mut ctm = self.state.ctm;
        ctm.translate(tx, ty);
        self.apply_ctm(ctm)
    }

    /// Scale user space. A zero factor fails with `InvalidMatrix`.
    pub fn scale(&mut self, sx: f64, sy: f64) -> CairoResult<()> {
        log::debug!(target: "cairo", "scale {sx} {sy}");
        self.check()?;
        let mut ctm = self.state.ctm;
        ctm.scale(sx, sy);
        self.apply_ctm(ctm)
    }

    pub fn rotate(&mut self, radians: f64) -> CairoResult<()> {
        log::debug!(target: "cairo", "rotate {radians}");
        self.check()?;
        let mut ctm = self.state.ctm;
        ctm.rotate(radians);
        self.apply_ctm(ctm)
    }

    /// Apply `matrix` to user space before the current transformation.
    pub fn transform(&mut self, matrix: &Matrix) -> CairoResult<()> {
        log::debug!(target: "cairo", "transform {matrix:?}");
        self.check()?;
        self.apply_ctm(Matrix::multiply(matrix, &self.state.ctm))
    }

    /// Replace the current transformation.
    pub fn set_matrix(&mut self, matrix: Matrix) -> CairoResult<()> {
        log::debug!(target: "cairo", "set_matrix {matrix:?}");
        self.check()?;
        self.apply_ctm(matrix)
    }

    pub fn identity_matrix(&mut self) {
        log::debug!(target: "cairo", "identity_matrix");
        if self.is_ok() {
            self.state.ctm = Matrix::identity();
        }
    }

    pub fn get_matrix(&self) -> Matrix {
        self.state.ctm
    }

    /// Map a user-space point to device pixels.
    pub fn user_to_device(&self, x: f64, y: f64) -> (f64, f64) {
        self.state.device_matrix().transform_point(x, y)
    }

    pub fn user_to_device_distance(&self, dx: f64, dy: f64) -> (f64, f64) {
        self.state.device_matrix().transform_distance(dx, dy)
    }

    /// Map a device pixel position back to user space.
    pub fn device_to_user(&self, x: f64, y: f64) -> (f64, f64) {
        match self.state.device_matrix().inverted() {
            Ok(inverse) => inverse.transform_point(x, y),
            Err(_) => (x, y),
        }
    }

    pub fn device_to_user_distance(&self, dx: f64, dy: f64) -> (f64, f64) {
        match self.state.device_matrix().inverted() {
            Ok(inverse) => inverse.transform_distance(dx, dy),
            Err(_) => (dx, dy),
        }
    }
}
