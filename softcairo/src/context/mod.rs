//! Drawing context: graphics-state stack, current path, and dispatch to the
//! rasterizer.

mod drawing;
mod group;
mod path_ops;
mod transform;

use crate::config::RenderConfig;
use crate::drawing_state::GraphicsState;
use crate::error::{CairoError, CairoResult, Status};
use crate::font::{FontFace, FontOptions, FontSlant, FontWeight};
use crate::matrix::Matrix;
use crate::path::Path;
use crate::pattern::Pattern;
use crate::raster::Rasterizer;
use crate::style::{Antialias, FillRule, LineCap, LineJoin, Operator};
use crate::surface::Surface;

/// Builder for [`Context`].
pub struct ContextBuilder {
    target: Surface,
    config: RenderConfig,
}

impl ContextBuilder {
    /// Create a builder drawing to `target`.
    pub fn new(target: &Surface) -> Self {
        Self {
            target: target.reference(),
            config: RenderConfig::default(),
        }
    }

    /// Use a custom rendering configuration.
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the context.
    pub fn build(self) -> Context {
        Context::new_internal(self.target, self.config)
    }
}

/// A drawing context bound to one target surface.
///
/// All drawing goes through `&mut self`: a context is used from one thread
/// at a time. Dropping it releases its reference to the target and to every
/// pattern and clip held by its saved states.
///
/// Errors are sticky. The first failing operation returns an error and puts
/// the context into that status; from then on every drawing or state call is
/// a no-op and [`Context::status`] reports the error.
pub struct Context {
    /// Current graphics state.
    pub(crate) state: GraphicsState,
    /// Saved states, oldest first.
    state_stack: Vec<GraphicsState>,
    /// Current path, already mapped through the CTM.
    pub(crate) path: Path,
    pub(crate) raster: Rasterizer,
    status: Status,
}

impl Context {
    /// Create a context drawing to `target` with the default configuration.
    ///
    /// A target that is in an error state or finished yields a context in
    /// that error status.
    pub fn new(target: &Surface) -> Self {
        Self::new_internal(target.reference(), RenderConfig::default())
    }

    /// Create a builder for more configuration options.
    pub fn builder(target: &Surface) -> ContextBuilder {
        ContextBuilder::new(target)
    }

    fn new_internal(target: Surface, config: RenderConfig) -> Self {
        log::trace!(target: "cairo", "create context for {target:?}");
        let status = match target.check() {
            Ok(()) => Status::Success,
            Err(e) => e.status(),
        };
        Self {
            state: GraphicsState::new(target, &config),
            state_stack: Vec::new(),
            path: Path::new(),
            raster: Rasterizer::new(config),
            status,
        }
    }

    /// Sticky error status of the context.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the context still accepts operations.
    pub(crate) fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// `Err` with the sticky status once the context is in an error state.
    pub(crate) fn check(&self) -> CairoResult<()> {
        self.status.to_result()
    }

    /// Record `err` as the sticky status (the first error wins) and return it.
    pub(crate) fn fail<T>(&mut self, err: CairoError) -> CairoResult<T> {
        if self.status.is_success() {
            log::warn!(target: "cairo", "context entered error status: {err}");
            self.status = err.status();
        }
        Err(err)
    }

    /// The surface the context was created for.
    pub fn target(&self) -> Surface {
        self.state_stack
            .first()
            .unwrap_or(&self.state)
            .target
            .reference()
    }

    /// Configuration the context was built with.
    pub fn config(&self) -> &RenderConfig {
        self.raster.config()
    }

    // --- State stack ---

    /// Push a copy of the current graphics state.
    pub fn save(&mut self) {
        log::debug!(target: "cairo", "save");
        if !self.is_ok() {
            return;
        }
        self.state_stack.push(self.state.clone());
        self.state.pushed_group = false;
    }

    /// Pop back to the most recently saved graphics state.
    ///
    /// Fails with `InvalidRestore` when there is no matching `save`, or when
    /// the top state belongs to a group that must be closed with `pop_group`.
    pub fn restore(&mut self) -> CairoResult<()> {
        log::debug!(target: "cairo", "restore");
        self.check()?;
        if self.state.pushed_group || self.state_stack.is_empty() {
            return self.fail(CairoError::new(
                Status::InvalidRestore,
                "restore without matching save",
            ));
        }
        self.pop_state();
        Ok(())
    }

    /// Replace the current state with the saved one; the stack is non-empty.
    pub(crate) fn pop_state(&mut self) -> Option<GraphicsState> {
        let saved = self.state_stack.pop()?;
        Some(std::mem::replace(&mut self.state, saved))
    }

    /// Number of saved states.
    pub fn save_depth(&self) -> usize {
        self.state_stack.len()
    }

    // --- Source ---

    /// Use `pattern` as the paint source.
    pub fn set_source(&mut self, pattern: &Pattern) -> CairoResult<()> {
        log::debug!(target: "cairo", "set_source {:?}", pattern.pattern_type());
        self.check()?;
        let status = pattern.status();
        if !status.is_success() {
            return self.fail(CairoError::new(status, "source pattern is in an error state"));
        }
        self.state.source = pattern.reference();
        Ok(())
    }

    /// Current paint source.
    pub fn get_source(&self) -> Pattern {
        self.state.source.reference()
    }

    /// Use an opaque color as the source.
    pub fn set_source_rgb(&mut self, red: f64, green: f64, blue: f64) {
        self.set_source_rgba(red, green, blue, 1.0);
    }

    /// Use a translucent color as the source.
    pub fn set_source_rgba(&mut self, red: f64, green: f64, blue: f64, alpha: f64) {
        log::debug!(target: "cairo", "set_source_rgba {red} {green} {blue} {alpha}");
        if !self.is_ok() {
            return;
        }
        self.state.source = Pattern::create_rgba(red, green, blue, alpha);
    }

    /// Paint from `surface` with its origin at user-space `(x, y)`.
    pub fn set_source_surface(&mut self, surface: &Surface, x: f64, y: f64) -> CairoResult<()> {
        log::debug!(target: "cairo", "set_source_surface {x} {y}");
        self.check()?;
        let pattern = Pattern::create_for_surface(surface);
        if let Err(e) = pattern.set_matrix(Matrix::translation(-x, -y)) {
            return self.fail(e);
        }
        self.set_source(&pattern)
    }

    // --- Scalar state ---

    pub fn set_operator(&mut self, op: Operator) {
        log::debug!(target: "cairo", "set_operator {op:?}");
        if self.is_ok() {
            self.state.operator = op;
        }
    }

    pub fn get_operator(&self) -> Operator {
        self.state.operator
    }

    /// Curve-flattening tolerance in device pixels. Non-positive or
    /// non-finite values are ignored.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        log::debug!(target: "cairo", "set_tolerance {tolerance}");
        if self.is_ok() && tolerance.is_finite() && tolerance > 0.0 {
            self.state.tolerance = tolerance;
        }
    }

    pub fn get_tolerance(&self) -> f64 {
        self.state.tolerance
    }

    pub fn set_antialias(&mut self, antialias: Antialias) {
        log::debug!(target: "cairo", "set_antialias {antialias:?}");
        if self.is_ok() {
            self.state.antialias = antialias;
        }
    }

    pub fn get_antialias(&self) -> Antialias {
        self.state.antialias
    }

    pub fn set_fill_rule(&mut self, fill_rule: FillRule) {
        log::debug!(target: "cairo", "set_fill_rule {fill_rule:?}");
        if self.is_ok() {
            self.state.fill_rule = fill_rule;
        }
    }

    pub fn get_fill_rule(&self) -> FillRule {
        self.state.fill_rule
    }

    /// Line width in user units. Negative widths become 0; non-finite
    /// values are ignored.
    pub fn set_line_width(&mut self, width: f64) {
        log::debug!(target: "cairo", "set_line_width {width}");
        if self.is_ok() && width.is_finite() {
            self.state.line_width = width.max(0.0);
        }
    }

    pub fn get_line_width(&self) -> f64 {
        self.state.line_width
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        log::debug!(target: "cairo", "set_line_cap {cap:?}");
        if self.is_ok() {
            self.state.line_cap = cap;
        }
    }

    pub fn get_line_cap(&self) -> LineCap {
        self.state.line_cap
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        log::debug!(target: "cairo", "set_line_join {join:?}");
        if self.is_ok() {
            self.state.line_join = join;
        }
    }

    pub fn get_line_join(&self) -> LineJoin {
        self.state.line_join
    }

    pub fn set_miter_limit(&mut self, limit: f64) {
        log::debug!(target: "cairo", "set_miter_limit {limit}");
        if self.is_ok() && limit.is_finite() {
            self.state.miter_limit = limit;
        }
    }

    pub fn get_miter_limit(&self) -> f64 {
        self.state.miter_limit
    }

    /// Set the dash pattern in user units. An empty slice disables dashing.
    ///
    /// Fails with `InvalidDash` for negative or non-finite lengths, or when
    /// every length is zero.
    pub fn set_dash(&mut self, dashes: &[f64], offset: f64) -> CairoResult<()> {
        log::debug!(target: "cairo", "set_dash {dashes:?} {offset}");
        self.check()?;
        let invalid = dashes.iter().any(|d| !d.is_finite() || *d < 0.0)
            || (!dashes.is_empty() && dashes.iter().all(|d| *d == 0.0))
            || !offset.is_finite();
        if invalid {
            return self.fail(CairoError::new(
                Status::InvalidDash,
                format!("invalid dash pattern {dashes:?}"),
            ));
        }
        self.state.dash = dashes.to_vec();
        self.state.dash_offset = offset;
        Ok(())
    }

    /// Current dash lengths and offset.
    pub fn get_dash(&self) -> (&[f64], f64) {
        (&self.state.dash, self.state.dash_offset)
    }

    pub fn get_dash_count(&self) -> usize {
        self.state.dash.len()
    }

    // --- Font state ---

    /// Select a toy font face by family, slant and weight.
    pub fn select_font_face(&mut self, family: &str, slant: FontSlant, weight: FontWeight) {
        log::debug!(target: "cairo", "select_font_face {family} {slant:?} {weight:?}");
        if self.is_ok() {
            self.state.font_face = FontFace::toy(family, slant, weight);
        }
    }

    pub fn set_font_face(&mut self, face: &FontFace) {
        if self.is_ok() {
            self.state.font_face = face.reference();
        }
    }

    pub fn get_font_face(&self) -> FontFace {
        self.state.font_face.reference()
    }

    /// Set a uniform font size; replaces the font matrix with a scale.
    pub fn set_font_size(&mut self, size: f64) {
        log::debug!(target: "cairo", "set_font_size {size}");
        if self.is_ok() && size.is_finite() {
            self.state.font_matrix = Matrix::scaling(size, size);
        }
    }

    /// Font space to user space matrix.
    pub fn set_font_matrix(&mut self, matrix: Matrix) -> CairoResult<()> {
        log::debug!(target: "cairo", "set_font_matrix {matrix:?}");
        self.check()?;
        if !matrix.is_invertible() {
            return self.fail(CairoError::new(
                Status::InvalidMatrix,
                "font matrix is not invertible",
            ));
        }
        self.state.font_matrix = matrix;
        Ok(())
    }

    pub fn get_font_matrix(&self) -> Matrix {
        self.state.font_matrix
    }

    /// Merge `options` into the current font options.
    pub fn set_font_options(&mut self, options: &FontOptions) {
        if self.is_ok() {
            self.state.font_options.merge(options);
        }
    }

    pub fn get_font_options(&self) -> FontOptions {
        self.state.font_options
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        log::trace!(
            target: "cairo",
            "context released with {} saved states",
            self.state_stack.len()
        );
    }
}
