//! Graphics state that can be saved and restored.

use crate::config::RenderConfig;
use crate::font::{FontFace, FontOptions};
use crate::matrix::Matrix;
use crate::path::Path;
use crate::pattern::Pattern;
use crate::style::{Antialias, FillRule, LineCap, LineJoin, Operator};
use crate::surface::Surface;
use std::sync::Arc;

/// One link of the clip chain.
///
/// The path is stored already mapped through the CTM, so later transform
/// changes do not move an established clip.
#[derive(Debug)]
pub(crate) struct ClipNode {
    pub(crate) path: Path,
    pub(crate) fill_rule: FillRule,
    pub(crate) tolerance: f64,
    pub(crate) antialias: Antialias,
    pub(crate) prev: Option<Arc<ClipNode>>,
}

impl ClipNode {
    /// Iterate from this node down to the oldest clip.
    pub(crate) fn chain(self: &Arc<Self>) -> impl Iterator<Item = &ClipNode> {
        std::iter::successors(Some(self.as_ref()), |node| node.prev.as_deref())
    }
}

/// Graphics state that can be saved and restored.
///
/// Cloning a state shares the source pattern, clip chain, target surface
/// and font face by reference count; everything else is copied.
#[derive(Debug, Clone)]
pub(crate) struct GraphicsState {
    /// Current paint source.
    pub(crate) source: Pattern,
    /// Current compositing operator.
    pub(crate) operator: Operator,
    /// Curve-flattening tolerance in device pixels.
    pub(crate) tolerance: f64,
    pub(crate) antialias: Antialias,
    pub(crate) fill_rule: FillRule,
    /// Line width in user units.
    pub(crate) line_width: f64,
    pub(crate) line_cap: LineCap,
    pub(crate) line_join: LineJoin,
    pub(crate) miter_limit: f64,
    /// Dash lengths in user units; empty means solid.
    pub(crate) dash: Vec<f64>,
    pub(crate) dash_offset: f64,
    /// User space to target space.
    pub(crate) ctm: Matrix,
    /// Innermost clip, or `None` when unclipped.
    pub(crate) clip: Option<Arc<ClipNode>>,
    /// Surface that drawing operations write to.
    pub(crate) target: Surface,
    /// Set on the state pushed by `push_group`.
    pub(crate) pushed_group: bool,
    pub(crate) font_face: FontFace,
    pub(crate) font_matrix: Matrix,
    pub(crate) font_options: FontOptions,
}

impl GraphicsState {
    pub(crate) fn new(target: Surface, config: &RenderConfig) -> Self {
        Self {
            source: Pattern::create_rgb(0.0, 0.0, 0.0),
            operator: Operator::default(),
            tolerance: config.tolerance,
            antialias: Antialias::default(),
            fill_rule: FillRule::default(),
            line_width: config.line_width,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: config.miter_limit,
            dash: Vec::new(),
            dash_offset: 0.0,
            ctm: Matrix::identity(),
            clip: None,
            target,
            pushed_group: false,
            font_face: FontFace::default(),
            font_matrix: Matrix::scaling(10.0, 10.0),
            font_options: FontOptions::default(),
        }
    }

    /// Transform from user space straight to target pixels, including the
    /// target's device scale and offset.
    pub(crate) fn device_matrix(&self) -> Matrix {
        Matrix::multiply(&self.ctm, &self.target.device_transform())
    }
}
