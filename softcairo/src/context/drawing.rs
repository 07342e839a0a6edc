//! Fill, stroke, paint, and clip.

use super::Context;
use crate::drawing_state::ClipNode;
use crate::error::CairoResult;
use crate::geometry::{Bounds, Point, RectangleInt};
use crate::raster::flatten::polyline_bounds;
use crate::raster::{Dash, Mask, Shader, StrokeStyle};
use std::sync::Arc;

/// What a drawing call covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coverage {
    Fill,
    Stroke,
    /// The whole target, limited by the clip.
    Paint,
}

impl Context {
    /// Fill the current path with the source, then clear the path.
    pub fn fill(&mut self) -> CairoResult<()> {
        let result = self.fill_preserve();
        if self.is_ok() {
            self.path.clear();
        }
        result
    }

    /// Fill the current path and keep it.
    pub fn fill_preserve(&mut self) -> CairoResult<()> {
        log::debug!(target: "cairo", "fill {:?}", self.state.fill_rule);
        self.render(Coverage::Fill, 1.0)
    }

    /// Stroke the current path with the source, then clear the path.
    pub fn stroke(&mut self) -> CairoResult<()> {
        let result = self.stroke_preserve();
        if self.is_ok() {
            self.path.clear();
        }
        result
    }

    pub fn stroke_preserve(&mut self) -> CairoResult<()> {
        log::debug!(target: "cairo", "stroke width={}", self.state.line_width);
        self.render(Coverage::Stroke, 1.0)
    }

    /// Paint the source everywhere inside the clip.
    pub fn paint(&mut self) -> CairoResult<()> {
        log::debug!(target: "cairo", "paint");
        self.render(Coverage::Paint, 1.0)
    }

    /// Paint the source everywhere inside the clip at a constant opacity.
    pub fn paint_with_alpha(&mut self, alpha: f64) -> CairoResult<()> {
        log::debug!(target: "cairo", "paint_with_alpha {alpha}");
        self.render(Coverage::Paint, alpha.clamp(0.0, 1.0))
    }

    /// Stroke parameters in the units of `scale` (the average scale of the
    /// matrix the path will be flattened through).
    fn stroke_style(&self, scale: f64) -> StrokeStyle {
        let dash = if self.state.dash.is_empty() {
            None
        } else {
            Some(Dash {
                lengths: self.state.dash.iter().map(|d| d * scale).collect(),
                offset: self.state.dash_offset * scale,
            })
        };
        StrokeStyle {
            half_width: self.state.line_width * scale / 2.0,
            dash,
        }
    }

    fn render(&mut self, coverage: Coverage, alpha: f64) -> CairoResult<()> {
        self.check()?;
        let target = self.state.target.reference();
        if let Err(e) = target.check() {
            return self.fail(e);
        }
        // Surface sources are snapshotted here, before the target is locked.
        let device_matrix = self.state.device_matrix();
        let shader = match Shader::new(&self.state.source, &device_matrix) {
            Ok(shader) => shader,
            Err(e) => return self.fail(e),
        };

        let device = target.device_transform();
        let mut area = RectangleInt::new(0, 0, target.width(), target.height());
        if let Some(clip) = &self.state.clip {
            area = area.intersect(&self.raster.clip_bounds(clip, &device));
        }

        let mut mask = match coverage {
            Coverage::Fill => self.raster.fill_mask(
                &self.path,
                &device,
                self.state.fill_rule,
                self.state.tolerance,
                self.state.antialias,
                area,
            ),
            Coverage::Stroke => {
                let style = self.stroke_style(device_matrix.average_scale());
                self.raster
                    .stroke_mask(&self.path, &device, &style, self.state.antialias, area)
            }
            Coverage::Paint => Mask::full(area),
        };
        if let Some(clip) = self.state.clip.clone() {
            let clip_mask = self.raster.clip_mask(&clip, &device, mask.area());
            mask.intersect(&clip_mask);
            self.raster.recycle(clip_mask);
        }

        let result = match target.pixels_mut() {
            Ok(mut pixels) => {
                self.raster
                    .composite(&mut pixels, &mask, &shader, self.state.operator, alpha);
                Ok(())
            }
            Err(e) => Err(e),
        };
        self.raster.recycle(mask);
        match result {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e),
        }
    }

    // --- Clip ---

    /// Intersect the clip with the current path, then clear the path.
    pub fn clip(&mut self) {
        self.clip_preserve();
        if self.is_ok() {
            self.path.clear();
        }
    }

    /// Intersect the clip with the current path and keep the path.
    pub fn clip_preserve(&mut self) {
        log::debug!(target: "cairo", "clip {:?}", self.state.fill_rule);
        if !self.is_ok() {
            return;
        }
        let node = ClipNode {
            path: self.path.clone(),
            fill_rule: self.state.fill_rule,
            tolerance: self.state.tolerance,
            antialias: self.state.antialias,
            prev: self.state.clip.take(),
        };
        self.state.clip = Some(Arc::new(node));
    }

    /// Remove every clip.
    pub fn reset_clip(&mut self) {
        log::debug!(target: "cairo", "reset_clip");
        if self.is_ok() {
            self.state.clip = None;
        }
    }

    // --- Extents and hit testing ---

    /// User-space box `(x1, y1, x2, y2)` that `fill` would affect, ignoring
    /// the clip.
    pub fn fill_extents(&self) -> (f64, f64, f64, f64) {
        let device = self.state.target.device_transform();
        let lines = self.raster.flatten(&self.path, &device, self.state.tolerance);
        self.device_to_user_extents(polyline_bounds(&lines))
    }

    /// User-space box `(x1, y1, x2, y2)` that `stroke` would affect,
    /// including the line width.
    pub fn stroke_extents(&self) -> (f64, f64, f64, f64) {
        let device = self.state.target.device_transform();
        let style = self.stroke_style(self.state.device_matrix().average_scale());
        let lines = self.raster.flatten_for_stroke(&self.path, &device);
        let bounds = polyline_bounds(&lines);
        if bounds.is_empty() || style.half_width <= 0.0 {
            return (0.0, 0.0, 0.0, 0.0);
        }
        self.device_to_user_extents(bounds.expand(style.half_width))
    }

    /// User-space box of the area drawing can reach through the clip; the
    /// whole target when unclipped.
    pub fn clip_extents(&self) -> (f64, f64, f64, f64) {
        let target = &self.state.target;
        let mut area = RectangleInt::new(0, 0, target.width(), target.height());
        if let Some(clip) = &self.state.clip {
            area = area.intersect(&self.raster.clip_bounds(clip, &target.device_transform()));
        }
        if area.is_empty() {
            return (0.0, 0.0, 0.0, 0.0);
        }
        let mut bounds = Bounds::empty();
        bounds.add(Point::new(area.x as f64, area.y as f64));
        bounds.add(Point::new(
            (area.x + area.width) as f64,
            (area.y + area.height) as f64,
        ));
        self.device_to_user_extents(bounds)
    }

    fn user_point_to_device(&self, x: f64, y: f64) -> Point {
        self.state.device_matrix().map(Point::new(x, y))
    }

    /// Whether user-space `(x, y)` is inside the area `fill` would cover.
    pub fn in_fill(&self, x: f64, y: f64) -> bool {
        if !self.is_ok() {
            return false;
        }
        let device = self.state.target.device_transform();
        self.raster.contains_fill(
            &self.path,
            &device,
            self.state.fill_rule,
            self.state.tolerance,
            self.user_point_to_device(x, y),
        )
    }

    /// Whether user-space `(x, y)` is inside the area `stroke` would cover.
    pub fn in_stroke(&self, x: f64, y: f64) -> bool {
        if !self.is_ok() {
            return false;
        }
        let device = self.state.target.device_transform();
        let style = self.stroke_style(self.state.device_matrix().average_scale());
        self.raster
            .contains_stroke(&self.path, &device, &style, self.user_point_to_device(x, y))
    }

    /// Whether user-space `(x, y)` is visible through the clip.
    pub fn in_clip(&self, x: f64, y: f64) -> bool {
        if !self.is_ok() {
            return false;
        }
        match &self.state.clip {
            None => true,
            Some(clip) => self.raster.contains_clip(
                clip,
                &self.state.target.device_transform(),
                self.user_point_to_device(x, y),
            ),
        }
    }
}
