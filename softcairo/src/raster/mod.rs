//! Software rasterizer: coverage masks, clip masks, and compositing.

mod composite;
mod fill;
pub(crate) mod flatten;
mod shader;
mod stroke;

pub(crate) use shader::Shader;
pub(crate) use stroke::Dash;

use crate::config::RenderConfig;
use crate::drawing_state::ClipNode;
use crate::geometry::{Point, RectangleInt};
use crate::matrix::Matrix;
use crate::path::Path;
use crate::style::{Antialias, FillRule, Operator};
use crate::surface::PixelsMut;
use flatten::{flatten_path, polyline_bounds, Polyline};
use std::sync::Arc;

/// Per-pixel coverage over a rectangle of device pixels.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Mask {
    area: RectangleInt,
    data: Vec<f32>,
}

impl Mask {
    pub(crate) fn new(area: RectangleInt) -> Self {
        Self::with_buffer(area, Vec::new())
    }

    fn with_buffer(area: RectangleInt, mut data: Vec<f32>) -> Self {
        let len = if area.is_empty() {
            0
        } else {
            area.width as usize * area.height as usize
        };
        data.clear();
        data.resize(len, 0.0);
        Self { area, data }
    }

    /// Mask covering every pixel of `area` fully.
    pub(crate) fn full(area: RectangleInt) -> Self {
        let mut mask = Self::new(area);
        mask.data.iter_mut().for_each(|v| *v = 1.0);
        mask
    }

    pub(crate) fn area(&self) -> RectangleInt {
        self.area
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let a = &self.area;
        if x < a.x || y < a.y || x >= a.x + a.width || y >= a.y + a.height {
            return None;
        }
        Some((y - a.y) as usize * a.width as usize + (x - a.x) as usize)
    }

    /// Coverage at device pixel `(x, y)`; zero outside the mask.
    pub(crate) fn get(&self, x: i32, y: i32) -> f32 {
        self.index(x, y).map_or(0.0, |i| self.data[i])
    }

    pub(crate) fn set(&mut self, x: i32, y: i32, value: f32) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = value;
        }
    }

    pub(crate) fn max(&mut self, x: i32, y: i32, value: f32) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = self.data[i].max(value);
        }
    }

    /// Multiply every pixel by the other mask's coverage.
    pub(crate) fn intersect(&mut self, other: &Mask) {
        let area = self.area;
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                let i = (y - area.y) as usize * area.width as usize + (x - area.x) as usize;
                self.data[i] *= other.get(x, y);
            }
        }
    }
}

/// Stroke parameters in device units.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StrokeStyle {
    pub(crate) half_width: f64,
    pub(crate) dash: Option<Dash>,
}

/// Turns paths into coverage and coverage into pixels.
///
/// Holds a recycled coverage buffer so repeated drawing does not
/// reallocate.
#[derive(Debug)]
pub(crate) struct Rasterizer {
    config: RenderConfig,
    buffer: Vec<f32>,
}

impl Rasterizer {
    pub(crate) fn new(config: RenderConfig) -> Self {
        Self {
            config,
            buffer: Vec::new(),
        }
    }

    pub(crate) fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn mask(&mut self, area: RectangleInt) -> Mask {
        Mask::with_buffer(area, std::mem::take(&mut self.buffer))
    }

    /// Hand a finished mask's storage back for reuse.
    pub(crate) fn recycle(&mut self, mask: Mask) {
        if mask.data.capacity() > self.buffer.capacity() {
            self.buffer = mask.data;
        }
    }

    /// Flatten with the configured subdivision depth.
    pub(crate) fn flatten(&self, path: &Path, device: &Matrix, tolerance: f64) -> Vec<Polyline> {
        flatten_path(path, device, tolerance, self.config.max_subdivision_depth)
    }

    /// Flatten with the fixed stroke tolerance.
    pub(crate) fn flatten_for_stroke(&self, path: &Path, device: &Matrix) -> Vec<Polyline> {
        flatten_path(
            path,
            device,
            self.config.stroke_tolerance,
            self.config.max_subdivision_depth,
        )
    }

    /// Pixel rectangle that can be touched through every clip in the chain.
    pub(crate) fn clip_bounds(&self, clip: &Arc<ClipNode>, device: &Matrix) -> RectangleInt {
        let mut area: Option<RectangleInt> = None;
        for node in clip.chain() {
            let lines = self.flatten(&node.path, device, node.tolerance);
            let bounds = polyline_bounds(&lines).to_pixels();
            area = Some(match area {
                Some(a) => a.intersect(&bounds),
                None => bounds,
            });
        }
        area.unwrap_or_default()
    }

    /// Whether a device point lies inside every clip in the chain.
    pub(crate) fn contains_clip(&self, clip: &Arc<ClipNode>, device: &Matrix, point: Point) -> bool {
        clip.chain().all(|node| {
            self.contains_fill(&node.path, device, node.fill_rule, node.tolerance, point)
        })
    }

    /// Coverage of the filled path over `clip_area`.
    pub(crate) fn fill_mask(
        &mut self,
        path: &Path,
        device: &Matrix,
        fill_rule: FillRule,
        tolerance: f64,
        antialias: Antialias,
        clip_area: RectangleInt,
    ) -> Mask {
        let lines = self.flatten(path, device, tolerance);
        let area = polyline_bounds(&lines).to_pixels().intersect(&clip_area);
        let edges = fill::build_edges(&lines);
        let mask = self.mask(area);
        fill::fill_coverage(
            &edges,
            fill_rule,
            antialias.grid(self.config.supersample_grid),
            area,
            mask,
        )
    }

    /// Coverage of the stroked path over `clip_area`.
    pub(crate) fn stroke_mask(
        &mut self,
        path: &Path,
        device: &Matrix,
        style: &StrokeStyle,
        antialias: Antialias,
        clip_area: RectangleInt,
    ) -> Mask {
        let lines = self.flatten_for_stroke(path, device);
        let area = polyline_bounds(&lines)
            .expand(style.half_width + 1.0)
            .to_pixels()
            .intersect(&clip_area);
        let segments = Self::stroke_segments(&lines, style);
        let mask = self.mask(area);
        stroke::stroke_coverage(
            &segments,
            style.half_width,
            antialias == Antialias::None,
            area,
            mask,
        )
    }

    fn stroke_segments(lines: &[Polyline], style: &StrokeStyle) -> Vec<(Point, Point)> {
        match &style.dash {
            Some(dash) => stroke::apply_dash(lines, dash),
            None => stroke::solid_segments(lines),
        }
    }

    /// Combined coverage of every clip in the chain: the product of each
    /// node's fill coverage.
    pub(crate) fn clip_mask(
        &mut self,
        clip: &Arc<ClipNode>,
        device: &Matrix,
        area: RectangleInt,
    ) -> Mask {
        let mut combined = Mask::full(area);
        for node in clip.chain() {
            let lines = self.flatten(&node.path, device, node.tolerance);
            let edges = fill::build_edges(&lines);
            let node_mask = fill::fill_coverage(
                &edges,
                node.fill_rule,
                node.antialias.grid(self.config.supersample_grid),
                area,
                Mask::new(area),
            );
            combined.intersect(&node_mask);
        }
        combined
    }

    /// Whether a device point lies inside the filled path.
    pub(crate) fn contains_fill(
        &self,
        path: &Path,
        device: &Matrix,
        fill_rule: FillRule,
        tolerance: f64,
        point: Point,
    ) -> bool {
        let lines = self.flatten(path, device, tolerance);
        let edges = fill::build_edges(&lines);
        fill_rule.is_inside(fill::winding_at(&edges, point))
    }

    /// Whether a device point lies within the stroke's capsules.
    pub(crate) fn contains_stroke(
        &self,
        path: &Path,
        device: &Matrix,
        style: &StrokeStyle,
        point: Point,
    ) -> bool {
        let lines = self.flatten_for_stroke(path, device);
        Self::stroke_segments(&lines, style)
            .iter()
            .any(|&(a, b)| stroke::distance_to_segment(point, a, b) <= style.half_width)
    }

    /// Composite `shader` through `mask` into `pixels`, scaling coverage by
    /// `alpha`. Pixels outside the mask, or with zero coverage, are left
    /// untouched.
    pub(crate) fn composite(
        &self,
        pixels: &mut PixelsMut<'_>,
        mask: &Mask,
        shader: &Shader,
        op: Operator,
        alpha: f64,
    ) {
        let target = RectangleInt::new(0, 0, pixels.width() as i32, pixels.height() as i32);
        let area = mask.area().intersect(&target);
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                let coverage = f64::from(mask.get(x, y)) * alpha;
                if coverage <= 0.0 {
                    continue;
                }
                let (px, py) = (x as usize, y as usize);
                let dst = pixels.read(px, py);
                let out = composite::composite_pixel(dst, shader.pixel(x, y), coverage, op);
                pixels.write(px, py, out);
            }
        }
    }
}
