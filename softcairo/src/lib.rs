//! Pure Rust 2D software renderer with a Cairo-style object model.
//!
//! This crate draws vector paths into in-memory pixel buffers without any
//! native graphics library. It provides:
//! - [`Surface`] image buffers (ARGB32, RGB24, A8) with PNG import/export via `png`
//! - [`Context`] with a save/restore state stack, clipping, and offscreen groups
//! - [`Pattern`] paint sources: solid colors, linear and radial gradients, surfaces
//! - a supersampled scanline rasterizer with the full Porter-Duff and blend-mode
//!   operator set
//!
//! Surfaces and patterns are cheap reference-counted handles. Every object
//! carries a sticky [`Status`]: the first failure poisons it and later calls
//! become no-ops.
//!
//! # Example
//!
//! ```rust
//! use softcairo::{Context, Format, Surface};
//!
//! let surface = Surface::create_image(Format::Argb32, 100, 100)?;
//! let mut ctx = Context::new(&surface);
//! ctx.set_source_rgb(1.0, 0.0, 0.0);
//! ctx.rectangle(10.0, 10.0, 50.0, 30.0);
//! ctx.fill()?;
//! let png_data = surface.to_png()?;
//! # assert!(!png_data.is_empty());
//! # Ok::<(), softcairo::CairoError>(())
//! ```

mod arc;
mod color;
mod config;
mod context;
mod drawing_state;
mod error;
mod font;
mod geometry;
mod gradient;
mod matrix;
mod path;
mod pattern;
mod raster;
mod style;
mod surface;

// Re-export public API
pub use color::{Color, ColorStop};
pub use config::RenderConfig;
pub use context::{Context, ContextBuilder};
pub use error::{CairoError, CairoResult, Status};
pub use font::{
    FontFace, FontOptions, FontSlant, FontWeight, HintMetrics, HintStyle, SubpixelOrder,
    DEFAULT_FONT_FAMILY,
};
pub use geometry::{ArcParams, Point};
pub use matrix::{Decomposition, Matrix};
pub use path::{Path, PathOp};
pub use pattern::{Extend, Filter, Pattern, PatternType};
pub use style::{Antialias, FillRule, LineCap, LineJoin, Operator};
pub use surface::{Content, Format, Surface, SurfaceType, UserData, MAX_DIMENSION};
