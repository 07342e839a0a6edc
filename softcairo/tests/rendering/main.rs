//! Rendering tests: draw small scenes and check pixels against values worked
//! out by hand.
//!
//! Each module covers one area of the rasterizer. Scenes are kept tiny so
//! expected coverage can be derived from pixel geometry.

mod common;

mod clipping;
mod fill_rules;
mod gradients;
mod groups;
mod operators;
mod patterns;
mod strokes;
