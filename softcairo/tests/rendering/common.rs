//! Shared helpers for rendering tests.

use std::sync::Once;

// Re-export commonly used types so test modules can `use super::common::*`
pub use rstest::rstest;
pub use softcairo::{
    Antialias, Content, Context, Extend, Filter, FillRule, Format, Matrix, Operator, Pattern,
    Status, Surface,
};
pub use std::f64::consts::PI;

static LOGGER: Once = Once::new();

/// Route `log` output through the test harness.
pub fn init_logger() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Render a scene on a fresh transparent ARGB32 surface.
pub fn render(width: i32, height: i32, draw: impl FnOnce(&mut Context)) -> Surface {
    init_logger();
    let surface = Surface::create_image(Format::Argb32, width, height).unwrap();
    let mut ctx = Context::new(&surface);
    draw(&mut ctx);
    assert_eq!(ctx.status(), Status::Success, "scene left the context in error");
    surface
}

pub fn pixel(surface: &Surface, x: i32, y: i32) -> [u8; 4] {
    surface
        .get_pixel(x, y)
        .unwrap_or_else(|| panic!("pixel ({x}, {y}) out of bounds"))
}

/// Assert every channel is within `tolerance` of `expected`.
pub fn assert_pixel_near(surface: &Surface, x: i32, y: i32, expected: [u8; 4], tolerance: u8) {
    let actual = pixel(surface, x, y);
    let close = actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| a.abs_diff(*e) <= tolerance);
    assert!(
        close,
        "pixel ({x}, {y}) = {actual:?}, expected {expected:?} ± {tolerance}"
    );
}

/// Number of pixels with non-zero alpha.
pub fn inked_pixels(surface: &Surface) -> usize {
    let mut count = 0;
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            if pixel(surface, x, y)[3] > 0 {
                count += 1;
            }
        }
    }
    count
}
