//! Gradient tests: linear and radial sampling, extend modes, transforms.

use super::common::*;

fn black_to_white_linear(x1: f64) -> Pattern {
    let gradient = Pattern::create_linear(0.0, 0.0, x1, 0.0);
    gradient.add_color_stop_rgb(0.0, 0.0, 0.0, 0.0).unwrap();
    gradient.add_color_stop_rgb(1.0, 1.0, 1.0, 1.0).unwrap();
    gradient
}

#[test]
fn test_linear_ramp_across_surface() {
    let surface = render(10, 1, |ctx| {
        ctx.set_source(&black_to_white_linear(10.0)).unwrap();
        ctx.paint().unwrap();
    });
    for x in 0..10 {
        let t = (x as f64 + 0.5) / 10.0;
        let v = (t * 255.0).round() as u8;
        assert_pixel_near(&surface, x, 0, [v, v, v, 255], 1);
    }
}

#[test]
fn test_linear_gradient_follows_ctm() {
    let surface = render(20, 1, |ctx| {
        ctx.scale(2.0, 2.0).unwrap();
        ctx.set_source(&black_to_white_linear(10.0)).unwrap();
        ctx.paint().unwrap();
    });
    // Device pixel 9 (center 9.5) is user x = 4.75.
    assert_pixel_near(&surface, 9, 0, [121, 121, 121, 255], 1);
}

#[test]
fn test_linear_gradient_pattern_matrix() {
    let surface = render(20, 1, |ctx| {
        let gradient = black_to_white_linear(10.0);
        // User x maps to pattern x / 2.
        gradient.set_matrix(Matrix::scaling(0.5, 1.0)).unwrap();
        ctx.set_source(&gradient).unwrap();
        ctx.paint().unwrap();
    });
    assert_pixel_near(&surface, 9, 0, [121, 121, 121, 255], 1);
    assert_pixel_near(&surface, 19, 0, [248, 248, 248, 255], 1);
}

#[test]
fn test_radial_gradient_distance() {
    let surface = render(21, 21, |ctx| {
        let gradient = Pattern::create_radial(10.0, 10.0, 0.0, 10.0, 10.0, 10.0);
        gradient.add_color_stop_rgb(0.0, 1.0, 0.0, 0.0).unwrap();
        gradient.add_color_stop_rgb(1.0, 0.0, 0.0, 1.0).unwrap();
        gradient.set_extend(Extend::Pad);
        ctx.set_source(&gradient).unwrap();
        ctx.paint().unwrap();
    });
    // Pixel (14, 10) has its center 4.528 from the gradient center.
    assert_pixel_near(&surface, 14, 10, [140, 0, 115, 255], 2);
    // Beyond the outer circle Pad holds the last stop.
    assert_pixel_near(&surface, 0, 0, [0, 0, 255, 255], 0);
}

/// Concentric circles map distance from the center over the outer radius,
/// whatever the inner radius is.
#[rstest]
#[case(5.0)]
#[case(10.0)]
fn test_radial_concentric_inner_radius(#[case] r0: f64) {
    let surface = render(21, 21, |ctx| {
        let gradient = Pattern::create_radial(10.5, 10.5, r0, 10.5, 10.5, 10.0);
        gradient.add_color_stop_rgb(0.0, 0.0, 0.0, 0.0).unwrap();
        gradient.add_color_stop_rgb(1.0, 1.0, 1.0, 1.0).unwrap();
        gradient.set_extend(Extend::Pad);
        ctx.set_source(&gradient).unwrap();
        ctx.paint().unwrap();
    });
    // Pixel (15, 10) has its center 5 from the gradient center: t = 0.5.
    assert_pixel_near(&surface, 15, 10, [128, 128, 128, 255], 1);
    // The center itself is t = 0.
    assert_pixel_near(&surface, 10, 10, [0, 0, 0, 255], 0);
}

#[test]
fn test_translucent_stops_interpolate_alpha() {
    let surface = render(10, 1, |ctx| {
        let gradient = Pattern::create_linear(0.0, 0.0, 10.0, 0.0);
        gradient.add_color_stop_rgba(0.0, 0.0, 0.0, 1.0, 0.0).unwrap();
        gradient.add_color_stop_rgba(1.0, 0.0, 0.0, 1.0, 1.0).unwrap();
        ctx.set_source(&gradient).unwrap();
        ctx.paint().unwrap();
    });
    let alpha = pixel(&surface, 4, 0)[3];
    assert!(alpha.abs_diff(115) <= 1, "alpha {alpha}");
    assert_eq!(pixel(&surface, 4, 0)[2], 255);
}

#[test]
fn test_stops_keep_insertion_order() {
    let gradient = Pattern::create_linear(0.0, 0.0, 1.0, 0.0);
    gradient.add_color_stop_rgb(0.7, 0.0, 1.0, 0.0).unwrap();
    gradient.add_color_stop_rgb(0.2, 1.0, 0.0, 0.0).unwrap();
    assert_eq!(gradient.color_stop_count().unwrap(), 2);
    assert_eq!(gradient.color_stop_rgba(0).unwrap().offset, 0.7);
    assert_eq!(gradient.color_stop_rgba(1).unwrap().offset, 0.2);
    assert_eq!(
        gradient.color_stop_rgba(2).unwrap_err(),
        Status::InvalidIndex
    );
}

/// Gradient from x = 5 to x = 10; pixel 0 samples t = -0.9, which Pad
/// clamps to 0 and Repeat wraps to 0.1.
#[rstest]
#[case(Extend::Pad, 0)]
#[case(Extend::Repeat, 26)]
fn test_extend_before_start(#[case] extend: Extend, #[case] expected: u8) {
    let surface = render(10, 1, |ctx| {
        let gradient = Pattern::create_linear(5.0, 0.0, 10.0, 0.0);
        gradient.add_color_stop_rgb(0.0, 0.0, 0.0, 0.0).unwrap();
        gradient.add_color_stop_rgb(1.0, 1.0, 1.0, 1.0).unwrap();
        gradient.set_extend(extend);
        ctx.set_source(&gradient).unwrap();
        ctx.rectangle(0.0, 0.0, 1.0, 1.0);
        ctx.fill().unwrap();
    });
    assert_pixel_near(&surface, 0, 0, [expected, expected, expected, 255], 1);
    // Only the filled pixel is touched.
    assert_eq!(pixel(&surface, 1, 0), [0, 0, 0, 0]);
}
