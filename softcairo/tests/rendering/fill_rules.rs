//! Fill tests: winding rules, antialiasing, and curve flattening.

use super::common::*;

/// Five-point star drawn in one stroke: the center pentagon has winding 2.
fn star(ctx: &mut Context) {
    let (cx, cy, r) = (20.0, 20.0, 18.0);
    for i in 0..5 {
        let angle = -PI / 2.0 + i as f64 * 4.0 * PI / 5.0;
        let (x, y) = (cx + r * angle.cos(), cy + r * angle.sin());
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.close_path();
}

#[rstest]
#[case(FillRule::Winding, 255)]
#[case(FillRule::EvenOdd, 0)]
fn test_star_center(#[case] rule: FillRule, #[case] center_alpha: u8) {
    let surface = render(40, 40, |ctx| {
        ctx.set_fill_rule(rule);
        star(ctx);
        ctx.fill().unwrap();
    });
    assert_eq!(pixel(&surface, 20, 20)[3], center_alpha);
    // A point inside one of the tips is filled either way.
    assert_eq!(pixel(&surface, 20, 5)[3], 255);
}

#[test]
fn test_circle_area_matches_pi_r_squared() {
    let r = 15.0;
    let surface = render(40, 40, |ctx| {
        ctx.set_antialias(Antialias::None);
        ctx.arc(20.0, 20.0, r, 0.0, 2.0 * PI);
        ctx.fill().unwrap();
    });
    let expected = PI * r * r;
    let inked = inked_pixels(&surface) as f64;
    assert!(
        (inked - expected).abs() / expected < 0.03,
        "{inked} pixels vs {expected}"
    );
}

#[test]
fn test_diagonal_edge_is_antialiased() {
    let surface = render(10, 10, |ctx| {
        ctx.move_to(0.0, 0.0);
        ctx.line_to(10.0, 10.0);
        ctx.line_to(0.0, 10.0);
        ctx.close_path();
        ctx.fill().unwrap();
    });
    // Pixels on the diagonal are cut in half; 16 samples give 6/16 or more.
    let alpha = pixel(&surface, 4, 4)[3];
    assert!((80..=176).contains(&alpha), "alpha {alpha}");
    assert_eq!(pixel(&surface, 1, 8)[3], 255);
    assert_eq!(pixel(&surface, 8, 1)[3], 0);
}

#[rstest]
#[case(0.25, 64)]
#[case(0.5, 128)]
#[case(0.75, 191)]
fn test_fractional_edge_coverage(#[case] fraction: f64, #[case] alpha: u8) {
    let surface = render(3, 1, |ctx| {
        ctx.rectangle(0.0, 0.0, 1.0 + fraction, 1.0);
        ctx.fill().unwrap();
    });
    assert_eq!(pixel(&surface, 0, 0)[3], 255);
    assert_eq!(pixel(&surface, 1, 0)[3], alpha);
    assert_eq!(pixel(&surface, 2, 0)[3], 0);
}

#[test]
fn test_fill_under_rotation() {
    let surface = render(20, 20, |ctx| {
        ctx.translate(10.0, 10.0).unwrap();
        ctx.rotate(PI / 4.0).unwrap();
        ctx.rectangle(-4.0, -4.0, 8.0, 8.0);
        ctx.fill().unwrap();
    });
    // The rotated square reaches about 5.66 pixels from the center along
    // the axes, but the corners of the unrotated square stay empty.
    assert_eq!(pixel(&surface, 10, 6)[3], 255);
    assert_eq!(pixel(&surface, 6, 6)[3], 0);
}

#[test]
fn test_fill_outside_target_is_clipped() {
    let surface = render(4, 4, |ctx| {
        ctx.rectangle(-100.0, -100.0, 102.0, 1000.0);
        ctx.fill().unwrap();
    });
    assert_eq!(pixel(&surface, 1, 3)[3], 255);
    assert_eq!(pixel(&surface, 2, 0)[3], 0);
}
