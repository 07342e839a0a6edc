//! Stroke tests: widths, dashes, curves, and hit testing.

use super::common::*;

#[rstest]
#[case(2.0, 2)]
#[case(4.0, 4)]
#[case(6.0, 6)]
fn test_horizontal_stroke_width(#[case] width: f64, #[case] rows: usize) {
    let surface = render(20, 20, |ctx| {
        ctx.set_line_width(width);
        ctx.move_to(0.0, 10.0);
        ctx.line_to(20.0, 10.0);
        ctx.stroke().unwrap();
    });
    let solid_rows = (0..20)
        .filter(|&y| pixel(&surface, 10, y)[3] == 255)
        .count();
    assert_eq!(solid_rows, rows);
}

#[test]
fn test_dashed_line_gaps() {
    let surface = render(20, 4, |ctx| {
        ctx.set_line_width(2.0);
        ctx.set_dash(&[4.0, 4.0], 0.0).unwrap();
        ctx.move_to(0.0, 2.0);
        ctx.line_to(20.0, 2.0);
        ctx.stroke().unwrap();
    });
    // Dashes cover [0,4], [8,12], [16,20] plus a half-width cap overlap.
    assert_eq!(pixel(&surface, 1, 2)[3], 255);
    assert_eq!(pixel(&surface, 6, 2)[3], 0);
    assert_eq!(pixel(&surface, 10, 2)[3], 255);
    assert_eq!(pixel(&surface, 14, 2)[3], 0);
}

#[test]
fn test_dash_offset_shifts_pattern() {
    let surface = render(20, 4, |ctx| {
        ctx.set_line_width(2.0);
        ctx.set_dash(&[4.0, 4.0], 4.0).unwrap();
        ctx.move_to(0.0, 2.0);
        ctx.line_to(20.0, 2.0);
        ctx.stroke().unwrap();
    });
    // The pattern starts in its gap: dashes over [4,8] and [12,16].
    assert_eq!(pixel(&surface, 1, 2)[3], 0);
    assert_eq!(pixel(&surface, 6, 2)[3], 255);
}

#[test]
fn test_zero_length_segment_draws_dot() {
    let surface = render(10, 10, |ctx| {
        ctx.set_line_width(4.0);
        ctx.move_to(5.0, 5.0);
        ctx.line_to(5.0, 5.0);
        ctx.stroke().unwrap();
    });
    assert_eq!(pixel(&surface, 4, 4)[3], 255);
    assert_eq!(pixel(&surface, 5, 5)[3], 255);
    assert_eq!(pixel(&surface, 0, 0)[3], 0);
}

#[test]
fn test_stroked_circle_is_a_ring() {
    let surface = render(40, 40, |ctx| {
        ctx.set_line_width(2.0);
        ctx.arc(20.0, 20.0, 10.0, 0.0, 2.0 * PI);
        ctx.stroke().unwrap();
    });
    assert_eq!(pixel(&surface, 20, 20)[3], 0);
    assert_eq!(pixel(&surface, 29, 20)[3], 255);
    assert_eq!(pixel(&surface, 20, 29)[3], 255);
}

#[test]
fn test_translucent_stroke_joint_not_doubled() {
    let surface = render(20, 20, |ctx| {
        ctx.set_source_rgba(0.0, 0.0, 0.0, 0.5);
        ctx.set_line_width(4.0);
        ctx.move_to(2.0, 10.0);
        ctx.line_to(10.0, 10.0);
        ctx.line_to(10.0, 18.0);
        ctx.stroke().unwrap();
    });
    assert_eq!(pixel(&surface, 10, 10)[3], 128);
    assert_eq!(pixel(&surface, 5, 10)[3], 128);
}

#[test]
fn test_in_stroke_hit_test() {
    render(20, 20, |ctx| {
        ctx.set_line_width(4.0);
        ctx.move_to(0.0, 10.0);
        ctx.line_to(20.0, 10.0);
        assert!(ctx.in_stroke(5.0, 11.5));
        assert!(!ctx.in_stroke(5.0, 13.0));
        assert!(!ctx.in_fill(5.0, 11.5));
        ctx.new_path();
    });
}
