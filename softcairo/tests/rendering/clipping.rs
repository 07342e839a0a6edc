//! Clipping tests: rectangles, circles, fill rules, transforms, save/restore.

use super::common::*;

#[test]
fn test_clip_rect_limits_fill() {
    let surface = render(20, 20, |ctx| {
        ctx.rectangle(5.0, 5.0, 10.0, 10.0);
        ctx.clip();
        ctx.set_source_rgb(1.0, 0.0, 0.0);
        ctx.rectangle(0.0, 0.0, 20.0, 20.0);
        ctx.fill().unwrap();
    });
    assert_eq!(pixel(&surface, 5, 5), [255, 0, 0, 255]);
    assert_eq!(pixel(&surface, 14, 14), [255, 0, 0, 255]);
    assert_eq!(pixel(&surface, 4, 10), [0, 0, 0, 0]);
    assert_eq!(pixel(&surface, 15, 10), [0, 0, 0, 0]);
    assert_eq!(inked_pixels(&surface), 100);
}

#[test]
fn test_clip_circle() {
    let surface = render(40, 40, |ctx| {
        ctx.arc(20.0, 20.0, 10.0, 0.0, 2.0 * PI);
        ctx.clip();
        ctx.paint().unwrap();
    });
    assert_eq!(pixel(&surface, 20, 20)[3], 255);
    assert_eq!(pixel(&surface, 12, 12)[3], 0);
    assert_eq!(pixel(&surface, 20, 5)[3], 0);
}

#[test]
fn test_clip_even_odd_ring() {
    let surface = render(20, 20, |ctx| {
        ctx.set_fill_rule(FillRule::EvenOdd);
        ctx.rectangle(0.0, 0.0, 20.0, 20.0);
        ctx.rectangle(5.0, 5.0, 10.0, 10.0);
        ctx.clip();
        ctx.set_fill_rule(FillRule::Winding);
        ctx.paint().unwrap();
    });
    assert_eq!(pixel(&surface, 2, 2)[3], 255);
    assert_eq!(pixel(&surface, 10, 10)[3], 0);
}

#[test]
fn test_clip_fixed_when_transform_changes() {
    let surface = render(20, 20, |ctx| {
        ctx.translate(10.0, 0.0).unwrap();
        ctx.rectangle(0.0, 0.0, 5.0, 5.0);
        ctx.clip();
        ctx.identity_matrix();
        ctx.paint().unwrap();
    });
    assert_eq!(pixel(&surface, 12, 2)[3], 255);
    assert_eq!(pixel(&surface, 2, 2)[3], 0);
}

#[test]
fn test_clip_restored_by_restore() {
    let surface = render(10, 10, |ctx| {
        ctx.save();
        ctx.rectangle(0.0, 0.0, 2.0, 2.0);
        ctx.clip();
        ctx.restore().unwrap();
        ctx.paint().unwrap();
    });
    assert_eq!(inked_pixels(&surface), 100);
}

#[test]
fn test_clip_preserve_keeps_path() {
    let surface = render(10, 10, |ctx| {
        ctx.rectangle(2.0, 2.0, 4.0, 4.0);
        ctx.clip_preserve();
        ctx.set_source_rgb(0.0, 0.0, 1.0);
        ctx.fill().unwrap();
    });
    assert_eq!(pixel(&surface, 3, 3), [0, 0, 255, 255]);
    assert_eq!(inked_pixels(&surface), 16);
}

#[test]
fn test_antialiased_clip_edge() {
    let surface = render(4, 1, |ctx| {
        ctx.rectangle(0.0, 0.0, 1.5, 1.0);
        ctx.clip();
        ctx.paint().unwrap();
    });
    assert_eq!(pixel(&surface, 0, 0)[3], 255);
    assert_eq!(pixel(&surface, 1, 0)[3], 128);
    assert_eq!(pixel(&surface, 2, 0)[3], 0);
}

#[test]
fn test_empty_clip_blocks_everything() {
    let surface = render(4, 4, |ctx| {
        ctx.clip();
        ctx.paint().unwrap();
        assert_eq!(ctx.clip_extents(), (0.0, 0.0, 0.0, 0.0));
    });
    assert_eq!(inked_pixels(&surface), 0);
}
