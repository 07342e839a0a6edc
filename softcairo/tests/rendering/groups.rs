//! Group tests: offscreen rendering, opacity, nesting.

use super::common::*;

#[test]
fn test_group_opacity_applies_once() {
    // Two overlapping opaque squares in a group, painted at 50%: the
    // overlap is not darker than the rest.
    let surface = render(10, 10, |ctx| {
        ctx.push_group().unwrap();
        ctx.rectangle(0.0, 0.0, 6.0, 6.0);
        ctx.fill().unwrap();
        ctx.rectangle(4.0, 4.0, 6.0, 6.0);
        ctx.fill().unwrap();
        ctx.pop_group_to_source().unwrap();
        ctx.paint_with_alpha(0.5).unwrap();
    });
    assert_eq!(pixel(&surface, 1, 1)[3], 128);
    assert_eq!(pixel(&surface, 5, 5)[3], 128);
    assert_eq!(pixel(&surface, 8, 1)[3], 0);
}

#[test]
fn test_nested_groups() {
    let surface = render(4, 1, |ctx| {
        ctx.push_group().unwrap();
        ctx.set_source_rgb(1.0, 0.0, 0.0);
        ctx.rectangle(0.0, 0.0, 2.0, 1.0);
        ctx.fill().unwrap();

        ctx.push_group().unwrap();
        ctx.set_source_rgb(0.0, 0.0, 1.0);
        ctx.rectangle(1.0, 0.0, 2.0, 1.0);
        ctx.fill().unwrap();
        ctx.pop_group_to_source().unwrap();
        ctx.paint().unwrap();

        ctx.pop_group_to_source().unwrap();
        ctx.paint().unwrap();
    });
    assert_eq!(pixel(&surface, 0, 0), [255, 0, 0, 255]);
    assert_eq!(pixel(&surface, 1, 0), [0, 0, 255, 255]);
    assert_eq!(pixel(&surface, 2, 0), [0, 0, 255, 255]);
    assert_eq!(pixel(&surface, 3, 0), [0, 0, 0, 0]);
}

#[test]
fn test_group_inherits_clip() {
    let surface = render(4, 1, |ctx| {
        ctx.rectangle(0.0, 0.0, 2.0, 1.0);
        ctx.clip();
        ctx.push_group().unwrap();
        ctx.paint().unwrap();
        let group = ctx.get_group_target();
        assert_eq!(group.get_pixel(3, 0), Some([0, 0, 0, 0]));
        ctx.pop_group_to_source().unwrap();
        ctx.reset_clip();
        ctx.paint().unwrap();
    });
    assert_eq!(pixel(&surface, 1, 0)[3], 255);
    assert_eq!(pixel(&surface, 2, 0)[3], 0);
}

#[test]
fn test_alpha_group_as_mask_source() {
    let surface = render(2, 1, |ctx| {
        ctx.push_group_with_content(Content::Alpha).unwrap();
        ctx.rectangle(0.0, 0.0, 1.0, 1.0);
        ctx.fill().unwrap();
        let pattern = ctx.pop_group().unwrap();
        assert_eq!(pattern.surface().unwrap().format(), Format::A8);
        ctx.set_source(&pattern).unwrap();
        ctx.paint().unwrap();
    });
    assert_eq!(pixel(&surface, 0, 0), [0, 0, 0, 255]);
    assert_eq!(pixel(&surface, 1, 0), [0, 0, 0, 0]);
}

#[test]
fn test_group_on_device_scaled_target() {
    init_logger();
    let surface = Surface::create_image(Format::Argb32, 4, 4).unwrap();
    surface.set_device_scale(2.0, 2.0).unwrap();
    let mut ctx = Context::new(&surface);
    ctx.push_group().unwrap();
    assert_eq!(ctx.get_group_target().device_scale(), (2.0, 2.0));
    ctx.rectangle(0.0, 0.0, 1.0, 1.0);
    ctx.fill().unwrap();
    ctx.pop_group_to_source().unwrap();
    ctx.paint().unwrap();
    // One user unit covers a 2x2 block of pixels.
    assert_eq!(pixel(&surface, 1, 1)[3], 255);
    assert_eq!(pixel(&surface, 2, 2)[3], 0);
}
