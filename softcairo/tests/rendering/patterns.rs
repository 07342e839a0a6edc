//! Surface pattern tests: extend modes, offsets, device scale, formats.

use super::common::*;

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

/// A one-row source surface with the given pixels, drawn as unit fills.
fn source_row(colors: &[[u8; 4]]) -> Surface {
    let source = Surface::create_image(Format::Argb32, colors.len() as i32, 1).unwrap();
    let mut ctx = Context::new(&source);
    for (x, c) in colors.iter().enumerate() {
        let f = |v: u8| v as f64 / 255.0;
        ctx.set_source_rgba(f(c[0]), f(c[1]), f(c[2]), f(c[3]));
        ctx.rectangle(x as f64, 0.0, 1.0, 1.0);
        ctx.fill().unwrap();
    }
    source
}

#[test]
fn test_repeat_tiles_checkerboard() {
    let source = Surface::create_image(Format::Argb32, 2, 2).unwrap();
    {
        let mut ctx = Context::new(&source);
        ctx.set_source_rgb(1.0, 0.0, 0.0);
        ctx.paint().unwrap();
        ctx.set_source_rgb(0.0, 0.0, 1.0);
        ctx.rectangle(1.0, 0.0, 1.0, 1.0);
        ctx.rectangle(0.0, 1.0, 1.0, 1.0);
        ctx.fill().unwrap();
    }
    let surface = render(6, 6, |ctx| {
        let pattern = Pattern::create_for_surface(&source);
        pattern.set_extend(Extend::Repeat);
        ctx.set_source(&pattern).unwrap();
        ctx.paint().unwrap();
    });
    for y in 0..6 {
        for x in 0..6 {
            let want = if (x + y) % 2 == 0 { RED } else { BLUE };
            assert_eq!(pixel(&surface, x, y), want, "pixel ({x}, {y})");
        }
    }
}

#[rstest]
#[case(Extend::Reflect, [RED, BLUE, BLUE, RED, RED, BLUE])]
#[case(Extend::Pad, [RED, BLUE, BLUE, BLUE, BLUE, BLUE])]
#[case(Extend::None, [RED, BLUE, [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]])]
fn test_surface_extend_modes(#[case] extend: Extend, #[case] expected: [[u8; 4]; 6]) {
    let source = source_row(&[RED, BLUE]);
    let surface = render(6, 1, |ctx| {
        let pattern = Pattern::create_for_surface(&source);
        pattern.set_extend(extend);
        ctx.set_source(&pattern).unwrap();
        ctx.paint().unwrap();
    });
    for (x, want) in expected.iter().enumerate() {
        assert_eq!(&pixel(&surface, x as i32, 0), want, "pixel {x}");
    }
}

#[test]
fn test_set_source_surface_offset() {
    let source = source_row(&[RED, GREEN]);
    let surface = render(5, 1, |ctx| {
        ctx.set_source_surface(&source, 2.0, 0.0).unwrap();
        ctx.paint().unwrap();
    });
    assert_eq!(pixel(&surface, 1, 0), [0, 0, 0, 0]);
    assert_eq!(pixel(&surface, 2, 0), RED);
    assert_eq!(pixel(&surface, 3, 0), GREEN);
    assert_eq!(pixel(&surface, 4, 0), [0, 0, 0, 0]);
}

#[test]
fn test_source_device_scale_shrinks_pattern() {
    let source = source_row(&[RED, GREEN, BLUE, WHITE]);
    source.set_device_scale(2.0, 2.0).unwrap();
    let surface = render(2, 1, |ctx| {
        let pattern = Pattern::create_for_surface(&source);
        pattern.set_filter(Filter::Nearest);
        ctx.set_source(&pattern).unwrap();
        ctx.paint().unwrap();
    });
    // Target pixel centers 0.5 and 1.5 land on source pixels 1 and 3.
    assert_eq!(pixel(&surface, 0, 0), GREEN);
    assert_eq!(pixel(&surface, 1, 0), WHITE);
}

#[test]
fn test_alpha_only_source_paints_black_coverage() {
    let source = Surface::create_image(Format::A8, 1, 1).unwrap();
    {
        let mut ctx = Context::new(&source);
        ctx.paint_with_alpha(0.5).unwrap();
    }
    let surface = render(1, 1, |ctx| {
        ctx.set_source_rgb(1.0, 1.0, 1.0);
        ctx.paint().unwrap();
        ctx.set_source_surface(&source, 0.0, 0.0).unwrap();
        ctx.paint().unwrap();
    });
    assert_pixel_near(&surface, 0, 0, [128, 128, 128, 255], 1);
}

#[test]
fn test_rgb24_target_stays_opaque() {
    let surface = Surface::create_image(Format::Rgb24, 1, 1).unwrap();
    let mut ctx = Context::new(&surface);
    ctx.set_source_rgba(1.0, 0.0, 0.0, 0.5);
    ctx.paint().unwrap();
    assert_pixel_near(&surface, 0, 0, [128, 0, 0, 255], 1);
}

#[test]
fn test_pattern_shared_between_states() {
    let pattern = Pattern::create_rgb(0.0, 1.0, 0.0);
    let surface = render(2, 1, |ctx| {
        ctx.set_source(&pattern).unwrap();
        ctx.save();
        ctx.set_source_rgb(1.0, 0.0, 0.0);
        ctx.rectangle(0.0, 0.0, 1.0, 1.0);
        ctx.fill().unwrap();
        ctx.restore().unwrap();
        assert!(ctx.get_source().ptr_eq(&pattern));
        ctx.rectangle(1.0, 0.0, 1.0, 1.0);
        ctx.fill().unwrap();
    });
    assert_eq!(pixel(&surface, 0, 0), RED);
    assert_eq!(pixel(&surface, 1, 0), GREEN);
    assert_eq!(pattern.reference_count(), 1);
}
