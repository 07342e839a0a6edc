//! Operator tests: Porter-Duff family and blend modes through the context.

use super::common::*;

/// Paint a backdrop, then paint the source with `op`, on a 1x1 surface.
fn composite(backdrop: [f64; 4], source: [f64; 4], op: Operator) -> [u8; 4] {
    let surface = render(1, 1, |ctx| {
        ctx.set_source_rgba(backdrop[0], backdrop[1], backdrop[2], backdrop[3]);
        ctx.paint().unwrap();
        ctx.set_operator(op);
        ctx.set_source_rgba(source[0], source[1], source[2], source[3]);
        ctx.paint().unwrap();
    });
    pixel(&surface, 0, 0)
}

const RED: [f64; 4] = [1.0, 0.0, 0.0, 1.0];
const HALF_BLUE: [f64; 4] = [0.0, 0.0, 1.0, 0.5];

#[rstest]
#[case(Operator::Over, [128, 0, 128, 255])]
#[case(Operator::Source, [0, 0, 255, 128])]
#[case(Operator::Clear, [0, 0, 0, 0])]
#[case(Operator::In, [0, 0, 255, 128])]
#[case(Operator::Out, [0, 0, 0, 0])]
#[case(Operator::Atop, [128, 0, 128, 255])]
#[case(Operator::Dest, [255, 0, 0, 255])]
#[case(Operator::DestOver, [255, 0, 0, 255])]
#[case(Operator::DestIn, [255, 0, 0, 128])]
#[case(Operator::DestOut, [255, 0, 0, 128])]
#[case(Operator::Xor, [255, 0, 0, 128])]
fn test_porter_duff(#[case] op: Operator, #[case] expected: [u8; 4]) {
    let out = composite(RED, HALF_BLUE, op);
    let close = out
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| a.abs_diff(*e) <= 1);
    assert!(close, "{op:?}: {out:?} vs {expected:?}");
}

#[rstest]
#[case(Operator::Multiply, [0.5, 0.5, 0.5, 1.0], [128, 0, 0, 255])]
#[case(Operator::Screen, [0.5, 0.5, 0.5, 1.0], [255, 128, 128, 255])]
#[case(Operator::Darken, [0.5, 0.5, 0.5, 1.0], [128, 0, 0, 255])]
#[case(Operator::Lighten, [0.5, 0.5, 0.5, 1.0], [255, 128, 128, 255])]
#[case(Operator::Difference, [1.0, 1.0, 1.0, 1.0], [0, 255, 255, 255])]
#[case(Operator::Exclusion, [1.0, 1.0, 1.0, 1.0], [0, 255, 255, 255])]
fn test_blend_modes_on_red(
    #[case] op: Operator,
    #[case] source: [f64; 4],
    #[case] expected: [u8; 4],
) {
    assert_eq!(composite(RED, source, op), expected, "{op:?}");
}

#[test]
fn test_blend_mode_applies_to_gradient_source() {
    let surface = render(1, 1, |ctx| {
        ctx.set_source_rgb(1.0, 0.0, 0.0);
        ctx.paint().unwrap();
        let gradient = Pattern::create_linear(0.0, 0.0, 1.0, 0.0);
        gradient.add_color_stop_rgb(0.0, 0.5, 0.5, 0.5).unwrap();
        gradient.add_color_stop_rgb(1.0, 0.5, 0.5, 0.5).unwrap();
        ctx.set_operator(Operator::Multiply);
        ctx.set_source(&gradient).unwrap();
        ctx.paint().unwrap();
    });
    assert_eq!(pixel(&surface, 0, 0), [128, 0, 0, 255]);
}

#[test]
fn test_unbounded_operator_stays_inside_shape() {
    let surface = render(4, 1, |ctx| {
        ctx.paint().unwrap();
        ctx.set_operator(Operator::Source);
        ctx.set_source_rgba(0.0, 0.0, 0.0, 0.0);
        ctx.rectangle(0.0, 0.0, 2.0, 1.0);
        ctx.fill().unwrap();
    });
    assert_eq!(pixel(&surface, 1, 0), [0, 0, 0, 0]);
    assert_eq!(pixel(&surface, 2, 0), [0, 0, 0, 255]);
}
