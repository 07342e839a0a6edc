//! Per-pixel compositing in premultiplied space.

use crate::color::Color;
use crate::style::Operator;

/// Premultiplied RGBA with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Premul {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Premul {
    fn from_straight(c: Color) -> Self {
        let c = c.clamped();
        Self {
            r: c.red * c.alpha,
            g: c.green * c.alpha,
            b: c.blue * c.alpha,
            a: c.alpha,
        }
    }

    fn from_rgba8(p: [u8; 4]) -> Self {
        Self::from_straight(Color::from_rgba8(p))
    }

    fn scale(self, k: f64) -> Self {
        Self {
            r: self.r * k,
            g: self.g * k,
            b: self.b * k,
            a: self.a * k,
        }
    }

    fn add(self, o: Premul) -> Self {
        Self {
            r: self.r + o.r,
            g: self.g + o.g,
            b: self.b + o.b,
            a: self.a + o.a,
        }
    }

    /// Straight color, guarding against division by a vanishing alpha.
    fn to_straight(self) -> Color {
        if self.a <= 1e-6 {
            return Color::TRANSPARENT;
        }
        Color::rgba(self.r / self.a, self.g / self.a, self.b / self.a, self.a)
    }

    fn unpremultiplied_rgb(self) -> [f64; 3] {
        if self.a <= 1e-6 {
            [0.0; 3]
        } else {
            [self.r / self.a, self.g / self.a, self.b / self.a]
        }
    }
}

/// Porter-Duff source and destination factors.
fn porter_duff_factors(op: Operator, sa: f64, da: f64) -> (f64, f64) {
    match op {
        Operator::Clear => (0.0, 0.0),
        Operator::Source => (1.0, 0.0),
        Operator::Over => (1.0, 1.0 - sa),
        Operator::In => (da, 0.0),
        Operator::Out => (1.0 - da, 0.0),
        Operator::Atop => (da, 1.0 - sa),
        Operator::Dest => (0.0, 1.0),
        Operator::DestOver => (1.0 - da, 1.0),
        Operator::DestIn => (0.0, sa),
        Operator::DestOut => (0.0, 1.0 - sa),
        Operator::DestAtop => (1.0 - da, sa),
        Operator::Xor => (1.0 - da, 1.0 - sa),
        Operator::Add => (1.0, 1.0),
        Operator::Saturate => {
            let fa = if sa <= 0.0 {
                1.0
            } else {
                ((1.0 - da) / sa).min(1.0)
            };
            (fa, 1.0)
        }
        // Blend modes are handled separately; their alpha follows "over".
        _ => (1.0, 1.0 - sa),
    }
}

fn blend_channel(op: Operator, cs: f64, cb: f64) -> f64 {
    match op {
        Operator::Multiply => cs * cb,
        Operator::Screen => cs + cb - cs * cb,
        Operator::Overlay => hard_light(cb, cs),
        Operator::Darken => cs.min(cb),
        Operator::Lighten => cs.max(cb),
        Operator::ColorDodge => {
            if cb <= 0.0 {
                0.0
            } else if cs >= 1.0 {
                1.0
            } else {
                (cb / (1.0 - cs)).min(1.0)
            }
        }
        Operator::ColorBurn => {
            if cb >= 1.0 {
                1.0
            } else if cs <= 0.0 {
                0.0
            } else {
                1.0 - ((1.0 - cb) / cs).min(1.0)
            }
        }
        Operator::HardLight => hard_light(cs, cb),
        Operator::SoftLight => {
            if cs <= 0.5 {
                cb - (1.0 - 2.0 * cs) * cb * (1.0 - cb)
            } else {
                let d = if cb <= 0.25 {
                    ((16.0 * cb - 12.0) * cb + 4.0) * cb
                } else {
                    cb.sqrt()
                };
                cb + (2.0 * cs - 1.0) * (d - cb)
            }
        }
        Operator::Difference => (cs - cb).abs(),
        Operator::Exclusion => cs + cb - 2.0 * cs * cb,
        _ => cs,
    }
}

fn hard_light(cs: f64, cb: f64) -> f64 {
    if cs <= 0.5 {
        cb * 2.0 * cs
    } else {
        let s = 2.0 * cs - 1.0;
        cb + s - cb * s
    }
}

fn lum(c: [f64; 3]) -> f64 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn clip_color(c: [f64; 3]) -> [f64; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 {
        for v in &mut out {
            *v = l + (*v - l) * l / (l - n);
        }
    }
    if x > 1.0 {
        for v in &mut out {
            *v = l + (*v - l) * (1.0 - l) / (x - l);
        }
    }
    out
}

fn set_lum(c: [f64; 3], l: f64) -> [f64; 3] {
    let d = l - lum(c);
    clip_color([c[0] + d, c[1] + d, c[2] + d])
}

fn sat(c: [f64; 3]) -> f64 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn set_sat(c: [f64; 3], s: f64) -> [f64; 3] {
    let max = c[0].max(c[1]).max(c[2]);
    let min = c[0].min(c[1]).min(c[2]);
    if max <= min {
        return [0.0; 3];
    }
    c.map(|v| (v - min) * s / (max - min))
}

/// Blend function `B(Cb, Cs)` on straight colors.
fn blend(op: Operator, cs: [f64; 3], cb: [f64; 3]) -> [f64; 3] {
    match op {
        Operator::HslHue => set_lum(set_sat(cs, sat(cb)), lum(cb)),
        Operator::HslSaturation => set_lum(set_sat(cb, sat(cs)), lum(cb)),
        Operator::HslColor => set_lum(cs, lum(cb)),
        Operator::HslLuminosity => set_lum(cb, lum(cs)),
        _ => [
            blend_channel(op, cs[0], cb[0]),
            blend_channel(op, cs[1], cb[1]),
            blend_channel(op, cs[2], cb[2]),
        ],
    }
}

fn apply_operator(op: Operator, s: Premul, d: Premul) -> Premul {
    if op.is_blend_mode() {
        let b = blend(op, s.unpremultiplied_rgb(), d.unpremultiplied_rgb());
        let both = s.a * d.a;
        let mix = |sc: f64, dc: f64, bc: f64| (1.0 - d.a) * sc + (1.0 - s.a) * dc + both * bc;
        return Premul {
            r: mix(s.r, d.r, b[0]),
            g: mix(s.g, d.g, b[1]),
            b: mix(s.b, d.b, b[2]),
            a: s.a + d.a - both,
        };
    }
    let (fa, fb) = porter_duff_factors(op, s.a, d.a);
    let out = s.scale(fa).add(d.scale(fb));
    Premul {
        r: out.r.min(1.0),
        g: out.g.min(1.0),
        b: out.b.min(1.0),
        a: out.a.min(1.0),
    }
}

/// Composite `src` onto the straight-alpha pixel `dst` with `coverage` as
/// an extra weight: `out = cov * OP(src, dst) + (1 - cov) * dst`.
pub(crate) fn composite_pixel(dst: [u8; 4], src: Color, coverage: f64, op: Operator) -> [u8; 4] {
    let coverage = coverage.clamp(0.0, 1.0);
    if coverage <= 0.0 {
        return dst;
    }
    let s = Premul::from_straight(src);
    let d = Premul::from_rgba8(dst);
    let result = apply_operator(op, s, d);
    let out = result.scale(coverage).add(d.scale(1.0 - coverage));
    out.to_straight().to_rgba8()
}
