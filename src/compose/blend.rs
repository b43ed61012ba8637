use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// How a source pixel combines with the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Porter-Duff source-over.
    #[default]
    Over,
    /// Replace the destination pixel with the (opacity-scaled) source pixel.
    Copy,
}

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = opacity_u8(opacity);
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub fn copy(src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = opacity_u8(opacity.clamp(0.0, 1.0));
    if op == 255 {
        return src;
    }
    src.map(|c| mul_div255(u16::from(c), op))
}

pub fn blend(mode: BlendMode, dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    match mode {
        BlendMode::Over => over(dst, src, opacity),
        BlendMode::Copy => copy(src, opacity),
    }
}

fn opacity_u8(opacity: f32) -> u16 {
    ((opacity * 255.0).round() as i32).clamp(0, 255) as u16
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/blend.rs"]
mod tests;
