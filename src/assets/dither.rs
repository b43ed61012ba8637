use crate::compose::canvas::Canvas;
use crate::foundation::error::ForgeResult;

/// 2x2 Bayer threshold matrix, in quarters.
const BAYER_2X2: [[u8; 2]; 2] = [[0, 2], [3, 1]];

/// Levels per channel of the web-safe palette (0, 51, ..., 255).
const LEVELS: u16 = 6;
const STEP: u16 = 255 / (LEVELS - 1);

/// Ordered 2x2 Bayer dither of every color channel onto the web-safe palette.
///
/// Operates on straight color so that translucent pixels quantize like opaque ones; alpha is
/// left untouched.
pub fn bayer_dither_2x2(src: &Canvas) -> ForgeResult<Canvas> {
    let width = src.width() as usize;
    let mut straight = src.to_straight_rgba();
    for (i, px) in straight.chunks_exact_mut(4).enumerate() {
        let (x, y) = (i % width, i / width);
        // Threshold in (0, 1): (m + 0.5) / 4 of one palette step.
        let threshold = (u16::from(BAYER_2X2[y % 2][x % 2]) * 2 + 1) * STEP / 8;
        for c in px.iter_mut().take(3) {
            let v = u16::from(*c);
            let base = v / STEP;
            let rem = v % STEP;
            let level = if rem > threshold { base + 1 } else { base };
            *c = (level.min(LEVELS - 1) * STEP) as u8;
        }
    }
    Canvas::from_straight(src.width(), src.height(), straight)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/dither.rs"]
mod tests;
