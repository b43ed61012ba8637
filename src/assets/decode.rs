use std::io::Cursor;

use anyhow::Context;
use image::AnimationDecoder;

use crate::compose::canvas::Canvas;
use crate::foundation::core::PixelSize;
use crate::foundation::error::{ForgeError, ForgeResult};

/// One fully composited frame of a decoded animation.
#[derive(Clone, Debug)]
pub struct AnimationFrame {
    pub canvas: Canvas,
    /// Display time of the frame.
    pub delay: image::Delay,
}

/// Decode encoded image bytes and convert to a premultiplied canvas.
pub fn decode_image(bytes: &[u8]) -> ForgeResult<Canvas> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ForgeError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Canvas::from_straight(width, height, rgba.into_raw())
}

/// Decode a GIF into full-canvas frames with their delays.
pub fn decode_animation(bytes: &[u8]) -> ForgeResult<Vec<AnimationFrame>> {
    let decoder = image::codecs::gif::GifDecoder::new(Cursor::new(bytes))
        .map_err(|e| ForgeError::decode(format!("open gif: {e}")))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| ForgeError::decode(format!("decode gif frames: {e}")))?;
    if frames.is_empty() {
        return Err(ForgeError::decode("animation has no frames"));
    }

    frames
        .into_iter()
        .map(|frame| {
            let delay = frame.delay();
            let buffer = frame.into_buffer();
            let (width, height) = buffer.dimensions();
            Ok(AnimationFrame {
                canvas: Canvas::from_straight(width, height, buffer.into_raw())?,
                delay,
            })
        })
        .collect()
}

/// Resample a canvas to `size` (Catmull-Rom on premultiplied pixels).
pub fn resize_canvas(src: &Canvas, size: PixelSize) -> ForgeResult<Canvas> {
    if src.size() == size {
        return Ok(src.clone());
    }
    if size.width == 0 || size.height == 0 {
        return Ok(Canvas::new(size.width, size.height));
    }
    let buf = image::RgbaImage::from_raw(src.width(), src.height(), src.data().to_vec())
        .context("wrap canvas pixels for resize")?;
    let out = image::imageops::resize(
        &buf,
        size.width,
        size.height,
        image::imageops::FilterType::CatmullRom,
    );
    let mut data = out.into_raw();
    clamp_premul_in_place(&mut data);
    Canvas::from_premul(size.width, size.height, data)
}

/// Keep color channels <= alpha after filters with negative lobes.
fn clamp_premul_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        px[0] = px[0].min(a);
        px[1] = px[1].min(a);
        px[2] = px[2].min(a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
