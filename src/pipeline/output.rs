use std::io::Cursor;

use crate::assets::decode::AnimationFrame;
use crate::compose::canvas::Canvas;
use crate::foundation::core::PixelSize;
use crate::foundation::error::{ForgeError, ForgeResult};

/// PNG-encoded still.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub size: PixelSize,
    pub bytes: Vec<u8>,
}

/// GIF-encoded animation, looping forever.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedAnimation {
    pub size: PixelSize,
    pub frame_count: usize,
    pub bytes: Vec<u8>,
}

/// Finished pipeline output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered {
    Still(EncodedImage),
    Animation(EncodedAnimation),
}

impl Rendered {
    pub fn size(&self) -> PixelSize {
        match self {
            Rendered::Still(img) => img.size,
            Rendered::Animation(anim) => anim.size,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Rendered::Still(img) => &img.bytes,
            Rendered::Animation(anim) => &anim.bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Rendered::Still(img) => img.bytes,
            Rendered::Animation(anim) => anim.bytes,
        }
    }

    /// Conventional file extension for the encoded format.
    pub fn extension(&self) -> &'static str {
        match self {
            Rendered::Still(_) => "png",
            Rendered::Animation(_) => "gif",
        }
    }
}

fn to_rgba_image(canvas: &Canvas) -> ForgeResult<image::RgbaImage> {
    image::RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.to_straight_rgba())
        .ok_or_else(|| ForgeError::encode("canvas buffer does not match its dimensions"))
}

/// Encode a canvas as PNG; the canvas is consumed.
pub fn encode_png(canvas: Canvas) -> ForgeResult<EncodedImage> {
    let size = canvas.size();
    let img = to_rgba_image(&canvas)?;
    drop(canvas);

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| ForgeError::encode(format!("write png: {e}")))?;
    Ok(EncodedImage { size, bytes })
}

/// Encode frames as an infinitely looping GIF, keeping each frame's delay.
pub fn encode_gif(frames: Vec<AnimationFrame>) -> ForgeResult<EncodedAnimation> {
    let Some(first) = frames.first() else {
        return Err(ForgeError::encode("animation has no frames"));
    };
    let size = first.canvas.size();
    let frame_count = frames.len();

    let mut bytes = Vec::new();
    {
        let mut encoder = image::codecs::gif::GifEncoder::new(&mut bytes);
        encoder
            .set_repeat(image::codecs::gif::Repeat::Infinite)
            .map_err(|e| ForgeError::encode(format!("gif repeat: {e}")))?;
        for (i, frame) in frames.into_iter().enumerate() {
            if frame.canvas.size() != size {
                return Err(ForgeError::encode(format!(
                    "frame {i} is {:?}, expected {size:?}",
                    frame.canvas.size()
                )));
            }
            let img = to_rgba_image(&frame.canvas)?;
            encoder
                .encode_frame(image::Frame::from_parts(img, 0, 0, frame.delay))
                .map_err(|e| ForgeError::encode(format!("write gif frame {i}: {e}")))?;
        }
    }
    Ok(EncodedAnimation {
        size,
        frame_count,
        bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/output.rs"]
mod tests;
