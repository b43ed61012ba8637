use crate::assets::decode::{decode_image, resize_canvas};
use crate::compose::canvas::Canvas;
use crate::foundation::core::PixelSize;
use crate::foundation::error::{ForgeError, ForgeResult};

/// Edge length of every processed avatar.
pub const AVATAR_SIZE: u32 = 128;

/// Caller-supplied avatar: encoded bytes plus the nonce that salts its placement.
#[derive(Clone, Copy, Debug)]
pub struct AvatarInput<'a> {
    pub nonce: u64,
    pub bytes: &'a [u8],
}

impl<'a> AvatarInput<'a> {
    pub fn new(nonce: u64, bytes: &'a [u8]) -> Self {
        Self { nonce, bytes }
    }
}

/// Decoded, circle-masked, 128x128 avatar. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarImage {
    canvas: Canvas,
}

impl AvatarImage {
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn size(&self) -> PixelSize {
        self.canvas.size()
    }
}

/// Decode `bytes`, clear everything outside the inscribed ellipse, and resize to
/// [`AVATAR_SIZE`] square.
pub fn crop_circle(bytes: &[u8]) -> ForgeResult<AvatarImage> {
    let mut canvas = decode_image(bytes)?;
    mask_outside_ellipse(&mut canvas);
    let canvas = resize_canvas(&canvas, PixelSize::new(AVATAR_SIZE, AVATAR_SIZE))?;
    Ok(AvatarImage { canvas })
}

/// Process every avatar up front, aborting on the first one that fails to decode.
pub fn crop_all(inputs: &[AvatarInput<'_>]) -> ForgeResult<Vec<AvatarImage>> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            crop_circle(input.bytes).map_err(|e| match e {
                ForgeError::Decode(msg) => ForgeError::decode(format!("avatar #{i}: {msg}")),
                other => other,
            })
        })
        .collect()
}

/// Zero every pixel whose center lies outside the ellipse inscribed in the canvas bounds.
pub fn mask_outside_ellipse(canvas: &mut Canvas) {
    let w = canvas.width() as usize;
    let rx = f64::from(canvas.width()) / 2.0;
    let ry = f64::from(canvas.height()) / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    for (i, px) in canvas.data_mut().chunks_exact_mut(4).enumerate() {
        let dx = ((i % w) as f64 + 0.5 - rx) / rx;
        let dy = ((i / w) as f64 + 0.5 - ry) / ry;
        if dx * dx + dy * dy > 1.0 {
            px.fill(0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/avatar.rs"]
mod tests;
