use crate::compose::blend::{BlendMode, blend};
use crate::foundation::core::{IntRect, PixelSize, Rgba8Premul};
use crate::foundation::error::{ForgeError, ForgeResult};

/// Mutable premultiplied RGBA8 pixel buffer, row-major and tightly packed.
///
/// A canvas is owned by the pipeline invocation that created it; nothing in this crate shares
/// one across calls.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba8Premul::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba8Premul) -> Self {
        let px = color.to_array();
        Self {
            width,
            height,
            data: px.repeat((width as usize) * (height as usize)),
        }
    }

    /// Wrap existing premultiplied bytes.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> ForgeResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ForgeError::contract("canvas size overflow"))?;
        if data.len() != expected {
            return Err(ForgeError::contract(format!(
                "canvas expects {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap straight-alpha RGBA8 bytes, premultiplying in place.
    pub fn from_straight(width: u32, height: u32, mut data: Vec<u8>) -> ForgeResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    pub fn bounds(&self) -> IntRect {
        IntRect::from_size(self.size())
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8Premul> {
        let idx = self.index(x, y)?;
        Some(Rgba8Premul::from_array([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]))
    }

    /// Straight-alpha copy of the pixels, ready for encoders.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let c = Rgba8Premul::from_array([px[0], px[1], px[2], px[3]]);
            out.extend_from_slice(&c.to_straight());
        }
        out
    }

    pub fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Source-over fill of `rect`, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: IntRect, color: Rgba8Premul) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let src = color.to_array();
        for y in y0..y1 {
            for x in x0..x1 {
                let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
                let dst = [
                    self.data[idx],
                    self.data[idx + 1],
                    self.data[idx + 2],
                    self.data[idx + 3],
                ];
                let out = blend(BlendMode::Over, dst, src, 1.0);
                self.data[idx..idx + 4].copy_from_slice(&out);
            }
        }
    }

    /// Blend `source` with its top-left corner at `position`. Pixels falling outside the canvas
    /// are dropped.
    pub fn composite(
        &mut self,
        position: (i32, i32),
        source: &Canvas,
        mode: BlendMode,
        opacity: f32,
    ) {
        let target = IntRect::new(
            position.0,
            position.1,
            source.width as i32,
            source.height as i32,
        );
        let Some((x0, y0, x1, y1)) = self.clip(target) else {
            return;
        };
        let dst_w = self.width as usize;
        let src_w = source.width as usize;
        for y in y0..y1 {
            let sy = (y - position.1) as usize;
            for x in x0..x1 {
                let sx = (x - position.0) as usize;
                let si = (sy * src_w + sx) * 4;
                let di = ((y as usize) * dst_w + (x as usize)) * 4;
                let s = [
                    source.data[si],
                    source.data[si + 1],
                    source.data[si + 2],
                    source.data[si + 3],
                ];
                let d = [
                    self.data[di],
                    self.data[di + 1],
                    self.data[di + 2],
                    self.data[di + 3],
                ];
                let out = blend(mode, d, s, opacity);
                self.data[di..di + 4].copy_from_slice(&out);
            }
        }
    }

    /// Source-over of a same-sized premultiplied buffer (e.g. a rasterized pixmap).
    pub(crate) fn over_in_place(&mut self, src: &[u8], opacity: f32) -> ForgeResult<()> {
        if src.len() != self.data.len() {
            return Err(ForgeError::contract(
                "over_in_place expects a buffer matching the canvas",
            ));
        }
        for (d, s) in self.data.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            let out = blend(
                BlendMode::Over,
                [d[0], d[1], d[2], d[3]],
                [s[0], s[1], s[2], s[3]],
                opacity,
            );
            d.copy_from_slice(&out);
        }
        Ok(())
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }

    /// Intersection of `rect` with the canvas as half-open `(x0, y0, x1, y1)`.
    fn clip(&self, rect: IntRect) -> Option<(i32, i32, i32, i32)> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width as i32);
        let y1 = rect.bottom().min(self.height as i32);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/canvas.rs"]
mod tests;
