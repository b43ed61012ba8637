//! Text measurement and drawing.
//!
//! A [`Typesetter`] is the process-wide, read-only half (font bytes, metrics configuration);
//! it hands each pipeline invocation its own [`TextRenderer`] so that shaping contexts are
//! never shared between concurrent renders.

pub mod block;
pub mod fonts;

use crate::compose::anchor::{Anchor, HAlign};
use crate::compose::canvas::Canvas;
use crate::foundation::core::{IntRect, PixelSize, Rgba8Premul};
use crate::foundation::error::ForgeResult;

/// Logical typeface names; each maps to one font file loaded at startup.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FontFace {
    /// Grid chart cell captions.
    Serif,
    /// Polygon chart vertex labels.
    Sans,
    /// Quadrant chart axis labels.
    SansBold,
    /// Fade overlay caption.
    RoundedLight,
    /// Caption card text.
    Classic,
    /// Message card body.
    Body,
    /// Message card sender name.
    BodyMedium,
}

impl FontFace {
    pub const ALL: [FontFace; 7] = [
        FontFace::Serif,
        FontFace::Sans,
        FontFace::SansBold,
        FontFace::RoundedLight,
        FontFace::Classic,
        FontFace::Body,
        FontFace::BodyMedium,
    ];
}

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8Premul> for TextBrushRgba8 {
    fn from(c: Rgba8Premul) -> Self {
        let [r, g, b, a] = c.to_straight();
        Self { r, g, b, a }
    }
}

/// How a piece of text is set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size_px: f32,
    pub color: Rgba8Premul,
    /// Placement of the text block inside the target rectangle; its horizontal part also
    /// aligns each line within the block.
    pub anchor: Anchor,
    /// Reflow within the target rectangle's width; otherwise one line per explicit newline.
    pub wrap: bool,
}

impl TextStyle {
    pub fn new(face: FontFace, size_px: f32, color: Rgba8Premul) -> Self {
        Self {
            face,
            size_px,
            color,
            anchor: Anchor::TopLeft,
            wrap: false,
        }
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn wrapped(mut self) -> Self {
        self.wrap = true;
        self
    }
}

/// Measured size of a laid-out text block, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

impl TextExtent {
    /// Pixel box covering the extent.
    pub fn to_pixel_size(self) -> PixelSize {
        PixelSize::new(
            self.width.ceil().max(0.0) as u32,
            self.height.ceil().max(0.0) as u32,
        )
    }
}

/// Per-invocation text session.
pub trait TextRenderer {
    /// Size of `text` laid out on a single line (explicit newlines still break).
    fn measure(&mut self, text: &str, style: &TextStyle) -> ForgeResult<TextExtent>;

    /// Draw `text` aligned inside `rect` and return the block's placed bounds.
    ///
    /// Text is never clipped to `rect`; overflowing captions extend past it.
    fn draw(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        rect: IntRect,
        style: &TextStyle,
    ) -> ForgeResult<IntRect>;
}

/// Shared, read-only source of [`TextRenderer`] sessions.
pub trait Typesetter: Send + Sync {
    fn renderer(&self) -> Box<dyn TextRenderer + '_>;
}

/// Horizontal shift of a `line_width` line inside a `block_width` block.
pub(crate) fn line_offset(align: HAlign, block_width: f32, line_width: f32) -> f32 {
    let free = (block_width - line_width).max(0.0);
    match align {
        HAlign::Left => 0.0,
        HAlign::Center => free / 2.0,
        HAlign::Right => free,
    }
}

/// Wrap width for a draw call, if wrapping applies.
pub(crate) fn wrap_width(rect: IntRect, style: &TextStyle) -> Option<f32> {
    (style.wrap && rect.width > 0).then_some(rect.width as f32)
}
