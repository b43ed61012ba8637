use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use crate::compose::anchor::resolve_position;
use crate::compose::blend::BlendMode;
use crate::compose::canvas::Canvas;
use crate::compose::vector::{pixmap_to_canvas, rasterize};
use crate::foundation::core::IntRect;
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::text::{
    FontFace, TextBrushRgba8, TextExtent, TextRenderer, TextStyle, Typesetter, line_offset,
    wrap_width,
};

/// Font bytes for every logical face, loaded once at startup and read-only afterwards.
#[derive(Clone, Default)]
pub struct FontBook {
    faces: HashMap<FontFace, Arc<Vec<u8>>>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut faces: Vec<_> = self.faces.iter().map(|(k, v)| (*k, v.len())).collect();
        faces.sort();
        f.debug_struct("FontBook").field("faces", &faces).finish()
    }
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the font file bytes for `face`, replacing any previous entry.
    pub fn insert(&mut self, face: FontFace, bytes: Vec<u8>) {
        self.faces.insert(face, Arc::new(bytes));
    }

    pub fn contains(&self, face: FontFace) -> bool {
        self.faces.contains_key(&face)
    }

    pub fn bytes(&self, face: FontFace) -> ForgeResult<&Arc<Vec<u8>>> {
        self.faces
            .get(&face)
            .ok_or_else(|| ForgeError::contract(format!("font face {face:?} is not loaded")))
    }
}

impl Typesetter for FontBook {
    fn renderer(&self) -> Box<dyn TextRenderer + '_> {
        Box::new(ParleyRenderer::new(self))
    }
}

struct RegisteredFace {
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

/// Parley shaping plus `vello_cpu` glyph rasterization over a [`FontBook`].
///
/// Owns its own font and layout contexts; faces are registered lazily on first use.
pub struct ParleyRenderer<'a> {
    book: &'a FontBook,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: HashMap<FontFace, RegisteredFace>,
}

impl<'a> ParleyRenderer<'a> {
    pub fn new(book: &'a FontBook) -> Self {
        let collection =
            parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                shared: false,
                system_fonts: false,
            });
        Self {
            book,
            font_ctx: parley::FontContext {
                collection,
                source_cache: parley::fontique::SourceCache::default(),
            },
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    fn register(&mut self, face: FontFace) -> ForgeResult<&RegisteredFace> {
        if !self.registered.contains_key(&face) {
            let shared: Arc<dyn AsRef<[u8]> + Send + Sync> = self.book.bytes(face)?.clone();
            let families = self
                .font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::<u8>::new(shared.clone()), None);
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                ForgeError::resource(format!("no font families registered for {face:?}"))
            })?;
            let family_name = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| ForgeError::resource(format!("font for {face:?} has no family name")))?
                .to_string();
            let font =
                vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::<u8>::new(shared), 0);
            tracing::debug!(?face, family = %family_name, "registered font face");
            self.registered.insert(face, RegisteredFace { family_name, font });
        }
        self.registered
            .get(&face)
            .ok_or_else(|| ForgeError::contract("font registration vanished"))
    }

    fn layout(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width_px: Option<f32>,
    ) -> ForgeResult<(parley::Layout<TextBrushRgba8>, vello_cpu::peniko::FontData)> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(ForgeError::contract("text size_px must be finite and > 0"));
        }
        let (family_name, font) = {
            let face = self.register(style.face)?;
            (face.family_name.clone(), face.font.clone())
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            style.color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        layout.align(
            max_width_px,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok((layout, font))
    }
}

/// Visible width of each line (trailing whitespace excluded).
fn line_widths(layout: &parley::Layout<TextBrushRgba8>) -> Vec<f32> {
    layout
        .lines()
        .map(|line| {
            let m = line.metrics();
            (m.advance - m.trailing_whitespace).max(0.0)
        })
        .collect()
}

fn block_extent(layout: &parley::Layout<TextBrushRgba8>) -> TextExtent {
    TextExtent {
        width: line_widths(layout).into_iter().fold(0.0, f32::max),
        height: layout.height(),
    }
}

impl TextRenderer for ParleyRenderer<'_> {
    fn measure(&mut self, text: &str, style: &TextStyle) -> ForgeResult<TextExtent> {
        let (layout, _) = self.layout(text, style, None)?;
        Ok(block_extent(&layout))
    }

    fn draw(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        rect: IntRect,
        style: &TextStyle,
    ) -> ForgeResult<IntRect> {
        let (layout, font) = self.layout(text, style, wrap_width(rect, style))?;
        let extent = block_extent(&layout);
        let size = extent.to_pixel_size();
        let (x, y) = resolve_position(rect, size, style.anchor, (0, 0));
        if size.width == 0 || size.height == 0 {
            return Ok(IntRect::new(x, y, 0, 0));
        }

        let placed = IntRect::new(x, y, size.width as i32, size.height as i32);

        // Glyph outlines may overhang the advance box (italics, descenders). Only the padded
        // block's overlap with the canvas is rasterized.
        let pad = (style.size_px / 2.0).ceil() as i32;
        let Some(tile) = placed.inflate(pad, pad).intersection(canvas.bounds()) else {
            return Ok(placed);
        };
        let (ox, oy) = ((x - tile.x) as f32, (y - tile.y) as f32);
        let widths = line_widths(&layout);
        let h_align = style.anchor.h_align();
        let pixmap = rasterize(tile.width as u32, tile.height as u32, |ctx| {
            for (line, line_w) in layout.lines().zip(widths) {
                let dx = ox + line_offset(h_align, extent.width, line_w);
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x + dx,
                        y: g.y + oy,
                    });
                    ctx.glyph_run(&font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
            Ok(())
        })?;

        let tile_canvas = pixmap_to_canvas(&pixmap)?;
        canvas.composite((tile.x, tile.y), &tile_canvas, BlendMode::Over, 1.0);
        Ok(placed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
