use crate::compose::anchor::resolve_position;
use crate::compose::canvas::Canvas;
use crate::foundation::core::IntRect;
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::text::{TextExtent, TextRenderer, TextStyle, Typesetter, line_offset, wrap_width};

/// Font-free typesetter: every character advances a fixed fraction of the font size and
/// non-whitespace characters are drawn as filled boxes.
///
/// Useful for previews without font files and for tests that must not depend on system fonts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockTypesetter {
    /// Advance per character, in ems.
    pub advance_em: f32,
    /// Line pitch, in ems.
    pub line_height_em: f32,
}

impl Default for BlockTypesetter {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            line_height_em: 1.2,
        }
    }
}

impl BlockTypesetter {
    fn advance(&self, style: &TextStyle) -> f32 {
        self.advance_em * style.size_px
    }

    fn line_height(&self, style: &TextStyle) -> f32 {
        self.line_height_em * style.size_px
    }

    /// Break `text` into lines: explicit newlines always, greedy word wrap when `max_width`
    /// is given. A single word wider than the limit stays on its own line.
    pub fn lines(&self, text: &str, style: &TextStyle, max_width: Option<f32>) -> Vec<String> {
        let advance = self.advance(style);
        let mut out = Vec::new();
        for paragraph in text.split('\n') {
            let Some(limit) = max_width else {
                out.push(paragraph.to_string());
                continue;
            };
            let mut line = String::new();
            for word in paragraph.split(' ') {
                let candidate_len = if line.is_empty() {
                    word.chars().count()
                } else {
                    line.chars().count() + 1 + word.chars().count()
                };
                if !line.is_empty() && candidate_len as f32 * advance > limit {
                    out.push(std::mem::take(&mut line));
                }
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
            }
            out.push(line);
        }
        out
    }

    fn extent_of(&self, lines: &[String], style: &TextStyle) -> TextExtent {
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        TextExtent {
            width: widest as f32 * self.advance(style),
            height: lines.len() as f32 * self.line_height(style),
        }
    }
}

impl TextRenderer for BlockTypesetter {
    fn measure(&mut self, text: &str, style: &TextStyle) -> ForgeResult<TextExtent> {
        check_size(style)?;
        let lines = self.lines(text, style, None);
        Ok(self.extent_of(&lines, style))
    }

    fn draw(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        rect: IntRect,
        style: &TextStyle,
    ) -> ForgeResult<IntRect> {
        check_size(style)?;
        let lines = self.lines(text, style, wrap_width(rect, style));
        let extent = self.extent_of(&lines, style);
        let size = extent.to_pixel_size();
        let (x, y) = resolve_position(rect, size, style.anchor, (0, 0));

        let advance = self.advance(style);
        let line_height = self.line_height(style);
        let glyph_w = (advance * 0.8).max(1.0).round() as i32;
        let glyph_h = (style.size_px * 0.8).max(1.0).round() as i32;
        for (row, line) in lines.iter().enumerate() {
            let line_w = line.chars().count() as f32 * advance;
            let dx = line_offset(style.anchor.h_align(), extent.width, line_w);
            let top = y as f32 + row as f32 * line_height + (line_height - glyph_h as f32) / 2.0;
            for (col, ch) in line.chars().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let left = x as f32 + dx + col as f32 * advance + (advance - glyph_w as f32) / 2.0;
                canvas.fill_rect(
                    IntRect::new(left.round() as i32, top.round() as i32, glyph_w, glyph_h),
                    style.color,
                );
            }
        }

        Ok(IntRect::new(x, y, size.width as i32, size.height as i32))
    }
}

impl Typesetter for BlockTypesetter {
    fn renderer(&self) -> Box<dyn TextRenderer + '_> {
        Box::new(*self)
    }
}

fn check_size(style: &TextStyle) -> ForgeResult<()> {
    if !style.size_px.is_finite() || style.size_px <= 0.0 {
        return Err(ForgeError::contract("text size_px must be finite and > 0"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/text/block.rs"]
mod tests;
