use crate::assets::avatar::{AvatarInput, crop_all};
use crate::compose::anchor::Anchor;
use crate::compose::blend::BlendMode;
use crate::compose::canvas::Canvas;
use crate::compose::vector::stroke_polyline;
use crate::foundation::core::{IntRect, Point, Rgba8Premul};
use crate::foundation::error::ForgeResult;
use crate::layout::quadrant::{QuadrantLabels, QuadrantLayout};
use crate::pipeline::output::{Rendered, encode_png};
use crate::studio::Studio;
use crate::text::{FontFace, TextRenderer, TextStyle};

pub mod consts {
    pub const SIZE: u32 = 1280;
    pub const MARGIN: i32 = SIZE as i32 / 25;
    pub const TEXT_MARGIN: i32 = SIZE as i32 / 100;
    pub const LINE_WIDTH: f64 = 5.0;
    pub const FONT_SIZE: f32 = 35.0;
}

/// Two-axis chart with a caption on each side and avatars scattered anywhere on it.
pub struct QuadrantChart<'a> {
    studio: &'a Studio,
}

impl<'a> QuadrantChart<'a> {
    pub fn new(studio: &'a Studio) -> Self {
        Self { studio }
    }

    #[tracing::instrument(skip(self, avatars), fields(avatars = avatars.len()))]
    pub fn render(
        &self,
        avatars: &[AvatarInput<'_>],
        labels: &QuadrantLabels,
    ) -> ForgeResult<Rendered> {
        let canvas = self.compose(avatars, labels)?;
        Ok(Rendered::Still(encode_png(canvas)?))
    }

    pub fn compose(
        &self,
        avatars: &[AvatarInput<'_>],
        labels: &QuadrantLabels,
    ) -> ForgeResult<Canvas> {
        let layout = QuadrantLayout::new(consts::SIZE, labels.clone());
        let images = crop_all(avatars)?;

        let s = consts::SIZE as i32;
        let mid = f64::from(s / 2);
        let near = f64::from(consts::MARGIN);
        let far = f64::from(s - consts::MARGIN);

        let mut canvas = Canvas::filled(consts::SIZE, consts::SIZE, Rgba8Premul::WHITE);
        stroke_polyline(
            &mut canvas,
            &[Point::new(mid, near), Point::new(mid, far)],
            false,
            consts::LINE_WIDTH,
            Rgba8Premul::BLACK,
        )?;
        stroke_polyline(
            &mut canvas,
            &[Point::new(near, mid), Point::new(far, mid)],
            false,
            consts::LINE_WIDTH,
            Rgba8Premul::BLACK,
        )?;

        for (input, image) in avatars.iter().zip(&images) {
            let position = layout.place(input.nonce, image.size());
            tracing::debug!(nonce = input.nonce, ?position, "quadrant avatar");
            canvas.composite(position, image.canvas(), BlendMode::Over, 1.0);
        }

        let mut text: Box<dyn TextRenderer + '_> = self.studio.typesetter().renderer();
        let style = TextStyle::new(FontFace::SansBold, consts::FONT_SIZE, Rgba8Premul::BLACK)
            .anchored(Anchor::Center);
        let left_half = (text.measure(&labels.left, &style)?.width / 2.0) as i32;
        let right_half = (text.measure(&labels.right, &style)?.width / 2.0) as i32;
        let m = consts::TEXT_MARGIN;
        let placements = [
            (&labels.top, s / 2, m),
            (&labels.bottom, s / 2, s - 2 * m),
            (&labels.left, left_half + m, s / 2 + m),
            (&labels.right, s - (right_half + m), s / 2 + m),
        ];
        for (label, x, y) in placements {
            text.draw(&mut canvas, label, IntRect::at(x, y), &style)?;
        }
        Ok(canvas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/quadrant.rs"]
mod tests;
