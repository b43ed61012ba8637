use crate::assets::avatar::{AvatarInput, crop_all};
use crate::compose::anchor::Anchor;
use crate::compose::blend::BlendMode;
use crate::compose::canvas::Canvas;
use crate::compose::vector::stroke_polyline;
use crate::foundation::core::{IntRect, Rgba8Premul};
use crate::foundation::error::ForgeResult;
use crate::layout::polygon::PolygonLayout;
use crate::pipeline::output::{Rendered, encode_png};
use crate::studio::Studio;
use crate::text::{FontFace, TextRenderer, TextStyle};

pub mod consts {
    pub const SIZE: u32 = 1280;
    pub const RADIUS: f64 = SIZE as f64 * 0.45;
    pub const TEXT_MARGIN: f64 = 10.0;
    pub const LINE_WIDTH: f64 = 5.0;
    pub const FONT_SIZE: f32 = 28.0;
}

/// Regular polygon with one labeled vertex per option; avatars fall into its wedges.
pub struct PolygonChart<'a> {
    studio: &'a Studio,
}

impl<'a> PolygonChart<'a> {
    pub fn new(studio: &'a Studio) -> Self {
        Self { studio }
    }

    #[tracing::instrument(skip(self, avatars, labels), fields(avatars = avatars.len(), labels = labels.len()))]
    pub fn render<S: AsRef<str>>(
        &self,
        avatars: &[AvatarInput<'_>],
        labels: &[S],
    ) -> ForgeResult<Rendered> {
        let canvas = self.compose(avatars, labels)?;
        Ok(Rendered::Still(encode_png(canvas)?))
    }

    pub fn compose<S: AsRef<str>>(
        &self,
        avatars: &[AvatarInput<'_>],
        labels: &[S],
    ) -> ForgeResult<Canvas> {
        let layout = PolygonLayout::new(consts::SIZE, consts::RADIUS, labels)?;
        let images = crop_all(avatars)?;

        let mut canvas = Canvas::filled(consts::SIZE, consts::SIZE, Rgba8Premul::WHITE);
        stroke_polyline(
            &mut canvas,
            layout.vertices(),
            true,
            consts::LINE_WIDTH,
            Rgba8Premul::BLACK,
        )?;

        let mut text: Box<dyn TextRenderer + '_> = self.studio.typesetter().renderer();
        let style = TextStyle::new(FontFace::Sans, consts::FONT_SIZE, Rgba8Premul::BLACK)
            .anchored(Anchor::Center);
        for (i, label) in layout.labels().iter().enumerate() {
            let extent = text.measure(label, &style)?;
            let center = layout.label_center(
                i,
                (f64::from(extent.width), f64::from(extent.height)),
                consts::TEXT_MARGIN,
            );
            text.draw(
                &mut canvas,
                label,
                IntRect::at(center.x.round() as i32, center.y.round() as i32),
                &style,
            )?;
        }

        let nonces: Vec<u64> = avatars.iter().map(|a| a.nonce).collect();
        for (placement, image) in layout.assign(&nonces).iter().zip(&images) {
            let position = placement.top_left(image.size());
            canvas.composite(position, image.canvas(), BlendMode::Over, 1.0);
        }
        Ok(canvas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/polygon.rs"]
mod tests;
