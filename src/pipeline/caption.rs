//! Still cards: a template image with text (and optionally an avatar) drawn on it, then
//! upscaled for legibility.

use crate::assets::avatar::AvatarInput;
use crate::assets::decode::{decode_image, resize_canvas};
use crate::assets::dither::bayer_dither_2x2;
use crate::compose::blend::BlendMode;
use crate::compose::canvas::Canvas;
use crate::foundation::core::{IntRect, PixelSize, Rgba8Premul};
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::pipeline::output::{Rendered, encode_png};
use crate::studio::Studio;
use crate::text::{FontFace, TextRenderer, TextStyle};

pub mod consts {
    pub const UPSCALE: u32 = 3;

    pub const CARD_TEMPLATE: &str = "angry";
    pub const CARD_AVATAR_POS: (i32, i32) = (4, 4);
    pub const CARD_AVATAR_SIZE: (u32, u32) = (70, 74);
    pub const CARD_TEXT_POS: (i32, i32) = (80, 12);
    pub const CARD_FONT_SIZE: f32 = 10.0;

    pub const MESSAGE_TEMPLATE: &str = "text1";
    pub const MESSAGE_TEXT_X: i32 = 19;
    pub const MESSAGE_NAME_Y: i32 = 252;
    pub const MESSAGE_BODY_Y: i32 = 269;
    pub const MESSAGE_RIGHT_MARGIN: i32 = 20;
    pub const MESSAGE_NAME_SIZE: f32 = 14.0;
    pub const MESSAGE_BODY_SIZE: f32 = 14.75;
    pub const MESSAGE_COLOR: (u8, u8, u8) = (4, 4, 4);
}

/// Retro dialog card: dithered avatar on the left, wrapped caption beside it.
pub struct CaptionCard<'a> {
    studio: &'a Studio,
    template: String,
}

impl<'a> CaptionCard<'a> {
    pub fn new(studio: &'a Studio) -> Self {
        Self {
            studio,
            template: consts::CARD_TEMPLATE.to_string(),
        }
    }

    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template = name.into();
        self
    }

    #[tracing::instrument(skip(self, text, avatar), fields(template = %self.template))]
    pub fn render(&self, text: &str, avatar: AvatarInput<'_>) -> ForgeResult<Rendered> {
        let canvas = self.compose(text, avatar)?;
        Ok(Rendered::Still(encode_png(canvas)?))
    }

    pub fn compose(&self, text: &str, avatar: AvatarInput<'_>) -> ForgeResult<Canvas> {
        let decoded = decode_image(avatar.bytes).map_err(|e| match e {
            ForgeError::Decode(msg) => ForgeError::decode(format!("avatar #0: {msg}")),
            other => other,
        })?;
        let (aw, ah) = consts::CARD_AVATAR_SIZE;
        let avatar = bayer_dither_2x2(&resize_canvas(&decoded, PixelSize::new(aw, ah))?)?;

        let mut canvas = self.studio.still_template(&self.template)?.clone();
        canvas.composite(consts::CARD_AVATAR_POS, &avatar, BlendMode::Over, 1.0);

        let (tx, ty) = consts::CARD_TEXT_POS;
        let rect = IntRect::new(
            tx,
            ty,
            canvas.width() as i32 - tx,
            canvas.height() as i32 - ty,
        );
        let style =
            TextStyle::new(FontFace::Classic, consts::CARD_FONT_SIZE, Rgba8Premul::BLACK).wrapped();
        let mut renderer: Box<dyn TextRenderer + '_> = self.studio.typesetter().renderer();
        renderer.draw(&mut canvas, text, rect, &style)?;

        upscale(&canvas)
    }
}

/// Phone message screenshot with a sender name and a wrapped body.
pub struct MessageCard<'a> {
    studio: &'a Studio,
    template: String,
}

impl<'a> MessageCard<'a> {
    pub fn new(studio: &'a Studio) -> Self {
        Self {
            studio,
            template: consts::MESSAGE_TEMPLATE.to_string(),
        }
    }

    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template = name.into();
        self
    }

    #[tracing::instrument(skip(self, name, body), fields(template = %self.template))]
    pub fn render(&self, name: &str, body: &str) -> ForgeResult<Rendered> {
        let canvas = self.compose(name, body)?;
        Ok(Rendered::Still(encode_png(canvas)?))
    }

    pub fn compose(&self, name: &str, body: &str) -> ForgeResult<Canvas> {
        let mut canvas = self.studio.still_template(&self.template)?.clone();
        let (r, g, b) = consts::MESSAGE_COLOR;
        let color = Rgba8Premul::opaque(r, g, b);
        let x = consts::MESSAGE_TEXT_X;
        let width = canvas.width() as i32 - x - consts::MESSAGE_RIGHT_MARGIN;
        let height = canvas.height() as i32;

        let mut renderer: Box<dyn TextRenderer + '_> = self.studio.typesetter().renderer();
        renderer.draw(
            &mut canvas,
            name,
            IntRect::new(x, consts::MESSAGE_NAME_Y, width, height - consts::MESSAGE_NAME_Y),
            &TextStyle::new(FontFace::BodyMedium, consts::MESSAGE_NAME_SIZE, color).wrapped(),
        )?;
        renderer.draw(
            &mut canvas,
            body,
            IntRect::new(x, consts::MESSAGE_BODY_Y, width, height - consts::MESSAGE_BODY_Y),
            &TextStyle::new(FontFace::Body, consts::MESSAGE_BODY_SIZE, color).wrapped(),
        )?;

        upscale(&canvas)
    }
}

fn upscale(canvas: &Canvas) -> ForgeResult<Canvas> {
    resize_canvas(canvas, canvas.size().scaled(consts::UPSCALE))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/caption.rs"]
mod tests;
