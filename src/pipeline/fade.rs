use crate::assets::avatar::{AvatarInput, crop_circle};
use crate::assets::decode::AnimationFrame;
use crate::compose::anchor::Anchor;
use crate::compose::blend::BlendMode;
use crate::compose::canvas::Canvas;
use crate::foundation::core::{IntRect, Rgba8Premul};
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::pipeline::output::{Rendered, encode_gif};
use crate::studio::Studio;
use crate::text::{FontFace, TextRenderer, TextStyle};

pub mod consts {
    /// Captions are right-aligned against this x.
    pub const TEXT_RIGHT: i32 = 1037;
    pub const AVATAR_LEFT: i32 = 1145;
    /// Raises the caption so it sits optically centered with the avatar.
    pub const FONT_HEIGHT_CORRECTION: i32 = 22;
    pub const FONT_SIZE: f32 = 94.0;
    pub const FADE_START: u32 = 65;
    pub const FADE_DURATION: f32 = 11.0;
}

/// Piecewise-linear opacity over frame index: opaque until `start`, then a linear ramp to
/// transparent over `duration` frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeCurve {
    pub start: u32,
    pub duration: f32,
}

impl Default for FadeCurve {
    fn default() -> Self {
        Self {
            start: consts::FADE_START,
            duration: consts::FADE_DURATION,
        }
    }
}

impl FadeCurve {
    pub fn opacity_at(&self, frame: usize) -> f32 {
        if self.duration <= 0.0 {
            return if frame < self.start as usize { 1.0 } else { 0.0 };
        }
        let t = (frame as f32 - self.start as f32) / self.duration;
        1.0 - t.clamp(0.0, 1.0)
    }
}

/// Static caption (plus optional avatar) faded out over a looping base animation.
pub struct FadeOverlay<'a> {
    studio: &'a Studio,
    curve: FadeCurve,
}

impl<'a> FadeOverlay<'a> {
    pub fn new(studio: &'a Studio) -> Self {
        Self {
            studio,
            curve: FadeCurve::default(),
        }
    }

    pub fn with_curve(mut self, curve: FadeCurve) -> Self {
        self.curve = curve;
        self
    }

    #[tracing::instrument(skip(self, text, avatar), fields(has_avatar = avatar.is_some()))]
    pub fn render(
        &self,
        template: &str,
        text: &str,
        avatar: Option<AvatarInput<'_>>,
    ) -> ForgeResult<Rendered> {
        let frames = self.compose(template, text, avatar)?;
        Ok(Rendered::Animation(encode_gif(frames)?))
    }

    pub fn compose(
        &self,
        template: &str,
        text: &str,
        avatar: Option<AvatarInput<'_>>,
    ) -> ForgeResult<Vec<AnimationFrame>> {
        let avatar = avatar
            .map(|a| {
                crop_circle(a.bytes).map_err(|e| match e {
                    ForgeError::Decode(msg) => ForgeError::decode(format!("avatar #0: {msg}")),
                    other => other,
                })
            })
            .transpose()?;
        let base = self.studio.animated_template(template)?;
        let Some(first) = base.first() else {
            return Err(ForgeError::contract(format!(
                "template '{template}' has no frames"
            )));
        };
        let (w, h) = (first.canvas.width(), first.canvas.height());
        let mid = h as i32 / 2;

        let mut overlay = Canvas::new(w, h);
        let mut renderer: Box<dyn TextRenderer + '_> = self.studio.typesetter().renderer();
        let style = TextStyle::new(FontFace::RoundedLight, consts::FONT_SIZE, Rgba8Premul::WHITE)
            .anchored(Anchor::RightCenter)
            .wrapped();
        renderer.draw(
            &mut overlay,
            text,
            IntRect::new(0, mid - consts::FONT_HEIGHT_CORRECTION, consts::TEXT_RIGHT, 0),
            &style,
        )?;
        if let Some(avatar) = &avatar {
            let y = mid - avatar.size().height as i32 / 2;
            overlay.composite(
                (consts::AVATAR_LEFT, y),
                avatar.canvas(),
                BlendMode::Over,
                1.0,
            );
        }

        let frames = base
            .iter()
            .enumerate()
            .map(|(i, frame)| {
                let mut canvas = frame.canvas.clone();
                let opacity = self.curve.opacity_at(i);
                if opacity > 0.0 {
                    canvas.composite((0, 0), &overlay, BlendMode::Over, opacity);
                }
                AnimationFrame {
                    canvas,
                    delay: frame.delay,
                }
            })
            .collect();
        tracing::debug!(frames = base.len(), "fade overlay applied");
        Ok(frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/fade.rs"]
mod tests;
