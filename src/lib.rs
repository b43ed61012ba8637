//! memeforge renders parameterized meme images and animations.
//!
//! Inputs are plain data: labels and captions, plus avatar images as encoded bytes. Outputs
//! are encoded PNG stills or looping GIFs. The surface is pipeline-oriented:
//!
//! - Load a [`Studio`] once at startup (fonts + base templates)
//! - Construct a pipeline ([`GridChart`], [`QuadrantChart`], [`PolygonChart`],
//!   [`CaptionCard`], [`MessageCard`], [`FadeOverlay`]) borrowing it
//! - Call `render` to get a [`Rendered`] buffer
//!
//! Avatar placement is deterministic: every layout seeds its generator from the chart's
//! labels plus a caller-supplied per-avatar nonce (see [`seed`]).
#![forbid(unsafe_code)]

mod foundation;

/// Avatar decoding, masking and image filters.
pub mod assets;
/// Canvas, blending and anchor math.
pub mod compose;
/// Startup resource configuration.
pub mod config;
/// Region assignment for grid, quadrant and polygon charts.
pub mod layout;
/// The renderable products.
pub mod pipeline;
pub mod seed;
/// Shared read-only context handed to pipelines.
pub mod studio;
/// Text measurement and drawing.
pub mod text;

pub use crate::foundation::core::{IntRect, PixelSize, Point, Rgba8Premul};
pub use crate::foundation::error::{ForgeError, ForgeResult};

pub use crate::assets::avatar::{AVATAR_SIZE, AvatarImage, AvatarInput, crop_circle};
pub use crate::assets::decode::AnimationFrame;
pub use crate::compose::anchor::{Anchor, resolve_position};
pub use crate::compose::blend::BlendMode;
pub use crate::compose::canvas::Canvas;
pub use crate::config::StudioConfig;
pub use crate::layout::{GridLayout, PolygonLayout, QuadrantLabels, QuadrantLayout};
pub use crate::pipeline::{
    CaptionCard, EncodedAnimation, EncodedImage, FadeCurve, FadeOverlay, GridChart, MessageCard,
    PolygonChart, QuadrantChart, Rendered,
};
pub use crate::seed::{SeedPart, SeedTuple, SeededRng, derive_rng};
pub use crate::studio::{Studio, Template};
pub use crate::text::block::BlockTypesetter;
pub use crate::text::fonts::FontBook;
pub use crate::text::{FontFace, TextRenderer, TextStyle, Typesetter};
