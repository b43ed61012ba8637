//! Renderable products.
//!
//! Every pipeline borrows a [`crate::Studio`] and is otherwise a pure function of its inputs:
//! it validates options, decodes all avatars, then allocates its own canvas, so a failing
//! request never gets as far as drawing. Any undecodable avatar aborts the whole render with
//! a decode error naming the avatar's index.

pub mod caption;
pub mod fade;
pub mod grid;
pub mod output;
pub mod polygon;
pub mod quadrant;

pub use caption::{CaptionCard, MessageCard};
pub use fade::{FadeCurve, FadeOverlay};
pub use grid::GridChart;
pub use output::{EncodedAnimation, EncodedImage, Rendered, encode_gif, encode_png};
pub use polygon::PolygonChart;
pub use quadrant::QuadrantChart;
