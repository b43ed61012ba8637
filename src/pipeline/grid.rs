use crate::assets::avatar::{AvatarImage, AvatarInput, crop_all};
use crate::assets::blur::gaussian_blur;
use crate::assets::decode::resize_canvas;
use crate::compose::anchor::Anchor;
use crate::compose::blend::BlendMode;
use crate::compose::canvas::Canvas;
use crate::foundation::core::{IntRect, PixelSize, Rgba8Premul};
use crate::foundation::error::ForgeResult;
use crate::layout::grid::{GridCell, GridLayout};
use crate::pipeline::output::{Rendered, encode_png};
use crate::studio::Studio;
use crate::text::{FontFace, TextRenderer, TextStyle};

pub mod consts {
    pub const CELL_WIDTH: u32 = 500;
    pub const CELL_HEIGHT: u32 = 300;
    pub const H_MARGIN: i32 = 30;
    pub const V_MARGIN: i32 = 20;
    /// Band under each cell reserved for its caption.
    pub const TEXT_HEIGHT: i32 = 80;
    pub const TEXT_MARGIN: i32 = 10;
    pub const FONT_SIZE: f32 = 40.0;
    pub const BACKGROUND_BLUR_SIGMA: f32 = 10.0;
}

/// Alignment chart: an `n/2 × n/2` grid of labeled cells with avatars scattered by seed.
pub struct GridChart<'a> {
    studio: &'a Studio,
}

impl<'a> GridChart<'a> {
    pub fn new(studio: &'a Studio) -> Self {
        Self { studio }
    }

    #[tracing::instrument(skip(self, avatars, options), fields(avatars = avatars.len(), options = options.len()))]
    pub fn render<S: AsRef<str>>(
        &self,
        avatars: &[AvatarInput<'_>],
        options: &[S],
    ) -> ForgeResult<Rendered> {
        let canvas = self.compose(avatars, options)?;
        Ok(Rendered::Still(encode_png(canvas)?))
    }

    /// Draw the chart without encoding it.
    pub fn compose<S: AsRef<str>>(
        &self,
        avatars: &[AvatarInput<'_>],
        options: &[S],
    ) -> ForgeResult<Canvas> {
        let layout = GridLayout::new(options)?;
        let images = crop_all(avatars)?;
        let nonces: Vec<u64> = avatars.iter().map(|a| a.nonce).collect();
        let assignment = layout.assign(&nonces);

        let mut canvas = Canvas::filled(
            consts::CELL_WIDTH * layout.cols(),
            consts::CELL_HEIGHT * layout.rows(),
            Rgba8Premul::BLACK,
        );
        let mut text: Box<dyn TextRenderer + '_> = self.studio.typesetter().renderer();
        let label_style = TextStyle::new(FontFace::Serif, consts::FONT_SIZE, Rgba8Premul::LIGHT_GRAY)
            .anchored(Anchor::TopCenter);

        for cell in layout.cells() {
            let rect = cell_rect(cell);
            let label_rect = IntRect::new(
                rect.x,
                rect.bottom() + consts::TEXT_MARGIN,
                rect.width,
                consts::TEXT_HEIGHT - consts::TEXT_MARGIN,
            );
            text.draw(&mut canvas, &cell.label, label_rect, &label_style)?;

            let occupants: Vec<&AvatarImage> = assignment
                .in_cell(cell.col, cell.row)
                .iter()
                .map(|&i| &images[i])
                .collect();
            draw_cell_avatars(&mut canvas, rect, &occupants)?;
        }
        Ok(canvas)
    }
}

/// Avatar area of a cell, excluding margins and the caption band.
pub fn cell_rect(cell: &GridCell) -> IntRect {
    IntRect::new(
        (consts::CELL_WIDTH * cell.col) as i32,
        (consts::CELL_HEIGHT * cell.row) as i32,
        consts::CELL_WIDTH as i32,
        consts::CELL_HEIGHT as i32 - consts::TEXT_HEIGHT,
    )
    .inflate(-consts::H_MARGIN, -consts::V_MARGIN)
}

fn draw_cell_avatars(
    canvas: &mut Canvas,
    rect: IntRect,
    occupants: &[&AvatarImage],
) -> ForgeResult<()> {
    let Some(first) = occupants.first() else {
        canvas.fill_rect(rect, Rgba8Premul::LIGHT_GRAY);
        return Ok(());
    };

    let strip = avatar_strip(first.size(), occupants, rect.width as u32)?;
    let blurred = gaussian_blur(&strip, consts::BACKGROUND_BLUR_SIGMA)?;
    let background = blurred
        .pixel(blurred.width() as i32 / 2, blurred.height() as i32 / 2)
        .unwrap_or(Rgba8Premul::LIGHT_GRAY);
    canvas.fill_rect(rect, background);

    let (cx, cy) = rect.center();
    canvas.composite(
        (cx - strip.width() as i32 / 2, cy - strip.height() as i32 / 2),
        &strip,
        BlendMode::Over,
        1.0,
    );
    tracing::debug!(count = occupants.len(), ?background, "grid cell filled");
    Ok(())
}

/// Avatars side by side, scaled down to `max_width` when wider.
fn avatar_strip(
    tile: PixelSize,
    occupants: &[&AvatarImage],
    max_width: u32,
) -> ForgeResult<Canvas> {
    let mut strip = Canvas::new(tile.width * occupants.len() as u32, tile.height);
    for (i, avatar) in occupants.iter().enumerate() {
        strip.composite(
            ((i as u32 * tile.width) as i32, 0),
            avatar.canvas(),
            BlendMode::Over,
            1.0,
        );
    }
    if strip.width() <= max_width {
        return Ok(strip);
    }
    let scale = f64::from(max_width) / f64::from(strip.width());
    let size = PixelSize::new(
        (f64::from(strip.width()) * scale) as u32,
        ((f64::from(strip.height()) * scale) as u32).max(1),
    );
    resize_canvas(&strip, size)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/grid.rs"]
mod tests;
