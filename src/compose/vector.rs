use crate::compose::canvas::Canvas;
use crate::foundation::core::{Point, Rgba8Premul};
use crate::foundation::error::{ForgeError, ForgeResult};

/// Run `draw` against a fresh `vello_cpu` context of the given size and return the rendered
/// premultiplied pixmap.
pub(crate) fn rasterize(
    width: u32,
    height: u32,
    draw: impl FnOnce(&mut vello_cpu::RenderContext) -> ForgeResult<()>,
) -> ForgeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ForgeError::contract("raster width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ForgeError::contract("raster height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    draw(&mut ctx)?;
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

/// Copy a rendered pixmap into a [`Canvas`] of the same size.
pub(crate) fn pixmap_to_canvas(pixmap: &vello_cpu::Pixmap) -> ForgeResult<Canvas> {
    Canvas::from_premul(
        u32::from(pixmap.width()),
        u32::from(pixmap.height()),
        pixmap.data_as_u8_slice().to_vec(),
    )
}

pub(crate) fn paint_color(color: Rgba8Premul) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = color.to_straight();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn to_cpu_point(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

/// Stroke a polyline (optionally closed) onto `canvas` with a butt-capped pen of `width`
/// pixels.
pub fn stroke_polyline(
    canvas: &mut Canvas,
    points: &[Point],
    closed: bool,
    width: f64,
    color: Rgba8Premul,
) -> ForgeResult<()> {
    let Some((&first, rest)) = points.split_first() else {
        return Ok(());
    };
    if !width.is_finite() || width <= 0.0 {
        return Err(ForgeError::contract("stroke width must be finite and > 0"));
    }

    let mut path = vello_cpu::kurbo::BezPath::new();
    path.move_to(to_cpu_point(first));
    for &p in rest {
        path.line_to(to_cpu_point(p));
    }
    if closed {
        path.close_path();
    }

    let pixmap = rasterize(canvas.width(), canvas.height(), |ctx| {
        ctx.set_paint(paint_color(color));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        ctx.stroke_path(&path);
        Ok(())
    })?;
    canvas.over_in_place(pixmap.data_as_u8_slice(), 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/vector.rs"]
mod tests;
