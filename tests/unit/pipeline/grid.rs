use std::io::Cursor;
use std::sync::Arc;

use super::*;
use crate::foundation::error::ForgeError;
use crate::text::block::BlockTypesetter;

fn studio() -> Studio {
    Studio::new(Arc::new(BlockTypesetter::default()))
}

fn solid_png(rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(64, 64, image::Rgba([rgb[0], rgb[1], rgb[2], 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn cell_rect_applies_margins_and_caption_band() {
    let cell = GridCell {
        col: 1,
        row: 2,
        label: String::new(),
    };
    assert_eq!(cell_rect(&cell), IntRect::new(530, 620, 440, 180));
}

#[test]
fn empty_grid_has_gray_cells_on_black() {
    let studio = studio();
    let canvas = GridChart::new(&studio)
        .compose(&[], &["A", "B", "A", "B"])
        .unwrap();
    assert_eq!(canvas.size(), PixelSize::new(1000, 600));
    assert_eq!(canvas.pixel(5, 5), Some(Rgba8Premul::BLACK));
    for (x, y) in [(250, 110), (750, 110), (250, 410), (750, 410)] {
        assert_eq!(canvas.pixel(x, y), Some(Rgba8Premul::LIGHT_GRAY));
    }
}

#[test]
fn captions_are_drawn_under_each_cell() {
    let studio = studio();
    let canvas = GridChart::new(&studio).compose(&[], &["x", "x"]).unwrap();
    // "TRUE X" is 6 block glyphs of 24px advance centered at x = 250, starting at y = 210.
    let inked = (210..258)
        .flat_map(|y| (0..500).map(move |x| (x, y)))
        .filter(|&(x, y)| canvas.pixel(x, y) == Some(Rgba8Premul::LIGHT_GRAY))
        .count();
    assert!(inked > 0);
    assert_eq!(canvas.pixel(250, 290), Some(Rgba8Premul::BLACK));
}

#[test]
fn occupied_cell_takes_avatar_tint() {
    let studio = studio();
    let red = solid_png([220, 30, 30]);
    let canvas = GridChart::new(&studio)
        .compose(&[AvatarInput::new(7, &red)], &["x", "x"])
        .unwrap();
    // Cell corner is outside the circular avatar, so it shows the blurred background.
    let bg = canvas.pixel(32, 22).unwrap();
    assert_ne!(bg, Rgba8Premul::LIGHT_GRAY);
    assert!(bg.r > bg.g && bg.r > bg.b);
    let center = canvas.pixel(250, 110).unwrap();
    assert!(center.r > 200 && center.g < 60);
}

#[test]
fn option_errors_win_over_bad_avatars() {
    let studio = studio();
    let err = GridChart::new(&studio)
        .compose(&[AvatarInput::new(1, b"junk")], &["a", "b", "c"])
        .unwrap_err();
    assert!(matches!(err, ForgeError::Configuration(_)));
}

#[test]
fn bad_avatar_aborts_with_index() {
    let studio = studio();
    let ok = solid_png([0, 0, 255]);
    let err = GridChart::new(&studio)
        .compose(
            &[AvatarInput::new(1, &ok), AvatarInput::new(2, b"junk")],
            &["a", "b"],
        )
        .unwrap_err();
    let ForgeError::Decode(msg) = err else {
        panic!("expected decode error");
    };
    assert!(msg.contains("avatar #1"));
}

#[test]
fn render_encodes_png() {
    let studio = studio();
    let out = GridChart::new(&studio).render(&[], &["a", "b"]).unwrap();
    assert!(matches!(out, Rendered::Still(_)));
    assert_eq!(out.size(), PixelSize::new(500, 300));
}

#[test]
fn crowded_cell_scales_the_strip_to_fit() {
    let studio = studio();
    let red = solid_png([230, 20, 20]);
    let blue = solid_png([20, 20, 230]);
    // Five 128px avatars make a 640px strip; the middle one sets the background color.
    let avatars = [
        AvatarInput::new(0, &red),
        AvatarInput::new(1, &blue),
        AvatarInput::new(2, &blue),
        AvatarInput::new(3, &blue),
        AvatarInput::new(4, &red),
    ];
    let canvas = GridChart::new(&studio).compose(&avatars, &["x", "x"]).unwrap();
    let is_red = |x: i32, y: i32| {
        canvas
            .pixel(x, y)
            .is_some_and(|px| px.r > 150 && px.b < 100)
    };

    // Scaled to the 440px cell width: the outer red avatars touch x = 30 and x = 469.
    let red_xs: Vec<i32> = (0..500).filter(|&x| is_red(x, 110)).collect();
    assert_eq!(red_xs.first(), Some(&30));
    assert_eq!(red_xs.last(), Some(&469));
    assert!(!is_red(250, 110));

    // Height shrinks by the same 440/640 factor: 128px becomes 88px, centered on y = 110.
    let red_rows = (0..300).filter(|&y| is_red(74, y)).count();
    assert!((84..=92).contains(&red_rows), "{red_rows}");
    assert!(!is_red(74, 60));
    assert!(!is_red(74, 160));
}
