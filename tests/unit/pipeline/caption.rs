use std::io::Cursor;
use std::sync::Arc;

use super::*;
use crate::studio::Template;
use crate::text::block::BlockTypesetter;

fn studio() -> Studio {
    Studio::new(Arc::new(BlockTypesetter::default()))
        .with_template(
            consts::CARD_TEMPLATE,
            Template::Still(Canvas::filled(240, 90, Rgba8Premul::WHITE)),
        )
        .with_template(
            consts::MESSAGE_TEMPLATE,
            Template::Still(Canvas::filled(300, 400, Rgba8Premul::WHITE)),
        )
}

fn solid_png(rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(20, 20, image::Rgba([rgb[0], rgb[1], rgb[2], 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn caption_card_is_upscaled_three_times() {
    let studio = studio();
    let avatar = solid_png([255, 0, 0]);
    let canvas = CaptionCard::new(&studio)
        .compose("hello", AvatarInput::new(0, &avatar))
        .unwrap();
    assert_eq!(canvas.size(), PixelSize::new(720, 270));
}

#[test]
fn caption_card_avatar_is_square_not_circular() {
    let studio = studio();
    let avatar = solid_png([255, 0, 0]);
    let canvas = CaptionCard::new(&studio)
        .compose("", AvatarInput::new(0, &avatar))
        .unwrap();
    // Corner of the 70x74 avatar at (4, 4), scaled by 3; pure red survives the web palette.
    let corner = canvas.pixel(4 * 3 + 3, 4 * 3 + 3).unwrap();
    assert!(corner.r > 200 && corner.g < 40, "{corner:?}");
    assert_eq!(canvas.pixel(2, 2), Some(Rgba8Premul::WHITE));
}

#[test]
fn caption_text_starts_after_the_avatar() {
    let studio = studio();
    let avatar = solid_png([255, 255, 255]);
    let canvas = CaptionCard::new(&studio)
        .compose("WWWW", AvatarInput::new(0, &avatar))
        .unwrap();
    // First glyph box spans roughly x 80..86, y 13..21 before upscaling.
    let px = canvas.pixel(83 * 3, 17 * 3).unwrap();
    assert!(px.r < 60, "{px:?}");
}

#[test]
fn caption_card_requires_decodable_avatar() {
    let studio = studio();
    let err = CaptionCard::new(&studio)
        .compose("x", AvatarInput::new(0, b"junk"))
        .unwrap_err();
    assert!(matches!(err, ForgeError::Decode(_)));
}

#[test]
fn message_card_draws_name_and_body() {
    let studio = studio();
    let canvas = MessageCard::new(&studio)
        .compose("Sam", "see you at eight")
        .unwrap();
    assert_eq!(canvas.size(), PixelSize::new(900, 1200));

    let ink = |y0: i32, y1: i32| {
        (y0..y1)
            .flat_map(|y| (19 * 3..120 * 3).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y).is_some_and(|p| p.r < 100))
            .count()
    };
    assert!(ink(252 * 3, 268 * 3) > 0);
    assert!(ink(269 * 3, 286 * 3) > 0);
    assert_eq!(ink(0, 240 * 3), 0);
}

#[test]
fn message_card_needs_its_template() {
    let studio = Studio::new(Arc::new(BlockTypesetter::default()));
    let err = MessageCard::new(&studio).compose("a", "b").unwrap_err();
    assert!(matches!(err, ForgeError::Contract(_)));
}
