use std::io::Cursor;

use super::*;
use crate::foundation::core::Rgba8Premul;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let canvas = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(canvas.size(), PixelSize::new(1, 1));
    assert_eq!(
        canvas.data(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_is_a_decode_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, ForgeError::Decode(_)));

    let err = decode_animation(b"GIF89a?").unwrap_err();
    assert!(matches!(err, ForgeError::Decode(_)));
}

#[test]
fn decode_animation_keeps_frame_count_and_delays() {
    let mut buf = Vec::new();
    {
        let mut enc = image::codecs::gif::GifEncoder::new(&mut buf);
        let frames = (0..3u8).map(|i| {
            let px = image::Rgba([i * 80, 0, 0, 255]);
            image::Frame::from_parts(
                image::RgbaImage::from_pixel(4, 2, px),
                0,
                0,
                image::Delay::from_numer_denom_ms(50, 1),
            )
        });
        enc.encode_frames(frames).unwrap();
    }

    let frames = decode_animation(&buf).unwrap();
    assert_eq!(frames.len(), 3);
    for f in &frames {
        assert_eq!(f.canvas.size(), PixelSize::new(4, 2));
        assert_eq!(
            std::time::Duration::from(f.delay),
            std::time::Duration::from_millis(50)
        );
    }
    assert_eq!(frames[0].canvas.pixel(0, 0).unwrap().a, 255);
}

#[test]
fn resize_keeps_flat_color_and_premul_invariant() {
    let src = Canvas::filled(8, 8, Rgba8Premul::from_straight_rgba(10, 200, 30, 255));
    let out = resize_canvas(&src, PixelSize::new(3, 5)).unwrap();
    assert_eq!(out.size(), PixelSize::new(3, 5));
    assert_eq!(out.pixel(1, 2), src.pixel(0, 0));

    let mut half = Canvas::new(8, 8);
    half.fill_rect(
        crate::foundation::core::IntRect::new(0, 0, 4, 8),
        Rgba8Premul::WHITE,
    );
    let out = resize_canvas(&half, PixelSize::new(5, 5)).unwrap();
    for px in out.data().chunks_exact(4) {
        assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3]);
    }
}
