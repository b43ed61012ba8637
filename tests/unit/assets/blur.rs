use super::*;
use crate::foundation::core::Rgba8Premul;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let src = Canvas::filled(4, 3, Rgba8Premul::from_array([10, 20, 30, 40]));
    let out = gaussian_blur(&src, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn blur_rejects_bad_inputs() {
    assert!(blur_rgba8_premul(&[0u8; 3], 1, 1, 1, 1.0).is_err());
    assert!(blur_rgba8_premul(&[0u8; 4], 1, 1, 1, 0.0).is_err());
}

#[test]
fn radius_covers_three_sigma() {
    assert_eq!(radius_for_sigma(10.0), 30);
    assert_eq!(radius_for_sigma(0.5), 2);
}

#[test]
fn rows_and_columns_blur_alike() {
    // A 4x1 strip and its 1x4 transpose must blur to the same pixel sequence.
    let strip: Vec<u8> = [0u8, 255, 0, 0]
        .iter()
        .flat_map(|&v| [v, v / 2, 0, v])
        .collect();
    let wide = blur_rgba8_premul(&strip, 4, 1, 2, 1.0).unwrap();
    let tall = blur_rgba8_premul(&strip, 1, 4, 2, 1.0).unwrap();
    assert_eq!(wide, tall);
    assert!(wide[3] > 0 && wide[15] > 0);
}
