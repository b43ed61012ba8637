use super::*;

#[test]
fn inflate_shrinks_symmetrically() {
    let r = IntRect::new(0, 0, 500, 220).inflate(-30, -20);
    assert_eq!(r, IntRect::new(30, 20, 440, 180));
    assert_eq!(r.center(), (250, 110));
    assert_eq!(r.right(), 470);
    assert_eq!(r.bottom(), 200);
}

#[test]
fn contains_rect_is_inclusive_of_edges() {
    let outer = IntRect::new(0, 0, 10, 10);
    assert!(outer.contains_rect(IntRect::new(0, 0, 10, 10)));
    assert!(outer.contains_rect(IntRect::new(2, 3, 4, 4)));
    assert!(!outer.contains_rect(IntRect::new(-1, 0, 4, 4)));
    assert!(!outer.contains_rect(IntRect::new(8, 8, 4, 4)));
}

#[test]
fn premul_and_back_is_close() {
    let c = Rgba8Premul::from_straight_rgba(200, 100, 50, 128);
    assert_eq!(c.a, 128);
    let [r, g, b, a] = c.to_straight();
    assert_eq!(a, 128);
    assert!((i32::from(r) - 200).abs() <= 2);
    assert!((i32::from(g) - 100).abs() <= 2);
    assert!((i32::from(b) - 50).abs() <= 2);
}

#[test]
fn transparent_unpremultiplies_to_zero() {
    assert_eq!(Rgba8Premul::TRANSPARENT.to_straight(), [0, 0, 0, 0]);
}

#[test]
fn pixel_size_scales_both_axes() {
    assert_eq!(PixelSize::new(3, 4).scaled(3), PixelSize::new(9, 12));
}

#[test]
fn intersection_clips_to_the_overlap() {
    let canvas = IntRect::new(0, 0, 100, 50);
    assert_eq!(
        IntRect::new(-20, 10, 200, 10).intersection(canvas),
        Some(IntRect::new(0, 10, 100, 10))
    );
    assert_eq!(IntRect::new(100, 0, 5, 5).intersection(canvas), None);
    assert_eq!(IntRect::new(10, 10, 0, 5).intersection(canvas), None);
}
