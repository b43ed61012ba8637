use super::*;

fn cases() -> Vec<(IntRect, PixelSize)> {
    vec![
        (IntRect::new(0, 0, 100, 80), PixelSize::new(10, 20)),
        (IntRect::new(-7, 13, 33, 33), PixelSize::new(33, 1)),
        (IntRect::new(5, 5, 129, 64), PixelSize::new(128, 64)),
        (IntRect::new(400, 0, 1, 1), PixelSize::new(0, 0)),
        (IntRect::new(0, 0, 1280, 1280), PixelSize::new(128, 128)),
    ]
}

#[test]
fn compass_table_matches() {
    let c = IntRect::new(10, 20, 100, 50);
    let s = PixelSize::new(20, 10);
    let at = |a| resolve_position(c, s, a, (0, 0));
    assert_eq!(at(Anchor::TopLeft), (10, 20));
    assert_eq!(at(Anchor::TopCenter), (50, 20));
    assert_eq!(at(Anchor::TopRight), (90, 20));
    assert_eq!(at(Anchor::LeftCenter), (10, 40));
    assert_eq!(at(Anchor::Center), (50, 40));
    assert_eq!(at(Anchor::RightCenter), (90, 40));
    assert_eq!(at(Anchor::BottomLeft), (10, 60));
    assert_eq!(at(Anchor::BottomCenter), (50, 60));
    assert_eq!(at(Anchor::BottomRight), (90, 60));
}

#[test]
fn offset_is_added_after_alignment() {
    let c = IntRect::new(0, 0, 10, 10);
    let p = resolve_position(c, PixelSize::new(2, 2), Anchor::BottomRight, (3, -4));
    assert_eq!(p, (11, 4));
}

#[test]
fn source_stays_inside_container_when_it_fits() {
    for (container, size) in cases() {
        for anchor in Anchor::ALL {
            let (x, y) = resolve_position(container, size, anchor, (0, 0));
            let placed = IntRect::new(x, y, size.width as i32, size.height as i32);
            assert!(
                container.contains_rect(placed),
                "{anchor:?} placed {placed:?} outside {container:?}"
            );
        }
    }
}

#[test]
fn mirrored_anchors_mirror_around_center() {
    for (container, size) in cases() {
        for anchor in Anchor::ALL {
            let (x, y) = resolve_position(container, size, anchor, (0, 0));
            let (mx, _) = resolve_position(container, size, anchor.mirrored_h(), (0, 0));
            let (_, my) = resolve_position(container, size, anchor.mirrored_v(), (0, 0));

            let free_w = container.width - size.width as i32;
            let free_h = container.height - size.height as i32;
            if anchor.h_align() != HAlign::Center {
                assert_eq!((x - container.x) + (mx - container.x), free_w);
            } else {
                assert_eq!(x, mx);
            }
            if anchor.v_align() != VAlign::Middle {
                assert_eq!((y - container.y) + (my - container.y), free_h);
            } else {
                assert_eq!(y, my);
            }
        }
    }
}

#[test]
fn oversized_source_goes_negative_without_failing() {
    let c = IntRect::at(100, 100);
    let p = resolve_position(c, PixelSize::new(40, 20), Anchor::Center, (0, 0));
    assert_eq!(p, (80, 90));
}

#[test]
fn parse_names_and_aliases() {
    assert_eq!("north".parse::<Anchor>().unwrap(), Anchor::TopCenter);
    assert_eq!("South_East".parse::<Anchor>().unwrap(), Anchor::BottomRight);
    assert_eq!("left-center".parse::<Anchor>().unwrap(), Anchor::LeftCenter);
    assert_eq!("center".parse::<Anchor>().unwrap(), Anchor::Center);

    let err = "upward".parse::<Anchor>().unwrap_err();
    assert!(matches!(err, ForgeError::Contract(_)));
}
