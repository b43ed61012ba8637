use super::*;

const S: u32 = 1280;
const R: f64 = 576.0;

fn barycentric(p: Point, a: Point, b: Point, c: Point) -> (f64, f64, f64) {
    let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    let l1 = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / det;
    let l2 = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / det;
    (l1, l2, 1.0 - l1 - l2)
}

#[test]
fn three_labels_make_three_vertices_and_wedges() {
    let p = PolygonLayout::new(S, R, &["a", "b", "c"]).unwrap();
    assert_eq!(p.vertices().len(), 3);
    assert_eq!(p.wedge_count(), 3);
    for placement in p.assign(&(0..100).collect::<Vec<_>>()) {
        assert!(placement.wedge < 3);
    }
}

#[test]
fn first_vertex_is_on_top_and_winding_is_clockwise() {
    let p = PolygonLayout::new(S, R, &["n", "e", "s", "w"]).unwrap();
    let v = p.vertices();
    assert!((v[0].x - v[2].x).abs() < 1e-9);
    assert!(v[0].y < v[2].y);
    assert!(v[1].x > v[3].x);
}

#[test]
fn bounding_box_is_centered_on_canvas() {
    for n in 3..=9 {
        let labels: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        let p = PolygonLayout::new(S, R, &labels).unwrap();
        let xs = p.vertices().iter().map(|v| v.x);
        let ys = p.vertices().iter().map(|v| v.y);
        let (min_x, max_x) = xs.fold((f64::MAX, f64::MIN), |(a, b), x| (a.min(x), b.max(x)));
        let (min_y, max_y) = ys.fold((f64::MAX, f64::MIN), |(a, b), y| (a.min(y), b.max(y)));
        assert!(((min_x + max_x) / 2.0 - 640.0).abs() < 1e-6, "n = {n}");
        assert!(((min_y + max_y) / 2.0 - 640.0).abs() < 1e-6, "n = {n}");
    }
}

#[test]
fn triangle_samples_have_valid_barycentric_coordinates() {
    let a = Point::new(640.0, 700.0);
    let b = Point::new(640.0, 64.0);
    let c = Point::new(1188.0, 460.0);
    let steps = [0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 0.999_999];
    for &r1 in &steps {
        for &r2 in &steps {
            let p = random_point_in_triangle(a, b, c, r1, r2);
            let (l1, l2, l3) = barycentric(p, a, b, c);
            let eps = 1e-9;
            assert!(l1 >= -eps && l2 >= -eps && l3 >= -eps, "{r1} {r2}");
            assert!((l1 + l2 + l3 - 1.0).abs() < eps);
        }
    }
}

#[test]
fn placed_points_lie_in_their_wedge() {
    let p = PolygonLayout::new(S, R, &["a", "b", "c", "d", "e"]).unwrap();
    for nonce in 0..200 {
        let placement = p.place(nonce);
        let (a, b, c) = p.wedge(placement.wedge);
        let (l1, l2, l3) = barycentric(placement.point, a, b, c);
        assert!(l1 >= -1e-9 && l2 >= -1e-9 && l3 >= -1e-9);
    }
}

#[test]
fn placement_is_deterministic() {
    let a = PolygonLayout::new(S, R, &["x", "y", "z"]).unwrap();
    let b = PolygonLayout::new(S, R, &["x", "y", "z"]).unwrap();
    assert_eq!(a.assign(&[1, 2, 3]), b.assign(&[1, 2, 3]));
}

#[test]
fn labels_are_clamped_inside_canvas() {
    let margin = 10.0;
    for n in 3..=12 {
        let labels: Vec<String> = (0..n).map(|i| format!("label {i}")).collect();
        let p = PolygonLayout::new(S, R, &labels).unwrap();
        for (w, h) in [(40.0, 30.0), (300.0, 34.0), (900.0, 60.0)] {
            for i in 0..n {
                let c = p.label_center(i, (w, h), margin);
                assert!(c.x - w / 2.0 >= margin - 1e-9);
                assert!(c.x + w / 2.0 <= f64::from(S) - margin + 1e-9);
                assert!(c.y - h / 2.0 >= margin - 1e-9);
                assert!(c.y + h / 2.0 <= f64::from(S) - margin + 1e-9);
            }
        }
    }
}

#[test]
fn oversized_label_is_centered() {
    let p = PolygonLayout::new(S, R, &["a", "b", "c"]).unwrap();
    let c = p.label_center(1, (2000.0, 20.0), 10.0);
    assert_eq!(c.x, 640.0);
}

#[test]
fn label_is_pushed_outward_when_room_allows() {
    let p = PolygonLayout::new(S, R, &["a", "b", "c", "d", "e", "f"]).unwrap();
    let v = p.vertices()[1];
    let c = p.label_center(1, (10.0, 10.0), 10.0);
    let center = p.center();
    assert!((c - center).hypot() > (v - center).hypot());
}

#[test]
fn too_few_labels_is_configuration_error() {
    let err = PolygonLayout::new(S, R, &["a", "b"]).unwrap_err();
    assert!(matches!(err, ForgeError::Configuration(_)));
}

#[test]
fn vertex_label_mismatch_is_contract_violation() {
    let vertices = regular_polygon(4, Point::new(640.0, 640.0), R);
    let err =
        PolygonLayout::with_vertices(S, Point::new(640.0, 640.0), vertices, &["a", "b", "c"])
            .unwrap_err();
    assert!(matches!(err, ForgeError::Contract(_)));
}

#[test]
fn top_left_truncates_toward_zero() {
    let placement = WedgePlacement {
        wedge: 0,
        point: Point::new(100.7, 64.2),
    };
    assert_eq!(placement.top_left(PixelSize::new(128, 128)), (36, 0));
}
