use std::f64::consts::TAU;

use crate::foundation::core::{PixelSize, Point};
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::seed::{SeedTuple, derive_rng};

/// Smallest label count that still forms a polygon.
pub const MIN_LABELS: usize = 3;

/// Labels sit this fraction of the center-to-vertex distance outside their vertex.
const LABEL_PUSH: f64 = 0.1;

/// One avatar's wedge pick and sampled point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WedgePlacement {
    pub wedge: usize,
    pub point: Point,
}

impl WedgePlacement {
    /// Top-left corner that centers a `size` image on the sampled point, truncated toward zero.
    pub fn top_left(&self, size: PixelSize) -> (i32, i32) {
        let x = self.point.x - f64::from(size.width) / 2.0;
        let y = self.point.y - f64::from(size.height) / 2.0;
        (x as i32, y as i32)
    }
}

/// Vertices of a regular `n`-gon around `center`, first vertex straight up, clockwise in
/// screen coordinates.
pub fn regular_polygon(n: usize, center: Point, radius: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            Point::new(
                center.x + radius * angle.sin(),
                center.y - radius * angle.cos(),
            )
        })
        .collect()
}

/// Barycentric sample of triangle `abc` from two uniform draws in `[0, 1)`.
pub fn random_point_in_triangle(a: Point, b: Point, c: Point, r1: f64, r2: f64) -> Point {
    let s = r1.sqrt();
    let wa = 1.0 - s;
    let wb = s * (1.0 - r2);
    let wc = r2 * s;
    Point::new(
        wa * a.x + wb * b.x + wc * c.x,
        wa * a.y + wb * b.y + wc * c.y,
    )
}

/// Labeled polygon on a square canvas, split into triangular wedges around its center.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonLayout {
    canvas_size: u32,
    center: Point,
    vertices: Vec<Point>,
    labels: Vec<String>,
}

impl PolygonLayout {
    /// Regular polygon of `radius`, shifted so its bounding box is centered on the canvas.
    pub fn new<S: AsRef<str>>(canvas_size: u32, radius: f64, labels: &[S]) -> ForgeResult<Self> {
        if labels.len() < MIN_LABELS {
            return Err(ForgeError::configuration(format!(
                "polygon chart needs at least {MIN_LABELS} labels, got {}",
                labels.len()
            )));
        }
        let mid = f64::from(canvas_size) / 2.0;
        let canvas_center = Point::new(mid, mid);
        let raw = regular_polygon(labels.len(), canvas_center, radius);

        let (min, max) = raw.iter().fold(
            (
                Point::new(f64::INFINITY, f64::INFINITY),
                Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            ),
            |(lo, hi), p| {
                (
                    Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                    Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                )
            },
        );
        let shift = canvas_center - min.midpoint(max);
        let vertices = raw.into_iter().map(|p| p + shift).collect();

        Self::with_vertices(canvas_size, canvas_center + shift, vertices, labels)
    }

    /// Arbitrary polygon; every vertex must have exactly one label.
    pub fn with_vertices<S: AsRef<str>>(
        canvas_size: u32,
        center: Point,
        vertices: Vec<Point>,
        labels: &[S],
    ) -> ForgeResult<Self> {
        if vertices.len() != labels.len() {
            return Err(ForgeError::contract(format!(
                "polygon has {} vertices but {} labels",
                vertices.len(),
                labels.len()
            )));
        }
        if vertices.len() < MIN_LABELS {
            return Err(ForgeError::configuration(format!(
                "polygon chart needs at least {MIN_LABELS} labels, got {}",
                labels.len()
            )));
        }
        Ok(Self {
            canvas_size,
            center,
            vertices,
            labels: labels.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    }

    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }

    /// Center of the polygon after recentering; apex shared by every wedge.
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn wedge_count(&self) -> usize {
        self.vertices.len()
    }

    /// Triangle `(center, v_i, v_(i+1 mod n))`.
    pub fn wedge(&self, index: usize) -> (Point, Point, Point) {
        let n = self.vertices.len();
        (
            self.center,
            self.vertices[index % n],
            self.vertices[(index + 1) % n],
        )
    }

    /// Center point for label `index` whose measured size is `extent`, pushed outward from its
    /// vertex and clamped per axis so the label box keeps `margin` from every canvas edge.
    ///
    /// A label larger than the canvas on some axis is centered on that axis instead.
    pub fn label_center(&self, index: usize, extent: (f64, f64), margin: f64) -> Point {
        let v = self.vertices[index % self.vertices.len()];
        let wanted = v + (v - self.center) * LABEL_PUSH;
        let s = f64::from(self.canvas_size);
        let clamp_axis = |value: f64, half: f64| {
            let lo = half + margin;
            let hi = s - half - margin;
            if lo > hi {
                tracing::warn!(index, half, "polygon label wider than canvas, centering");
                s / 2.0
            } else {
                value.clamp(lo, hi)
            }
        };
        Point::new(
            clamp_axis(wanted.x, extent.0 / 2.0),
            clamp_axis(wanted.y, extent.1 / 2.0),
        )
    }

    /// Wedge and point for one avatar nonce.
    pub fn place(&self, nonce: u64) -> WedgePlacement {
        let mut rng = derive_rng(
            &SeedTuple::new()
                .with_all(self.labels.iter().map(String::as_str))
                .with(nonce),
        );
        let wedge = rng.below(self.vertices.len() as u32) as usize;
        let (a, b, c) = self.wedge(wedge);
        let r1 = rng.unit();
        let r2 = rng.unit();
        WedgePlacement {
            wedge,
            point: random_point_in_triangle(a, b, c, r1, r2),
        }
    }

    pub fn assign(&self, nonces: &[u64]) -> Vec<WedgePlacement> {
        let placements: Vec<_> = nonces.iter().map(|&n| self.place(n)).collect();
        tracing::debug!(
            avatars = placements.len(),
            wedges = self.wedge_count(),
            "polygon assignment"
        );
        placements
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/polygon.rs"]
mod tests;
