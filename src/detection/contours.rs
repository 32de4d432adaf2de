use image::GrayImage;
use imageproc::point::Point;

use super::geometry::{self, Extents};

/// A closed boundary curve traced from the edge map
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn area(&self) -> f64 {
        geometry::polygon_area(&self.points)
    }

    pub fn perimeter(&self) -> f64 {
        geometry::arc_length(&self.points, true)
    }

    pub fn extents(&self) -> Option<Extents> {
        Extents::of(&self.points)
    }
}

/// A contour together with its enclosed area
#[derive(Debug, Clone, PartialEq)]
pub struct RankedContour {
    pub contour: Contour,
    pub area: f64,
}

/// Trace every border of the foreground (non-zero) pixels.
///
/// Outer and hole borders are returned in one flat list. Straight runs are
/// collapsed to their end vertices and curves left with fewer than three
/// points are dropped.
pub fn find_contours(edges: &GrayImage) -> Vec<Contour> {
    imageproc::contours::find_contours::<i32>(edges)
        .into_iter()
        .map(|traced| compress_chain(&traced.points))
        .filter(|points| points.len() >= 3)
        .map(Contour::new)
        .collect()
}

/// Order contours by enclosed area, largest first, and keep the first `limit`.
/// Equal areas keep their tracing order.
pub fn rank_by_area(contours: Vec<Contour>, limit: usize) -> Vec<RankedContour> {
    let mut ranked: Vec<RankedContour> = contours
        .into_iter()
        .map(|contour| RankedContour {
            area: contour.area(),
            contour,
        })
        .collect();
    ranked.sort_by(|a, b| b.area.total_cmp(&a.area));
    ranked.truncate(limit);
    ranked
}

/// Keep only the points where a closed chain changes direction
fn compress_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let mut chain: Vec<Point<i32>> = Vec::with_capacity(points.len());
    for &p in points {
        if chain.last() != Some(&p) {
            chain.push(p);
        }
    }
    while chain.len() > 1 && chain.first() == chain.last() {
        chain.pop();
    }
    if chain.len() < 3 {
        return chain;
    }

    let n = chain.len();
    let step = |from: Point<i32>, to: Point<i32>| ((to.x - from.x).signum(), (to.y - from.y).signum());
    (0..n)
        .filter(|&i| {
            let prev = chain[(i + n - 1) % n];
            let next = chain[(i + 1) % n];
            step(prev, chain[i]) != step(chain[i], next)
        })
        .map(|i| chain[i])
        .collect()
}
