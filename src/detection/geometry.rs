//! Planar geometry over integer contours: area, perimeter, polygon
//! simplification and axis-aligned bounds.

use imageproc::point::Point;
use serde::Serialize;

/// Enclosed area of a closed polygon (shoelace formula, absolute value)
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    twice.abs() as f64 / 2.0
}

/// Length of the curve through `points`, closing it back to the start if `closed`
pub fn arc_length(points: &[Point<i32>], closed: bool) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let open: f64 = points.windows(2).map(|w| distance(w[0], w[1])).sum();
    if closed {
        open + distance(points[points.len() - 1], points[0])
    } else {
        open
    }
}

fn distance(a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    dx.hypot(dy)
}

/// Distance from `p` to the infinite line through `a` and `b`
fn line_distance(p: Point<i32>, a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    let len = dx.hypot(dy);
    if len == 0.0 {
        return distance(p, a);
    }
    ((p.x - a.x) as f64 * dy - (p.y - a.y) as f64 * dx).abs() / len
}

/// Douglas-Peucker simplification of a closed curve.
///
/// The curve is split at the two mutually distant points and each half is
/// simplified independently; afterwards vertices lying within `epsilon` of
/// the line through their neighbors are dropped. Every returned vertex is a
/// point of the input.
pub fn approximate_polygon(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    if points.len() <= 3 {
        return points.to_vec();
    }

    let (start, far) = split_points(points);

    // Rotate so the curve starts at `start`; `far` lands at `split`
    let n = points.len();
    let rotated: Vec<Point<i32>> = (0..=n).map(|i| points[(start + i) % n]).collect();
    let split = (far + n - start) % n;

    let mut polygon = simplify_open(&rotated[..=split], epsilon);
    polygon.pop();
    let mut second = simplify_open(&rotated[split..], epsilon);
    second.pop();
    polygon.extend(second);

    remove_collinear(polygon, epsilon)
}

/// Indices of two far-apart points, found by a few farthest-point hops
fn split_points(points: &[Point<i32>]) -> (usize, usize) {
    let farthest_from = |from: usize| -> usize {
        let origin = points[from];
        let mut best = from;
        let mut best_dist = -1.0;
        for (i, &p) in points.iter().enumerate() {
            let d = distance(origin, p);
            if d > best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    };

    let mut start = 0;
    let mut far = farthest_from(start);
    for _ in 0..3 {
        let next = farthest_from(far);
        if next == start {
            break;
        }
        start = far;
        far = next;
    }
    (start, far)
}

/// Douglas-Peucker on an open polyline; both endpoints are always kept
fn simplify_open(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut ranges = vec![(0usize, last)];
    while let Some((lo, hi)) = ranges.pop() {
        if hi <= lo + 1 {
            continue;
        }
        let (a, b) = (points[lo], points[hi]);
        let (split, max_dist) = (lo + 1..hi)
            .map(|i| (i, line_distance(points[i], a, b)))
            .fold((lo, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });

        if max_dist > epsilon {
            keep[split] = true;
            ranges.push((lo, split));
            ranges.push((split, hi));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}

/// Drop vertices of a closed polygon that sit within `epsilon` of the line
/// through their neighbors
fn remove_collinear(mut polygon: Vec<Point<i32>>, epsilon: f64) -> Vec<Point<i32>> {
    loop {
        let n = polygon.len();
        if n <= 3 {
            return polygon;
        }
        let flat = (0..n).find(|&i| {
            let prev = polygon[(i + n - 1) % n];
            let next = polygon[(i + 1) % n];
            line_distance(polygon[i], prev, next) <= epsilon
        });
        match flat {
            Some(i) => {
                polygon.remove(i);
            }
            None => return polygon,
        }
    }
}

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Inclusive extents of a point set, before clipping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extents {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl Extents {
    pub fn of(points: &[Point<i32>]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            min_x: first.x as i64,
            min_y: first.y as i64,
            max_x: first.x as i64,
            max_y: first.y as i64,
        };
        Some(points.iter().fold(init, |e, p| Self {
            min_x: e.min_x.min(p.x as i64),
            min_y: e.min_y.min(p.y as i64),
            max_x: e.max_x.max(p.x as i64),
            max_y: e.max_y.max(p.y as i64),
        }))
    }

    /// Clip to a `width` x `height` image; `None` if nothing remains
    pub fn clip(&self, width: u32, height: u32) -> Option<BoundingBox> {
        let x0 = self.min_x.max(0);
        let y0 = self.min_y.max(0);
        let x1 = self.max_x.min(width as i64 - 1);
        let y1 = self.max_y.min(height as i64 - 1);
        if x1 < x0 || y1 < y0 {
            return None;
        }
        Some(BoundingBox {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0 + 1) as u32,
            height: (y1 - y0 + 1) as u32,
        })
    }
}
