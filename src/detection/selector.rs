use imageproc::point::Point;

use super::contours::{Contour, RankedContour};
use super::geometry;

/// The contour accepted as the license plate
#[derive(Debug, Clone, PartialEq)]
pub struct PlateCandidate {
    /// Position in the area ranking, 0 = largest
    pub rank: usize,
    pub area: f64,
    pub contour: Contour,
    /// Simplified polygon that passed the vertex test
    pub polygon: Vec<Point<i32>>,
}

/// Approximation policy for the quadrilateral test
#[derive(Debug, Clone, Copy)]
pub struct SelectionPolicy {
    /// Tolerance as a fraction of the contour perimeter
    pub epsilon_ratio: f64,
    /// Vertex count a plate outline must reduce to
    pub vertices: usize,
}

/// Simplify `contour` with a tolerance proportional to its perimeter
pub fn approximate(contour: &Contour, epsilon_ratio: f64) -> Vec<Point<i32>> {
    let epsilon = epsilon_ratio * contour.perimeter();
    geometry::approximate_polygon(&contour.points, epsilon)
}

/// Return the highest-ranked contour whose approximation has exactly
/// `policy.vertices` vertices.
///
/// The search stops at the first match, so a smaller quadrilateral further
/// down the ranking is never considered once a larger one qualifies.
pub fn select_plate(ranked: &[RankedContour], policy: SelectionPolicy) -> Option<PlateCandidate> {
    ranked.iter().enumerate().find_map(|(rank, candidate)| {
        let polygon = approximate(&candidate.contour, policy.epsilon_ratio);
        tracing::debug!(
            rank,
            area = candidate.area,
            points = candidate.contour.points.len(),
            vertices = polygon.len(),
            "Examined contour"
        );

        (polygon.len() == policy.vertices).then(|| PlateCandidate {
            rank,
            area: candidate.area,
            contour: candidate.contour.clone(),
            polygon,
        })
    })
}
