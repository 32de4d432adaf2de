//! Plate localization on the edge map
//!
//! Contours are traced and ranked by area, the first one that simplifies to
//! a quadrilateral is taken as the plate, and its bounding box is cropped.

pub mod contours;
pub mod crop;
pub mod geometry;
pub mod selector;

pub use contours::{find_contours, rank_by_area, Contour, RankedContour};
pub use crop::{crop_region, PlateRegion};
pub use geometry::BoundingBox;
pub use selector::{select_plate, PlateCandidate, SelectionPolicy};
