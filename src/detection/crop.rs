use crate::error::PlateError;
use image::{imageops, GrayImage};

use super::contours::Contour;
use super::geometry::BoundingBox;

/// Cropped plate pixels and where they came from
#[derive(Debug, Clone)]
pub struct PlateRegion {
    pub image: GrayImage,
    pub bbox: BoundingBox,
}

/// Slice `image` to the axis-aligned bounding box of `contour`.
///
/// The box is clipped to the image extents. A contour with no points, or
/// one lying entirely outside the image, is a `DegenerateRegion`.
pub fn crop_region(image: &GrayImage, contour: &Contour) -> Result<PlateRegion, PlateError> {
    let extents = contour.extents().ok_or(PlateError::DegenerateRegion {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    })?;

    let bbox = extents
        .clip(image.width(), image.height())
        .ok_or(PlateError::DegenerateRegion {
            x: extents.min_x,
            y: extents.min_y,
            width: (extents.max_x - extents.min_x + 1).max(0),
            height: (extents.max_y - extents.min_y + 1).max(0),
        })?;

    let cropped = imageops::crop_imm(image, bbox.x, bbox.y, bbox.width, bbox.height).to_image();

    Ok(PlateRegion {
        image: cropped,
        bbox,
    })
}
