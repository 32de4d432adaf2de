//! Overlay of the localization result on the normalized color image

use crate::detection::BoundingBox;
use crate::error::PlateError;
use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::Path;

/// Vertical offset of the text baseline below the box origin
pub const TEXT_OFFSET_Y: i32 = 105;
const TEXT_SCALE: f32 = 32.0;
const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Load a TrueType/OpenType font for the text overlay
pub fn load_font(path: &Path) -> Result<FontVec, PlateError> {
    let bytes = std::fs::read(path)
        .map_err(|e| PlateError::OutputError(format!("Failed to read font {:?}: {}", path, e)))?;
    FontVec::try_from_vec(bytes)
        .map_err(|e| PlateError::OutputError(format!("Invalid font {:?}: {}", path, e)))
}

/// Outline `bbox` on a copy of `image` and, with a font, write `text` at
/// `(bbox.x, bbox.y + 105)`
pub fn annotate(image: &RgbImage, bbox: BoundingBox, text: &str, font: Option<&FontVec>) -> RgbImage {
    let mut canvas = image.clone();

    let rect = Rect::at(bbox.x as i32, bbox.y as i32).of_size(bbox.width, bbox.height);
    draw_hollow_rect_mut(&mut canvas, rect, BOX_COLOR);

    match font {
        Some(font) if !text.is_empty() => draw_text_mut(
            &mut canvas,
            TEXT_COLOR,
            bbox.x as i32,
            bbox.y as i32 + TEXT_OFFSET_Y,
            PxScale::from(TEXT_SCALE),
            font,
            text,
        ),
        Some(_) => {}
        None => tracing::debug!("No font configured, skipping text overlay"),
    }

    canvas
}

/// Encode `image` to `path`, format chosen by extension
pub fn save(image: &RgbImage, path: &Path) -> Result<(), PlateError> {
    image
        .save(path)
        .map_err(|e| PlateError::OutputError(format!("Failed to save {:?}: {}", path, e)))
}
