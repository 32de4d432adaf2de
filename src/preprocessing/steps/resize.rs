use crate::error::PlateError;
use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Rescale so that the width equals `target_width`, preserving aspect ratio
pub fn apply(image: DynamicImage, target_width: u32) -> Result<DynamicImage, PlateError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PlateError::InputDecode(format!(
            "image has no pixels ({}x{})",
            width, height
        )));
    }

    if width == target_width {
        return Ok(image);
    }

    let new_height = target_height(width, height, target_width);
    Ok(image.resize_exact(target_width, new_height, FilterType::Triangle))
}

/// Height matching `target_width` at the source aspect ratio, never zero
pub fn target_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = (height as f64 * target_width as f64 / width as f64).round() as u32;
    scaled.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage};

    #[test]
    fn test_resize_downscales_to_target_width() {
        let img = RgbImage::new(1024, 768);
        let result = apply(DynamicImage::ImageRgb8(img), 512).unwrap();
        assert_eq!(result.width(), 512);
        assert_eq!(result.height(), 384);
    }

    #[test]
    fn test_resize_upscales_small_image() {
        let img = RgbImage::new(128, 50);
        let result = apply(DynamicImage::ImageRgb8(img), 512).unwrap();
        assert_eq!(result.width(), 512);
        assert_eq!(result.height(), 200);
    }

    #[test]
    fn test_resize_keeps_matching_width_untouched() {
        let img = GrayImage::from_fn(512, 10, |x, _| image::Luma([(x % 256) as u8]));
        let result = apply(DynamicImage::ImageLuma8(img.clone()), 512).unwrap();
        assert_eq!(result.to_luma8(), img);
    }

    #[test]
    fn test_target_height_never_collapses() {
        assert_eq!(target_height(10_000, 1, 512), 1);
    }
}
