use image::{DynamicImage, GrayImage, Luma, RgbImage};

/// Fixed-point BT.601 weights, scaled by 2^14
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;

/// Convert to a single intensity channel using BT.601 luma weights.
/// Single-channel inputs are passed through unchanged.
pub fn apply(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        other => luma_from_rgb(&other.to_rgb8()),
    }
}

fn luma_from_rgb(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let weighted =
            r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT + (1 << (SHIFT - 1));
        Luma([(weighted >> SHIFT).min(255) as u8])
    })
}
