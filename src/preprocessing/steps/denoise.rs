use image::{GrayImage, Luma};

/// Edge-preserving bilateral filter.
///
/// Each output pixel is a weighted mean over a circular window of the given
/// diameter, where the weight of a neighbor is the product of a spatial
/// Gaussian (`sigma_space`) and an intensity Gaussian (`sigma_color`).
/// Flat regions are smoothed while strong transitions keep their contrast.
/// Pixels beyond the border replicate the nearest edge pixel.
pub fn apply(image: &GrayImage, diameter: u32, sigma_color: f32, sigma_space: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let radius = (diameter / 2).max(1) as i32;
    let kernel = spatial_kernel(radius, sigma_space);
    let color_weights = color_lut(sigma_color);

    GrayImage::from_fn(width, height, |x, y| {
        let center = image.get_pixel(x, y).0[0];
        let mut sum = 0.0f32;
        let mut weight_sum = 0.0f32;

        for &(dx, dy, spatial) in &kernel {
            let nx = (x as i32 + dx).clamp(0, width as i32 - 1) as u32;
            let ny = (y as i32 + dy).clamp(0, height as i32 - 1) as u32;
            let value = image.get_pixel(nx, ny).0[0];
            let weight = spatial * color_weights[center.abs_diff(value) as usize];
            sum += value as f32 * weight;
            weight_sum += weight;
        }

        if weight_sum > 0.0 {
            Luma([(sum / weight_sum).round().clamp(0.0, 255.0) as u8])
        } else {
            Luma([center])
        }
    })
}

/// Window offsets inside the circle of `radius`, with their spatial weights
fn spatial_kernel(radius: i32, sigma_space: f32) -> Vec<(i32, i32, f32)> {
    let coeff = -0.5 / (sigma_space * sigma_space);
    let mut kernel = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let dist_sq = (dx * dx + dy * dy) as f32;
            if dist_sq.sqrt() > radius as f32 {
                continue;
            }
            kernel.push((dx, dy, (dist_sq * coeff).exp()));
        }
    }
    kernel
}

/// Intensity weights indexed by absolute difference
fn color_lut(sigma_color: f32) -> [f32; 256] {
    let coeff = -0.5 / (sigma_color * sigma_color);
    let mut lut = [0.0f32; 256];
    for (diff, weight) in lut.iter_mut().enumerate() {
        let d = diff as f32;
        *weight = (d * d * coeff).exp();
    }
    lut
}
