//! Canny-style edge detection with selectable gradient norm.
//!
//! Gradients come from a 3x3 Sobel operator with replicated borders. The
//! magnitude is `|gx| + |gy|` unless the Euclidean norm is requested. After
//! non-maximum suppression along the quantized gradient direction, pixels
//! above `high` seed edges that grow through 8-connected pixels above `low`.

use image::{GrayImage, Luma};

const EDGE: u8 = 255;

/// tan(22.5°) and tan(67.5°), the orientation sector boundaries
const TAN_22_5: f32 = 0.414_213_57;
const TAN_67_5: f32 = 2.414_213_6;

struct Gradients {
    gx: Vec<i32>,
    gy: Vec<i32>,
    magnitude: Vec<f32>,
    width: usize,
    height: usize,
}

impl Gradients {
    fn sobel(image: &GrayImage, l2: bool) -> Self {
        let (w, h) = image.dimensions();
        let (width, height) = (w as usize, h as usize);
        let mut gx = vec![0i32; width * height];
        let mut gy = vec![0i32; width * height];
        let mut magnitude = vec![0f32; width * height];

        let at = |x: i64, y: i64| -> i32 {
            let cx = x.clamp(0, width as i64 - 1) as u32;
            let cy = y.clamp(0, height as i64 - 1) as u32;
            image.get_pixel(cx, cy).0[0] as i32
        };

        for y in 0..height {
            for x in 0..width {
                let (xi, yi) = (x as i64, y as i64);
                let dx = (at(xi + 1, yi - 1) + 2 * at(xi + 1, yi) + at(xi + 1, yi + 1))
                    - (at(xi - 1, yi - 1) + 2 * at(xi - 1, yi) + at(xi - 1, yi + 1));
                let dy = (at(xi - 1, yi + 1) + 2 * at(xi, yi + 1) + at(xi + 1, yi + 1))
                    - (at(xi - 1, yi - 1) + 2 * at(xi, yi - 1) + at(xi + 1, yi - 1));

                let idx = y * width + x;
                gx[idx] = dx;
                gy[idx] = dy;
                magnitude[idx] = if l2 {
                    ((dx * dx + dy * dy) as f32).sqrt()
                } else {
                    (dx.abs() + dy.abs()) as f32
                };
            }
        }

        Self {
            gx,
            gy,
            magnitude,
            width,
            height,
        }
    }

    /// Magnitude at (x, y); zero outside the image
    fn magnitude_at(&self, x: i64, y: i64) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0.0;
        }
        self.magnitude[y as usize * self.width + x as usize]
    }

    /// Unit step along the gradient, pointing toward increasing intensity
    fn direction(&self, idx: usize) -> (i64, i64) {
        let gx = self.gx[idx];
        let gy = self.gy[idx];
        let abs_gx = gx.abs() as f32;
        let abs_gy = gy.abs() as f32;

        if abs_gy <= abs_gx * TAN_22_5 {
            (gx.signum() as i64, 0)
        } else if abs_gy >= abs_gx * TAN_67_5 {
            (0, gy.signum() as i64)
        } else {
            (gx.signum() as i64, gy.signum() as i64)
        }
    }
}

/// Detect edges, returning a binary image (255 = edge, 0 = background)
pub fn apply(image: &GrayImage, low: f32, high: f32, l2_gradient: bool) -> GrayImage {
    let (w, h) = image.dimensions();
    let mut edges = GrayImage::new(w, h);
    if w == 0 || h == 0 {
        return edges;
    }

    let grad = Gradients::sobel(image, l2_gradient);
    let candidates = suppress_non_maxima(&grad, low);
    hysteresis(&grad, &candidates, high, &mut edges);
    edges
}

/// Keep pixels that are local maxima along their gradient direction.
///
/// A pixel survives when it is strictly greater than the neighbor ahead
/// (brighter side) and not smaller than the neighbor behind, so a symmetric
/// ridge two pixels wide resolves to its brighter pixel.
fn suppress_non_maxima(grad: &Gradients, low: f32) -> Vec<bool> {
    let mut keep = vec![false; grad.width * grad.height];
    for y in 0..grad.height {
        for x in 0..grad.width {
            let idx = y * grad.width + x;
            let mag = grad.magnitude[idx];
            if mag <= low {
                continue;
            }

            let (dx, dy) = grad.direction(idx);
            let (xi, yi) = (x as i64, y as i64);
            let ahead = grad.magnitude_at(xi + dx, yi + dy);
            let behind = grad.magnitude_at(xi - dx, yi - dy);

            keep[idx] = mag > ahead && mag >= behind;
        }
    }
    keep
}

/// Grow edges from strong pixels through connected weak candidates
fn hysteresis(grad: &Gradients, candidates: &[bool], high: f32, edges: &mut GrayImage) {
    let (width, height) = (grad.width, grad.height);
    let mut visited = vec![false; width * height];
    let mut stack = Vec::new();

    for seed in 0..candidates.len() {
        if !candidates[seed] || visited[seed] || grad.magnitude[seed] <= high {
            continue;
        }
        visited[seed] = true;
        stack.push(seed);

        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % width, idx / width);
            edges.put_pixel(x as u32, y as u32, Luma([EDGE]));

            for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                    let n = ny * width + nx;
                    if candidates[n] && !visited[n] {
                        visited[n] = true;
                        stack.push(n);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bright_rect(width: u32, height: u32, x0: u32, y0: u32, w: u32, h: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            if x >= x0 && x < x0 + w && y >= y0 && y < y0 + h {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }

    #[test]
    fn test_uniform_image_has_no_edges() {
        let img = GrayImage::from_pixel(40, 30, Luma([90]));
        let edges = apply(&img, 100.0, 200.0, false);
        assert!(edges.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_output_is_binary() {
        let img = GrayImage::from_fn(40, 40, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]));
        let edges = apply(&img, 100.0, 200.0, false);
        assert!(edges.pixels().all(|p| p.0[0] == 0 || p.0[0] == EDGE));
    }

    #[test]
    fn test_step_edge_lands_on_bright_side() {
        let img = GrayImage::from_fn(20, 10, |x, _| if x < 10 { Luma([0]) } else { Luma([255]) });
        let edges = apply(&img, 100.0, 200.0, false);

        for y in 0..10 {
            assert_eq!(edges.get_pixel(9, y).0[0], 0);
            assert_eq!(edges.get_pixel(10, y).0[0], EDGE);
            assert_eq!(edges.get_pixel(11, y).0[0], 0);
        }
    }

    #[test]
    fn test_rectangle_outline_is_one_pixel_ring() {
        let img = bright_rect(60, 40, 10, 12, 30, 15);
        let edges = apply(&img, 100.0, 200.0, false);

        // Ring on the rectangle's own border pixels
        for x in 10..40 {
            assert_eq!(edges.get_pixel(x, 12).0[0], EDGE, "top at x={}", x);
            assert_eq!(edges.get_pixel(x, 26).0[0], EDGE, "bottom at x={}", x);
        }
        for y in 12..27 {
            assert_eq!(edges.get_pixel(10, y).0[0], EDGE, "left at y={}", y);
            assert_eq!(edges.get_pixel(39, y).0[0], EDGE, "right at y={}", y);
        }

        // Nothing outside or deep inside
        assert_eq!(edges.get_pixel(9, 20).0[0], 0);
        assert_eq!(edges.get_pixel(40, 20).0[0], 0);
        assert_eq!(edges.get_pixel(25, 11).0[0], 0);
        assert_eq!(edges.get_pixel(25, 19).0[0], 0);
    }

    #[test]
    fn test_weak_gradient_below_low_threshold_is_ignored() {
        // A 10-level step gives an L1 magnitude of 40
        let img = GrayImage::from_fn(20, 10, |x, _| if x < 10 { Luma([100]) } else { Luma([110]) });
        let edges = apply(&img, 100.0, 200.0, false);
        assert!(edges.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_l2_norm_is_never_larger_than_l1() {
        let img = bright_rect(30, 30, 8, 8, 12, 12);
        let l1 = Gradients::sobel(&img, false);
        let l2 = Gradients::sobel(&img, true);
        for (a, b) in l1.magnitude.iter().zip(&l2.magnitude) {
            assert!(b <= a);
        }
    }
}
