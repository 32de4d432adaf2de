use crate::error::PlateError;
use crate::Args;
use std::path::PathBuf;

/// Policy constants for the localization pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorParams {
    /// Width every input is normalized to before edge analysis
    pub target_width: u32,
    /// Bilateral filter window diameter in pixels
    pub bilateral_diameter: u32,
    pub sigma_color: f32,
    pub sigma_space: f32,
    /// Hysteresis thresholds on the gradient magnitude
    pub canny_low: f32,
    pub canny_high: f32,
    /// Use the Euclidean gradient norm instead of |gx| + |gy|
    pub l2_gradient: bool,
    /// Number of largest contours examined by the selector
    pub max_candidates: usize,
    /// Polygon approximation tolerance as a fraction of the perimeter
    pub approx_epsilon_ratio: f64,
    pub quad_vertices: usize,
    /// Maximum characters kept from the recognizer output
    pub max_plate_chars: usize,
    /// Optional wall-clock budget per stage
    pub stage_budget_ms: Option<u64>,
}

impl Default for LocatorParams {
    fn default() -> Self {
        Self {
            target_width: 512,
            bilateral_diameter: 10,
            sigma_color: 50.0,
            sigma_space: 50.0,
            canny_low: 100.0,
            canny_high: 200.0,
            l2_gradient: false,
            max_candidates: 15,
            approx_epsilon_ratio: 0.01,
            quad_vertices: 4,
            max_plate_chars: 7,
            stage_budget_ms: None,
        }
    }
}

impl LocatorParams {
    pub fn validate(&self) -> Result<(), PlateError> {
        if self.target_width == 0 {
            return Err(PlateError::InvalidConfig(
                "target width must be positive".to_string(),
            ));
        }
        if self.bilateral_diameter == 0 {
            return Err(PlateError::InvalidConfig(
                "bilateral diameter must be positive".to_string(),
            ));
        }
        if self.sigma_color <= 0.0 || self.sigma_space <= 0.0 {
            return Err(PlateError::InvalidConfig(format!(
                "bilateral sigmas must be positive (color: {}, space: {})",
                self.sigma_color, self.sigma_space
            )));
        }
        if self.canny_low < 0.0 || self.canny_low > self.canny_high {
            return Err(PlateError::InvalidConfig(format!(
                "edge thresholds must satisfy 0 <= low <= high (low: {}, high: {})",
                self.canny_low, self.canny_high
            )));
        }
        if self.max_candidates == 0 {
            return Err(PlateError::InvalidConfig(
                "at least one contour must be examined".to_string(),
            ));
        }
        if !(self.approx_epsilon_ratio > 0.0 && self.approx_epsilon_ratio < 1.0) {
            return Err(PlateError::InvalidConfig(format!(
                "approximation ratio must lie in (0, 1), got {}",
                self.approx_epsilon_ratio
            )));
        }
        if self.quad_vertices < 3 {
            return Err(PlateError::InvalidConfig(format!(
                "a polygon needs at least 3 vertices, got {}",
                self.quad_vertices
            )));
        }
        Ok(())
    }
}

/// Text recognizer settings, handed to the engine at construction
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    pub engine: String,
    pub language: String,
    pub tessdata_path: Option<String>,
    pub page_seg_mode: u32,
}

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub image: PathBuf,
    pub params: LocatorParams,
    /// `None` skips text recognition entirely
    pub recognizer: Option<RecognizerConfig>,
    pub output: Option<PathBuf>,
    pub font: Option<PathBuf>,
    pub json: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let params = LocatorParams {
            target_width: args.target_width,
            bilateral_diameter: args.bilateral_diameter,
            sigma_color: args.sigma_color,
            sigma_space: args.sigma_space,
            canny_low: args.canny_low,
            canny_high: args.canny_high,
            l2_gradient: args.l2_gradient,
            max_candidates: args.max_candidates,
            approx_epsilon_ratio: args.approx_epsilon,
            quad_vertices: LocatorParams::default().quad_vertices,
            max_plate_chars: args.max_chars,
            stage_budget_ms: args.stage_budget_ms,
        };

        let recognizer = (!args.skip_ocr).then(|| RecognizerConfig {
            engine: args.engine,
            language: args.language,
            tessdata_path: args.tessdata_path,
            page_seg_mode: args.page_seg_mode,
        });

        Self {
            image: args.image,
            params,
            recognizer,
            output: args.output,
            font: args.font,
            json: args.json,
        }
    }
}
