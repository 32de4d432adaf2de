use crate::config::LocatorParams;
use crate::error::PlateError;
use image::{DynamicImage, GrayImage, RgbImage};
use serde::Serialize;
use std::time::Instant;

use super::steps;

/// Timing information for a single pipeline step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of normalization and edge extraction, including timing stats
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessingResult {
    /// Color image at the normalized scale (kept for annotation)
    #[serde(skip)]
    pub color: RgbImage,
    /// Intensity image at the normalized scale
    #[serde(skip)]
    pub gray: GrayImage,
    /// Binary edge map derived from `gray`
    #[serde(skip)]
    pub edges: GrayImage,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Normalizes scale, converts to intensity and extracts the edge map
pub struct Pipeline {
    params: LocatorParams,
}

impl Pipeline {
    pub fn new(params: LocatorParams) -> Self {
        Self { params }
    }

    pub fn process(&self, image: DynamicImage) -> Result<PreprocessingResult, PlateError> {
        let start = Instant::now();
        let mut timings = Vec::new();
        let params = &self.params;

        let resized = run_step("resize", params.stage_budget_ms, &mut timings, || {
            steps::resize::apply(image, params.target_width)
        })?;

        let gray = run_step("grayscale", params.stage_budget_ms, &mut timings, || {
            Ok(steps::grayscale::apply(&resized))
        })?;

        let smoothed = run_step("denoise", params.stage_budget_ms, &mut timings, || {
            Ok(steps::denoise::apply(
                &gray,
                params.bilateral_diameter,
                params.sigma_color,
                params.sigma_space,
            ))
        })?;

        let edges = run_step("edges", params.stage_budget_ms, &mut timings, || {
            Ok(steps::edges::apply(
                &smoothed,
                params.canny_low,
                params.canny_high,
                params.l2_gradient,
            ))
        })?;

        tracing::debug!(
            "Preprocessed to {}x{} in {}ms",
            gray.width(),
            gray.height(),
            start.elapsed().as_millis()
        );

        Ok(PreprocessingResult {
            color: resized.to_rgb8(),
            gray,
            edges,
            total_time_ms: start.elapsed().as_millis() as u64,
            steps: timings,
        })
    }
}

/// Run one stage, record its timing and enforce the optional time budget
pub(crate) fn run_step<T, F>(
    name: &str,
    budget_ms: Option<u64>,
    timings: &mut Vec<StepTiming>,
    step_fn: F,
) -> Result<T, PlateError>
where
    F: FnOnce() -> Result<T, PlateError>,
{
    let step_start = Instant::now();
    let result = step_fn()?;
    let elapsed_ms = step_start.elapsed().as_millis() as u64;

    timings.push(StepTiming {
        name: name.to_string(),
        time_ms: elapsed_ms,
    });

    if let Some(budget_ms) = budget_ms {
        if elapsed_ms > budget_ms {
            return Err(PlateError::BudgetExceeded {
                stage: name.to_string(),
                elapsed_ms,
                budget_ms,
            });
        }
    }

    Ok(result)
}
