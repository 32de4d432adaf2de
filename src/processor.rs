use crate::config::LocatorParams;
use crate::detection::{self, BoundingBox, PlateCandidate, PlateRegion, SelectionPolicy};
use crate::engine::{Recognition, TextRecognizer};
use crate::error::PlateError;
use crate::preprocessing::pipeline::run_step;
use crate::preprocessing::{Pipeline, StepTiming};
use image::{DynamicImage, RgbImage};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Outcome of localization, before text recognition
#[derive(Debug, Clone)]
pub struct Localization {
    /// Normalized color image, for annotation
    pub color: RgbImage,
    pub candidate: PlateCandidate,
    pub region: PlateRegion,
    /// Contours that survived degeneracy filtering, before the cap
    pub contours_found: usize,
    pub steps: Vec<StepTiming>,
}

/// Final result of one run
#[derive(Debug, Clone, Serialize)]
pub struct PlateReading {
    /// Truncated plate text, `None` when recognition was skipped
    pub recognition: Option<Recognition>,
    pub bbox: BoundingBox,
    /// Position of the plate contour in the area ranking
    pub candidate_rank: usize,
    pub contours_found: usize,
    pub processing_time_ms: u64,
    pub steps: Vec<StepTiming>,
}

/// Runs the localization stages and hands the plate region to a recognizer
pub struct PlateProcessor {
    params: LocatorParams,
    recognizer: Option<Box<dyn TextRecognizer>>,
}

impl PlateProcessor {
    pub fn new(
        params: LocatorParams,
        recognizer: Option<Box<dyn TextRecognizer>>,
    ) -> Result<Self, PlateError> {
        params.validate()?;
        Ok(Self { params, recognizer })
    }

    pub fn params(&self) -> &LocatorParams {
        &self.params
    }

    /// Decode the image at `path`
    pub fn load(path: &Path) -> Result<DynamicImage, PlateError> {
        image::open(path)
            .map_err(|e| PlateError::InputDecode(format!("Failed to load {:?}: {}", path, e)))
    }

    /// Find the plate region in `image`
    pub fn locate(&self, image: DynamicImage) -> Result<Localization, PlateError> {
        let params = &self.params;
        let budget = params.stage_budget_ms;

        let preprocessed = Pipeline::new(params.clone()).process(image)?;
        let mut steps = preprocessed.steps;

        let contours = run_step("contours", budget, &mut steps, || {
            Ok(detection::find_contours(&preprocessed.edges))
        })?;
        let contours_found = contours.len();

        let ranked = run_step("rank", budget, &mut steps, || {
            Ok(detection::rank_by_area(contours, params.max_candidates))
        })?;

        tracing::info!(
            "Found {} contours, examining the largest {}",
            contours_found,
            ranked.len()
        );

        let policy = SelectionPolicy {
            epsilon_ratio: params.approx_epsilon_ratio,
            vertices: params.quad_vertices,
        };
        let candidate = run_step("select", budget, &mut steps, || {
            detection::select_plate(&ranked, policy).ok_or(PlateError::NoCandidateFound {
                examined: ranked.len(),
            })
        })?;

        let region = run_step("crop", budget, &mut steps, || {
            detection::crop_region(&preprocessed.gray, &candidate.contour)
        })?;

        tracing::info!(
            "Plate candidate #{} at ({}, {}) size {}x{}",
            candidate.rank,
            region.bbox.x,
            region.bbox.y,
            region.bbox.width,
            region.bbox.height
        );

        Ok(Localization {
            color: preprocessed.color,
            candidate,
            region,
            contours_found,
            steps,
        })
    }

    /// Read the plate text once. Engine failures are logged and yield an
    /// empty string rather than failing the run.
    pub fn recognize(&self, region: &PlateRegion) -> Option<Recognition> {
        let recognizer = self.recognizer.as_ref()?;
        let raw = match recognizer.recognize(&region.image) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("{} engine failed, passing empty text: {}", recognizer.name(), e);
                String::new()
            }
        };
        Some(Recognition::new(&raw, self.params.max_plate_chars, recognizer.name()))
    }

    /// Locate the plate in `image` and read it
    pub fn process(&self, image: DynamicImage) -> Result<(PlateReading, Localization), PlateError> {
        let start = Instant::now();
        let mut localization = self.locate(image)?;

        let recognition = run_step(
            "recognize",
            None,
            &mut localization.steps,
            || Ok(self.recognize(&localization.region)),
        )?;

        let reading = PlateReading {
            recognition,
            bbox: localization.region.bbox,
            candidate_rank: localization.candidate.rank,
            contours_found: localization.contours_found,
            processing_time_ms: start.elapsed().as_millis() as u64,
            steps: localization.steps.clone(),
        };

        Ok((reading, localization))
    }
}
