//! OCRS engine implementation
//!
//! Pure Rust OCR engine using the ocrs library. No system dependencies required.
//! Downloads neural network models automatically on first use.

use crate::config::RecognizerConfig;
use crate::engine::TextRecognizer;
use crate::error::PlateError;
use image::{DynamicImage, GrayImage};
use ocrs::{DecodeMethod, ImageSource, OcrEngine as OcrsOcrEngine, OcrEngineParams};
use rten::Model;

/// Default model URLs from the ocrs project
const DETECTION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-detection.rten";
const RECOGNITION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-recognition.rten";

/// Text recognizer wrapping the ocrs library
pub struct OcrsRecognizer {
    engine: OcrsOcrEngine,
}

impl OcrsRecognizer {
    /// Load the detection and recognition models, downloading them if needed
    pub fn new(_config: &RecognizerConfig) -> Result<Self, PlateError> {
        let models_dir = super::cache_dir("ocrs")?;
        let detection_model_path =
            super::ensure_downloaded(DETECTION_MODEL_URL, &models_dir, "text-detection.rten")?;
        let recognition_model_path =
            super::ensure_downloaded(RECOGNITION_MODEL_URL, &models_dir, "text-recognition.rten")?;

        let detection_model = Model::load_file(&detection_model_path).map_err(|e| {
            PlateError::InitializationError(format!("Failed to load detection model: {}", e))
        })?;
        let recognition_model = Model::load_file(&recognition_model_path).map_err(|e| {
            PlateError::InitializationError(format!("Failed to load recognition model: {}", e))
        })?;

        let engine = OcrsOcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            decode_method: DecodeMethod::Greedy,
            ..Default::default()
        })
        .map_err(|e| {
            PlateError::InitializationError(format!("Failed to create OCR engine: {}", e))
        })?;

        tracing::info!("ocrs engine initialized successfully");

        Ok(Self { engine })
    }
}

impl TextRecognizer for OcrsRecognizer {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn description(&self) -> &'static str {
        "Pure Rust OCR engine - fast, no system dependencies required"
    }

    fn recognize(&self, plate: &GrayImage) -> Result<String, PlateError> {
        // ImageSource::from_bytes expects HWC RGB data
        let rgb_img = DynamicImage::ImageLuma8(plate.clone()).into_rgb8();
        let dimensions = rgb_img.dimensions();

        let img_source = ImageSource::from_bytes(rgb_img.as_raw(), dimensions).map_err(|e| {
            PlateError::RecognitionError(format!("Failed to create image source: {}", e))
        })?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .map_err(|e| PlateError::RecognitionError(format!("Failed to prepare input: {}", e)))?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .map_err(|e| PlateError::RecognitionError(format!("Failed to detect words: {}", e)))?;

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .map_err(|e| PlateError::RecognitionError(format!("Failed to recognize text: {}", e)))?;

        // A plate is read as one run of characters
        let text: String = line_texts
            .iter()
            .filter_map(|line| line.as_ref())
            .flat_map(|line| line.words().map(|word| word.to_string()).collect::<Vec<_>>())
            .collect::<Vec<_>>()
            .join(" ");

        tracing::debug!(
            "ocrs read {:?} from {}x{} region",
            text,
            plate.width(),
            plate.height()
        );

        Ok(text.trim().to_string())
    }
}
