//! Tesseract engine implementation
//!
//! Uses the tesseract-static crate for static linking (no system dependencies).
//! The tessdata location, language and page segmentation mode are handed in
//! at construction; training data is downloaded when no path is given.

use crate::config::RecognizerConfig;
use crate::engine::TextRecognizer;
use crate::error::PlateError;
use image::GrayImage;
use std::path::Path;
use tesseract_static::tesseract::Tesseract;

/// Tesseract text recognizer
pub struct TesseractRecognizer {
    /// Path to tessdata directory
    tessdata_path: String,
    language: String,
    /// Tesseract `tessedit_pageseg_mode` (10 = single character)
    page_seg_mode: u32,
}

impl TesseractRecognizer {
    pub fn new(config: &RecognizerConfig) -> Result<Self, PlateError> {
        let language = config.language.clone();

        let tessdata_path = match &config.tessdata_path {
            Some(path) => path.clone(),
            None => ensure_tessdata_available(&language)?,
        };

        // Validate that tessdata is accessible by doing a test initialization
        let test_tess = Tesseract::new(Some(&tessdata_path), Some(&language)).map_err(|e| {
            PlateError::InitializationError(format!("Failed to initialize Tesseract: {}", e))
        })?;
        drop(test_tess);

        tracing::info!(
            "Tesseract engine initialized (tessdata: {}, language: {}, psm: {})",
            tessdata_path,
            language,
            config.page_seg_mode
        );

        Ok(Self {
            tessdata_path,
            language,
            page_seg_mode: config.page_seg_mode,
        })
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn description(&self) -> &'static str {
        "Tesseract OCR engine - better for noisy/messy images like phone photos"
    }

    fn recognize(&self, plate: &GrayImage) -> Result<String, PlateError> {
        let (width, height) = plate.dimensions();

        // BMP is always supported by leptonica
        let mut bmp_data = Vec::new();
        plate
            .write_to(&mut std::io::Cursor::new(&mut bmp_data), image::ImageFormat::Bmp)
            .map_err(|e| PlateError::RecognitionError(format!("Failed to convert to BMP: {}", e)))?;

        tracing::debug!(
            "Processing plate region: {}x{}, BMP size: {} bytes",
            width,
            height,
            bmp_data.len()
        );

        let mut tess = Tesseract::new(Some(&self.tessdata_path), Some(&self.language)).map_err(
            |e| PlateError::RecognitionError(format!("Failed to create Tesseract: {}", e)),
        )?;

        tess = tess
            .set_variable("tessedit_pageseg_mode", &self.page_seg_mode.to_string())
            .map_err(|e| {
                PlateError::RecognitionError(format!("Failed to set page segmentation mode: {}", e))
            })?;

        tess = tess.set_image_from_mem(&bmp_data).map_err(|e| {
            PlateError::RecognitionError(format!(
                "Failed to set image ({}x{}, {} bytes): {}",
                width,
                height,
                bmp_data.len(),
                e
            ))
        })?;

        tess = tess
            .recognize()
            .map_err(|e| PlateError::RecognitionError(format!("Failed to recognize text: {}", e)))?;

        let text = tess
            .get_text()
            .map_err(|e| PlateError::RecognitionError(format!("Failed to get text: {}", e)))?;

        Ok(text.trim().to_string())
    }
}

/// Ensure tessdata is available, downloading if needed
fn ensure_tessdata_available(language: &str) -> Result<String, PlateError> {
    let cache_dir = super::cache_dir("tessdata")?;
    let traineddata_file = format!("{}.traineddata", language);
    super::ensure_downloaded(&tessdata_url(language), &cache_dir, &traineddata_file)?;

    // Tesseract expects the directory, not the file
    path_to_string(&cache_dir)
}

/// Get tessdata download URL for a language
fn tessdata_url(language: &str) -> String {
    // tessdata_fast for smaller, faster downloads
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}

fn path_to_string(path: &Path) -> Result<String, PlateError> {
    path.to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| PlateError::InitializationError("Invalid tessdata path".to_string()))
}
