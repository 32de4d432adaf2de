//! Text recognition engine implementations
//!
//! This module contains implementations of the TextRecognizer trait for
//! different OCR backends. Engines are conditionally compiled based on
//! feature flags and constructed per run from a `RecognizerConfig`.

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

#[cfg(feature = "engine-tesseract")]
pub mod tesseract;

use crate::config::RecognizerConfig;
use crate::engine::TextRecognizer;
use crate::error::PlateError;

/// Names of the engines compiled into this build, in preference order
pub fn available() -> Vec<&'static str> {
    let mut engines = Vec::new();
    #[cfg(feature = "engine-ocrs")]
    engines.push("ocrs");
    #[cfg(feature = "engine-tesseract")]
    engines.push("tesseract");
    engines
}

/// Construct the engine named in `config`
pub fn build_recognizer(config: &RecognizerConfig) -> Result<Box<dyn TextRecognizer>, PlateError> {
    tracing::info!("Initializing {} engine...", config.engine);

    match config.engine.as_str() {
        #[cfg(feature = "engine-ocrs")]
        "ocrs" => Ok(Box::new(ocrs::OcrsRecognizer::new(config)?)),

        #[cfg(feature = "engine-tesseract")]
        "tesseract" => Ok(Box::new(tesseract::TesseractRecognizer::new(config)?)),

        other => {
            let compiled = available();
            if compiled.is_empty() {
                return Err(PlateError::InitializationError(
                    "No OCR engines available. Build with --features engine-ocrs or --features engine-tesseract".to_string(),
                ));
            }
            Err(PlateError::InitializationError(format!(
                "Unknown engine '{}' (available: {})",
                other,
                compiled.join(", ")
            )))
        }
    }
}

/// Cache directory for downloaded models and training data
#[cfg(any(feature = "engine-ocrs", feature = "engine-tesseract"))]
fn cache_dir(subdir: &str) -> Result<std::path::PathBuf, PlateError> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("plate-locator")
        .join(subdir);

    std::fs::create_dir_all(&dir).map_err(|e| {
        PlateError::InitializationError(format!("Failed to create cache directory: {}", e))
    })?;

    Ok(dir)
}

/// Download `url` into `dir/file_name` unless it is already cached
#[cfg(any(feature = "engine-ocrs", feature = "engine-tesseract"))]
fn ensure_downloaded(
    url: &str,
    dir: &std::path::Path,
    file_name: &str,
) -> Result<std::path::PathBuf, PlateError> {
    use std::io::Write;

    let path = dir.join(file_name);
    if path.exists() {
        tracing::info!("Using cached {:?}", path);
        return Ok(path);
    }

    tracing::info!("Downloading {} (this may take a moment)...", file_name);

    let response = ureq::get(url).call().map_err(|e| {
        PlateError::InitializationError(format!("Failed to download {}: {}", file_name, e))
    })?;

    let buffer = response.into_body().read_to_vec().map_err(|e| {
        PlateError::InitializationError(format!("Failed to read {}: {}", file_name, e))
    })?;

    let mut file = std::fs::File::create(&path).map_err(|e| {
        PlateError::InitializationError(format!("Failed to create {:?}: {}", path, e))
    })?;
    file.write_all(&buffer).map_err(|e| {
        PlateError::InitializationError(format!("Failed to write {:?}: {}", path, e))
    })?;

    tracing::info!("Downloaded {} to {:?}", file_name, path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_engine_is_rejected() {
        let config = RecognizerConfig {
            engine: "crystal-ball".to_string(),
            language: "eng".to_string(),
            tessdata_path: None,
            page_seg_mode: 10,
        };
        match build_recognizer(&config) {
            Err(PlateError::InitializationError(msg)) => {
                assert!(msg.contains("crystal-ball") || msg.contains("No OCR engines"))
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("unknown engine must not initialize"),
        }
    }
}
