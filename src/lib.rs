//! License plate localization.
//!
//! A photograph is normalized to a fixed width, smoothed with an
//! edge-preserving filter and reduced to an edge map. The largest contours
//! are simplified to polygons and the first quadrilateral is taken as the
//! plate; its bounding box is cropped and handed to a text recognizer.

use clap::Parser;
use std::path::PathBuf;

pub mod annotate;
pub mod config;
pub mod detection;
pub mod engine;
pub mod engines;
pub mod error;
pub mod preprocessing;
pub mod processor;

pub use config::{Config, LocatorParams, RecognizerConfig};
pub use detection::BoundingBox;
pub use engine::{Recognition, TextRecognizer};
pub use error::PlateError;
pub use processor::{Localization, PlateProcessor, PlateReading};

#[derive(Parser, Debug)]
#[command(name = "plate-locator")]
#[command(about = "Locate and read the license plate in a vehicle photograph")]
#[command(version)]
pub struct Args {
    /// Image file containing the vehicle
    pub image: PathBuf,

    /// Text recognition engine ("ocrs" or "tesseract")
    #[arg(long, env = "PLATE_ENGINE", default_value = "ocrs")]
    pub engine: String,

    /// Language for OCR (e.g., "eng", "deu", "fra")
    #[arg(long, env = "PLATE_LANGUAGE", default_value = "eng")]
    pub language: String,

    /// Path to tessdata directory (downloaded to the cache if not set)
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata_path: Option<String>,

    /// Tesseract page segmentation mode
    #[arg(long, default_value = "10")]
    pub page_seg_mode: u32,

    /// Only locate the plate, do not run text recognition
    #[arg(long)]
    pub skip_ocr: bool,

    /// Write the annotated image to this path
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// TrueType font used to draw the plate text on the annotated image
    #[arg(long, env = "PLATE_FONT")]
    pub font: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Width the image is normalized to
    #[arg(long, default_value = "512")]
    pub target_width: u32,

    /// Bilateral filter diameter
    #[arg(long, default_value = "10")]
    pub bilateral_diameter: u32,

    /// Bilateral filter intensity sigma
    #[arg(long, default_value = "50")]
    pub sigma_color: f32,

    /// Bilateral filter spatial sigma
    #[arg(long, default_value = "50")]
    pub sigma_space: f32,

    /// Lower hysteresis threshold of the edge detector
    #[arg(long, default_value = "100")]
    pub canny_low: f32,

    /// Upper hysteresis threshold of the edge detector
    #[arg(long, default_value = "200")]
    pub canny_high: f32,

    /// Use the Euclidean gradient norm instead of |gx| + |gy|
    #[arg(long)]
    pub l2_gradient: bool,

    /// Number of largest contours examined
    #[arg(long, default_value = "15")]
    pub max_candidates: usize,

    /// Polygon approximation tolerance as a fraction of the perimeter
    #[arg(long, default_value = "0.01")]
    pub approx_epsilon: f64,

    /// Maximum number of plate characters kept
    #[arg(long, default_value = "7")]
    pub max_chars: usize,

    /// Abort when a single stage takes longer than this many milliseconds
    #[arg(long, env = "PLATE_STAGE_BUDGET_MS")]
    pub stage_budget_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}
