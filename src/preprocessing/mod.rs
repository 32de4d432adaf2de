//! Scale normalization and edge extraction
//!
//! Turns a decoded photograph into the binary edge map the contour stage
//! works on, keeping the normalized color and intensity images alongside.

pub mod pipeline;
pub mod steps;

pub use pipeline::{Pipeline, PreprocessingResult, StepTiming};
