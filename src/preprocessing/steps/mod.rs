//! Individual preprocessing steps

pub mod denoise;
pub mod edges;
pub mod grayscale;
pub mod resize;
