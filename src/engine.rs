use crate::error::PlateError;
use image::GrayImage;
use serde::Serialize;

/// Plate text after truncation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recognition {
    pub text: String,
    /// Name of the engine that produced the text
    pub engine: String,
}

impl Recognition {
    /// Keep at most `max_chars` characters of `raw`
    pub fn new(raw: &str, max_chars: usize, engine: &str) -> Self {
        Self {
            text: truncate_chars(raw, max_chars),
            engine: engine.to_string(),
        }
    }
}

/// Trait that all text recognition engines must implement
pub trait TextRecognizer: Send + Sync {
    /// Returns the engine identifier (e.g., "ocrs", "tesseract")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Read the characters in a cropped plate image
    fn recognize(&self, plate: &GrayImage) -> Result<String, PlateError>;
}

/// First `max_chars` characters of `text`, never splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_chars("AB12", 7), "AB12");
        assert_eq!(truncate_chars("", 7), "");
    }

    #[test]
    fn test_truncate_cuts_long_text() {
        assert_eq!(truncate_chars("7ABC123XYZ", 7), "7ABC123");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "京A·12345678";
        let truncated = truncate_chars(text, 7);
        assert_eq!(truncated.chars().count(), 7);
        assert_eq!(truncated, "京A·1234");
    }

    #[test]
    fn test_recognition_applies_limit() {
        let recognition = Recognition::new("LONGPLATE99", 7, "stub");
        assert_eq!(recognition.text, "LONGPLA");
        assert_eq!(recognition.engine, "stub");
    }
}
