use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlateError {
    #[error("Failed to decode input image: {0}")]
    InputDecode(String),

    #[error("No plate candidate found among {examined} contours")]
    NoCandidateFound { examined: usize },

    #[error("Plate region is degenerate: {width}x{height} at ({x}, {y})")]
    DegenerateRegion {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },

    #[error("Stage '{stage}' exceeded its time budget: {elapsed_ms}ms (max: {budget_ms}ms)")]
    BudgetExceeded {
        stage: String,
        elapsed_ms: u64,
        budget_ms: u64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to initialize text recognizer: {0}")]
    InitializationError(String),

    #[error("Text recognition failed: {0}")]
    RecognitionError(String),

    #[error("Failed to write output: {0}")]
    OutputError(String),
}

impl PlateError {
    /// Whether the run completed but found no usable plate region.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PlateError::NoCandidateFound { .. } | PlateError::DegenerateRegion { .. }
        )
    }

    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            PlateError::InputDecode(_) => "INPUT_DECODE_ERROR",
            PlateError::NoCandidateFound { .. } => "NO_CANDIDATE",
            PlateError::DegenerateRegion { .. } => "DEGENERATE_REGION",
            PlateError::BudgetExceeded { .. } => "BUDGET_EXCEEDED",
            PlateError::InvalidConfig(_) => "INVALID_CONFIG",
            PlateError::InitializationError(_) => "INIT_ERROR",
            PlateError::RecognitionError(_) => "RECOGNITION_ERROR",
            PlateError::OutputError(_) => "OUTPUT_ERROR",
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            error: self.to_string(),
            code: self.code().to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub code: String,
}
