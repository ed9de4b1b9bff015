use thiserror::Error;

/// Errors surfaced by the viewer. Malformed model text is deliberately not
/// represented here: bad OBJ lines are skipped during parsing and never
/// escalate past a log message.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("required resource unavailable: {0}")]
    ResourceUnavailable(&'static str),

    #[error("shader program failed to build for {shape}: {reason}")]
    CompileFailure { shape: &'static str, reason: String },

    #[error("image decode failed: {0}")]
    DecodeFailure(#[from] image::ImageError),

    #[error("capture recorder failed during {stage}: {reason}")]
    CaptureFailure { stage: &'static str, reason: String },
}

impl ViewerError {
    pub fn capture(stage: &'static str, reason: impl ToString) -> Self {
        ViewerError::CaptureFailure {
            stage,
            reason: reason.to_string(),
        }
    }
}
