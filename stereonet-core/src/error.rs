/// Error types for the stereonet core
use thiserror::Error;

/// Failure reported by a drawing surface.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("render surface error: {message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors surfaced by plot operations.
///
/// Out-of-range measurements are deliberately absent: they are dropped with a
/// warning and reported as `None` from the add operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StereonetError {
    /// A style lookup named a class that was never registered.
    #[error("style class `{0}` was never registered")]
    UnknownStyleClass(String),

    /// A representation mode string did not name `arc` or `pole`.
    #[error("unrecognized representation mode `{0}` (expected `arc` or `pole`)")]
    InvalidRepresentation(String),

    /// Neither the configuration nor the adapter could supply a plot size.
    #[error("no drawing surface available: plot size could not be resolved")]
    MissingSurface,

    /// Plot sizes must be finite and positive.
    #[error("invalid plot size {0}")]
    InvalidSize(f64),

    /// Every id of this kind has been issued.
    #[error("no {0} ids left to issue")]
    IdsExhausted(&'static str),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, StereonetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_converts() {
        let err: StereonetError = RenderError::new("surface detached").into();
        assert_eq!(err.to_string(), "render surface error: surface detached");
    }

    #[test]
    fn test_unknown_style_message_names_class() {
        let err = StereonetError::UnknownStyleClass("fault".to_string());
        assert!(err.to_string().contains("fault"));
    }
}
