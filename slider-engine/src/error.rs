use thiserror::Error;

/// Structural failures. These surface at construction or re-initialization
/// and are never produced by runtime input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid slider configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("a slider needs at least one slide")]
    NoSlides,

    #[error("slider engine task is no longer running")]
    Closed,
}

/// Why a `slide_to` request was refused. Rejections are absorbed by the
/// engine (logged, reported as `false`) rather than returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlideRejection {
    #[error("a transition to {target} is still in flight")]
    Busy { target: usize },

    #[error("already showing slide {index}")]
    AlreadyCurrent { index: usize },

    #[error("slide {index} is out of range for {count} slides")]
    OutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;
