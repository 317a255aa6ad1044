use thiserror::Error;

/// Errors surfaced by the wheel engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WheelError {
    /// Nothing is eligible for selection, so a draw or spin is refused.
    #[error("no active entries to spin")]
    EmptySelection,

    /// The pointer landed outside every sector. Layout and angle
    /// normalization disagree; this is a bug, not a user condition.
    #[error("no sector under pointer position {position} (rotation {angle})")]
    NoSector { angle: f64, position: f64 },

    /// A weight that is not a positive integer. The entry store recovers
    /// from this by coercing to 1.
    #[error("invalid weight {0:?}")]
    InvalidWeight(String),

    #[error("entry index {index} out of range ({len} entries)")]
    EntryOutOfRange { index: usize, len: usize },

    #[error("malformed wheel data: {0}")]
    Data(String),
}

impl From<serde_json::Error> for WheelError {
    fn from(err: serde_json::Error) -> Self {
        WheelError::Data(err.to_string())
    }
}

pub type WheelResult<T> = Result<T, WheelError>;
