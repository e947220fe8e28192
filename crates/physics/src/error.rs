use crate::body::BodyId;
use thiserror::Error;

/// Invariant violations. Any of these aborts the tick it happens in.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("body {0} is not registered")]
    UnknownBody(BodyId),
    #[error("body {0} has no bounding volume")]
    MissingBoundary(BodyId),
    #[error("body {id} moving at {speed} exceeds the speed limit of {limit}")]
    SpeedLimitExceeded { id: BodyId, speed: f32, limit: f32 },
    #[error("body {0} has a non-finite location or velocity")]
    NonFiniteState(BodyId),
    #[error("invalid body: {0}")]
    InvalidBody(&'static str),
    #[error("simulation halted by an unacknowledged fault")]
    Faulted,
}

impl PhysicsError {
    /// The body the error is about, if any.
    #[must_use]
    pub fn body(&self) -> Option<BodyId> {
        match self {
            Self::UnknownBody(id)
            | Self::MissingBoundary(id)
            | Self::NonFiniteState(id)
            | Self::SpeedLimitExceeded { id, .. } => Some(*id),
            Self::InvalidBody(_) | Self::Faulted => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
