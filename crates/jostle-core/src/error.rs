use thiserror::Error;

pub type Result<T> = std::result::Result<T, JostleError>;

#[derive(Debug, Error)]
pub enum JostleError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("placement failed: {0}")]
    Placement(#[from] PlacementError),
}

impl JostleError {
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Why a placement pass could not produce a full, non-overlapping layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// No integer coordinate lies inside the bounds on at least one axis.
    #[error("bounds admit no integer position")]
    EmptyBounds,

    /// Two or more letters can never be `min_distance` apart inside the bounds.
    #[error("{count} letters cannot be {min_distance} apart within a {diagonal:.1} diagonal")]
    Unsatisfiable {
        count: usize,
        min_distance: f64,
        diagonal: f64,
    },

    /// The per-letter attempt cap was reached under the strict policy.
    #[error("letter {index} found no free position after {attempts} attempts")]
    Exhausted { index: usize, attempts: u32 },
}
