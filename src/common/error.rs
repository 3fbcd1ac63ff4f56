//! Error types for dubins_rrt_star

use thiserror::Error;

/// Errors reported by a planning call.
///
/// `NoPathFound` is an ordinary negative outcome of a well-formed request,
/// distinct from `InvalidConfiguration`, which is raised before any tree is
/// built.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("No path found after {iterations} iterations ({vertices} vertices in tree)")]
    NoPathFound { iterations: usize, vertices: usize },

    #[error("Config load error: {0}")]
    ConfigLoad(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlannerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        PlannerError::InvalidConfiguration(msg.into())
    }

    pub fn is_no_path(&self) -> bool {
        matches!(self, PlannerError::NoPathFound { .. })
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, PlannerError::InvalidConfiguration(_))
    }
}

/// Failure of a single steering attempt. Never fatal to a planning run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SteeringError {
    #[error("no curvature-constrained path exists between the poses")]
    NoPath,

    #[error("curvature bound must be positive and finite, got {0}")]
    InvalidCurvature(f64),

    #[error("pose contains non-finite values")]
    NonFinitePose,

    #[error("steering returned no samples")]
    EmptyPath,
}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
