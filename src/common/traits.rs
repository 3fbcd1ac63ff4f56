//! Common traits defining the seams of the planner

use crate::common::error::SteeringError;
use crate::common::types::Pose2D;

/// Output of one steering call: the sampled connecting path and its arc length.
#[derive(Debug, Clone, PartialEq)]
pub struct SteeredPath {
    pub samples: Vec<Pose2D>,
    pub length: f64,
}

impl SteeredPath {
    pub fn new(samples: Vec<Pose2D>, length: f64) -> Self {
        Self { samples, length }
    }

    pub fn end(&self) -> Option<&Pose2D> {
        self.samples.last()
    }
}

/// Curvature-constrained local connector between two poses.
///
/// The returned path must start at `from`, end at `to` (within numerical
/// tolerance), never exceed `max_curvature`, and report its true arc length.
/// Implementations must be deterministic for fixed inputs.
pub trait SteeringOracle {
    fn steer(&self, from: &Pose2D, to: &Pose2D, max_curvature: f64)
        -> Result<SteeredPath, SteeringError>;
}

impl<T: SteeringOracle + ?Sized> SteeringOracle for &T {
    fn steer(&self, from: &Pose2D, to: &Pose2D, max_curvature: f64)
        -> Result<SteeredPath, SteeringError> {
        (**self).steer(from, to, max_curvature)
    }
}
