//! dubins_rrt_star - RRT* motion planning for curvature-constrained vehicles
//!
//! This crate grows an asymptotically optimal RRT* tree whose edges are
//! Dubins paths, avoiding circular obstacles that may be given as a sequence
//! of predicted snapshots.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod path_planning;

// Re-export common types for convenience
pub use common::{AreaBounds, CircleObstacle, ObstacleSnapshots, Path2D, Point2D, Pose2D};
pub use common::{SteeredPath, SteeringOracle};
pub use common::{PlannerError, PlannerResult, SteeringError};
pub use path_planning::{DubinsSteering, PlanRequest, PlannedPath, PlannerConfig, RRTStarDubins};
