//! Planner configuration and per-call request.
//!
//! `PlannerConfig` holds the tunables that stay fixed across calls and can be
//! loaded from YAML. `PlanRequest` carries the inputs of a single call.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{AreaBounds, ObstacleSnapshots, PlannerError, PlannerResult, Pose2D};
use crate::path_planning::dubins_path::MIN_STEP_SIZE;

/// Default value functions for serde deserialization.
mod defaults {
    pub fn max_curvature() -> f64 {
        1.0
    }

    pub fn step_size() -> f64 {
        0.1
    }

    pub fn bias_increment() -> u32 {
        3
    }

    pub fn bias_interval() -> usize {
        5
    }

    pub fn connect_circle_dist() -> f64 {
        50.0
    }

    pub fn goal_xy_tolerance() -> f64 {
        0.5
    }

    pub fn goal_yaw_tolerance() -> f64 {
        1.0_f64.to_radians()
    }

    pub fn snapshot_interval() -> usize {
        5
    }

    pub fn enabled() -> bool {
        true
    }

    pub fn nominal_speed() -> f64 {
        1.0
    }

    pub fn snapshot_dt() -> f64 {
        1.0
    }
}

/// How path samples are matched against the obstacle snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotPolicy {
    /// Check every sample against every snapshot (conservative)
    #[default]
    Union,
    /// Check each sample only against the snapshot of its estimated arrival time
    ArrivalIndexed,
}

/// Collision filter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionSettings {
    /// Add the vehicle radius to each obstacle radius
    #[serde(default = "defaults::enabled")]
    pub inflate_with_vehicle_radius: bool,

    #[serde(default)]
    pub snapshot_policy: SnapshotPolicy,

    /// Travel speed used to turn arc length into arrival time [m/s]
    #[serde(default = "defaults::nominal_speed")]
    pub nominal_speed: f64,

    /// Time between consecutive obstacle snapshots [s]
    #[serde(default = "defaults::snapshot_dt")]
    pub snapshot_dt: f64,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            inflate_with_vehicle_radius: true,
            snapshot_policy: SnapshotPolicy::Union,
            nominal_speed: defaults::nominal_speed(),
            snapshot_dt: defaults::snapshot_dt(),
        }
    }
}

/// Configuration for the RRT* Dubins planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Curvature bound passed to the steering oracle [1/m]
    #[serde(default = "defaults::max_curvature")]
    pub max_curvature: f64,

    /// Spacing of local path samples [m]
    #[serde(default = "defaults::step_size")]
    pub step_size: f64,

    /// Goal bias added every `bias_interval` iterations [percent]
    #[serde(default = "defaults::bias_increment")]
    pub bias_increment: u32,

    #[serde(default = "defaults::bias_interval")]
    pub bias_interval: usize,

    /// Scale of the shrinking near-neighbourhood radius
    #[serde(default = "defaults::connect_circle_dist")]
    pub connect_circle_dist: f64,

    /// Goal region position tolerance [m]
    #[serde(default = "defaults::goal_xy_tolerance")]
    pub goal_xy_tolerance: f64,

    /// Goal region heading tolerance [rad]
    #[serde(default = "defaults::goal_yaw_tolerance")]
    pub goal_yaw_tolerance: f64,

    /// Iterations between tree snapshots handed to the observer hook
    #[serde(default = "defaults::snapshot_interval")]
    pub snapshot_interval: usize,

    /// Push cost reductions from a rewired vertex down to its subtree
    #[serde(default = "defaults::enabled")]
    pub propagate_rewired_cost: bool,

    #[serde(default)]
    pub collision: CollisionSettings,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_curvature: defaults::max_curvature(),
            step_size: defaults::step_size(),
            bias_increment: defaults::bias_increment(),
            bias_interval: defaults::bias_interval(),
            connect_circle_dist: defaults::connect_circle_dist(),
            goal_xy_tolerance: defaults::goal_xy_tolerance(),
            goal_yaw_tolerance: defaults::goal_yaw_tolerance(),
            snapshot_interval: defaults::snapshot_interval(),
            propagate_rewired_cost: true,
            collision: CollisionSettings::default(),
        }
    }
}

fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl PlannerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> PlannerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> PlannerResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| PlannerError::ConfigLoad(e.to_string()))
    }

    pub fn to_yaml(&self) -> PlannerResult<String> {
        serde_yaml::to_string(self).map_err(|e| PlannerError::ConfigLoad(e.to_string()))
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if !positive_finite(self.max_curvature) {
            return Err(PlannerError::invalid(format!(
                "max_curvature must be positive, got {}",
                self.max_curvature
            )));
        }
        if !(self.step_size.is_finite() && self.step_size >= MIN_STEP_SIZE) {
            return Err(PlannerError::invalid(format!(
                "step_size must be at least {}, got {}",
                MIN_STEP_SIZE, self.step_size
            )));
        }
        if self.bias_interval == 0 {
            return Err(PlannerError::invalid("bias_interval must be positive"));
        }
        if !positive_finite(self.connect_circle_dist) {
            return Err(PlannerError::invalid(format!(
                "connect_circle_dist must be positive, got {}",
                self.connect_circle_dist
            )));
        }
        if !(self.goal_xy_tolerance.is_finite() && self.goal_xy_tolerance >= 0.0)
            || !(self.goal_yaw_tolerance.is_finite() && self.goal_yaw_tolerance >= 0.0)
        {
            return Err(PlannerError::invalid("goal tolerances must be non-negative"));
        }
        if self.snapshot_interval == 0 {
            return Err(PlannerError::invalid("snapshot_interval must be positive"));
        }
        if !positive_finite(self.collision.nominal_speed) || !positive_finite(self.collision.snapshot_dt) {
            return Err(PlannerError::invalid(
                "collision nominal_speed and snapshot_dt must be positive",
            ));
        }
        Ok(())
    }
}

/// Inputs of one planning call
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub start: Pose2D,
    pub goal: Pose2D,
    pub obstacles: ObstacleSnapshots,
    pub sample_region: AreaBounds,
    /// Radius of the vehicle footprint [m]
    pub vehicle_radius: f64,
    /// Initial goal sampling rate [percent, 0-100]
    pub goal_bias: u32,
    pub max_iterations: usize,
}

impl PlanRequest {
    pub fn new(start: Pose2D, goal: Pose2D, sample_region: AreaBounds) -> Self {
        Self {
            start,
            goal,
            obstacles: ObstacleSnapshots::new(),
            sample_region,
            vehicle_radius: 0.0,
            goal_bias: 10,
            max_iterations: 60,
        }
    }

    pub fn with_obstacles(mut self, obstacles: ObstacleSnapshots) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn with_vehicle_radius(mut self, radius: f64) -> Self {
        self.vehicle_radius = radius;
        self
    }

    pub fn with_goal_bias(mut self, goal_bias: u32) -> Self {
        self.goal_bias = goal_bias;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if self.max_iterations == 0 {
            return Err(PlannerError::invalid("max_iterations must be positive"));
        }
        if self.goal_bias > 100 {
            return Err(PlannerError::invalid(format!(
                "goal_bias must be within [0, 100], got {}",
                self.goal_bias
            )));
        }
        if !self.sample_region.is_well_formed() {
            return Err(PlannerError::invalid(format!(
                "sample region is empty or non-finite: {:?}",
                self.sample_region
            )));
        }
        for (name, pose) in [("start", &self.start), ("goal", &self.goal)] {
            if !pose.is_finite() {
                return Err(PlannerError::invalid(format!("{} pose is not finite", name)));
            }
            if !self.sample_region.contains(pose.x, pose.y) {
                return Err(PlannerError::invalid(format!(
                    "{} ({}, {}) lies outside the sample region",
                    name, pose.x, pose.y
                )));
            }
        }
        if !(self.vehicle_radius.is_finite() && self.vehicle_radius >= 0.0) {
            return Err(PlannerError::invalid(format!(
                "vehicle_radius must be non-negative, got {}",
                self.vehicle_radius
            )));
        }
        if let Some(bad) = self.obstacles.all_obstacles().find(|o| !o.is_well_formed()) {
            return Err(PlannerError::invalid(format!("malformed obstacle {:?}", bad)));
        }
        Ok(())
    }
}
