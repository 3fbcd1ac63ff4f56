//! Common types used throughout dubins_rrt_star

use nalgebra::Vector3;

use crate::utils::angle::pi_2_pi;

/// Planar waypoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Vehicle pose. The heading is always kept in (-pi, pi].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw: pi_2_pi(yaw) }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, yaw: 0.0 }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.yaw)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.yaw.is_finite()
    }

    /// Squared distance in (x, y, yaw) space, yaw taken as a plain linear axis.
    pub fn distance_sq_3d(&self, other: &Pose2D) -> f64 {
        (self.to_vector() - other.to_vector()).norm_squared()
    }

    /// Planar Euclidean distance, heading ignored
    pub fn xy_distance(&self, other: &Pose2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Waypoint sequence of a planned route
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path2D {
    pub points: Vec<Point2D>,
}

impl Path2D {
    pub fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point2D> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point2D> {
        self.points.last()
    }

    /// Polyline length through every waypoint
    pub fn total_length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }
}

/// Rectangular sampling region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaBounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl AreaBounds {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        AreaBounds { xmin, xmax, ymin, ymax }
    }

    /// Build from `((x_min, x_max), (y_min, y_max))`
    pub fn from_ranges(x: (f64, f64), y: (f64, f64)) -> Self {
        Self::new(x.0, x.1, y.0, y.1)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }

    pub fn is_well_formed(&self) -> bool {
        [self.xmin, self.xmax, self.ymin, self.ymax].iter().all(|v| v.is_finite())
            && self.xmin < self.xmax
            && self.ymin < self.ymax
    }
}

/// Circular obstacle (x, y, radius)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleObstacle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl CircleObstacle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.radius.is_finite() && self.radius >= 0.0
    }
}

impl From<(f64, f64, f64)> for CircleObstacle {
    fn from(tuple: (f64, f64, f64)) -> Self {
        Self::new(tuple.0, tuple.1, tuple.2)
    }
}

/// Predicted obstacle footprints, one snapshot per future time step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleSnapshots {
    snapshots: Vec<Vec<CircleObstacle>>,
}

impl ObstacleSnapshots {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub fn from_snapshots(snapshots: Vec<Vec<CircleObstacle>>) -> Self {
        Self { snapshots }
    }

    /// Build from raw `(x, y, radius)` tuples, one inner list per time step
    pub fn from_tuples(snapshots: Vec<Vec<(f64, f64, f64)>>) -> Self {
        let snapshots = snapshots
            .into_iter()
            .map(|snapshot| snapshot.into_iter().map(CircleObstacle::from).collect())
            .collect();
        Self { snapshots }
    }

    /// A single static snapshot
    pub fn single(obstacles: Vec<CircleObstacle>) -> Self {
        Self { snapshots: vec![obstacles] }
    }

    pub fn push(&mut self, snapshot: Vec<CircleObstacle>) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[CircleObstacle]> {
        self.snapshots.get(index).map(|s| s.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &[CircleObstacle]> {
        self.snapshots.iter().map(|s| s.as_slice())
    }

    /// Every obstacle of every snapshot
    pub fn all_obstacles(&self) -> impl Iterator<Item = &CircleObstacle> {
        self.snapshots.iter().flatten()
    }
}
