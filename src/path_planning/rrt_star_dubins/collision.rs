//! Collision filtering of local paths against predicted obstacle footprints
//!
//! Path samples are treated as points (a zero-width polyline) and obstacles as
//! circles. A sample collides when its squared distance to an obstacle centre
//! is at most the squared exclusion radius.

use crate::common::{CircleObstacle, ObstacleSnapshots, Pose2D};

use super::config::{CollisionSettings, SnapshotPolicy};

#[derive(Debug, Clone)]
pub struct CollisionChecker<'a> {
    snapshots: &'a ObstacleSnapshots,
    /// Added to every obstacle radius
    margin: f64,
    policy: SnapshotPolicy,
    /// Distance travelled between consecutive snapshots
    snapshot_spacing: f64,
}

impl<'a> CollisionChecker<'a> {
    pub fn new(snapshots: &'a ObstacleSnapshots, vehicle_radius: f64, settings: &CollisionSettings) -> Self {
        let margin = if settings.inflate_with_vehicle_radius {
            vehicle_radius
        } else {
            0.0
        };
        Self {
            snapshots,
            margin,
            policy: settings.snapshot_policy,
            snapshot_spacing: settings.nominal_speed * settings.snapshot_dt,
        }
    }

    /// True when the verdict for a path depends on its arrival distance
    pub fn is_time_indexed(&self) -> bool {
        self.policy == SnapshotPolicy::ArrivalIndexed && self.snapshots.len() > 1
    }

    pub fn exclusion_radius(&self, obstacle: &CircleObstacle) -> f64 {
        obstacle.radius + self.margin
    }

    /// True when `(x, y)` lies inside or on any obstacle of `snapshot`
    pub fn point_collides(&self, x: f64, y: f64, snapshot: &[CircleObstacle]) -> bool {
        snapshot.iter().any(|obs| {
            let dx = obs.x - x;
            let dy = obs.y - y;
            dx * dx + dy * dy <= self.exclusion_radius(obs).powi(2)
        })
    }

    /// Snapshot index matching the arrival distance, clamped to the last snapshot
    pub fn snapshot_index(&self, distance: f64) -> usize {
        let last = self.snapshots.len().saturating_sub(1);
        let index = (distance.max(0.0) / self.snapshot_spacing).floor();
        if index >= last as f64 {
            last
        } else {
            index as usize
        }
    }

    /// Check a local path. `start_distance` is the path length already
    /// travelled when the first sample is reached (the parent's cost).
    pub fn is_path_free(&self, samples: &[Pose2D], start_distance: f64) -> bool {
        if self.snapshots.is_empty() {
            return true;
        }
        match self.policy {
            SnapshotPolicy::Union => self.snapshots.iter().all(|snapshot| {
                samples.iter().all(|p| !self.point_collides(p.x, p.y, snapshot))
            }),
            SnapshotPolicy::ArrivalIndexed => {
                let mut distance = start_distance;
                let mut previous: Option<&Pose2D> = None;
                for p in samples {
                    if let Some(prev) = previous {
                        distance += prev.xy_distance(p);
                    }
                    previous = Some(p);
                    let index = self.snapshot_index(distance);
                    let snapshot = self.snapshots.get(index).unwrap_or(&[]);
                    if self.point_collides(p.x, p.y, snapshot) {
                        return false;
                    }
                }
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(y: f64) -> Vec<Pose2D> {
        (0..=100).map(|i| Pose2D::new(i as f64 * 0.1, y, 0.0)).collect()
    }

    #[test]
    fn test_no_obstacles_is_free() {
        let snapshots = ObstacleSnapshots::new();
        let checker = CollisionChecker::new(&snapshots, 1.0, &CollisionSettings::default());
        assert!(checker.is_path_free(&straight(0.0), 0.0));
    }

    #[test]
    fn test_boundary_counts_as_collision() {
        let snapshots = ObstacleSnapshots::single(vec![CircleObstacle::new(5.0, 1.0, 1.0)]);
        let settings = CollisionSettings {
            inflate_with_vehicle_radius: false,
            ..Default::default()
        };
        let checker = CollisionChecker::new(&snapshots, 0.0, &settings);
        assert!(!checker.is_path_free(&straight(0.0), 0.0));
        assert!(checker.is_path_free(&straight(-0.01), 0.0));
    }

    #[test]
    fn test_vehicle_radius_inflation() {
        let snapshots = ObstacleSnapshots::single(vec![CircleObstacle::new(5.0, 2.0, 1.0)]);
        let inflated = CollisionChecker::new(&snapshots, 1.5, &CollisionSettings::default());
        assert!(!inflated.is_path_free(&straight(0.0), 0.0));

        let settings = CollisionSettings {
            inflate_with_vehicle_radius: false,
            ..Default::default()
        };
        let bare = CollisionChecker::new(&snapshots, 1.5, &settings);
        assert!(bare.is_path_free(&straight(0.0), 0.0));
    }

    #[test]
    fn test_union_checks_every_snapshot() {
        // Obstacle only present in the last snapshot, far in the future
        let snapshots = ObstacleSnapshots::from_tuples(vec![
            vec![],
            vec![],
            vec![(0.5, 0.0, 0.2)],
        ]);
        let union = CollisionChecker::new(&snapshots, 0.0, &CollisionSettings::default());
        assert!(!union.is_path_free(&straight(0.0), 0.0));
    }

    #[test]
    fn test_arrival_indexed_uses_matching_snapshot() {
        let snapshots = ObstacleSnapshots::from_tuples(vec![
            vec![],
            vec![],
            vec![(0.5, 0.0, 0.2)],
        ]);
        let settings = CollisionSettings {
            snapshot_policy: SnapshotPolicy::ArrivalIndexed,
            ..Default::default()
        };
        let checker = CollisionChecker::new(&snapshots, 0.0, &settings);
        // Samples near x = 0.5 are reached after ~0.5 m, i.e. snapshot 0
        assert!(checker.is_path_free(&straight(0.0), 0.0));
        // Starting 2 m into the route puts the same samples in snapshot 2
        assert!(!checker.is_path_free(&straight(0.0), 2.0));
    }

    #[test]
    fn test_time_indexed_needs_several_snapshots() {
        let arrival = CollisionSettings {
            snapshot_policy: SnapshotPolicy::ArrivalIndexed,
            ..Default::default()
        };
        let single = ObstacleSnapshots::single(vec![CircleObstacle::new(1.0, 1.0, 0.5)]);
        let several = ObstacleSnapshots::from_tuples(vec![vec![], vec![(1.0, 1.0, 0.5)]]);
        assert!(!CollisionChecker::new(&single, 0.0, &arrival).is_time_indexed());
        assert!(CollisionChecker::new(&several, 0.0, &arrival).is_time_indexed());
        assert!(!CollisionChecker::new(&several, 0.0, &CollisionSettings::default()).is_time_indexed());
    }

    #[test]
    fn test_snapshot_index_clamps() {
        let snapshots = ObstacleSnapshots::from_tuples(vec![vec![], vec![]]);
        let settings = CollisionSettings {
            snapshot_policy: SnapshotPolicy::ArrivalIndexed,
            nominal_speed: 2.0,
            snapshot_dt: 0.5,
            ..Default::default()
        };
        let checker = CollisionChecker::new(&snapshots, 0.0, &settings);
        assert_eq!(checker.snapshot_index(0.0), 0);
        assert_eq!(checker.snapshot_index(0.99), 0);
        assert_eq!(checker.snapshot_index(1.0), 1);
        assert_eq!(checker.snapshot_index(50.0), 1);
    }
}
