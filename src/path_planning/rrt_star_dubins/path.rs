//! Goal-region selection and path extraction

use ordered_float::OrderedFloat;

use crate::common::{Path2D, Pose2D};
use crate::utils::angle::angle_diff;

use super::node::Tree;

/// Result of a successful planning call
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPath {
    /// Ordered (x, y) waypoints, start first, goal last
    pub waypoints: Path2D,
    /// Same sequence with headings kept
    pub poses: Vec<Pose2D>,
    /// Cost of the selected goal vertex
    pub cost: f64,
    pub goal_index: usize,
    pub tree_size: usize,
}

/// Cheapest vertex inside the goal region, first in tree order on ties.
pub fn select_goal_vertex(tree: &Tree, goal: &Pose2D, xy_tolerance: f64, yaw_tolerance: f64) -> Option<usize> {
    tree.nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| {
            node.pose.xy_distance(goal) <= xy_tolerance
                && angle_diff(node.pose.yaw, goal.yaw).abs() <= yaw_tolerance
        })
        .min_by_key(|(_, node)| OrderedFloat(node.cost))
        .map(|(i, _)| i)
}

/// Backtrack parent links from `goal_index` and stitch the local paths
/// together, framed by the literal start and goal poses.
pub fn extract_path(tree: &Tree, goal_index: usize, start: &Pose2D, goal: &Pose2D) -> PlannedPath {
    let mut reversed: Vec<Pose2D> = Vec::new();
    for index in tree.ancestors(goal_index) {
        reversed.extend(tree.node(index).local_path.iter().rev());
    }

    let mut poses = Vec::with_capacity(reversed.len() + 2);
    poses.push(*start);
    poses.extend(reversed.into_iter().rev());
    poses.push(*goal);

    let waypoints = Path2D::from_points(poses.iter().map(Pose2D::position).collect());

    PlannedPath {
        waypoints,
        poses,
        cost: tree.node(goal_index).cost,
        goal_index,
        tree_size: tree.len(),
    }
}
