//! Nearest-vertex and near-neighbourhood queries over the tree.
//!
//! Distances are squared Euclidean in (x, y, yaw) with yaw taken as a linear
//! coordinate. Queries are linear scans.

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::common::Pose2D;

use super::node::Tree;

/// Index of the vertex closest to `pose`; the lowest index wins exact ties.
pub fn nearest_index(tree: &Tree, pose: &Pose2D) -> usize {
    tree.nodes()
        .iter()
        .position_min_by_key(|node| OrderedFloat(node.pose.distance_sq_3d(pose)))
        .unwrap_or(0)
}

/// Shrinking connection radius `k * sqrt(ln(n) / n)` for a tree of `n` vertices.
pub fn near_radius(n: usize, k: f64) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let n = n as f64;
    k * (n.ln() / n).sqrt()
}

/// Indices of every vertex within `radius` of `pose`, in tree order.
pub fn near_indices(tree: &Tree, pose: &Pose2D, radius: f64) -> Vec<usize> {
    let r_sq = radius * radius;
    tree.nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| node.pose.distance_sq_3d(pose) <= r_sq)
        .map(|(i, _)| i)
        .collect()
}
