//! RRT* planner with curvature-constrained steering
//!
//! Every tree edge comes from the steering oracle, so the whole tree obeys
//! the vehicle's minimum turning radius. One iteration:
//!
//! 1. sample a target pose (goal-biased)
//! 2. find the nearest vertex
//! 3. steer from it to the target
//! 4. drop the candidate if its local path collides
//! 5. choose the cheapest collision-free parent in the near-neighbourhood
//!    and insert
//! 6. rewire the neighbourhood through the new vertex
//! 7. hand a snapshot of the tree to the observer hook, if any
//!
//! Based on:
//! - PythonRobotics RRT* Dubins planner by Atsushi Sakai
//! - "Sampling-based Algorithms for Optimal Motion Planning", Karaman & Frazzoli

use std::collections::VecDeque;

use log::{debug, info, trace, warn};
use rand::Rng;

use crate::common::{PlannerError, PlannerResult, Pose2D, SteeringError, SteeringOracle};
use crate::path_planning::dubins_path::DubinsSteering;

use super::collision::CollisionChecker;
use super::config::{PlanRequest, PlannerConfig};
use super::neighborhood::{near_indices, near_radius, nearest_index};
use super::node::{Node, Tree};
use super::path::{extract_path, select_goal_vertex, PlannedPath};
use super::sampler::GoalBiasedSampler;

/// Read-only view of the tree handed to the observer hook
#[derive(Debug, Clone, Copy)]
pub struct TreeSnapshot<'a> {
    pub iteration: usize,
    /// Target pose sampled in this iteration
    pub sample: Pose2D,
    pub tree: &'a Tree,
}

/// Counters collected while growing one tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthStats {
    pub inserted: usize,
    pub rejected_collision: usize,
    pub rejected_steering: usize,
    pub rewired: usize,
}

/// RRT* planner over curvature-constrained local paths
#[derive(Debug, Clone)]
pub struct RRTStarDubins<S: SteeringOracle = DubinsSteering> {
    config: PlannerConfig,
    oracle: S,
}

impl RRTStarDubins<DubinsSteering> {
    /// Planner using the built-in Dubins oracle sampled at `config.step_size`
    pub fn new(config: PlannerConfig) -> Self {
        let oracle = DubinsSteering::new(config.step_size);
        Self { config, oracle }
    }

    pub fn with_defaults() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl<S: SteeringOracle> RRTStarDubins<S> {
    pub fn with_oracle(config: PlannerConfig, oracle: S) -> Self {
        Self { config, oracle }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn oracle(&self) -> &S {
        &self.oracle
    }

    /// Plan from `request.start` to `request.goal`.
    ///
    /// Returns `PlannerError::NoPathFound` when no vertex reaches the goal
    /// region within the iteration budget, and
    /// `PlannerError::InvalidConfiguration` before any work when the
    /// request or config is malformed.
    pub fn plan<R: Rng + ?Sized>(&self, request: &PlanRequest, rng: &mut R) -> PlannerResult<PlannedPath> {
        self.plan_with_hook(request, rng, |_: &TreeSnapshot<'_>| {})
    }

    /// Same as [`plan`](Self::plan), calling `hook` every
    /// `config.snapshot_interval` iterations.
    pub fn plan_with_hook<R, F>(&self, request: &PlanRequest, rng: &mut R, hook: F) -> PlannerResult<PlannedPath>
    where
        R: Rng + ?Sized,
        F: FnMut(&TreeSnapshot<'_>),
    {
        let (tree, _) = self.build_tree(request, rng, hook)?;

        let goal_index = select_goal_vertex(
            &tree,
            &request.goal,
            self.config.goal_xy_tolerance,
            self.config.goal_yaw_tolerance,
        )
        .ok_or(PlannerError::NoPathFound {
            iterations: request.max_iterations,
            vertices: tree.len(),
        })?;

        let path = extract_path(&tree, goal_index, &request.start, &request.goal);
        info!(
            "[RRTStarDubins] path found: cost {:.3}, {} waypoints, {} vertices",
            path.cost,
            path.waypoints.len(),
            tree.len()
        );
        Ok(path)
    }

    /// Grow the tree for `request.max_iterations` iterations.
    pub fn build_tree<R, F>(&self, request: &PlanRequest, rng: &mut R, mut hook: F) -> PlannerResult<(Tree, GrowthStats)>
    where
        R: Rng + ?Sized,
        F: FnMut(&TreeSnapshot<'_>),
    {
        self.config.validate()?;
        request.validate()?;

        let sampler = GoalBiasedSampler::new(
            request.sample_region,
            request.goal,
            request.goal_bias,
            self.config.bias_increment,
            self.config.bias_interval,
        );
        let checker = CollisionChecker::new(&request.obstacles, request.vehicle_radius, &self.config.collision);

        let mut tree = Tree::new(request.start);
        let mut stats = GrowthStats::default();

        info!(
            "[RRTStarDubins] planning from ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2}), {} iterations",
            request.start.x,
            request.start.y,
            request.start.yaw,
            request.goal.x,
            request.goal.y,
            request.goal.yaw,
            request.max_iterations
        );
        if !checker.is_path_free(&[request.start], 0.0) {
            warn!("[RRTStarDubins] start pose is inside an obstacle, every extension will be rejected");
        }

        for i in 0..request.max_iterations {
            if i % 100 == 0 {
                debug!("[RRTStarDubins] iter: {}, number of nodes: {}", i, tree.len());
            }

            let rnd = sampler.sample(i, rng);
            let nearest = nearest_index(&tree, &rnd);

            match self.steer(&tree, nearest, &rnd) {
                Ok(candidate) => {
                    let parent_cost = tree.node(nearest).cost;
                    if checker.is_path_free(&candidate.local_path, parent_cost) {
                        let near = near_indices(&tree, &candidate.pose, near_radius(tree.len(), self.config.connect_circle_dist));
                        let new_node = self.choose_parent(&tree, &checker, candidate, &near);
                        let new_index = tree.push(new_node);
                        stats.inserted += 1;
                        stats.rewired += self.rewire(&mut tree, &checker, new_index, &near);
                    } else {
                        trace!("[RRTStarDubins] iter {}: candidate collides", i);
                        stats.rejected_collision += 1;
                    }
                }
                Err(e) => {
                    debug!("[RRTStarDubins] iter {}: steering failed: {}", i, e);
                    stats.rejected_steering += 1;
                }
            }

            if i % self.config.snapshot_interval == 0 {
                hook(&TreeSnapshot {
                    iteration: i,
                    sample: rnd,
                    tree: &tree,
                });
            }
        }

        info!(
            "[RRTStarDubins] reached max iteration: {} vertices, {} collisions, {} steering failures, {} rewires",
            tree.len(),
            stats.rejected_collision,
            stats.rejected_steering,
            stats.rewired
        );
        Ok((tree, stats))
    }

    /// Fresh vertex connecting `from` to `target` through the oracle
    fn steer(&self, tree: &Tree, from: usize, target: &Pose2D) -> Result<Node, SteeringError> {
        let parent = tree.node(from);
        let steered = self.oracle.steer(&parent.pose, target, self.config.max_curvature)?;
        Node::from_steer(from, parent.cost, steered)
    }

    /// Cheapest collision-free connection from the neighbourhood to the
    /// candidate's pose. Falls back to the candidate itself.
    fn choose_parent(&self, tree: &Tree, checker: &CollisionChecker<'_>, candidate: Node, near: &[usize]) -> Node {
        if near.is_empty() {
            return candidate;
        }

        let mut best: Option<Node> = None;
        for &i in near {
            let node = match self.steer(tree, i, &candidate.pose) {
                Ok(node) => node,
                Err(_) => continue,
            };
            if !checker.is_path_free(&node.local_path, tree.node(i).cost) {
                continue;
            }
            if best.as_ref().map_or(true, |b| node.cost < b.cost) {
                best = Some(node);
            }
        }

        match best {
            Some(node) => node,
            None => {
                warn!("[RRTStarDubins] no collision-free parent in neighbourhood, keeping nearest");
                candidate
            }
        }
    }

    /// Reconnect neighbours through `new_index` when that is strictly cheaper.
    /// Returns the number of rewired vertices.
    fn rewire(&self, tree: &mut Tree, checker: &CollisionChecker<'_>, new_index: usize, near: &[usize]) -> usize {
        let mut rewired = 0;

        for &i in near {
            // The root keeps no parent, and an ancestor cannot hang below its descendant
            if i == 0 || tree.is_ancestor(i, new_index) {
                continue;
            }

            let target = tree.node(i).pose;
            let edge = match self.steer(tree, new_index, &target) {
                Ok(node) => node,
                Err(_) => continue,
            };

            if edge.cost >= tree.node(i).cost
                || !checker.is_path_free(&edge.local_path, tree.node(new_index).cost)
            {
                continue;
            }
            if !self.subtree_stays_free(tree, checker, i, edge.cost) {
                trace!("[RRTStarDubins] rewire {} via {} blocked: a descendant would collide", i, new_index);
                continue;
            }

            trace!(
                "[RRTStarDubins] rewire {} via {}: {:.3} -> {:.3}",
                i,
                new_index,
                tree.node(i).cost,
                edge.cost
            );
            tree.replace(i, edge);
            if self.config.propagate_rewired_cost {
                tree.propagate_cost(i);
            }
            rewired += 1;
        }
        rewired
    }

    /// Whether the descendants of `index` stay collision-free once `index`
    /// is reached after `new_cost`. Only arrival-indexed checking depends on
    /// the cost, so other policies always pass.
    fn subtree_stays_free(&self, tree: &Tree, checker: &CollisionChecker<'_>, index: usize, new_cost: f64) -> bool {
        if !checker.is_time_indexed() {
            return true;
        }

        let mut queue: VecDeque<(usize, f64)> = VecDeque::from([(index, new_cost)]);
        while let Some((parent, parent_cost)) = queue.pop_front() {
            for &child in tree.children(parent) {
                let node = tree.node(child);
                if !checker.is_path_free(&node.local_path, parent_cost) {
                    return false;
                }
                // Without propagation only the direct children see a new parent cost
                if self.config.propagate_rewired_cost {
                    queue.push_back((child, parent_cost + node.segment_length));
                }
            }
        }
        true
    }
}
