//! RRT* path planning with Dubins steering
//!
//! Grows a tree of curvature-feasible poses from a start toward a goal pose
//! among circular obstacles, optionally given as a time-indexed sequence of
//! snapshots.
//!
//! # Example
//!
//! ```no_run
//! use dubins_rrt_star::common::{AreaBounds, CircleObstacle, ObstacleSnapshots, Pose2D};
//! use dubins_rrt_star::path_planning::rrt_star_dubins::{PlanRequest, PlannerConfig, RRTStarDubins};
//! use rand::SeedableRng;
//!
//! let planner = RRTStarDubins::new(PlannerConfig::default());
//! let request = PlanRequest::new(
//!     Pose2D::new(0.0, 0.0, 0.0),
//!     Pose2D::new(10.0, 10.0, 0.0),
//!     AreaBounds::from_ranges((-2.0, 15.0), (-2.0, 15.0)),
//! )
//! .with_obstacles(ObstacleSnapshots::single(vec![CircleObstacle::new(5.0, 5.0, 1.0)]))
//! .with_max_iterations(200);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! match planner.plan(&request, &mut rng) {
//!     Ok(path) => println!("cost {:.2}", path.cost),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod collision;
pub mod config;
pub mod neighborhood;
pub mod node;
pub mod path;
pub mod planner;
pub mod sampler;

pub use collision::CollisionChecker;
pub use config::{CollisionSettings, PlanRequest, PlannerConfig, SnapshotPolicy};
pub use node::{Node, Tree};
pub use path::{extract_path, select_goal_vertex, PlannedPath};
pub use planner::{GrowthStats, RRTStarDubins, TreeSnapshot};
pub use sampler::GoalBiasedSampler;
