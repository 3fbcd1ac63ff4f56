//! Utility modules for dubins_rrt_star

pub mod angle;

pub use angle::*;
