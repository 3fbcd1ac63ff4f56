// Path Planning algorithms module

pub mod dubins_path;
pub mod rrt_star_dubins;

pub use dubins_path::{DubinsPath, DubinsSteering, PathType, SegmentType};
pub use rrt_star_dubins::*;
