//! Common types, traits, and error definitions for dubins_rrt_star
//!
//! This module provides the foundational building blocks shared by the
//! steering oracle and the tree planner.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
