//! Angle helpers shared by the steering oracle and the planner

use std::f64::consts::PI;

/// Wrap an angle into (-pi, pi]
pub fn pi_2_pi(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

/// Wrap an angle into [0, 2pi)
pub fn mod2pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(2.0 * PI);
    // rem_euclid may round up to exactly 2pi for tiny negative inputs
    if wrapped >= 2.0 * PI {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest difference `a - b`, wrapped into (-pi, pi]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    pi_2_pi(a - b)
}
