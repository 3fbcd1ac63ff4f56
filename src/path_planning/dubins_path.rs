//! Dubins path steering
//!
//! Shortest forward-only connection between two oriented poses for a
//! vehicle whose curvature is bounded by `max_curvature` (turning radius
//! `1 / max_curvature`). This is the default local connector handed to the
//! tree planner.
//!
//! Based on:
//! - PythonRobotics Dubins path planner by Atsushi Sakai
//! - "Classification of the Dubins set", Shkel & Lumelsky

use ordered_float::OrderedFloat;

use crate::common::{Pose2D, SteeredPath, SteeringError, SteeringOracle};
use crate::utils::angle::{angle_diff, mod2pi};

/// Poses closer than this (in position and heading) are treated as identical.
const COINCIDENT_EPS: f64 = 1e-9;

/// Finest sample spacing along a path [m]; smaller steps are clamped to it
pub const MIN_STEP_SIZE: f64 = 1e-3;

/// The three segment types in a Dubins path
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum SegmentType {
    /// Left turn at maximum curvature
    L,
    /// Straight
    S,
    /// Right turn at maximum curvature
    R,
}

/// The six Dubins words
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum PathType {
    LSL,
    LSR,
    RSL,
    RSR,
    RLR,
    LRL,
}

impl PathType {
    pub const ALL: [PathType; 6] = [
        PathType::LSL,
        PathType::LSR,
        PathType::RSL,
        PathType::RSR,
        PathType::RLR,
        PathType::LRL,
    ];

    pub fn segments(&self) -> [SegmentType; 3] {
        use SegmentType::*;
        match self {
            PathType::LSL => [L, S, L],
            PathType::LSR => [L, S, R],
            PathType::RSL => [R, S, L],
            PathType::RSR => [R, S, R],
            PathType::RLR => [R, L, R],
            PathType::LRL => [L, R, L],
        }
    }
}

/// Values shared by every word, in the frame normalised by the turning radius
#[derive(Debug, Clone, Copy)]
struct Intermediate {
    alpha: f64,
    beta: f64,
    d: f64,
    sa: f64,
    sb: f64,
    ca: f64,
    cb: f64,
    c_ab: f64,
    d_sq: f64,
}

impl Intermediate {
    fn new(from: &Pose2D, to: &Pose2D, radius: f64) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let d = dx.hypot(dy) / radius;
        let theta = mod2pi(dy.atan2(dx));
        let alpha = mod2pi(from.yaw - theta);
        let beta = mod2pi(to.yaw - theta);

        Intermediate {
            alpha,
            beta,
            d,
            sa: alpha.sin(),
            sb: beta.sin(),
            ca: alpha.cos(),
            cb: beta.cos(),
            c_ab: (alpha - beta).cos(),
            d_sq: d * d,
        }
    }

    /// Normalised segment lengths for one word, if that word is feasible
    fn word(&self, path_type: PathType) -> Option<[f64; 3]> {
        match path_type {
            PathType::LSL => self.lsl(),
            PathType::LSR => self.lsr(),
            PathType::RSL => self.rsl(),
            PathType::RSR => self.rsr(),
            PathType::RLR => self.rlr(),
            PathType::LRL => self.lrl(),
        }
    }

    fn lsl(&self) -> Option<[f64; 3]> {
        let p_sq = 2.0 + self.d_sq - 2.0 * self.c_ab + 2.0 * self.d * (self.sa - self.sb);
        if p_sq < 0.0 {
            return None;
        }
        let tmp = (self.cb - self.ca).atan2(self.d + self.sa - self.sb);
        Some([mod2pi(tmp - self.alpha), p_sq.sqrt(), mod2pi(self.beta - tmp)])
    }

    fn rsr(&self) -> Option<[f64; 3]> {
        let p_sq = 2.0 + self.d_sq - 2.0 * self.c_ab + 2.0 * self.d * (self.sb - self.sa);
        if p_sq < 0.0 {
            return None;
        }
        let tmp = (self.ca - self.cb).atan2(self.d - self.sa + self.sb);
        Some([mod2pi(self.alpha - tmp), p_sq.sqrt(), mod2pi(tmp - self.beta)])
    }

    fn lsr(&self) -> Option<[f64; 3]> {
        let p_sq = -2.0 + self.d_sq + 2.0 * self.c_ab + 2.0 * self.d * (self.sa + self.sb);
        if p_sq < 0.0 {
            return None;
        }
        let p = p_sq.sqrt();
        let tmp = (-self.ca - self.cb).atan2(self.d + self.sa + self.sb) - (-2.0_f64).atan2(p);
        Some([mod2pi(tmp - self.alpha), p, mod2pi(tmp - self.beta)])
    }

    fn rsl(&self) -> Option<[f64; 3]> {
        let p_sq = -2.0 + self.d_sq + 2.0 * self.c_ab - 2.0 * self.d * (self.sa + self.sb);
        if p_sq < 0.0 {
            return None;
        }
        let p = p_sq.sqrt();
        let tmp = (self.ca + self.cb).atan2(self.d - self.sa - self.sb) - 2.0_f64.atan2(p);
        Some([mod2pi(self.alpha - tmp), p, mod2pi(self.beta - tmp)])
    }

    fn rlr(&self) -> Option<[f64; 3]> {
        let tmp = (6.0 - self.d_sq + 2.0 * self.c_ab + 2.0 * self.d * (self.sa - self.sb)) / 8.0;
        if tmp.abs() > 1.0 {
            return None;
        }
        let p = mod2pi(2.0 * std::f64::consts::PI - tmp.acos());
        let phi = (self.ca - self.cb).atan2(self.d - self.sa + self.sb);
        let t = mod2pi(self.alpha - phi + mod2pi(p / 2.0));
        Some([t, p, mod2pi(self.alpha - self.beta - t + p)])
    }

    fn lrl(&self) -> Option<[f64; 3]> {
        let tmp = (6.0 - self.d_sq + 2.0 * self.c_ab + 2.0 * self.d * (self.sb - self.sa)) / 8.0;
        if tmp.abs() > 1.0 {
            return None;
        }
        let p = mod2pi(2.0 * std::f64::consts::PI - tmp.acos());
        let phi = (self.ca - self.cb).atan2(self.d + self.sa - self.sb);
        let t = mod2pi(-self.alpha - phi + p / 2.0);
        Some([t, p, mod2pi(self.beta - self.alpha - t + p)])
    }
}

/// Advance along one segment in the normalised frame. `q` is (x, y, yaw).
fn segment(t: f64, q: (f64, f64, f64), segment_type: SegmentType) -> (f64, f64, f64) {
    let (x, y, yaw) = q;
    match segment_type {
        SegmentType::L => (
            x + (yaw + t).sin() - yaw.sin(),
            y - (yaw + t).cos() + yaw.cos(),
            yaw + t,
        ),
        SegmentType::R => (
            x - (yaw - t).sin() + yaw.sin(),
            y + (yaw - t).cos() - yaw.cos(),
            yaw - t,
        ),
        SegmentType::S => (x + yaw.cos() * t, y + yaw.sin() * t, yaw),
    }
}

/// A solved Dubins path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DubinsPath {
    pub start: Pose2D,
    /// Turning radius, `1 / curvature`
    pub radius: f64,
    /// Segment lengths normalised by the turning radius
    pub params: [f64; 3],
    pub path_type: PathType,
}

impl DubinsPath {
    /// Shortest of the six words connecting `from` to `to`
    pub fn shortest(from: &Pose2D, to: &Pose2D, max_curvature: f64) -> Result<Self, SteeringError> {
        if !(max_curvature.is_finite() && max_curvature > 0.0) {
            return Err(SteeringError::InvalidCurvature(max_curvature));
        }
        if !from.is_finite() || !to.is_finite() {
            return Err(SteeringError::NonFinitePose);
        }

        let radius = 1.0 / max_curvature;
        let intermediate = Intermediate::new(from, to, radius);

        PathType::ALL
            .iter()
            .filter_map(|&path_type| intermediate.word(path_type).map(|params| (path_type, params)))
            .min_by_key(|(_, params)| OrderedFloat(params.iter().sum::<f64>()))
            .map(|(path_type, params)| DubinsPath {
                start: *from,
                radius,
                params,
                path_type,
            })
            .ok_or(SteeringError::NoPath)
    }

    /// Arc length of the whole path
    pub fn length(&self) -> f64 {
        self.params.iter().sum::<f64>() * self.radius
    }

    /// Pose after travelling `distance` along the path (clamped to the path).
    pub fn sample(&self, distance: f64) -> Pose2D {
        let t = distance.clamp(0.0, self.length()) / self.radius;
        let types = self.path_type.segments();
        let q0 = (0.0, 0.0, self.start.yaw);

        let q = if t < self.params[0] {
            segment(t, q0, types[0])
        } else {
            let q1 = segment(self.params[0], q0, types[0]);
            if t < self.params[0] + self.params[1] {
                segment(t - self.params[0], q1, types[1])
            } else {
                let q2 = segment(self.params[1], q1, types[1]);
                segment(t - self.params[0] - self.params[1], q2, types[2])
            }
        };

        Pose2D::new(
            q.0 * self.radius + self.start.x,
            q.1 * self.radius + self.start.y,
            q.2,
        )
    }

    /// Samples every `step_size` of arc length; the endpoint is always included.
    /// Steps below `MIN_STEP_SIZE` are clamped.
    pub fn sample_many(&self, step_size: f64) -> Vec<Pose2D> {
        let length = self.length();
        let mut samples = Vec::new();

        if step_size.is_finite() && step_size > 0.0 {
            let step = step_size.max(MIN_STEP_SIZE);
            let count = (length / step).ceil() as usize;
            samples.reserve(count + 1);
            for k in 0..count {
                samples.push(self.sample(k as f64 * step));
            }
        } else {
            samples.push(self.start);
        }
        samples.push(self.sample(length));
        samples
    }
}

/// Dubins steering oracle sampling its paths every `step_size` metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DubinsSteering {
    pub step_size: f64,
}

impl DubinsSteering {
    pub fn new(step_size: f64) -> Self {
        Self { step_size }
    }
}

impl Default for DubinsSteering {
    fn default() -> Self {
        Self { step_size: 0.1 }
    }
}

impl SteeringOracle for DubinsSteering {
    fn steer(&self, from: &Pose2D, to: &Pose2D, max_curvature: f64)
        -> Result<SteeredPath, SteeringError> {
        let path = DubinsPath::shortest(from, to, max_curvature)?;

        // The full-loop solution is never wanted for a pose onto itself
        if from.xy_distance(to) < COINCIDENT_EPS && angle_diff(from.yaw, to.yaw).abs() < COINCIDENT_EPS {
            return Ok(SteeredPath::new(vec![*from, *to], 0.0));
        }

        Ok(SteeredPath::new(path.sample_many(self.step_size), path.length()))
    }
}
