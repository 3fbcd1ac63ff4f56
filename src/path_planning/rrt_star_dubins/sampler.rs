//! Goal-biased pose sampling with an increasing bias schedule

use std::f64::consts::PI;

use rand::Rng;

use crate::common::{AreaBounds, Pose2D};

#[derive(Debug, Clone)]
pub struct GoalBiasedSampler {
    region: AreaBounds,
    goal: Pose2D,
    initial_bias: u32,
    increment: u32,
    interval: usize,
}

impl GoalBiasedSampler {
    pub fn new(region: AreaBounds, goal: Pose2D, initial_bias: u32, increment: u32, interval: usize) -> Self {
        Self {
            region,
            goal,
            initial_bias,
            increment,
            interval: interval.max(1),
        }
    }

    /// Goal sampling rate in percent at `iteration`, capped at 100
    pub fn bias_at(&self, iteration: usize) -> u32 {
        let steps = (iteration / self.interval) as u64;
        let bias = self.initial_bias as u64 + self.increment as u64 * steps;
        bias.min(100) as u32
    }

    /// The exact goal with probability `bias_at(iteration) / 100`, otherwise a
    /// uniform pose in the region with a uniform heading.
    pub fn sample<R: Rng + ?Sized>(&self, iteration: usize, rng: &mut R) -> Pose2D {
        if rng.gen_range(0..100) < self.bias_at(iteration) {
            self.goal
        } else {
            Pose2D::new(
                rng.gen_range(self.region.xmin..=self.region.xmax),
                rng.gen_range(self.region.ymin..=self.region.ymax),
                rng.gen_range(-PI..=PI),
            )
        }
    }
}
