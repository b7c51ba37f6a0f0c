use macroquad::prelude::Vec2;
use rand::Rng;
use tracing::warn;

use crate::boid::{Boid, Role};
use crate::config::FlockConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub w: f32,
    pub h: f32,
}

impl WorldBounds {
    pub fn from_config(config: &FlockConfig) -> Self {
        Self {
            w: config.width,
            h: config.height,
        }
    }
}

pub struct Flock {
    pub boids: Vec<Boid>,
    pub config: FlockConfig,
}

impl Flock {
    /// Flock with the configured boid and scout counts.
    pub fn new_random_with_rng(config: FlockConfig, rng: &mut impl Rng) -> Self {
        let boids = spawn_boids(
            config.boid_count,
            config.scout_a_count,
            config.scout_b_count,
            &config,
            rng,
        );
        Self { boids, config }
    }

    /// Arena bounds, always derived from the config.
    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::from_config(&self.config)
    }

    /// Replaces every boid in one go.
    pub fn respawn(&mut self, count: usize, scout_a: usize, scout_b: usize, rng: &mut impl Rng) {
        self.boids = spawn_boids(count, scout_a, scout_b, &self.config, rng);
    }
}

/// Uniformly scattered boids with random headings. The first `scout_a` in
/// creation order become `ScoutA`, the last `scout_b` become `ScoutB`; where
/// the two ranges overlap the later `ScoutB` pass wins.
pub fn spawn_boids(
    count: usize,
    scout_a: usize,
    scout_b: usize,
    config: &FlockConfig,
    rng: &mut impl Rng,
) -> Vec<Boid> {
    let mut boids = Vec::with_capacity(count);

    for _ in 0..count {
        let x = rng.random_range(0.0..config.width);
        let y = rng.random_range(0.0..config.height);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(config.min_speed..=config.max_speed);
        let dir = Vec2::from_angle(angle);

        boids.push(Boid::new(Vec2::new(x, y), dir * speed, config.bias_weight));
    }

    if scout_a + scout_b > count {
        warn!(
            count,
            scout_a,
            scout_b,
            "scout ranges overlap; overlapping boids become ScoutB"
        );
    }

    for boid in boids.iter_mut().take(scout_a) {
        boid.role = Role::ScoutA;
    }
    for boid in boids.iter_mut().rev().take(scout_b) {
        boid.role = Role::ScoutB;
    }

    boids
}
