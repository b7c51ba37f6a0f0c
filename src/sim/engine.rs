use macroquad::prelude::Vec2;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::{info, trace};

use super::boundary::keep_within_bounds;
use super::rules::{limit_speed, next_velocity, random_jitter};
use super::{BoidSim, BruteForceNeighborSearch, FrameClock, NeighborSearch, UniformGrid};
use crate::boid::Boid;
use crate::config::{FlockConfig, NeighborSearchKind};
use crate::flock::Flock;

pub struct Sim {
    flock: Flock,
    neighbors: Box<dyn NeighborSearch>,
    rng: StdRng,
    clock: FrameClock,
    steps: u64,
}

impl Sim {
    pub fn new(flock: Flock, neighbors: Box<dyn NeighborSearch>, rng: StdRng) -> Self {
        let clock = FrameClock::new(flock.config.default_fps, flock.config.initial_fps);
        Self {
            flock,
            neighbors,
            rng,
            clock,
            steps: 0,
        }
    }

    /// Random flock and neighbor search as described by `config`.
    pub fn from_config(config: FlockConfig, mut rng: StdRng) -> Self {
        let flock = Flock::new_random_with_rng(config, &mut rng);
        let neighbors: Box<dyn NeighborSearch> = match config.neighbor_search {
            NeighborSearchKind::Grid => Box::new(UniformGrid::for_config(&config)),
            NeighborSearchKind::BruteForce => Box::new(BruteForceNeighborSearch),
        };
        info!(
            boids = flock.boids.len(),
            search = neighbors.name(),
            width = config.width,
            height = config.height,
            "created simulation"
        );
        Self::new(flock, neighbors, rng)
    }

    #[cfg(test)]
    /// Convenience helper for the brute-force neighbor search.
    pub fn with_brute_force(flock: Flock, rng: StdRng) -> Self {
        Self::new(flock, Box::new(BruteForceNeighborSearch), rng)
    }

    pub fn algo_name(&self) -> &'static str {
        self.neighbors.name()
    }

    pub fn config(&self) -> &FlockConfig {
        &self.flock.config
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Steps using a `dt` derived from the measured frame time. Returns the `dt` used.
    pub fn advance(&mut self, elapsed: f32) -> f32 {
        let dt = self.clock.tick(elapsed);
        self.step(dt);
        dt
    }

    /// Throws away every boid and scatters a fresh flock of `count`, with
    /// the first `scout_a` and the last `scout_b` turned into scouts.
    pub fn reset(&mut self, count: usize, scout_a: usize, scout_b: usize) {
        self.flock.respawn(count, scout_a, scout_b, &mut self.rng);
        self.clock.reset();
        self.steps = 0;
        info!(count, scout_a, scout_b, "reset flock");
    }

    /// Reset with the configured counts.
    pub fn reset_default(&mut self) {
        let config = self.flock.config;
        self.reset(config.boid_count, config.scout_a_count, config.scout_b_count);
    }
}

impl BoidSim for Sim {
    fn step(&mut self, dt: f32) {
        let n = self.flock.boids.len();
        if n == 0 {
            return;
        }
        let config = &self.flock.config;
        let bounds = self.flock.bounds();

        // Drawn up front, in boid order, so the parallel pass needs no RNG.
        let jitters: Vec<Vec2> = (0..n)
            .map(|_| random_jitter(&mut self.rng, config.randomness))
            .collect();

        self.neighbors.rebuild(&self.flock.boids);

        // Every new velocity is computed from the same snapshot before any
        // boid is written.
        let velocities: Vec<Vec2> = {
            let snapshot = &self.flock.boids;
            let neighbors = &self.neighbors;
            snapshot
                .par_iter()
                .enumerate()
                .map(|(i, me)| {
                    let candidates = neighbors.neighbors(snapshot, config, i);
                    next_velocity(
                        me,
                        candidates.iter().map(|&j| &snapshot[j]),
                        config,
                        jitters[i],
                    )
                })
                .collect()
        };

        for (boid, vel) in self.flock.boids.iter_mut().zip(velocities) {
            boid.vel = vel;
            boid.pos += boid.vel * dt;
            keep_within_bounds(boid, &bounds, config);
            // The edge nudge can leave the speed slightly out of range.
            boid.vel = limit_speed(boid.vel, config.min_speed, config.max_speed);
        }

        self.steps += 1;
        trace!(step = self.steps, dt, boids = n, "stepped flock");
    }

    fn boids(&self) -> &[Boid] {
        &self.flock.boids
    }
}
