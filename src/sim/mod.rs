use crate::boid::Boid;
use crate::config::FlockConfig;

pub trait BoidSim {
    fn step(&mut self, dt: f32);
    fn boids(&self) -> &[Boid];
}

/// A pluggable neighbor query that can be swapped without touching boid update logic.
pub trait NeighborSearch: Send + Sync {
    /// Rebuild internal structures based on the current boid positions.
    fn rebuild(&mut self, boids: &[Boid]);

    /// Indices of boids that may lie within vision range of `index`, never
    /// `index` itself. Callers still filter by distance.
    fn neighbors(&self, boids: &[Boid], config: &FlockConfig, index: usize) -> Vec<usize>;

    /// Human-readable name for display/debugging.
    fn name(&self) -> &'static str;
}

mod boundary;
mod brute_force;
mod clock;
mod engine;
mod grid;
mod rules;
pub mod vector;

pub use brute_force::BruteForceNeighborSearch;
pub use clock::FrameClock;
pub use engine::Sim;
pub use grid::UniformGrid;
