use crate::boid::Boid;
use crate::config::FlockConfig;
use super::NeighborSearch;

/// Scans every boid. Quadratic per step, kept as the reference the grid is
/// checked against and as a fallback selectable from config.
pub struct BruteForceNeighborSearch;

impl NeighborSearch for BruteForceNeighborSearch {
    fn rebuild(&mut self, _boids: &[Boid]) {
        // Nothing to rebuild for brute force.
    }

    fn neighbors(&self, boids: &[Boid], config: &FlockConfig, index: usize) -> Vec<usize> {
        let pos_i = boids[index].pos;

        boids
            .iter()
            .enumerate()
            .filter(|&(j, other)| j != index && other.pos.distance(pos_i) < config.vision_radius)
            .map(|(j, _)| j)
            .collect()
    }

    fn name(&self) -> &'static str {
        "BruteForce"
    }
}
