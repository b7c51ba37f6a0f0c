use macroquad::prelude::Vec2;

use super::NeighborSearch;
use crate::boid::Boid;
use crate::config::FlockConfig;

/// Offsets of the 3x3 block around a cell, centre first.
const NEIGHBORHOOD: [(isize, isize); 9] = [
    (0, 0),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];

/// Uniform bucket grid over the arena.
///
/// Cell size equals the vision radius, so any two boids closer than that sit
/// in the same or adjacent cells. Rows index x and columns index y, shifted by
/// one so that a slightly negative coordinate still lands in a real bucket;
/// that is what the two extra rows and columns are for. Neighborhood lookups
/// wrap around the grid edges, which only ever reaches the always-empty margin
/// cells for boids inside the arena.
pub struct UniformGrid {
    cell_size: f32,
    rows: usize,
    cols: usize,
    buckets: Vec<Vec<usize>>,
}

impl UniformGrid {
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let rows = (width / cell_size).ceil() as usize + 2;
        let cols = (height / cell_size).ceil() as usize + 2;
        Self {
            cell_size,
            rows,
            cols,
            buckets: vec![Vec::new(); rows * cols],
        }
    }

    pub fn for_config(config: &FlockConfig) -> Self {
        Self::new(config.width, config.height, config.vision_radius)
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Empties every bucket, keeping their allocations.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    #[inline]
    pub fn cell_of(&self, pos: Vec2) -> (usize, usize) {
        let row = (pos.x / self.cell_size).floor() as isize + 1;
        let col = (pos.y / self.cell_size).floor() as isize + 1;
        (
            row.clamp(0, self.rows as isize - 1) as usize,
            col.clamp(0, self.cols as isize - 1) as usize,
        )
    }

    pub fn insert(&mut self, index: usize, pos: Vec2) {
        let (row, col) = self.cell_of(pos);
        let slot = self.slot(row, col);
        self.buckets[slot].push(index);
    }

    pub fn bucket(&self, row: usize, col: usize) -> &[usize] {
        &self.buckets[self.slot(row, col)]
    }

    /// Contents of the 3x3 block of buckets centred on `(row, col)`, with
    /// toroidal wraparound at the grid edges.
    pub fn neighbors_of(&self, row: usize, col: usize) -> Vec<usize> {
        let mut out = Vec::new();
        for (dr, dc) in NEIGHBORHOOD {
            let r = wrap(row, dr, self.rows);
            let c = wrap(col, dc, self.cols);
            out.extend_from_slice(self.bucket(r, c));
        }
        out
    }

    #[inline]
    fn slot(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

/// `index + delta` modulo `len`, always in `0..len`.
#[inline]
pub fn wrap(index: usize, delta: isize, len: usize) -> usize {
    (index as isize + delta).rem_euclid(len as isize) as usize
}

impl NeighborSearch for UniformGrid {
    fn rebuild(&mut self, boids: &[Boid]) {
        self.clear();
        for (i, boid) in boids.iter().enumerate() {
            self.insert(i, boid.pos);
        }
    }

    fn neighbors(&self, boids: &[Boid], _config: &FlockConfig, index: usize) -> Vec<usize> {
        let (row, col) = self.cell_of(boids[index].pos);
        let mut candidates = self.neighbors_of(row, col);
        candidates.retain(|&j| j != index);
        candidates
    }

    fn name(&self) -> &'static str {
        "UniformGrid"
    }
}
