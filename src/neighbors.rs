/*
 * Neighbor Query Module
 *
 * Neighbor lookups for the force pass. Every implementation must return the
 * same set: all other agents whose Euclidean distance is strictly below the
 * neighbor radius, in ascending index order. BruteForce is the reference
 * pairwise scan; SpatialGrid is the indexed version used by default.
 */

use glam::Vec3;

/// Common behaviour exposed by neighborhood indices.
pub trait NeighborQuery: Sync {
    /// Radius this index answers queries for.
    fn radius(&self) -> f32;

    /// Rebuild internal structures from the positions of the current tick.
    fn rebuild(&mut self, positions: &[Vec3]);

    /// Write the neighbors of `index` into `out`, replacing its contents.
    fn neighbors_of(&self, index: usize, positions: &[Vec3], out: &mut Vec<usize>);

    fn neighbors(&self, index: usize, positions: &[Vec3]) -> Vec<usize> {
        let mut out = Vec::new();
        self.neighbors_of(index, positions, &mut out);
        out
    }
}

#[inline]
pub fn within_radius(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance(b) < radius
}

/// Exhaustive O(n²) scan.
#[derive(Debug, Clone, Copy)]
pub struct BruteForce {
    radius: f32,
}

impl BruteForce {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl NeighborQuery for BruteForce {
    fn radius(&self) -> f32 {
        self.radius
    }

    fn rebuild(&mut self, _positions: &[Vec3]) {}

    fn neighbors_of(&self, index: usize, positions: &[Vec3], out: &mut Vec<usize>) {
        out.clear();
        let origin = positions[index];
        out.extend(
            positions
                .iter()
                .enumerate()
                .filter(|&(j, &other)| j != index && within_radius(origin, other, self.radius))
                .map(|(j, _)| j),
        );
    }
}
