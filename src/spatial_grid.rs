/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor lookups.
 * It divides the spherical world's bounding cube into cubic cells at least as
 * wide as the neighbor radius, so every neighbor of an agent lies in the 27
 * cells around its own.
 *
 * Points outside the cube are clamped into the border cells. Clamping never
 * moves two points more than one cell apart, so the 3x3x3 scan stays exact.
 */

use glam::Vec3;

use crate::neighbors::{within_radius, NeighborQuery};

// Cap on cells per axis to keep memory bounded for tiny radii
const MAX_CELLS_PER_AXIS: usize = 64;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    pub cell_size: f32,
    pub grid_size: usize,
    radius: f32,
    half_extent: f32,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(radius: f32, world_radius: f32) -> Self {
        let extent = world_radius * 2.0;
        let grid_size = ((extent / radius).ceil() as usize).clamp(1, MAX_CELLS_PER_AXIS);
        // Cells may end up wider than the radius when the axis count is capped
        let cell_size = (extent / grid_size as f32).max(radius);

        Self {
            cell_size,
            grid_size,
            radius,
            half_extent: world_radius,
            cells: vec![Vec::new(); grid_size * grid_size * grid_size],
        }
    }

    #[inline]
    fn axis_cell(&self, value: f32) -> isize {
        let cell = ((value + self.half_extent) / self.cell_size).floor() as isize;
        cell.clamp(0, self.grid_size as isize - 1)
    }

    #[inline]
    fn cell_coords(&self, position: Vec3) -> [isize; 3] {
        [
            self.axis_cell(position.x),
            self.axis_cell(position.y),
            self.axis_cell(position.z),
        ]
    }

    #[inline]
    fn cell_index(&self, [x, y, z]: [isize; 3]) -> usize {
        let n = self.grid_size;
        (z as usize * n + y as usize) * n + x as usize
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    #[inline]
    pub fn insert(&mut self, agent_index: usize, position: Vec3) {
        let cell = self.cell_index(self.cell_coords(position));
        self.cells[cell].push(agent_index);
    }

    // Get agent indices within and adjacent to the cell containing the given position
    pub fn nearby_indices(&self, position: Vec3, out: &mut Vec<usize>) {
        let [cx, cy, cz] = self.cell_coords(position);
        let last = self.grid_size as isize - 1;

        for z in (cz - 1).max(0)..=(cz + 1).min(last) {
            for y in (cy - 1).max(0)..=(cy + 1).min(last) {
                for x in (cx - 1).max(0)..=(cx + 1).min(last) {
                    out.extend_from_slice(&self.cells[self.cell_index([x, y, z])]);
                }
            }
        }
    }
}

impl NeighborQuery for SpatialGrid {
    fn radius(&self) -> f32 {
        self.radius
    }

    fn rebuild(&mut self, positions: &[Vec3]) {
        self.clear();
        for (i, &position) in positions.iter().enumerate() {
            self.insert(i, position);
        }
    }

    fn neighbors_of(&self, index: usize, positions: &[Vec3], out: &mut Vec<usize>) {
        out.clear();
        let origin = positions[index];
        self.nearby_indices(origin, out);
        out.retain(|&j| j != index && within_radius(origin, positions[j], self.radius));
        out.sort_unstable();
    }
}
