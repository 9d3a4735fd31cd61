/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor lookups.
 * The plane is divided into square cells and each occupied cell keeps the
 * indices of the boids currently inside it, so a neighbor query only has to
 * look at the 3x3 block of cells around a boid instead of the whole flock.
 *
 * The grid is sparse:
 * - Cells are created lazily on first insert and pruned once empty
 * - Coordinates are unbounded, so boids slightly outside the window still map
 *   to a valid cell
 * - Only arena indices are stored, never the boids themselves
 */

use nannou::prelude::*;
use std::collections::HashMap;

/// Integer coordinate of a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
}

impl CellKey {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    // None past the edge of the i32 range, so no cell is visited twice
    #[inline]
    fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }
}

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    // Convert plane coordinates to the cell containing them
    #[inline]
    pub fn cell_of(&self, position: Vec2) -> CellKey {
        CellKey::new(
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// Register `index` under `key`. Inserting an index twice into the same
    /// cell is a caller bug and is not checked.
    pub fn add(&mut self, index: usize, key: CellKey) {
        self.cells.entry(key).or_default().push(index);
    }

    /// Unregister `index` from `key`. Missing cells or entries are ignored.
    pub fn remove(&mut self, index: usize, key: CellKey) {
        let Some(bucket) = self.cells.get_mut(&key) else {
            return;
        };
        if let Some(slot) = bucket.iter().position(|&i| i == index) {
            bucket.swap_remove(slot);
        }
        if bucket.is_empty() {
            self.cells.remove(&key);
        }
    }

    /// Every index registered in the 3x3 block around `key`, minus `index`.
    ///
    /// Order follows bucket layout and carries no meaning. A `key` with no
    /// bucket of its own yields nothing.
    pub fn neighbors_of(&self, index: usize, key: CellKey) -> Vec<usize> {
        if !self.cells.contains_key(&key) {
            return Vec::new();
        }

        let mut result = Vec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if let Some(bucket) = key.offset(dx, dy).and_then(|cell| self.cells.get(&cell)) {
                    result.extend(bucket.iter().copied().filter(|&i| i != index));
                }
            }
        }
        result
    }

    /// Indices stored in a single cell.
    pub fn cell(&self, key: CellKey) -> &[usize] {
        self.cells.get(&key).map_or(&[], Vec::as_slice)
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellKey, &[usize])> {
        self.cells.iter().map(|(key, bucket)| (*key, bucket.as_slice()))
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Total registrations across all cells.
    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
