/*
 * Debug Information Module
 *
 * Frame metrics gathered by the driver and shown in the UI:
 * - FPS and frame time as reported by nannou
 * - Time spent stepping the flock
 * - How many grid cells are occupied
 */

use std::time::Duration;

use crate::world::SimulationWorld;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub step_time: Duration,
    pub boid_count: usize,
    pub occupied_cells: usize,
}

impl DebugInfo {
    pub fn record_frame(&mut self, fps: f32, since_last: Duration) {
        self.fps = fps;
        self.frame_time = since_last;
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.frame_time.as_secs_f64() * 1000.0
    }

    // Refresh the flock-side numbers after a step
    pub fn record_step(&mut self, world: &SimulationWorld, step_time: Duration) {
        self.step_time = step_time;
        self.boid_count = world.len();
        self.occupied_cells = world.grid().occupied_cells();
    }

    /// Mean boids per occupied cell, the `k` in the O(N·k) frame cost.
    pub fn mean_cell_occupancy(&self) -> f32 {
        if self.occupied_cells == 0 {
            0.0
        } else {
            self.boid_count as f32 / self.occupied_cells as f32
        }
    }
}
