/*
 * World Module
 *
 * SimulationWorld owns the flock, the spatial grid and the random source.
 * Boids live in a contiguous arena and the grid refers to them by index only,
 * so nothing holds a reference back into the world.
 *
 * One call to `step` advances every boid exactly once, in index order. Boids
 * updated later in a frame see the already-updated state of earlier ones.
 */

use log::{debug, info};
use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::boid::{Boid, BoidKind, Pose, Steering};
use crate::params::{SteeringConstants, TuningParams};
use crate::spatial_grid::SpatialGrid;

/// Frame rate at which `heading_jitter` is the literal per-frame nudge.
pub const JITTER_REFERENCE_FPS: f32 = 60.0;

/// Size of the visible area. The plane spans `[0, width] x [0, height]`
/// with y growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Map a plane position to nannou's centered, y-up window coordinates.
    #[inline]
    pub fn to_screen(&self, position: Vec2) -> Vec2 {
        vec2(position.x - self.width / 2.0, self.height / 2.0 - position.y)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SpawnOptions {
    pub constants: SteeringConstants,
    pub kind: BoidKind,
    /// Fixed seed for reproducible runs; entropy otherwise.
    pub seed: Option<u64>,
}

pub struct SimulationWorld {
    boids: Vec<Boid>,
    grid: SpatialGrid,
    bounds: WorldBounds,
    constants: SteeringConstants,
    rng: StdRng,
    frames: u64,
}

impl SimulationWorld {
    pub fn spawn(count: usize, bounds: WorldBounds) -> Self {
        Self::spawn_with(count, bounds, SpawnOptions::default())
    }

    pub fn spawn_with(count: usize, bounds: WorldBounds, options: SpawnOptions) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let margin = options.constants.spawn_margin;
        let boids = (0..count)
            .map(|_| Boid::random(&mut rng, bounds, margin, options.kind))
            .collect();

        let world = Self::assemble(boids, bounds, options.constants, rng);
        info!(
            "Spawned {} {:?} boids in {:.0}x{:.0} ({} occupied cells of size {})",
            world.len(),
            options.kind,
            bounds.width,
            bounds.height,
            world.grid.occupied_cells(),
            world.grid.cell_size()
        );
        world
    }

    /// Build a world around hand-placed boids.
    pub fn from_boids(boids: Vec<Boid>, bounds: WorldBounds, constants: SteeringConstants) -> Self {
        Self::assemble(boids, bounds, constants, StdRng::seed_from_u64(0))
    }

    fn assemble(mut boids: Vec<Boid>, bounds: WorldBounds, constants: SteeringConstants, rng: StdRng) -> Self {
        let mut grid = SpatialGrid::new(constants.cell_size);
        for (i, boid) in boids.iter_mut().enumerate() {
            boid.cell = grid.cell_of(boid.position);
            grid.add(i, boid.cell);
        }
        Self {
            boids,
            grid,
            bounds,
            constants,
            rng,
            frames: 0,
        }
    }

    // Advance every boid one frame
    pub fn step(&mut self, dt: f32, tuning: &TuningParams) {
        for i in 0..self.boids.len() {
            self.update_boid(i, dt, tuning);
        }
        self.frames += 1;
    }

    /// Run the full steering rule for a single boid.
    pub fn update_boid(&mut self, index: usize, dt: f32, tuning: &TuningParams) -> Steering {
        let jitter = self.constants.heading_jitter;
        if jitter > 0.0 {
            // sqrt scaling keeps the heading spread per second independent of dt
            let scale = (dt.max(0.0) * JITTER_REFERENCE_FPS).sqrt();
            let nudge = self.rng.gen_range(-jitter..=jitter) * scale;
            self.boids[index].heading += nudge;
        }

        self.relocate(index);
        let steering = self.boids[index].steer(index, &self.boids, &self.grid, tuning, &self.constants, self.bounds);
        self.boids[index].apply(&steering, dt, tuning, &self.constants, self.bounds);
        // Keep the registration current for boids updated after this one
        self.relocate(index);
        steering
    }

    // Move a boid's grid registration if it has crossed into another cell
    fn relocate(&mut self, index: usize) {
        let boid = &mut self.boids[index];
        let cell = self.grid.cell_of(boid.position);
        if cell != boid.cell {
            self.grid.remove(index, boid.cell);
            self.grid.add(index, cell);
            boid.cell = cell;
        }
    }

    pub fn nearest_neighbors(&self, index: usize) -> Vec<usize> {
        self.boids[index].nearest_neighbors(index, &self.boids, &self.grid, self.constants.max_neighbors)
    }

    pub fn poses(&self) -> impl Iterator<Item = Pose> + '_ {
        self.boids.iter().map(Boid::pose)
    }

    pub fn set_bounds(&mut self, bounds: WorldBounds) {
        if bounds != self.bounds {
            debug!("World resized to {:.0}x{:.0}", bounds.width, bounds.height);
            self.bounds = bounds;
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn constants(&self) -> &SteeringConstants {
        &self.constants
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
