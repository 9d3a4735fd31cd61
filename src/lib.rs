/*
 * Boid Swarm - Module Definitions
 *
 * This file defines the module structure for the flocking simulation.
 * The simulation core (grid, heading math, boids, world) never touches the
 * window or event loop; the driver modules wire it into nannou and egui.
 */

// Re-export key components for easier access
pub use boid::{Boid, BoidKind, Pose, Steering};
pub use config::SimConfig;
pub use error::ConfigError;
pub use params::{ControlState, SteeringConstants, TuningParams};
pub use spatial_grid::{CellKey, SpatialGrid};
pub use world::{SimulationWorld, SpawnOptions, WorldBounds};

// Simulation core
pub mod boid;
pub mod heading;
pub mod params;
pub mod spatial_grid;
pub mod world;

// Ambient
pub mod config;
pub mod debug;
pub mod error;

// Driver
pub mod app;
pub mod input;
pub mod renderer;
pub mod ui;
