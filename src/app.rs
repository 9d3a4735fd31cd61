/*
 * Application Module
 *
 * This module defines the main application model and the per-frame update.
 * It is the only place where nannou's event loop meets the flock: each frame
 * it reads the controls, reports the window size, clamps the frame delta and
 * steps the world once.
 */

use anyhow::{anyhow, Result};
use log::{debug, info, trace};
use nannou::prelude::*;
use nannou_egui::Egui;
use std::sync::OnceLock;
use std::time::Instant;

use crate::config::SimConfig;
use crate::debug::DebugInfo;
use crate::input::{key_pressed, raw_window_event};
use crate::params::ControlState;
use crate::renderer::view;
use crate::ui;
use crate::world::{SimulationWorld, WorldBounds};

// nannou builds the model from a plain fn pointer, so startup config is parked here
static CONFIG: OnceLock<SimConfig> = OnceLock::new();

/// Hand the validated configuration to the model builder. Call once, before
/// starting the nannou app.
pub fn install_config(config: SimConfig) -> Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow!("configuration was already installed"))
}

// Main model for the application
pub struct Model {
    pub world: SimulationWorld,
    pub controls: ControlState,
    pub config: SimConfig,
    pub egui: Egui,
    pub debug_info: DebugInfo,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = CONFIG.get().cloned().unwrap_or_default();

    let builder = app
        .new_window()
        .title("Boid Swarm")
        .view(view)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event);
    let builder = if config.window.fullscreen {
        builder.fullscreen()
    } else {
        builder.size(config.window.width, config.window.height)
    };
    let window_id = builder.build().expect("failed to create the main window");

    let window = app.window(window_id).expect("main window vanished right after creation");
    let egui = Egui::from_window(&window);

    let rect = window.rect();
    let bounds = WorldBounds::new(rect.w(), rect.h());
    let world = SimulationWorld::spawn_with(config.flock.boid_count, bounds, config.spawn_options());
    let controls = ControlState::new(config.flock.wrap, config.window.show_fps);

    info!(
        "Window ready at {:.0}x{:.0}, wrap {}",
        bounds.width,
        bounds.height,
        if controls.wrap { "on" } else { "off" }
    );

    Model {
        world,
        controls,
        config,
        egui,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.record_frame(app.fps(), update.since_last);

    if ui::update_ui(&mut model.egui, &mut model.controls, &model.debug_info) {
        debug!("Controls changed: {:?}", model.controls.tuning(model.config.flock.base_speed));
    }

    // Boids always fly inside whatever the window currently is
    let rect = app.window_rect();
    model.world.set_bounds(WorldBounds::new(rect.w(), rect.h()));

    let dt = update.since_last.as_secs_f32().min(model.config.window.max_frame_dt);
    let tuning = model.controls.tuning(model.config.flock.base_speed);

    let start = Instant::now();
    model.world.step(dt, &tuning);
    let step_time = start.elapsed();
    model.debug_info.record_step(&model.world, step_time);

    trace!(
        "Frame {} | dt {:.4}s | step {:.3} ms | {} cells",
        model.world.frames(),
        dt,
        step_time.as_secs_f64() * 1000.0,
        model.debug_info.occupied_cells
    );
}
