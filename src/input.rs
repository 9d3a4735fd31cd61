/*
 * Input Module
 *
 * Keyboard and raw window events. Escape, Q and Space quit; everything else
 * goes to egui so the sliders and buttons work.
 */

use log::info;
use nannou::prelude::*;

use crate::app::Model;

/// Keys that end the run.
pub fn is_quit_key(key: Key) -> bool {
    matches!(key, Key::Escape | Key::Q | Key::Space)
}

// Key pressed event handler
pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    if is_quit_key(key) {
        info!(
            "Quit requested after {} frames with {} boids",
            model.world.frames(),
            model.world.len()
        );
        app.quit();
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
