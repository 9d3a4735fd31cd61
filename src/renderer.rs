/*
 * Renderer Module
 *
 * This module handles the rendering of the flock: background, one oriented
 * outline per boid, the optional FPS counter and finally the egui controls.
 */

use log::error;
use nannou::prelude::*;

use crate::app::Model;
use crate::ui;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    let [r, g, b] = model.config.window.background;
    draw.background().color(rgb(r, g, b));

    let bounds = model.world.bounds();
    for boid in model.world.boids() {
        boid.draw(&draw, bounds);
    }

    if model.controls.show_fps {
        ui::draw_fps(&draw, &model.debug_info, app.window_rect());
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        error!("Failed to render flock: {:?}", e);
    }

    if let Err(e) = model.egui.draw_to_frame(&frame) {
        error!("Failed to render controls: {:?}", e);
    }
}
