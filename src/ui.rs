/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. Four sliders and two toggles drive the flock's tuning;
 * change detection is handled by the ControlState struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::ControlState;

// Update the UI and return whether any control changed this frame
pub fn update_ui(egui: &mut Egui, controls: &mut ControlState, debug_info: &DebugInfo) -> bool {
    controls.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Flock Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.add(egui::Slider::new(&mut controls.cohesion, ControlState::factor_range()).text("Coherence Factor"));
            ui.add(egui::Slider::new(&mut controls.avoidance, ControlState::factor_range()).text("Avoidance Factor"));
            ui.add(egui::Slider::new(&mut controls.adherence, ControlState::factor_range()).text("Adherence Factor"));
            ui.add(egui::Slider::new(&mut controls.speed_bonus, ControlState::speed_range()).text("Speed"));

            ui.horizontal(|ui| {
                if ui.button("Wrap Around").clicked() {
                    controls.wrap = !controls.wrap;
                }
                ui.label(if controls.wrap { "wrapping" } else { "bouncing" });
            });

            if ui.button("Show FPS").clicked() {
                controls.show_fps = !controls.show_fps;
            }

            ui.collapsing("Grid Stats", |ui| {
                ui.label(format!("Boids: {}", debug_info.boid_count));
                ui.label(format!("Occupied cells: {}", debug_info.occupied_cells));
                ui.label(format!("Boids per cell: {:.1}", debug_info.mean_cell_occupancy()));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time_ms()));
                ui.label(format!("Step time: {:.2} ms", debug_info.step_time.as_secs_f64() * 1000.0));
            });
        });

    controls.detect_changes()
}

// Draw the frame rate in the top-left corner
pub fn draw_fps(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let text = format!("{}", debug_info.fps as u32);
    draw.text(&text)
        .x_y(window_rect.left() + 30.0, window_rect.top() - 16.0)
        .color(nannou::color::rgb(0.0, 0.78, 0.0))
        .font_size(24);
}
