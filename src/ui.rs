/*
 * UI Module
 *
 * This module contains the control panel built with nannou_egui. The panel
 * edits a copy of the simulation parameters; the app applies the copy after
 * the frame and reverts it if validation fails.
 */

use nannou::prelude::*;
use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;

/// Viewer-only switches that do not affect the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub show_debug: bool,
    pub pause_simulation: bool,
    pub auto_orbit: bool,
    pub show_headings: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            show_debug: false,
            pause_simulation: false,
            auto_orbit: true,
            show_headings: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiActions {
    pub reset_world: bool,
    pub params_edited: bool,
}

// Update the UI and report what the app has to do afterwards
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    settings: &mut ViewSettings,
    debug_info: &DebugInfo,
) -> UiActions {
    let mut reset_world = false;
    let previous = params.clone();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("World", |ui| {
                ui.add(egui::Slider::new(&mut params.anchor_count, SimulationParams::get_anchor_count_range()).text("Anchors"));
                ui.add(egui::Slider::new(&mut params.world_radius, SimulationParams::get_world_radius_range()).text("World Radius"));
                ui.add(egui::Slider::new(&mut params.max_speed, SimulationParams::get_max_speed_range()).text("Max Speed"));

                if ui.button("Reset World").clicked() {
                    reset_world = true;
                }
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.neighbor_radius, SimulationParams::get_radius_range()).text("Neighbor Radius"));
                ui.add(egui::Slider::new(&mut params.alignment_weight, SimulationParams::get_weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut params.cohesion_weight, SimulationParams::get_weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut params.separation_weight, SimulationParams::get_weight_range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut params.seek_weight, SimulationParams::get_weight_range()).text("Seek Weight"));
            });

            ui.collapsing("Generations", |ui| {
                ui.add(egui::Slider::new(&mut params.group_size_range.start, 1..=5000).text("Min Group Size"));
                ui.add(egui::Slider::new(&mut params.group_size_range.end, 2..=5000).text("Max Group Size"));
                ui.add(egui::Slider::new(&mut params.offspring_lifespan_range.start, 0.5..=60.0).text("Min Lifespan"));
                ui.add(egui::Slider::new(&mut params.offspring_lifespan_range.end, 1.0..=120.0).text("Max Lifespan"));
                ui.add(egui::Slider::new(&mut params.young_hue, SimulationParams::get_hue_range()).text("Young Hue"));
                ui.add(egui::Slider::new(&mut params.old_hue, SimulationParams::get_hue_range()).text("Old Hue"));
            });

            ui.collapsing("Performance Tuning", |ui| {
                ui.checkbox(&mut params.parallel, "Enable Parallel Processing");
                ui.checkbox(&mut params.use_spatial_grid, "Enable Spatial Grid");

                ui.separator();

                for line in debug_info.lines() {
                    ui.label(line);
                }
            });

            ui.checkbox(&mut settings.auto_orbit, "Orbit Camera");
            ui.checkbox(&mut settings.show_headings, "Show Headings");
            ui.checkbox(&mut settings.show_debug, "Show Debug Info");
            ui.checkbox(&mut settings.pause_simulation, "Pause Simulation");
        });

    UiActions {
        reset_world,
        params_edited: params.detect_changes(&previous).any_changed,
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &Draw, debug_info: &DebugInfo, window_rect: Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let lines = debug_info.lines();
    let panel_width = 260.0;
    let panel_height = line_height * lines.len() as f32 + margin;

    draw.rect()
        .x_y(window_rect.right() - panel_width / 2.0, window_rect.top() - panel_height / 2.0)
        .w_h(panel_width, panel_height)
        .color(rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width / 2.0;
    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        draw.text(text)
            .x_y(text_x, text_y - i as f32 * line_height)
            .color(WHITE)
            .font_size(14);
    }
}
