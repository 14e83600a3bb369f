/*
 * Application Module
 *
 * This module defines the viewer's model and update loop. The simulation is
 * advanced on a fixed timestep: real frame time accumulates and the
 * simulation ticks once per `tick_delta` of it, so aging and the spawn clock
 * stay in step regardless of the display rate.
 */

use std::time::Duration;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{info, warn};

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::input::{self, PointerState};
use crate::params::SimulationParams;
use crate::renderer;
use crate::simulation::{FrameSnapshot, Simulation};
use crate::ui::{self, ViewSettings};

// Upper bound on catch-up ticks after a stalled frame
const MAX_TICKS_PER_FRAME: usize = 5;

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    /// Copy edited by the control panel.
    pub params: SimulationParams,
    pub settings: ViewSettings,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub pointer: PointerState,
    pub snapshot: FrameSnapshot,
    // Fixed timestep variables
    pub tick_accumulator: Duration,
    pub tick_step_size: Duration,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let monitor = app.primary_monitor().expect("Failed to get primary monitor");
    let monitor_size = monitor.size();

    // Calculate window size based on monitor size (80% of monitor size)
    let window_width = monitor_size.width as f32 * 0.8;
    let window_height = monitor_size.height as f32 * 0.8;

    let window_id = app
        .new_window()
        .title("Flocking Generations")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .touch(input::touch)
        .raw_event(input::raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let params = SimulationParams::default();
    let simulation = Simulation::new(params.clone()).expect("default parameters are valid");
    let snapshot = simulation.snapshot();
    let camera = Camera::new(params.world_radius);
    let tick_step_size = Duration::from_secs_f32(params.tick_delta);

    info!(seed = simulation.seed(), "viewer started");

    Model {
        simulation,
        params,
        settings: ViewSettings::default(),
        egui,
        debug_info: DebugInfo::default(),
        camera,
        pointer: PointerState::default(),
        snapshot,
        tick_accumulator: Duration::ZERO,
        tick_step_size,
    }
}

// Push panel edits into the simulation, reverting the panel if they are invalid
fn apply_params(model: &mut Model) {
    match model.simulation.set_params(model.params.clone()) {
        Ok(changes) => {
            if changes.world_reset_needed {
                model.snapshot = model.simulation.snapshot();
            }
            model.camera.framed_radius = model.params.world_radius;
            model.tick_step_size = Duration::from_secs_f32(model.params.tick_delta);
        }
        Err(err) => {
            warn!(%err, "rejected parameter edit");
            model.params = model.simulation.params().clone();
        }
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    let actions = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &mut model.settings,
        &model.debug_info,
    );

    if actions.params_edited {
        apply_params(model);
    }
    if actions.reset_world {
        model.simulation.reset();
        model.snapshot = model.simulation.snapshot();
        model.debug_info = DebugInfo::default();
        model.tick_accumulator = Duration::ZERO;
    }

    if model.settings.auto_orbit {
        model.camera.advance(update.since_last.as_secs_f32());
    }

    if model.settings.pause_simulation {
        model.debug_info.ticks_per_frame = 0;
        return;
    }

    // The pointer is read once per frame and shared by every tick in it
    let input = input::input_state(app, model);
    let step = model.tick_step_size.as_secs_f32();

    model.tick_accumulator += update.since_last;
    let mut ticks = 0;
    while model.tick_accumulator >= model.tick_step_size && ticks < MAX_TICKS_PER_FRAME {
        let snapshot = model.simulation.step(&input, step);
        model.debug_info.record(&snapshot);
        model.snapshot = snapshot;
        model.tick_accumulator -= model.tick_step_size;
        ticks += 1;
    }

    // Drop backlog we could not catch up on
    if ticks == MAX_TICKS_PER_FRAME {
        model.tick_accumulator = Duration::ZERO;
    }
    model.debug_info.ticks_per_frame = ticks;
}
