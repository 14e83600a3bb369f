/*
 * Input Module
 *
 * This module turns window events into the simulation's input snapshot.
 * Holding the left mouse button (or a touch) outside the control panel sets
 * the drag flag; the pointer position is mapped through the camera to a 3D
 * target once per tick.
 */

use glam::Vec2 as ScreenVec;
use nannou::event::TouchEvent;
use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase};
use tracing::warn;

use crate::app::Model;
use crate::simulation::InputState;

/// Pointer state as last reported by the window.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointerState {
    pub position: ScreenVec,
    pub dragging: bool,
}

// Resolve the pointer into a tick input, falling back to idle on a bad target
pub fn input_state(app: &App, model: &Model) -> InputState {
    let rect = app.window_rect();
    let window_size = ScreenVec::new(rect.w(), rect.h());
    let target = model.camera.unproject(model.pointer.position, window_size);

    match InputState::new(target, model.pointer.dragging) {
        Ok(input) => input,
        Err(err) => {
            warn!(%err, "ignoring pointer input");
            InputState::idle()
        }
    }
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.pointer.position = ScreenVec::new(pos.x, pos.y);
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left && !model.egui.ctx().is_pointer_over_area() {
        model.pointer.dragging = true;
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.pointer.dragging = false;
    }
}

// Touches drive the same drag flag as the left mouse button
pub fn touch(_app: &App, model: &mut Model, touch: TouchEvent) {
    model.pointer.position = ScreenVec::new(touch.position.x, touch.position.y);
    model.pointer.dragging = match touch.phase {
        TouchPhase::Started | TouchPhase::Moved => true,
        TouchPhase::Ended | TouchPhase::Cancelled => false,
    };
}

// Mouse wheel event handler for zooming
pub fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }
    match delta {
        MouseScrollDelta::LineDelta(_, y) => model.camera.zoom_by(y),
        MouseScrollDelta::PixelDelta(pos) => model.camera.zoom_by(pos.y as f32 * 0.01),
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
