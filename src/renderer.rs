/*
 * Renderer Module
 *
 * This module draws the latest simulation snapshot. Agents are projected
 * through the orbit camera and drawn back to front as discs sized by their
 * scale and depth, colored by their lifetime hue.
 */

use glam::{Vec2 as ScreenVec, Vec3};
use nannou::prelude::*;

use crate::app::Model;
use crate::simulation::RenderInstance;
use crate::ui;

// Smallest disc radius in pixels so far-away offspring stay visible
const MIN_RADIUS: f32 = 1.0;

struct Projected<'a> {
    instance: &'a RenderInstance,
    screen: ScreenVec,
    depth: f32,
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let window_size = ScreenVec::new(window_rect.w(), window_rect.h());
    let pixels_per_unit = model.camera.pixels_per_unit(window_size);
    let world_radius = model.simulation.params().world_radius;

    // World boundary
    draw.ellipse()
        .x_y(0.0, 0.0)
        .radius(world_radius * pixels_per_unit)
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.3, 0.3, 0.3, 1.0));

    let mut projected: Vec<Projected> = model
        .snapshot
        .instances
        .iter()
        .map(|instance| {
            let (screen, depth) = model.camera.project(instance.position, window_size);
            Projected {
                instance,
                screen,
                depth,
            }
        })
        .collect();

    // Painter's order: farthest first
    projected.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    for p in &projected {
        // Nearer agents appear larger and brighter
        let depth_factor = 1.0 + (p.depth / world_radius) * 0.5;
        let radius = (p.instance.scale * pixels_per_unit * depth_factor).max(MIN_RADIUS);
        let color = p.instance.color;
        let alpha = (0.55 + 0.45 * depth_factor).clamp(0.2, 1.0);

        draw.ellipse()
            .x_y(p.screen.x, p.screen.y)
            .radius(radius)
            .color(hsla(color.hue, color.saturation, color.lightness, alpha));

        if model.settings.show_headings {
            let tip = p.instance.position + p.instance.orientation * Vec3::Z * p.instance.scale * 3.0;
            let (tip_screen, _) = model.camera.project(tip, window_size);
            draw.line()
                .start(pt2(p.screen.x, p.screen.y))
                .end(pt2(tip_screen.x, tip_screen.y))
                .weight(1.0)
                .color(hsla(color.hue, color.saturation, color.lightness, alpha * 0.6));
        }
    }

    // Drag target marker
    if model.pointer.dragging {
        draw.ellipse()
            .x_y(model.pointer.position.x, model.pointer.position.y)
            .radius(8.0)
            .no_fill()
            .stroke_weight(1.5)
            .stroke(WHITE);
    }

    if model.settings.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}
