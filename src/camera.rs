/*
 * Camera Module
 *
 * This module defines the Camera struct used by the viewer: an orthographic
 * camera orbiting the world origin. It projects 3D world points onto the
 * window and maps pointer positions back onto the plane through the origin
 * facing the camera, which is where drag targets live.
 */

use glam::{Quat, Vec2, Vec3};

pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Radians per second of automatic orbit.
    pub orbit_speed: f32,
    /// World radius that should fit the window at zoom 1.
    pub framed_radius: f32,
}

impl Camera {
    pub fn new(framed_radius: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: -0.3,
            zoom: 1.0,
            min_zoom: 0.25,
            max_zoom: 6.0,
            orbit_speed: 0.1,
            framed_radius,
        }
    }

    fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Pixels per world unit for a window of the given size.
    pub fn pixels_per_unit(&self, window_size: Vec2) -> f32 {
        let fit = window_size.min_element() / (2.2 * self.framed_radius);
        fit * self.zoom
    }

    /// Window position (origin at center, y up) and view depth of a world point.
    /// Larger depth is closer to the viewer.
    pub fn project(&self, point: Vec3, window_size: Vec2) -> (Vec2, f32) {
        let view = self.rotation().inverse() * point;
        let scale = self.pixels_per_unit(window_size);
        (Vec2::new(view.x, view.y) * scale, view.z)
    }

    /// World point under a window position, on the plane through the origin
    /// facing the camera.
    pub fn unproject(&self, screen: Vec2, window_size: Vec2) -> Vec3 {
        let scale = self.pixels_per_unit(window_size);
        let view = Vec3::new(screen.x / scale, screen.y / scale, 0.0);
        self.rotation() * view
    }

    pub fn advance(&mut self, seconds: f32) {
        self.yaw = (self.yaw + self.orbit_speed * seconds) % std::f32::consts::TAU;
    }

    // Handle mouse wheel events for zooming
    pub fn zoom_by(&mut self, scroll: f32) {
        let zoom_factor = 1.0 + scroll * 0.1;
        self.zoom = (self.zoom * zoom_factor).clamp(self.min_zoom, self.max_zoom);
    }
}
