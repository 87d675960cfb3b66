//! Camera module for pan/zoom transforms.

use crate::shapes::PressuredPoint;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 10.0;

/// Camera describes the view transform for the canvas: a pan offset in
/// `(x, y)` and a zoom scalar `z`.
///
/// Cameras are plain values. Every operation returns a new camera; nothing
/// here touches any external resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Camera {
    fn default() -> Self {
        // The built-in starting view, chosen so a fresh document opens
        // roughly centered on the drawing area.
        Self {
            x: -1150.0,
            y: -650.0,
            z: 1.0,
        }
    }
}

impl Camera {
    /// Create a camera with an explicit offset and zoom.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Translate the offset by `(dx, dy)` in screen units.
    ///
    /// Pan deltas are device deltas: they are not scaled by the zoom, so
    /// composing two pans equals one pan with summed deltas.
    pub fn pan(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z,
        }
    }

    /// Scale the zoom by `dz`, clamped to the valid range, keeping the
    /// canvas point under the screen coordinate `center` fixed.
    pub fn zoom_to(self, center: Point, dz: f64) -> Self {
        let zoom = (self.z * dz).clamp(MIN_ZOOM, MAX_ZOOM);
        if (zoom - self.z).abs() < f64::EPSILON {
            return self;
        }

        // screen_to_canvas(center) must be identical before and after:
        // center/z1 - x1 == center/z2 - x2.
        Self {
            x: self.x + center.x / zoom - center.x / self.z,
            y: self.y + center.y / zoom - center.y / self.z,
            z: zoom,
        }
    }

    /// Set the zoom back to 1, keeping the canvas point under `center`
    /// (normally the viewport center) fixed on screen.
    pub fn reset_zoom(self, center: Point) -> Self {
        self.zoom_to(center, 1.0 / self.z)
    }

    /// The built-in initial camera value.
    pub fn reset() -> Self {
        Self::default()
    }

    /// Inverse-transform a screen-space point into canvas space.
    pub fn screen_to_canvas(&self, point: Point) -> Point {
        Point::new(point.x / self.z - self.x, point.y / self.z - self.y)
    }

    /// Transform a canvas-space point into screen space.
    pub fn canvas_to_screen(&self, point: Point) -> Point {
        Point::new((point.x + self.x) * self.z, (point.y + self.y) * self.z)
    }

    /// Inverse-transform a pressured screen-space point; pressure passes
    /// through unchanged.
    pub fn screen_to_canvas_pressured(&self, point: PressuredPoint) -> PressuredPoint {
        let on_canvas = self.screen_to_canvas(point.position());
        PressuredPoint::new(on_canvas.x, on_canvas.y, point.pressure)
    }
}
