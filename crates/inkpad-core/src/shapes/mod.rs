//! Shape definitions for the drawing surface.

mod freeform;

pub use freeform::Freeform;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Produce a shape identifier unique within and across sessions.
///
/// Ids end up in a shared remote document, so they must not collide between
/// independent sessions; random UUIDs make that probability negligible.
pub fn make_shape_id() -> ShapeId {
    Uuid::new_v4()
}

/// A point sample with pen pressure in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressuredPoint {
    pub x: f64,
    pub y: f64,
    pub pressure: f64,
}

impl PressuredPoint {
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self { x, y, pressure }
    }

    /// The position without the pressure component.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Even-odd containment test against the polygon closed over `points`.
pub fn point_in_polygon(point: Point, points: &[Point]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Enum wrapper for all shape variants.
///
/// The gesture state machines only ever operate on "the shape currently
/// editing" and "all valid shapes", so new variants slot in here without
/// touching them. The tag matches the remote document's `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    #[serde(rename = "FREEFORM")]
    Freeform(Freeform),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Freeform(s) => s.id,
        }
    }

    /// True while the shape is the in-progress stroke of a gesture.
    pub fn editing(&self) -> bool {
        match self {
            Shape::Freeform(s) => s.editing,
        }
    }

    /// True while the eraser has this shape marked for deletion.
    pub fn deleting(&self) -> bool {
        match self {
            Shape::Freeform(s) => s.deleting,
        }
    }

    /// A shape survives the end of a gesture iff it is not marked deleting.
    pub fn is_valid(&self) -> bool {
        !self.deleting()
    }

    /// Clear the editing flag without touching geometry.
    pub fn end_editing(mut self) -> Self {
        match &mut self {
            Shape::Freeform(s) => s.editing = false,
        }
        self
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Freeform(s) => s.bounds(),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Freeform(s) => s.to_path(),
        }
    }

    pub fn as_freeform(&self) -> Option<&Freeform> {
        match self {
            Shape::Freeform(s) => Some(s),
        }
    }

    pub fn as_freeform_mut(&mut self) -> Option<&mut Freeform> {
        match self {
            Shape::Freeform(s) => Some(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_ids_are_unique() {
        let a = make_shape_id();
        let b = make_shape_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_point_to_segment_dist() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-10);
        assert!((point_to_segment_dist(Point::new(-4.0, 0.0), a, b) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Point::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &square));
    }

    #[test]
    fn test_end_editing_preserves_geometry() {
        let mut freeform = Freeform::start(
            PressuredPoint::new(1.0, 2.0, 1.0),
            SerializableColor::white(),
            4.0,
        );
        freeform.add_point(PressuredPoint::new(3.0, 4.0, 0.5));

        let shape = Shape::Freeform(freeform).end_editing();
        assert!(!shape.editing());
        assert_eq!(shape.as_freeform().unwrap().points.len(), 2);
    }

    #[test]
    fn test_serde_tags_variant() {
        let shape = Shape::Freeform(Freeform::start(
            PressuredPoint::new(0.0, 0.0, 1.0),
            SerializableColor::black(),
            4.0,
        ));
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"type\":\"FREEFORM\""));

        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), shape.id());
    }
}
