//! Hit-test capability consumed by the eraser.
//!
//! The engine never queries a live render tree. Hit testing is an injected
//! capability so a renderer may answer with whatever geometry it actually
//! painted, while the default implementation works offline from the stroke
//! math alone.

use crate::shapes::Freeform;
use kurbo::Point;

/// Answers canvas-space containment queries for a shape.
///
/// `None` means the tester cannot evaluate the shape yet (for example its
/// geometry is not materialized); callers treat that as a miss, never as an
/// error.
pub trait HitTester {
    /// Is the point inside the shape's stroke outline?
    fn point_in_stroke(&self, shape: &Freeform, point: Point) -> Option<bool>;

    /// Is the point inside the shape's filled interior?
    fn point_in_fill(&self, shape: &Freeform, point: Point) -> Option<bool>;
}

/// Combined stroke-or-fill query with the "unready means miss" rule applied.
pub fn hits(tester: &dyn HitTester, shape: &Freeform, point: Point) -> bool {
    tester.point_in_stroke(shape, point).unwrap_or(false)
        || tester.point_in_fill(shape, point).unwrap_or(false)
}

/// Offline hit tester backed by the stroke geometry itself: a stroke-width
/// distance test for the outline and even-odd containment for the interior.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrokeGeometry;

impl HitTester for StrokeGeometry {
    fn point_in_stroke(&self, shape: &Freeform, point: Point) -> Option<bool> {
        Some(shape.point_in_stroke(point))
    }

    fn point_in_fill(&self, shape: &Freeform, point: Point) -> Option<bool> {
        Some(shape.point_in_fill(point))
    }
}
