//! Freeform stroke shape: an ordered, append-only sequence of pressured points.

use super::{
    PressuredPoint, SerializableColor, ShapeId, make_shape_id, point_in_polygon,
    point_to_polyline_dist,
};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A freehand stroke.
///
/// Geometry grows by append only while `editing` is set; the color and size
/// are captured from the theme at creation time and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freeform {
    pub id: ShapeId,
    pub editing: bool,
    pub deleting: bool,
    pub points: Vec<PressuredPoint>,
    pub color: SerializableColor,
    pub size: f64,
}

impl Freeform {
    /// Create the in-progress stroke for a new gesture: a single point with
    /// `editing` set.
    pub fn start(point: PressuredPoint, color: SerializableColor, size: f64) -> Self {
        Self {
            id: make_shape_id(),
            editing: true,
            deleting: false,
            points: vec![point],
            color,
            size,
        }
    }

    /// Append a point sample to the stroke.
    pub fn add_point(&mut self, point: PressuredPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the stroke centerline in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Path representation of the centerline for rendering collaborators.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        if self.points.is_empty() {
            return path;
        }

        path.move_to(self.points[0].position());
        for point in self.points.iter().skip(1) {
            path.line_to(point.position());
        }

        path
    }

    /// Is the canvas-space point inside the stroke outline?
    ///
    /// The outline is the centerline widened by the stroke size, so the test
    /// is a distance-to-polyline check against half the width.
    pub fn point_in_stroke(&self, point: Point) -> bool {
        match self.points.as_slice() {
            [] => false,
            [only] => {
                let dx = point.x - only.x;
                let dy = point.y - only.y;
                (dx * dx + dy * dy).sqrt() <= self.size / 2.0
            }
            _ => {
                let centerline: Vec<Point> = self.points.iter().map(|p| p.position()).collect();
                point_to_polyline_dist(point, &centerline) <= self.size / 2.0
            }
        }
    }

    /// Is the canvas-space point inside the filled interior of the stroke,
    /// treating the point sequence as a closed polygon?
    pub fn point_in_fill(&self, point: Point) -> bool {
        let polygon: Vec<Point> = self.points.iter().map(|p| p.position()).collect();
        point_in_polygon(point, &polygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(points: &[(f64, f64)]) -> Freeform {
        let mut it = points.iter();
        let first = it.next().unwrap();
        let mut shape = Freeform::start(
            PressuredPoint::new(first.0, first.1, 1.0),
            SerializableColor::white(),
            4.0,
        );
        for (x, y) in it {
            shape.add_point(PressuredPoint::new(*x, *y, 1.0));
        }
        shape
    }

    #[test]
    fn test_start_has_one_point_and_editing() {
        let shape = stroke(&[(5.0, 5.0)]);
        assert_eq!(shape.len(), 1);
        assert!(shape.editing);
        assert!(!shape.deleting);
    }

    #[test]
    fn test_bounds() {
        let shape = stroke(&[(0.0, 0.0), (100.0, 50.0), (50.0, 100.0)]);
        let bounds = shape.bounds();
        assert!(bounds.x0.abs() < f64::EPSILON);
        assert!(bounds.y0.abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_point_in_stroke() {
        let shape = stroke(&[(0.0, 0.0), (100.0, 0.0)]);
        // size 4 => outline reaches 2 units from the centerline
        assert!(shape.point_in_stroke(Point::new(50.0, 1.5)));
        assert!(!shape.point_in_stroke(Point::new(50.0, 10.0)));
    }

    #[test]
    fn test_point_in_stroke_single_point() {
        let shape = stroke(&[(10.0, 10.0)]);
        assert!(shape.point_in_stroke(Point::new(11.0, 10.0)));
        assert!(!shape.point_in_stroke(Point::new(20.0, 10.0)));
    }

    #[test]
    fn test_point_in_fill() {
        // A loop enclosing (5, 5)
        let shape = stroke(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert!(shape.point_in_fill(Point::new(5.0, 5.0)));
        assert!(!shape.point_in_fill(Point::new(15.0, 5.0)));
    }

    #[test]
    fn test_to_path_element_count() {
        let shape = stroke(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        assert_eq!(shape.to_path().elements().len(), 3);
    }
}
