/// Plot-space geometry primitives handed to a render adapter
use nalgebra::{Point2, Rotation2};

/// What a primitive depicts on the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Great-circle band of a plane.
    Arc,
    /// Pole of a plane, or a linear feature.
    Point,
    /// Reference grid of meridians and parallels.
    Graticule,
    /// Primitive circle bounding the projection.
    Outline,
}

/// Unrotated shape in screen coordinates (x right, y down, north up).
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Closed ring, filled by the surface.
    Polygon(Vec<Point2<f64>>),
    /// Open paths stroked independently.
    Polylines(Vec<Vec<Point2<f64>>>),
    /// Marker whose radius comes from the configured point size.
    Point { position: Point2<f64>, radius: f64 },
    Circle { center: Point2<f64>, radius: f64 },
}

/// A shape together with its rotation about the plot center.
///
/// `rotation` is in degrees, clockwise on screen, i.e. the same convention as
/// an azimuth and as an SVG `rotate(angle, cx, cy)` transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub kind: PrimitiveKind,
    pub shape: Shape,
    pub rotation: f64,
    pub center: Point2<f64>,
}

impl Geometry {
    pub fn new(kind: PrimitiveKind, shape: Shape, rotation: f64, center: Point2<f64>) -> Self {
        Self {
            kind,
            shape,
            rotation,
            center,
        }
    }

    /// Apply the rotation to a single point.
    pub fn rotate_point(&self, point: &Point2<f64>) -> Point2<f64> {
        let rotation = Rotation2::new(self.rotation.to_radians());
        self.center + rotation * (point - self.center)
    }

    /// Shape with the rotation baked in, for surfaces without a transform stack.
    pub fn placed_shape(&self) -> Shape {
        match &self.shape {
            Shape::Polygon(ring) => {
                Shape::Polygon(ring.iter().map(|p| self.rotate_point(p)).collect())
            }
            Shape::Polylines(paths) => Shape::Polylines(
                paths
                    .iter()
                    .map(|path| path.iter().map(|p| self.rotate_point(p)).collect())
                    .collect(),
            ),
            Shape::Point { position, radius } => Shape::Point {
                position: self.rotate_point(position),
                radius: *radius,
            },
            Shape::Circle { center, radius } => Shape::Circle {
                center: self.rotate_point(center),
                radius: *radius,
            },
        }
    }

    /// Position of a point primitive after rotation.
    pub fn placed_position(&self) -> Option<Point2<f64>> {
        match &self.shape {
            Shape::Point { position, .. } => Some(self.rotate_point(position)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_turn_is_clockwise_on_screen() {
        let center = Point2::new(100.0, 100.0);
        // Due north of center (screen y decreases upward)
        let north = Point2::new(100.0, 50.0);
        let geometry = Geometry::new(
            PrimitiveKind::Point,
            Shape::Point {
                position: north,
                radius: 3.0,
            },
            90.0,
            center,
        );
        let east = geometry.placed_position().unwrap();
        assert!((east.x - 150.0).abs() < 1e-9);
        assert!((east.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let center = Point2::new(10.0, 10.0);
        let ring = vec![Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)];
        let geometry = Geometry::new(
            PrimitiveKind::Arc,
            Shape::Polygon(ring.clone()),
            0.0,
            center,
        );
        assert_eq!(geometry.placed_shape(), Shape::Polygon(ring));
    }
}
