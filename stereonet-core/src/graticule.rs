/// Reference grid and outline drawn beneath the data
use crate::geometry::{Geometry, PrimitiveKind, Shape};
use crate::projection::EqualAreaProjection;

/// Spacing between graticule lines, in degrees.
pub const GRATICULE_STEP: f64 = 10.0;
/// Sampling step along a parallel, in degrees of longitude.
const PARALLEL_STEP: f64 = 2.0;

/// Meridians and parallels of the equatorial aspect, every `GRATICULE_STEP`
/// degrees. The ±90° meridians coincide with the outline and are left out.
pub fn graticule_geometry(projection: &EqualAreaProjection) -> Geometry {
    let lines = grid_values(GRATICULE_STEP)
        .map(|longitude| projection.meridian(longitude))
        .chain(grid_values(GRATICULE_STEP).map(|latitude| parallel(projection, latitude)))
        .collect();

    Geometry::new(
        PrimitiveKind::Graticule,
        Shape::Polylines(lines),
        0.0,
        projection.center,
    )
}

/// Primitive circle bounding the projection.
pub fn outline_geometry(projection: &EqualAreaProjection) -> Geometry {
    Geometry::new(
        PrimitiveKind::Outline,
        Shape::Circle {
            center: projection.center,
            radius: projection.radius,
        },
        0.0,
        projection.center,
    )
}

fn grid_values(step: f64) -> impl Iterator<Item = f64> {
    let count = (90.0 / step).round() as i32;
    (1 - count..count).map(move |i| i as f64 * step)
}

fn parallel(projection: &EqualAreaProjection, latitude: f64) -> Vec<nalgebra::Point2<f64>> {
    let steps = (180.0 / PARALLEL_STEP).round() as i32;
    (0..=steps)
        .filter_map(|i| projection.project_lon_lat(-90.0 + i as f64 * PARALLEL_STEP, latitude))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn test_graticule_line_count() {
        let projection = EqualAreaProjection::new(Point2::new(50.0, 50.0), 50.0);
        let geometry = graticule_geometry(&projection);
        let Shape::Polylines(lines) = geometry.shape else {
            panic!("graticule must be polylines");
        };
        // 17 interior meridians and 17 interior parallels
        assert_eq!(lines.len(), 34);
        for line in &lines {
            for point in line {
                assert!((point - projection.center).norm() <= projection.radius + 1e-9);
            }
        }
    }

    #[test]
    fn test_outline_matches_radius() {
        let projection = EqualAreaProjection::new(Point2::new(50.0, 50.0), 42.0);
        let geometry = outline_geometry(&projection);
        assert_eq!(geometry.kind, PrimitiveKind::Outline);
        assert_eq!(
            geometry.shape,
            Shape::Circle {
                center: Point2::new(50.0, 50.0),
                radius: 42.0
            }
        );
    }
}
