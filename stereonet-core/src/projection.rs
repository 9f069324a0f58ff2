/// Azimuthal equal-area projection of orientations onto the plot
use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;

use nalgebra::Point2;

use crate::error::StereonetError;
use crate::geometry::{Geometry, PrimitiveKind, Shape};
use crate::measurement::{pole_dip_direction, MAX_DIP_ANGLE};

/// Sampling step along a meridian, in degrees of latitude.
const MERIDIAN_STEP: f64 = 1.0;

/// How planes are drawn on the plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Representation {
    /// Great-circle arc
    #[default]
    Arc,
    /// Single point for the plane's pole
    Pole,
}

impl Representation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Representation::Arc => "arc",
            Representation::Pole => "pole",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Representation {
    type Err = StereonetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arc" => Ok(Representation::Arc),
            "pole" => Ok(Representation::Pole),
            _ => Err(StereonetError::InvalidRepresentation(s.to_string())),
        }
    }
}

/// Equal-area projection centered on the plot, with the primitive circle
/// (90° polar distance) at `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqualAreaProjection {
    pub center: Point2<f64>,
    pub radius: f64,
    /// Angular width of a plane's arc band, in degrees.
    pub band_width: f64,
    /// Marker radius for poles and lines.
    pub point_size: f64,
}

impl EqualAreaProjection {
    pub fn new(center: Point2<f64>, radius: f64) -> Self {
        Self {
            center,
            radius,
            band_width: 1.0,
            point_size: 4.0,
        }
    }

    pub fn with_band_width(mut self, band_width: f64) -> Self {
        self.band_width = band_width;
        self
    }

    pub fn with_point_size(mut self, point_size: f64) -> Self {
        self.point_size = point_size;
        self
    }

    /// Radius of the unit-area sphere that maps 90° onto `radius`.
    fn sphere_radius(&self) -> f64 {
        self.radius / SQRT_2
    }

    /// Distance from the center of a point at the given polar distance (degrees).
    pub fn radial_distance(&self, polar_distance: f64) -> f64 {
        self.radius * SQRT_2 * (polar_distance.to_radians() / 2.0).sin()
    }

    /// Project a longitude/latitude pair (degrees) in the equatorial aspect,
    /// where meridians are great circles through the north and south points.
    pub fn project_lon_lat(&self, longitude: f64, latitude: f64) -> Option<Point2<f64>> {
        let (lambda, phi) = (longitude.to_radians(), latitude.to_radians());
        let denom = 1.0 + phi.cos() * lambda.cos();
        // Antipode of the center has no image
        if denom < 1e-12 {
            return None;
        }
        let k = (2.0 / denom).sqrt() * self.sphere_radius();
        Some(Point2::new(
            self.center.x + k * phi.cos() * lambda.sin(),
            self.center.y - k * phi.sin(),
        ))
    }

    /// Samples along one meridian from the south point to the north point.
    pub fn meridian(&self, longitude: f64) -> Vec<Point2<f64>> {
        let steps = (180.0 / MERIDIAN_STEP).round() as i32;
        (0..=steps)
            .filter_map(|i| self.project_lon_lat(longitude, -90.0 + i as f64 * MERIDIAN_STEP))
            .collect()
    }

    /// Great-circle band of a plane, rotated into its dip direction.
    ///
    /// Every plane of a given dip shares the same band up to rotation, so the
    /// band is built once along the meridian at `90 - dip` (a plane dipping
    /// east) and turned by `dip_direction - 90`.
    pub fn plane_to_arc_geometry(&self, dip_angle: f64, dip_direction: f64) -> Geometry {
        let longitude = MAX_DIP_ANGLE - dip_angle;
        let half = self.band_width / 2.0;
        let west = (longitude - half).max(-MAX_DIP_ANGLE);
        let east = (longitude + half).min(MAX_DIP_ANGLE);

        let mut ring = self.meridian(west);
        ring.extend(self.meridian(east).into_iter().rev());

        Geometry::new(
            PrimitiveKind::Arc,
            Shape::Polygon(ring),
            dip_direction - 90.0,
            self.center,
        )
    }

    /// Pole of a plane: a point at polar distance `90 - complement` (the dip)
    /// turned to the opposite azimuth.
    pub fn plane_to_pole_geometry(&self, dip_angle: f64, dip_direction: f64) -> Geometry {
        let complement = MAX_DIP_ANGLE - dip_angle;
        let polar_distance = MAX_DIP_ANGLE - complement;
        self.point_geometry(polar_distance, pole_dip_direction(dip_direction))
    }

    /// Linear feature: a point at polar distance `dip_angle` along its own trend.
    pub fn line_to_point_geometry(&self, dip_angle: f64, dip_direction: f64) -> Geometry {
        self.point_geometry(dip_angle, dip_direction)
    }

    /// Geometry for a plane under the given representation.
    pub fn plane_geometry(
        &self,
        representation: Representation,
        dip_angle: f64,
        dip_direction: f64,
    ) -> Geometry {
        match representation {
            Representation::Arc => self.plane_to_arc_geometry(dip_angle, dip_direction),
            Representation::Pole => self.plane_to_pole_geometry(dip_angle, dip_direction),
        }
    }

    fn point_geometry(&self, polar_distance: f64, azimuth: f64) -> Geometry {
        let position = Point2::new(
            self.center.x,
            self.center.y - self.radial_distance(polar_distance),
        );
        Geometry::new(
            PrimitiveKind::Point,
            Shape::Point {
                position,
                radius: self.point_size,
            },
            azimuth,
            self.center,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> EqualAreaProjection {
        EqualAreaProjection::new(Point2::new(200.0, 200.0), 200.0)
    }

    fn distance(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
        (a - b).norm()
    }

    #[test]
    fn test_primitive_circle_at_radius() {
        let p = projection();
        assert!((p.radial_distance(90.0) - 200.0).abs() < 1e-9);
        assert!(p.radial_distance(0.0).abs() < 1e-12);
        // Equal-area spacing compresses toward the rim
        assert!(p.radial_distance(45.0) > 0.5 * 200.0);
    }

    #[test]
    fn test_lon_lat_boundary_lands_on_circle() {
        let p = projection();
        for (lon, lat) in [(90.0, 0.0), (-90.0, 0.0), (0.0, 90.0), (0.0, -90.0), (90.0, 45.0)] {
            let point = p.project_lon_lat(lon, lat).unwrap();
            assert!((distance(&point, &p.center) - 200.0).abs() < 1e-9);
        }
        let north = p.project_lon_lat(0.0, 90.0).unwrap();
        assert!(north.y < p.center.y);
    }

    #[test]
    fn test_vertical_plane_passes_through_center() {
        let p = projection();
        let geometry = p.plane_to_arc_geometry(90.0, 90.0);
        let Shape::Polygon(ring) = &geometry.shape else {
            panic!("arc must be a polygon");
        };
        let nearest = ring
            .iter()
            .map(|pt| distance(pt, &p.center))
            .fold(f64::INFINITY, f64::min);
        assert!(nearest < p.radial_distance(1.0));
        assert!((geometry.rotation - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_arc_rotation_follows_dip_direction() {
        let p = projection();
        assert!((p.plane_to_arc_geometry(30.0, 45.0).rotation + 45.0).abs() < 1e-12);
        assert!((p.plane_to_arc_geometry(30.0, 270.0).rotation - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_east_dipping_arc_bows_east() {
        let p = projection();
        let geometry = p.plane_to_arc_geometry(30.0, 90.0);
        let Shape::Polygon(ring) = geometry.placed_shape() else {
            panic!("arc must be a polygon");
        };
        assert!(ring.iter().all(|pt| pt.x >= p.center.x - 1e-9));
    }

    #[test]
    fn test_pole_opposite_dip_direction() {
        let p = projection();
        let geometry = p.plane_to_pole_geometry(30.0, 257.0);
        assert!((geometry.rotation - 77.0).abs() < 1e-12);
        let position = geometry.placed_position().unwrap();
        assert!((distance(&position, &p.center) - p.radial_distance(30.0)).abs() < 1e-9);
    }

    #[test]
    fn test_horizontal_plane_pole_at_center() {
        let p = projection();
        let position = p.plane_to_pole_geometry(0.0, 120.0).placed_position().unwrap();
        assert!(distance(&position, &p.center) < 1e-9);
    }

    #[test]
    fn test_line_keeps_its_trend() {
        let p = projection();
        let geometry = p.line_to_point_geometry(45.0, 90.0);
        assert!((geometry.rotation - 90.0).abs() < 1e-12);
        let position = geometry.placed_position().unwrap();
        // Trend 090 points east
        assert!(position.x > p.center.x);
        assert!((position.y - p.center.y).abs() < 1e-9);
    }

    #[test]
    fn test_representation_parsing() {
        assert_eq!("arc".parse::<Representation>().unwrap(), Representation::Arc);
        assert_eq!(" Pole ".parse::<Representation>().unwrap(), Representation::Pole);
        assert!(matches!(
            "contour".parse::<Representation>(),
            Err(StereonetError::InvalidRepresentation(_))
        ));
        assert_eq!(Representation::default(), Representation::Arc);
    }
}
