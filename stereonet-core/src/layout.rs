/// Square plot layout derived from the container width
use nalgebra::Point2;

use crate::error::{Result, StereonetError};
use crate::projection::EqualAreaProjection;

/// Plot geometry for one container size. Height always equals width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub size: f64,
}

impl Layout {
    pub fn new(width: f64) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(StereonetError::InvalidSize(width));
        }
        Ok(Self { size: width })
    }

    pub fn width(&self) -> f64 {
        self.size
    }

    pub fn height(&self) -> f64 {
        self.size
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.size / 2.0, self.size / 2.0)
    }

    /// Radius of the primitive circle.
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }

    pub fn projection(&self, band_width: f64, point_size: f64) -> EqualAreaProjection {
        EqualAreaProjection::new(self.center(), self.radius())
            .with_band_width(band_width)
            .with_point_size(point_size)
    }
}
