/// Orientation measurements and their domain checks
use tracing::warn;

pub const MAX_DIP_ANGLE: f64 = 90.0;
pub const MAX_DIP_DIRECTION: f64 = 360.0;

/// Check that a dip angle and dip direction lie in the measurement domain.
///
/// Bounds are inclusive: dip in [0, 90], direction in [0, 360]. A rejected
/// value is reported with a warning and `false`; callers skip the one
/// measurement and carry on with the rest of their batch.
pub fn validate(dip_angle: f64, dip_direction: f64) -> bool {
    if !(0.0..=MAX_DIP_ANGLE).contains(&dip_angle) {
        warn!(
            field = "dip_angle",
            value = dip_angle,
            "dip angle {dip_angle} is outside [0, 90], measurement skipped"
        );
        return false;
    }
    if !(0.0..=MAX_DIP_DIRECTION).contains(&dip_direction) {
        warn!(
            field = "dip_direction",
            value = dip_direction,
            "dip direction {dip_direction} is outside [0, 360], measurement skipped"
        );
        return false;
    }
    true
}

/// Azimuth of a plane's pole: the dip direction turned half a circle.
pub fn pole_dip_direction(dip_direction: f64) -> f64 {
    (dip_direction + 180.0).rem_euclid(360.0)
}

/// A validated dip / dip direction pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    dip_angle: f64,
    dip_direction: f64,
}

impl Measurement {
    /// Returns `None` (after logging a warning) when either value is out of range.
    pub fn new(dip_angle: f64, dip_direction: f64) -> Option<Self> {
        validate(dip_angle, dip_direction).then_some(Self {
            dip_angle,
            dip_direction,
        })
    }

    pub fn dip_angle(&self) -> f64 {
        self.dip_angle
    }

    pub fn dip_direction(&self) -> f64 {
        self.dip_direction
    }

    /// Pole of the plane described by this measurement.
    pub fn pole(&self) -> PoleCoordinates {
        PoleCoordinates {
            dip_direction: pole_dip_direction(self.dip_direction),
            complement: MAX_DIP_ANGLE - self.dip_angle,
        }
    }
}

/// Derived pole orientation of a plane, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleCoordinates {
    pub dip_direction: f64,
    pub complement: f64,
}
