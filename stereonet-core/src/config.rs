/// Construction options for a stereonet plot
use std::collections::HashMap;
use std::time::Duration;

use crate::projection::Representation;
use crate::style::Style;

#[derive(Debug, Clone, PartialEq)]
pub struct StereonetConfig {
    /// Plot edge length; when `None` the adapter's surface bounds are used.
    pub size: Option<f64>,
    /// Per-class overrides merged over the default style table.
    pub styles: HashMap<String, Style>,
    /// Fade-in duration for new primitives; `None` disables animation.
    pub animation: Option<Duration>,
    pub show_graticule: bool,
    pub representation: Representation,
    /// Marker radius for poles and lines.
    pub point_size: f64,
    /// Angular width of plane arcs, in degrees.
    pub band_width: f64,
}

impl StereonetConfig {
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_style(mut self, class_name: impl Into<String>, style: Style) -> Self {
        self.styles.insert(class_name.into(), style);
        self
    }

    pub fn with_animation(mut self, duration: Option<Duration>) -> Self {
        // A zero duration means the same thing as no animation
        self.animation = duration.filter(|d| !d.is_zero());
        self
    }

    pub fn with_graticule(mut self, visible: bool) -> Self {
        self.show_graticule = visible;
        self
    }

    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = representation;
        self
    }

    pub fn with_point_size(mut self, point_size: f64) -> Self {
        self.point_size = point_size;
        self
    }

    pub fn with_band_width(mut self, band_width: f64) -> Self {
        self.band_width = band_width;
        self
    }
}

impl Default for StereonetConfig {
    fn default() -> Self {
        Self {
            size: None,
            styles: HashMap::new(),
            animation: Some(Duration::from_millis(300)),
            show_graticule: true,
            representation: Representation::Arc,
            point_size: 4.0,
            band_width: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StereonetConfig::default();
        assert_eq!(config.representation, Representation::Arc);
        assert!(config.show_graticule);
        assert!(config.size.is_none());
        assert_eq!(config.band_width, 1.0);
    }

    #[test]
    fn test_zero_animation_disables() {
        let config = StereonetConfig::default().with_animation(Some(Duration::ZERO));
        assert!(config.animation.is_none());
    }
}
