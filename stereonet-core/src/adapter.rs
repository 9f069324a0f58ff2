/// Boundary between the plot core and a drawing surface
use std::time::Duration;

use crate::error::RenderError;
use crate::geometry::{Geometry, Shape};
use crate::measurement::Measurement;
use crate::registry::{LineId, PlaneId};
use crate::style::Style;

/// Which feature a primitive belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureRef {
    Plane(PlaneId),
    Line(LineId),
}

/// Hover handler bound to one feature, handed to the surface at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverBinding {
    pub feature: FeatureRef,
    pub style_class: String,
    pub measurement: Measurement,
}

impl HoverBinding {
    /// Text a tooltip shows for this feature, e.g. `30/045`.
    pub fn label(&self) -> String {
        format!(
            "{:02.0}/{:03.0}",
            self.measurement.dip_angle(),
            self.measurement.dip_direction()
        )
    }
}

/// Partial update to an existing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveUpdate {
    Shape(Shape),
    Rotation(f64),
    Style(Style),
}

/// Visual endpoint of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub opacity: f64,
}

impl VisualState {
    pub const HIDDEN: VisualState = VisualState { opacity: 0.0 };
    pub const VISIBLE: VisualState = VisualState { opacity: 1.0 };
}

/// Drawing surface the plot emits geometry to.
///
/// The surface owns the visual resources; the plot owns the handles and asks
/// for their disposal. Transitions are fire-and-forget: disposing a handle
/// mid-transition simply removes the resource.
pub trait RenderAdapter {
    type Handle: Clone + std::fmt::Debug + PartialEq;

    /// Edge length of the surface, if it can be measured.
    fn surface_size(&self) -> Option<f64> {
        None
    }

    fn create_primitive(
        &mut self,
        geometry: &Geometry,
        style_class: &str,
        style: &Style,
        hover: Option<HoverBinding>,
    ) -> Result<Self::Handle, RenderError>;

    fn update_primitive(
        &mut self,
        handle: &Self::Handle,
        update: PrimitiveUpdate,
    ) -> Result<(), RenderError>;

    fn dispose_primitive(&mut self, handle: Self::Handle);

    /// Drop every primitive on the surface.
    fn clear(&mut self);

    /// The plot was rebuilt at a new edge length.
    fn resize(&mut self, _size: f64) {}

    fn animate(
        &mut self,
        _handle: &Self::Handle,
        _from: VisualState,
        _to: VisualState,
        _duration: Duration,
    ) {
    }

    fn on_hover(&mut self, _handle: &Self::Handle, _binding: &HoverBinding) {}

    fn on_hover_end(&mut self, _handle: &Self::Handle) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_label_pads_like_field_notation() {
        let binding = HoverBinding {
            feature: FeatureRef::Plane(PlaneId(0)),
            style_class: "plane".to_string(),
            measurement: Measurement::new(8.0, 45.0).unwrap(),
        };
        assert_eq!(binding.label(), "08/045");
    }
}
