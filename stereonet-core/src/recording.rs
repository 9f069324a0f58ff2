/// Headless render adapter that keeps primitives in memory
///
/// Useful for driving a plot without a display, and for inspecting exactly
/// which draw calls a plot issued.
use std::collections::BTreeMap;
use std::time::Duration;

use crate::adapter::{HoverBinding, PrimitiveUpdate, RenderAdapter, VisualState};
use crate::error::RenderError;
use crate::geometry::{Geometry, PrimitiveKind};
use crate::style::Style;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPrimitive {
    pub geometry: Geometry,
    pub style_class: String,
    pub style: Style,
    pub hover: Option<HoverBinding>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Created(u64, PrimitiveKind),
    Updated(u64),
    Disposed(u64),
    Cleared,
    Resized(f64),
    Animated(u64, Duration),
}

#[derive(Debug, Default)]
pub struct RecordingAdapter {
    primitives: BTreeMap<u64, RecordedPrimitive>,
    events: Vec<RenderEvent>,
    next_handle: u64,
    surface_size: Option<f64>,
    /// Remaining creations before every further creation fails.
    fail_after: Option<usize>,
    tooltip: Option<String>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter reporting a measurable surface.
    pub fn with_surface_size(size: f64) -> Self {
        Self {
            surface_size: Some(size),
            ..Self::default()
        }
    }

    /// Let `successes` more creations through, then fail the rest.
    pub fn fail_after(&mut self, successes: usize) {
        self.fail_after = Some(successes);
    }

    pub fn stop_failing(&mut self) {
        self.fail_after = None;
    }

    pub fn primitive(&self, handle: u64) -> Option<&RecordedPrimitive> {
        self.primitives.get(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn live_of_kind(&self, kind: PrimitiveKind) -> usize {
        self.primitives
            .values()
            .filter(|p| p.geometry.kind == kind)
            .count()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Tooltip text, present once something has been hovered.
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }
}

impl RenderAdapter for RecordingAdapter {
    type Handle = u64;

    fn surface_size(&self) -> Option<f64> {
        self.surface_size
    }

    fn create_primitive(
        &mut self,
        geometry: &Geometry,
        style_class: &str,
        style: &Style,
        hover: Option<HoverBinding>,
    ) -> Result<u64, RenderError> {
        if let Some(remaining) = self.fail_after.as_mut() {
            if *remaining == 0 {
                return Err(RenderError::new("recording surface refused primitive"));
            }
            *remaining -= 1;
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        self.primitives.insert(
            handle,
            RecordedPrimitive {
                geometry: geometry.clone(),
                style_class: style_class.to_string(),
                style: style.clone(),
                hover,
            },
        );
        self.events.push(RenderEvent::Created(handle, geometry.kind));
        Ok(handle)
    }

    fn update_primitive(&mut self, handle: &u64, update: PrimitiveUpdate) -> Result<(), RenderError> {
        let primitive = self
            .primitives
            .get_mut(handle)
            .ok_or_else(|| RenderError::new(format!("no primitive with handle {handle}")))?;
        match update {
            PrimitiveUpdate::Shape(shape) => primitive.geometry.shape = shape,
            PrimitiveUpdate::Rotation(rotation) => primitive.geometry.rotation = rotation,
            PrimitiveUpdate::Style(style) => primitive.style = primitive.style.merged(&style),
        }
        self.events.push(RenderEvent::Updated(*handle));
        Ok(())
    }

    fn dispose_primitive(&mut self, handle: u64) {
        if self.primitives.remove(&handle).is_some() {
            self.events.push(RenderEvent::Disposed(handle));
        }
    }

    fn clear(&mut self) {
        self.primitives.clear();
        self.events.push(RenderEvent::Cleared);
    }

    fn resize(&mut self, size: f64) {
        self.events.push(RenderEvent::Resized(size));
    }

    fn animate(&mut self, handle: &u64, _from: VisualState, _to: VisualState, duration: Duration) {
        self.events.push(RenderEvent::Animated(*handle, duration));
    }

    fn on_hover(&mut self, _handle: &u64, binding: &HoverBinding) {
        // One tooltip per adapter, created on first use
        let tooltip = self.tooltip.get_or_insert_with(String::new);
        *tooltip = binding.label();
    }

    fn on_hover_end(&mut self, _handle: &u64) {
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use nalgebra::Point2;

    fn point() -> Geometry {
        Geometry::new(
            PrimitiveKind::Point,
            Shape::Point {
                position: Point2::new(1.0, 1.0),
                radius: 2.0,
            },
            0.0,
            Point2::new(0.0, 0.0),
        )
    }

    #[test]
    fn test_failure_injection() {
        let mut adapter = RecordingAdapter::new();
        adapter.fail_after(1);
        assert!(adapter
            .create_primitive(&point(), "line", &Style::new(), None)
            .is_ok());
        assert!(adapter
            .create_primitive(&point(), "line", &Style::new(), None)
            .is_err());
        adapter.stop_failing();
        assert!(adapter
            .create_primitive(&point(), "line", &Style::new(), None)
            .is_ok());
        assert_eq!(adapter.live_count(), 2);
    }

    #[test]
    fn test_update_rotation() {
        let mut adapter = RecordingAdapter::new();
        let handle = adapter
            .create_primitive(&point(), "line", &Style::new(), None)
            .unwrap();
        adapter
            .update_primitive(&handle, PrimitiveUpdate::Rotation(45.0))
            .unwrap();
        assert_eq!(adapter.primitive(handle).unwrap().geometry.rotation, 45.0);
        assert!(adapter
            .update_primitive(&99, PrimitiveUpdate::Rotation(1.0))
            .is_err());
    }
}
