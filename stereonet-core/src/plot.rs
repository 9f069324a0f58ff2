/// The stereonet plot: registry, projection and drawing surface wired together
use tracing::{debug, info};

use crate::adapter::{FeatureRef, HoverBinding, RenderAdapter, VisualState};
use crate::config::StereonetConfig;
use crate::error::{Result, StereonetError};
use crate::geometry::Geometry;
use crate::graticule::{graticule_geometry, outline_geometry};
use crate::layout::Layout;
use crate::measurement::Measurement;
use crate::parse::{FeatureKind, Record};
use crate::projection::{EqualAreaProjection, Representation};
use crate::registry::{FeatureRegistry, LineFeature, LineId, PlaneFeature, PlaneId};
use crate::style::{
    Style, StyleTable, GRATICULE_CLASS, LINE_CLASS, OUTLINE_CLASS, PLANE_CLASS, POLE_CLASS,
};

/// Handles of the reference layer (outline and graticule).
#[derive(Debug, Clone)]
struct ReferenceLayer<H> {
    outline: Option<H>,
    graticule: Option<H>,
}

/// Identifiers produced by [`Stereonet::load`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSummary {
    pub planes: Vec<PlaneId>,
    pub lines: Vec<LineId>,
    /// Records dropped by validation.
    pub rejected: usize,
}

/// A stereonet plot drawing onto a render adapter.
pub struct Stereonet<A: RenderAdapter> {
    adapter: A,
    registry: FeatureRegistry<A::Handle>,
    layout: Layout,
    projection: EqualAreaProjection,
    styles: StyleTable,
    representation: Representation,
    show_graticule: bool,
    config: StereonetConfig,
    reference: ReferenceLayer<A::Handle>,
}

impl<A: RenderAdapter> Stereonet<A> {
    /// Build a plot and draw its reference layer.
    ///
    /// Fails with [`StereonetError::MissingSurface`] when neither the config
    /// nor the adapter can say how large the plot is.
    pub fn new(adapter: A, config: StereonetConfig) -> Result<Self> {
        let size = config
            .size
            .or_else(|| adapter.surface_size())
            .ok_or(StereonetError::MissingSurface)?;
        let layout = Layout::new(size)?;
        let projection = layout.projection(config.band_width, config.point_size);

        let mut plot = Self {
            adapter,
            registry: FeatureRegistry::new(),
            layout,
            projection,
            styles: StyleTable::with_overrides(&config.styles),
            representation: config.representation,
            show_graticule: config.show_graticule,
            config,
            reference: ReferenceLayer {
                outline: None,
                graticule: None,
            },
        };
        plot.adapter.resize(size);
        plot.draw_reference()?;
        Ok(plot)
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn projection(&self) -> &EqualAreaProjection {
        &self.projection
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    pub fn graticule_visible(&self) -> bool {
        self.show_graticule
    }

    /// Plot a plane. Returns `None` (with a warning) for an out-of-range
    /// measurement, leaving the plot untouched.
    pub fn add_plane(&mut self, dip_angle: f64, dip_direction: f64) -> Result<Option<PlaneId>> {
        let Some(measurement) = Measurement::new(dip_angle, dip_direction) else {
            return Ok(None);
        };
        let representation = self.representation;
        let geometry = self
            .projection
            .plane_geometry(representation, dip_angle, dip_direction);
        let class = plane_class(representation);

        let next_id = self.registry.next_plane_id()?;
        let hover = HoverBinding {
            feature: FeatureRef::Plane(next_id),
            style_class: class.to_string(),
            measurement,
        };
        let handle = self.draw(&geometry, class, Some(hover))?;
        let id = self
            .registry
            .insert_plane(measurement, representation, Some(handle))?;
        debug!(%id, dip_angle, dip_direction, %representation, "plane added");
        Ok(Some(id))
    }

    /// Plot a linear feature as a point. Same contract as [`Self::add_plane`].
    pub fn add_line(&mut self, dip_angle: f64, dip_direction: f64) -> Result<Option<LineId>> {
        let Some(measurement) = Measurement::new(dip_angle, dip_direction) else {
            return Ok(None);
        };
        let geometry = self
            .projection
            .line_to_point_geometry(dip_angle, dip_direction);

        let next_id = self.registry.next_line_id()?;
        let hover = HoverBinding {
            feature: FeatureRef::Line(next_id),
            style_class: LINE_CLASS.to_string(),
            measurement,
        };
        let handle = self.draw(&geometry, LINE_CLASS, Some(hover))?;
        let id = self.registry.insert_line(measurement, Some(handle))?;
        debug!(%id, dip_angle, dip_direction, "line added");
        Ok(Some(id))
    }

    /// Remove a plane; unknown ids are ignored.
    pub fn remove_plane(&mut self, id: PlaneId) {
        if let Some(plane) = self.registry.plane_mut(id) {
            if let Some(handle) = plane.handle.take() {
                self.adapter.dispose_primitive(handle);
            }
            self.registry.remove_plane(id);
            debug!(%id, "plane removed");
        }
    }

    /// Remove a line; unknown ids are ignored.
    pub fn remove_line(&mut self, id: LineId) {
        if let Some(line) = self.registry.line_mut(id) {
            if let Some(handle) = line.handle.take() {
                self.adapter.dispose_primitive(handle);
            }
            self.registry.remove_line(id);
            debug!(%id, "line removed");
        }
    }

    pub fn planes(&self) -> Vec<(PlaneId, Option<A::Handle>)> {
        self.registry.planes()
    }

    pub fn lines(&self) -> Vec<(LineId, Option<A::Handle>)> {
        self.registry.lines()
    }

    pub fn plane(&self, id: PlaneId) -> Option<&PlaneFeature<A::Handle>> {
        self.registry.plane(id)
    }

    pub fn line(&self, id: LineId) -> Option<&LineFeature<A::Handle>> {
        self.registry.line(id)
    }

    pub fn plane_count(&self) -> usize {
        self.registry.plane_count()
    }

    pub fn line_count(&self) -> usize {
        self.registry.line_count()
    }

    /// Parse-and-set convenience for callers holding a mode name.
    pub fn set_representation_str(&mut self, mode: &str) -> Result<()> {
        let representation = mode.parse::<Representation>()?;
        self.set_representation(representation)
    }

    /// Redraw every plane under a new representation. Lines are untouched.
    ///
    /// All new primitives are created before any old one is disposed. If the
    /// surface fails part way, the new primitives are rolled back and the
    /// plot keeps its previous representation.
    pub fn set_representation(&mut self, representation: Representation) -> Result<()> {
        let class = plane_class(representation);
        let staged: Vec<(PlaneId, Geometry, Measurement)> = self
            .registry
            .plane_features()
            .map(|plane| {
                let m = plane.measurement;
                let geometry =
                    self.projection
                        .plane_geometry(representation, m.dip_angle(), m.dip_direction());
                (plane.id, geometry, m)
            })
            .collect();

        let mut created: Vec<(PlaneId, A::Handle)> = Vec::with_capacity(staged.len());
        for (id, geometry, measurement) in &staged {
            let hover = HoverBinding {
                feature: FeatureRef::Plane(*id),
                style_class: class.to_string(),
                measurement: *measurement,
            };
            match self.draw(geometry, class, Some(hover)) {
                Ok(handle) => created.push((*id, handle)),
                Err(err) => {
                    for (_, handle) in created {
                        self.adapter.dispose_primitive(handle);
                    }
                    return Err(err);
                }
            }
        }

        for (id, handle) in created {
            if let Some(plane) = self.registry.plane_mut(id) {
                if let Some(old) = plane.handle.replace(handle) {
                    self.adapter.dispose_primitive(old);
                }
                plane.representation = representation;
            }
        }
        self.representation = representation;
        info!(%representation, planes = staged.len(), "representation switched");
        Ok(())
    }

    /// Register or merge a style class.
    pub fn set_style(&mut self, class_name: &str, style: &Style) {
        self.styles.set(class_name, style);
    }

    pub fn style(&self, class_name: &str) -> Result<&Style> {
        self.styles.get(class_name)
    }

    /// Show or hide the outline and graticule.
    pub fn set_graticule_visible(&mut self, visible: bool) -> Result<()> {
        if visible == self.show_graticule {
            return Ok(());
        }
        self.show_graticule = visible;
        if !visible {
            self.dispose_reference();
            return Ok(());
        }
        if let Err(err) = self.draw_reference() {
            self.show_graticule = false;
            return Err(err);
        }
        Ok(())
    }

    /// Rebuild the whole plot for a new container width.
    ///
    /// Every primitive is cleared and re-created from the stored
    /// measurements, never from previously derived geometry.
    pub fn resize(&mut self, width: f64) -> Result<()> {
        let layout = Layout::new(width)?;
        self.layout = layout;
        self.projection = layout.projection(self.config.band_width, self.config.point_size);

        self.adapter.clear();
        self.reference.outline = None;
        self.reference.graticule = None;
        for plane in self.registry.planes_mut() {
            plane.handle = None;
        }
        for line in self.registry.lines_mut() {
            line.handle = None;
        }
        self.adapter.resize(layout.size);
        info!(size = layout.size, "plot resized");

        self.draw_reference()?;
        self.redraw_features()
    }

    /// Apply parsed records. Out-of-range records are counted and skipped.
    pub fn load(&mut self, records: &[Record]) -> Result<LoadSummary> {
        let mut summary = LoadSummary::default();
        for record in records {
            match record.kind {
                FeatureKind::Plane => match self.add_plane(record.dip_angle, record.dip_direction)? {
                    Some(id) => summary.planes.push(id),
                    None => summary.rejected += 1,
                },
                FeatureKind::Line => match self.add_line(record.dip_angle, record.dip_direction)? {
                    Some(id) => summary.lines.push(id),
                    None => summary.rejected += 1,
                },
            }
        }
        Ok(summary)
    }

    fn redraw_features(&mut self) -> Result<()> {
        let representation = self.representation;
        let class = plane_class(representation);
        let plane_ids: Vec<PlaneId> = self.registry.plane_features().map(|p| p.id).collect();
        for id in plane_ids {
            let Some(measurement) = self.registry.plane(id).map(|p| p.measurement) else {
                continue;
            };
            let geometry = self.projection.plane_geometry(
                representation,
                measurement.dip_angle(),
                measurement.dip_direction(),
            );
            let hover = HoverBinding {
                feature: FeatureRef::Plane(id),
                style_class: class.to_string(),
                measurement,
            };
            let handle = self.draw(&geometry, class, Some(hover))?;
            if let Some(plane) = self.registry.plane_mut(id) {
                plane.handle = Some(handle);
                plane.representation = representation;
            }
        }

        let line_ids: Vec<LineId> = self.registry.line_features().map(|l| l.id).collect();
        for id in line_ids {
            let Some(measurement) = self.registry.line(id).map(|l| l.measurement) else {
                continue;
            };
            let geometry = self
                .projection
                .line_to_point_geometry(measurement.dip_angle(), measurement.dip_direction());
            let hover = HoverBinding {
                feature: FeatureRef::Line(id),
                style_class: LINE_CLASS.to_string(),
                measurement,
            };
            let handle = self.draw(&geometry, LINE_CLASS, Some(hover))?;
            if let Some(line) = self.registry.line_mut(id) {
                line.handle = Some(handle);
            }
        }
        Ok(())
    }

    fn draw_reference(&mut self) -> Result<()> {
        if !self.show_graticule {
            return Ok(());
        }
        let outline = outline_geometry(&self.projection);
        let graticule = graticule_geometry(&self.projection);
        let graticule_style = self.styles.get(GRATICULE_CLASS)?.clone();
        let graticule_handle =
            self.adapter
                .create_primitive(&graticule, GRATICULE_CLASS, &graticule_style, None)?;
        let outline_style = self.styles.get(OUTLINE_CLASS)?.clone();
        let outline_handle =
            match self
                .adapter
                .create_primitive(&outline, OUTLINE_CLASS, &outline_style, None)
            {
                Ok(handle) => handle,
                Err(err) => {
                    self.adapter.dispose_primitive(graticule_handle);
                    return Err(err.into());
                }
            };
        self.reference.graticule = Some(graticule_handle);
        self.reference.outline = Some(outline_handle);
        Ok(())
    }

    fn dispose_reference(&mut self) {
        if let Some(handle) = self.reference.graticule.take() {
            self.adapter.dispose_primitive(handle);
        }
        if let Some(handle) = self.reference.outline.take() {
            self.adapter.dispose_primitive(handle);
        }
    }

    /// Create a primitive and start its fade-in, if animation is enabled.
    fn draw(
        &mut self,
        geometry: &Geometry,
        class: &str,
        hover: Option<HoverBinding>,
    ) -> Result<A::Handle> {
        let style = self.styles.get(class)?.clone();
        let handle = self
            .adapter
            .create_primitive(geometry, class, &style, hover)?;
        if let Some(duration) = self.config.animation {
            self.adapter
                .animate(&handle, VisualState::HIDDEN, VisualState::VISIBLE, duration);
        }
        Ok(handle)
    }
}

fn plane_class(representation: Representation) -> &'static str {
    match representation {
        Representation::Arc => PLANE_CLASS,
        Representation::Pole => POLE_CLASS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PrimitiveKind;
    use crate::recording::{RecordingAdapter, RenderEvent};
    use std::collections::BTreeSet;

    fn plot() -> Stereonet<RecordingAdapter> {
        Stereonet::new(
            RecordingAdapter::new(),
            StereonetConfig::default().with_size(400.0),
        )
        .unwrap()
    }

    fn plane_ids(plot: &Stereonet<RecordingAdapter>) -> Vec<PlaneId> {
        plot.planes().into_iter().map(|(id, _)| id).collect()
    }

    #[test]
    fn test_sequential_plane_ids() {
        let mut plot = plot();
        let ids: Vec<_> = [(30.0, 45.0), (60.0, 90.0), (83.2, 257.0)]
            .into_iter()
            .map(|(dip, dir)| plot.add_plane(dip, dir).unwrap().unwrap())
            .collect();
        assert_eq!(ids, vec![PlaneId(0), PlaneId(1), PlaneId(2)]);
        assert_eq!(plane_ids(&plot), ids);
    }

    #[test]
    fn test_rejected_measurement_leaves_registry_alone() {
        let mut plot = plot();
        let before = plot.adapter().live_count();
        assert_eq!(plot.add_plane(95.0, 45.0).unwrap(), None);
        assert_eq!(plot.add_line(45.0, 400.0).unwrap(), None);
        assert_eq!(plot.plane_count(), 0);
        assert_eq!(plot.line_count(), 0);
        assert_eq!(plot.adapter().live_count(), before);
        assert_eq!(plot.add_plane(30.0, 45.0).unwrap(), Some(PlaneId(0)));
    }

    #[test]
    fn test_removing_line_keeps_plane() {
        let mut plot = plot();
        let line = plot.add_line(45.0, 336.6546).unwrap().unwrap();
        // Out-of-range plane: direction 45 is fine but dip 336.6546 is not
        assert_eq!(plot.add_plane(336.6546, 45.0).unwrap(), None);
        let plane = plot.add_plane(45.0, 336.6546).unwrap().unwrap();
        assert_eq!(line.0, plane.0);

        plot.remove_line(line);
        assert!(plot.lines().is_empty());
        assert_eq!(plane_ids(&plot), vec![plane]);
    }

    #[test]
    fn test_remove_disposes_and_is_idempotent() {
        let mut plot = plot();
        let a = plot.add_plane(30.0, 45.0).unwrap().unwrap();
        let b = plot.add_plane(60.0, 90.0).unwrap().unwrap();
        let handle = plot.plane(a).unwrap().handle.unwrap();

        plot.remove_plane(a);
        assert!(plot.adapter().primitive(handle).is_none());
        assert_eq!(plane_ids(&plot), vec![b]);

        let events = plot.adapter().events().len();
        plot.remove_plane(a);
        assert_eq!(plot.adapter().events().len(), events);

        // The freed id is not handed out again
        assert_eq!(plot.add_plane(10.0, 10.0).unwrap(), Some(PlaneId(2)));
    }

    #[test]
    fn test_representation_round_trip_keeps_measurements() {
        let mut plot = plot();
        for (dip, dir) in [(30.0, 45.0), (60.0, 90.0), (83.2, 257.0)] {
            plot.add_plane(dip, dir).unwrap();
        }
        plot.add_line(20.0, 10.0).unwrap();
        let before: Vec<Measurement> = plane_ids(&plot)
            .into_iter()
            .map(|id| plot.plane(id).unwrap().measurement)
            .collect();
        let line_handle = plot.lines()[0].1;

        plot.set_representation(Representation::Pole).unwrap();
        assert_eq!(plot.adapter().live_of_kind(PrimitiveKind::Arc), 0);
        assert_eq!(plot.adapter().live_of_kind(PrimitiveKind::Point), 4);
        assert_eq!(plot.lines()[0].1, line_handle);

        plot.set_representation_str("arc").unwrap();
        assert_eq!(plot.adapter().live_of_kind(PrimitiveKind::Arc), 3);
        let after: Vec<Measurement> = plane_ids(&plot)
            .into_iter()
            .map(|id| plot.plane(id).unwrap().measurement)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_pole_primitive_uses_pole_class() {
        let mut plot = plot();
        plot.set_representation(Representation::Pole).unwrap();
        let id = plot.add_plane(30.0, 257.0).unwrap().unwrap();
        let handle = plot.plane(id).unwrap().handle.unwrap();
        let primitive = plot.adapter().primitive(handle).unwrap();
        assert_eq!(primitive.style_class, POLE_CLASS);
        assert!((primitive.geometry.rotation - 77.0).abs() < 1e-12);
        assert_eq!(
            primitive.hover.as_ref().unwrap().feature,
            FeatureRef::Plane(id)
        );
    }

    #[test]
    fn test_invalid_mode_changes_nothing() {
        let mut plot = plot();
        plot.add_plane(30.0, 45.0).unwrap();
        let events = plot.adapter().events().len();
        let err = plot.set_representation_str("rose").unwrap_err();
        assert_eq!(err, StereonetError::InvalidRepresentation("rose".to_string()));
        assert_eq!(plot.representation(), Representation::Arc);
        assert_eq!(plot.adapter().events().len(), events);
    }

    #[test]
    fn test_failed_switch_rolls_back() {
        let mut plot = plot();
        for (dip, dir) in [(30.0, 45.0), (60.0, 90.0), (83.2, 257.0)] {
            plot.add_plane(dip, dir).unwrap();
        }
        let before = plot.planes();
        let live = plot.adapter().live_count();

        plot.adapter_mut().fail_after(2);
        assert!(matches!(
            plot.set_representation(Representation::Pole),
            Err(StereonetError::Render(_))
        ));
        plot.adapter_mut().stop_failing();

        assert_eq!(plot.planes(), before);
        assert_eq!(plot.representation(), Representation::Arc);
        assert_eq!(plot.adapter().live_count(), live);
        assert_eq!(plot.adapter().live_of_kind(PrimitiveKind::Arc), 3);
    }

    #[test]
    fn test_resize_rebuilds_from_measurements() {
        let mut plot = plot();
        for (dip, dir) in [(30.0, 45.0), (60.0, 90.0)] {
            plot.add_plane(dip, dir).unwrap();
        }
        plot.add_line(45.0, 336.6546).unwrap();
        let planes_before: BTreeSet<PlaneId> = plane_ids(&plot).into_iter().collect();
        let lines_before = plot.lines().len();

        plot.resize(800.0).unwrap();
        plot.resize(250.0).unwrap();
        plot.resize(800.0).unwrap();

        let planes_after: BTreeSet<PlaneId> = plane_ids(&plot).into_iter().collect();
        assert_eq!(planes_before, planes_after);
        assert_eq!(plot.lines().len(), lines_before);
        assert_eq!(plot.layout().height(), 800.0);
        assert!(plot.adapter().events().contains(&RenderEvent::Cleared));

        // Geometry after repeated resizes matches a fresh projection exactly
        let (line_id, line_handle) = plot.lines()[0];
        let m = plot.line(line_id).unwrap().measurement;
        let expected = plot
            .projection()
            .line_to_point_geometry(m.dip_angle(), m.dip_direction());
        let drawn = &plot.adapter().primitive(line_handle.unwrap()).unwrap().geometry;
        assert_eq!(drawn, &expected);

        // Outline, graticule, two arcs, one point
        assert_eq!(plot.adapter().live_count(), 5);
    }

    #[test]
    fn test_resize_rejects_bad_width() {
        let mut plot = plot();
        assert_eq!(plot.resize(0.0), Err(StereonetError::InvalidSize(0.0)));
        assert_eq!(plot.layout().width(), 400.0);
    }

    #[test]
    fn test_missing_surface_is_fatal() {
        let result = Stereonet::new(RecordingAdapter::new(), StereonetConfig::default());
        assert!(matches!(result, Err(StereonetError::MissingSurface)));

        let plot = Stereonet::new(
            RecordingAdapter::with_surface_size(300.0),
            StereonetConfig::default(),
        )
        .unwrap();
        assert_eq!(plot.layout().width(), 300.0);
    }

    #[test]
    fn test_graticule_toggle() {
        let mut plot = Stereonet::new(
            RecordingAdapter::new(),
            StereonetConfig::default()
                .with_size(200.0)
                .with_graticule(false),
        )
        .unwrap();
        assert_eq!(plot.adapter().live_count(), 0);

        plot.set_graticule_visible(true).unwrap();
        assert_eq!(plot.adapter().live_of_kind(PrimitiveKind::Outline), 1);
        assert_eq!(plot.adapter().live_of_kind(PrimitiveKind::Graticule), 1);

        plot.set_graticule_visible(false).unwrap();
        assert_eq!(plot.adapter().live_count(), 0);
    }

    #[test]
    fn test_failed_graticule_show_can_be_retried() {
        let mut plot = Stereonet::new(
            RecordingAdapter::new(),
            StereonetConfig::default()
                .with_size(200.0)
                .with_graticule(false),
        )
        .unwrap();
        plot.adapter_mut().fail_after(0);
        assert!(plot.set_graticule_visible(true).is_err());
        assert!(!plot.graticule_visible());
        assert_eq!(plot.adapter().live_count(), 0);

        plot.adapter_mut().stop_failing();
        plot.set_graticule_visible(true).unwrap();
        assert!(plot.graticule_visible());
        assert_eq!(plot.adapter().live_of_kind(PrimitiveKind::Outline), 1);
        assert_eq!(plot.adapter().live_of_kind(PrimitiveKind::Graticule), 1);
    }

    #[test]
    fn test_resize_keeps_hidden_graticule_hidden() {
        let mut plot = Stereonet::new(
            RecordingAdapter::new(),
            StereonetConfig::default()
                .with_size(200.0)
                .with_graticule(false),
        )
        .unwrap();
        plot.add_plane(30.0, 45.0).unwrap();
        plot.add_line(45.0, 336.6546).unwrap();

        plot.resize(500.0).unwrap();

        let canvas = plot.adapter();
        assert_eq!(canvas.live_of_kind(PrimitiveKind::Outline), 0);
        assert_eq!(canvas.live_of_kind(PrimitiveKind::Graticule), 0);
        assert_eq!(canvas.live_of_kind(PrimitiveKind::Arc), 1);
        assert_eq!(canvas.live_of_kind(PrimitiveKind::Point), 1);
        assert_eq!(canvas.live_count(), 2);
    }

    #[test]
    fn test_style_lookup() {
        let mut plot = plot();
        assert!(matches!(
            plot.style("bedding"),
            Err(StereonetError::UnknownStyleClass(_))
        ));
        plot.set_style("bedding", &Style::new().stroke("brown"));
        assert_eq!(plot.style("bedding").unwrap().stroke.as_deref(), Some("brown"));
    }

    #[test]
    fn test_fade_in_follows_config() {
        let mut plot = plot();
        let id = plot.add_line(10.0, 10.0).unwrap().unwrap();
        let handle = plot.line(id).unwrap().handle.unwrap();
        assert!(plot
            .adapter()
            .events()
            .iter()
            .any(|e| matches!(e, RenderEvent::Animated(h, _) if *h == handle)));

        let mut still = Stereonet::new(
            RecordingAdapter::new(),
            StereonetConfig::default()
                .with_size(200.0)
                .with_animation(None),
        )
        .unwrap();
        still.add_line(10.0, 10.0).unwrap();
        assert!(!still
            .adapter()
            .events()
            .iter()
            .any(|e| matches!(e, RenderEvent::Animated(..))));
    }

    #[test]
    fn test_load_batch_tolerates_bad_entries() {
        let mut plot = plot();
        let records = crate::parse::parse_records(
            "plane 30/045\nplane 95/045\nline 45/336.6546\nnot a record\np 60/090\n",
        );
        let summary = plot.load(&records).unwrap();
        assert_eq!(summary.planes, vec![PlaneId(0), PlaneId(1)]);
        assert_eq!(summary.lines, vec![LineId(0)]);
        assert_eq!(summary.rejected, 1);
    }

    #[test]
    fn test_hover_shows_tooltip() {
        let mut plot = plot();
        let id = plot.add_plane(30.0, 45.0).unwrap().unwrap();
        let handle = plot.plane(id).unwrap().handle.unwrap();
        let binding = plot
            .adapter()
            .primitive(handle)
            .unwrap()
            .hover
            .clone()
            .unwrap();
        assert!(plot.adapter().tooltip().is_none());
        plot.adapter_mut().on_hover(&handle, &binding);
        assert_eq!(plot.adapter().tooltip(), Some("30/045"));
        plot.adapter_mut().on_hover_end(&handle);
        assert_eq!(plot.adapter().tooltip(), Some(""));
    }
}
