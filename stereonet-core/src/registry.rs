/// Authoritative store of plotted planes and lines
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, StereonetError};
use crate::measurement::Measurement;
use crate::projection::Representation;

/// Identifier of a plotted plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlaneId(pub u32);

/// Identifier of a plotted line. Numbered independently of planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub u32);

impl fmt::Display for PlaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plane#{}", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneFeature<H> {
    pub id: PlaneId,
    pub measurement: Measurement,
    pub representation: Representation,
    /// `None` while the primitive is pending creation.
    pub handle: Option<H>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineFeature<H> {
    pub id: LineId,
    pub measurement: Measurement,
    pub handle: Option<H>,
}

/// Two ordered maps with monotonic id counters.
///
/// Ids come from the counters, never from the map sizes, so an id is never
/// handed out twice even after removals. Because ids only grow, iteration in
/// key order is insertion order. A counter is `None` once `u32::MAX` has been
/// issued.
#[derive(Debug, Clone)]
pub struct FeatureRegistry<H> {
    planes: BTreeMap<PlaneId, PlaneFeature<H>>,
    lines: BTreeMap<LineId, LineFeature<H>>,
    next_plane: Option<u32>,
    next_line: Option<u32>,
}

impl<H: Clone> FeatureRegistry<H> {
    pub fn new() -> Self {
        Self {
            planes: BTreeMap::new(),
            lines: BTreeMap::new(),
            next_plane: Some(0),
            next_line: Some(0),
        }
    }

    /// Id the next inserted plane will receive.
    pub fn next_plane_id(&self) -> Result<PlaneId> {
        self.next_plane
            .map(PlaneId)
            .ok_or(StereonetError::IdsExhausted("plane"))
    }

    /// Id the next inserted line will receive.
    pub fn next_line_id(&self) -> Result<LineId> {
        self.next_line
            .map(LineId)
            .ok_or(StereonetError::IdsExhausted("line"))
    }

    pub fn insert_plane(
        &mut self,
        measurement: Measurement,
        representation: Representation,
        handle: Option<H>,
    ) -> Result<PlaneId> {
        let id = self.next_plane_id()?;
        self.next_plane = id.0.checked_add(1);
        self.planes.insert(
            id,
            PlaneFeature {
                id,
                measurement,
                representation,
                handle,
            },
        );
        Ok(id)
    }

    pub fn insert_line(&mut self, measurement: Measurement, handle: Option<H>) -> Result<LineId> {
        let id = self.next_line_id()?;
        self.next_line = id.0.checked_add(1);
        self.lines.insert(
            id,
            LineFeature {
                id,
                measurement,
                handle,
            },
        );
        Ok(id)
    }

    pub fn plane(&self, id: PlaneId) -> Option<&PlaneFeature<H>> {
        self.planes.get(&id)
    }

    pub fn line(&self, id: LineId) -> Option<&LineFeature<H>> {
        self.lines.get(&id)
    }

    pub(crate) fn plane_mut(&mut self, id: PlaneId) -> Option<&mut PlaneFeature<H>> {
        self.planes.get_mut(&id)
    }

    pub(crate) fn line_mut(&mut self, id: LineId) -> Option<&mut LineFeature<H>> {
        self.lines.get_mut(&id)
    }

    pub(crate) fn planes_mut(&mut self) -> impl Iterator<Item = &mut PlaneFeature<H>> {
        self.planes.values_mut()
    }

    pub(crate) fn lines_mut(&mut self) -> impl Iterator<Item = &mut LineFeature<H>> {
        self.lines.values_mut()
    }

    pub fn remove_plane(&mut self, id: PlaneId) -> Option<PlaneFeature<H>> {
        self.planes.remove(&id)
    }

    pub fn remove_line(&mut self, id: LineId) -> Option<LineFeature<H>> {
        self.lines.remove(&id)
    }

    /// Snapshot of `(id, handle)` pairs in insertion order.
    pub fn planes(&self) -> Vec<(PlaneId, Option<H>)> {
        self.planes
            .values()
            .map(|plane| (plane.id, plane.handle.clone()))
            .collect()
    }

    /// Snapshot of `(id, handle)` pairs in insertion order.
    pub fn lines(&self) -> Vec<(LineId, Option<H>)> {
        self.lines
            .values()
            .map(|line| (line.id, line.handle.clone()))
            .collect()
    }

    pub fn plane_features(&self) -> impl Iterator<Item = &PlaneFeature<H>> {
        self.planes.values()
    }

    pub fn line_features(&self) -> impl Iterator<Item = &LineFeature<H>> {
        self.lines.values()
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl<H: Clone> Default for FeatureRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
