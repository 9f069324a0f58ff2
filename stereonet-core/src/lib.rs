/// Stereonet Core Library - Projection and plotting engine for structural geology
///
/// This library maps plane and line orientations (dip / dip direction) onto an
/// azimuthal equal-area stereonet, tracks plotted features in a registry, and
/// emits geometry to a pluggable drawing surface.

pub mod adapter;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graticule;
pub mod layout;
pub mod measurement;
pub mod parse;
pub mod plot;
pub mod projection;
pub mod recording;
pub mod registry;
pub mod style;

// Re-export commonly used types
pub use adapter::{FeatureRef, HoverBinding, PrimitiveUpdate, RenderAdapter, VisualState};
pub use config::StereonetConfig;
pub use error::{RenderError, Result, StereonetError};
pub use geometry::{Geometry, PrimitiveKind, Shape};
pub use layout::Layout;
pub use measurement::{pole_dip_direction, validate, Measurement, PoleCoordinates};
pub use parse::{parse_records, FeatureKind, Record};
pub use plot::{LoadSummary, Stereonet};
pub use projection::{EqualAreaProjection, Representation};
pub use recording::RecordingAdapter;
pub use registry::{LineFeature, LineId, PlaneFeature, PlaneId};
pub use style::{Style, StyleTable};
