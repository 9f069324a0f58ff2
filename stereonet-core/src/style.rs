/// Per-class style table consulted by render adapters
use std::collections::HashMap;

use crate::error::{Result, StereonetError};

pub const OUTLINE_CLASS: &str = "outline";
pub const GRATICULE_CLASS: &str = "graticule";
pub const PLANE_CLASS: &str = "plane";
pub const POLE_CLASS: &str = "pole";
pub const LINE_CLASS: &str = "line";

/// Presentation attributes for one feature class. Unset fields fall through
/// to whatever the class already had when merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub stroke: Option<String>,
    pub fill: Option<String>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke = Some(color.into());
        self
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Overlay `other` on top of `self`.
    pub fn merged(&self, other: &Style) -> Style {
        Style {
            stroke: other.stroke.clone().or_else(|| self.stroke.clone()),
            fill: other.fill.clone().or_else(|| self.fill.clone()),
            stroke_width: other.stroke_width.or(self.stroke_width),
            opacity: other.opacity.or(self.opacity),
        }
    }
}

/// Style table keyed by class name.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    classes: HashMap<String, Style>,
}

impl StyleTable {
    pub fn empty() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Register or merge a class.
    pub fn set(&mut self, class_name: &str, style: &Style) {
        let merged = match self.classes.get(class_name) {
            Some(existing) => existing.merged(style),
            None => style.clone(),
        };
        self.classes.insert(class_name.to_string(), merged);
    }

    pub fn get(&self, class_name: &str) -> Result<&Style> {
        self.classes
            .get(class_name)
            .ok_or_else(|| StereonetError::UnknownStyleClass(class_name.to_string()))
    }

    /// Defaults with user overrides merged on top, class by class.
    pub fn with_overrides(overrides: &HashMap<String, Style>) -> Self {
        let mut table = Self::default();
        for (class_name, style) in overrides {
            table.set(class_name, style);
        }
        table
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.set(
            OUTLINE_CLASS,
            &Style::new().stroke("#000").fill("none").stroke_width(1.5),
        );
        table.set(
            GRATICULE_CLASS,
            &Style::new()
                .stroke("#777")
                .fill("none")
                .stroke_width(0.5)
                .opacity(0.5),
        );
        table.set(
            PLANE_CLASS,
            &Style::new().stroke("#1f77b4").fill("#1f77b4").stroke_width(1.0),
        );
        table.set(POLE_CLASS, &Style::new().stroke("#1f77b4").fill("#1f77b4"));
        table.set(LINE_CLASS, &Style::new().stroke("#d62728").fill("#d62728"));
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_registered() {
        let table = StyleTable::default();
        for class_name in [OUTLINE_CLASS, GRATICULE_CLASS, PLANE_CLASS, POLE_CLASS, LINE_CLASS] {
            assert!(table.get(class_name).is_ok());
        }
    }

    #[test]
    fn test_unknown_class_is_not_found() {
        let table = StyleTable::default();
        assert_eq!(
            table.get("fold-axis"),
            Err(StereonetError::UnknownStyleClass("fold-axis".to_string()))
        );
    }

    #[test]
    fn test_set_merges_over_existing() {
        let mut table = StyleTable::default();
        table.set(PLANE_CLASS, &Style::new().stroke("green"));
        let style = table.get(PLANE_CLASS).unwrap();
        assert_eq!(style.stroke.as_deref(), Some("green"));
        assert_eq!(style.fill.as_deref(), Some("#1f77b4"));
        assert_eq!(style.stroke_width, Some(1.0));
    }

    #[test]
    fn test_overrides_add_new_classes() {
        let mut overrides = HashMap::new();
        overrides.insert("bedding".to_string(), Style::new().fill("tan"));
        let table = StyleTable::with_overrides(&overrides);
        assert_eq!(table.get("bedding").unwrap().fill.as_deref(), Some("tan"));
        assert!(table.get(LINE_CLASS).is_ok());
    }
}
