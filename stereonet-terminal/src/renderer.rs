/// ASCII canvas that acts as a stereonet drawing surface
use std::collections::BTreeMap;
use std::io::Write;

use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use stereonet_core::style::LINE_CLASS;
use stereonet_core::{
    Geometry, HoverBinding, PrimitiveKind, PrimitiveUpdate, RenderAdapter, RenderError, Shape,
    Style,
};
use tracing::debug;

/// Rows reserved above the plot for the status bar.
pub const STATUS_ROWS: u16 = 1;

/// Sampling distance along strokes, in plot pixels.
const STROKE_STEP: f64 = 0.5;

/// Terminal cells are about twice as tall as they are wide, so one row holds
/// two plot pixels vertically.
const PIXELS_PER_ROW: f64 = 2.0;

struct CanvasPrimitive {
    geometry: Geometry,
    style_class: String,
    color: Color,
    hover: Option<HoverBinding>,
}

/// Character-cell surface. Each cell keeps the glyph of the highest layer
/// drawn into it, so data sits above the graticule regardless of draw order.
pub struct CanvasRenderer {
    width: usize,
    height: usize,
    layer_buffer: Vec<u8>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
    primitives: BTreeMap<u64, CanvasPrimitive>,
    next_handle: u64,
    focused: Option<u64>,
    /// Created on first hover and reused afterwards.
    tooltip: Option<String>,
}

impl CanvasRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            layer_buffer: vec![0; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
            primitives: BTreeMap::new(),
            next_handle: 0,
            focused: None,
            tooltip: None,
        }
    }

    /// Track a new terminal size. Primitives are kept; the plot rebuilds them.
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        let size = width * height;
        self.width = width;
        self.height = height;
        self.layer_buffer = vec![0; size];
        self.char_buffer = vec![' '; size];
        self.color_buffer = vec![Color::Reset; size];
    }

    /// Largest square plot, in pixels, that fits below the status bar.
    pub fn plot_size(&self) -> f64 {
        let rows = self.height.saturating_sub(STATUS_ROWS as usize) as f64;
        (self.width as f64).min(rows * PIXELS_PER_ROW)
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Hover binding attached to a primitive, if any.
    pub fn binding(&self, handle: u64) -> Option<&HoverBinding> {
        self.primitives.get(&handle).and_then(|p| p.hover.as_ref())
    }

    pub fn clear_buffers(&mut self) {
        self.layer_buffer.fill(0);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Rasterize every live primitive into the cell buffers.
    pub fn rasterize(&mut self) {
        self.clear_buffers();
        let origin = self.plot_origin();
        let mut marks = Vec::new();
        for (handle, primitive) in &self.primitives {
            let focused = self.focused == Some(*handle);
            let (glyph, layer) = glyph_for(primitive, focused);
            let color = if focused { Color::Yellow } else { primitive.color };
            for point in sample_shape(&primitive.geometry.placed_shape()) {
                marks.push((point, glyph, layer, color));
            }
        }
        for (point, glyph, layer, color) in marks {
            self.plot_pixel(origin, point, glyph, layer, color);
        }
    }

    fn plot_origin(&self) -> (f64, f64) {
        let size = self.plot_size();
        ((self.width as f64 - size) / 2.0, STATUS_ROWS as f64)
    }

    fn plot_pixel(
        &mut self,
        origin: (f64, f64),
        point: Point2<f64>,
        glyph: char,
        layer: u8,
        color: Color,
    ) {
        let col = (origin.0 + point.x).floor();
        let row = (origin.1 + point.y / PIXELS_PER_ROW).floor();
        if col < 0.0 || row < 0.0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return;
        }
        let idx = row * self.width + col;
        if layer >= self.layer_buffer[idx] {
            self.layer_buffer[idx] = layer;
            self.char_buffer[idx] = glyph;
            self.color_buffer[idx] = color;
        }
    }

    /// Glyph at a cell, for inspection.
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        (col < self.width && row < self.height).then(|| self.char_buffer[row * self.width + col])
    }

    /// Plain text rendering of the cell buffer, one line per row.
    pub fn to_text(&self) -> String {
        self.char_buffer
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl RenderAdapter for CanvasRenderer {
    type Handle = u64;

    fn surface_size(&self) -> Option<f64> {
        let size = self.plot_size();
        (size > 0.0).then_some(size)
    }

    fn create_primitive(
        &mut self,
        geometry: &Geometry,
        style_class: &str,
        style: &Style,
        hover: Option<HoverBinding>,
    ) -> Result<u64, RenderError> {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.primitives.insert(
            handle,
            CanvasPrimitive {
                geometry: geometry.clone(),
                style_class: style_class.to_string(),
                color: style_color(style),
                hover,
            },
        );
        debug!(handle, style_class, "canvas primitive created");
        Ok(handle)
    }

    fn update_primitive(&mut self, handle: &u64, update: PrimitiveUpdate) -> Result<(), RenderError> {
        let primitive = self
            .primitives
            .get_mut(handle)
            .ok_or_else(|| RenderError::new(format!("canvas has no primitive {handle}")))?;
        match update {
            PrimitiveUpdate::Shape(shape) => primitive.geometry.shape = shape,
            PrimitiveUpdate::Rotation(rotation) => primitive.geometry.rotation = rotation,
            PrimitiveUpdate::Style(style) => primitive.color = style_color(&style),
        }
        Ok(())
    }

    fn dispose_primitive(&mut self, handle: u64) {
        self.primitives.remove(&handle);
        if self.focused == Some(handle) {
            self.focused = None;
        }
    }

    fn clear(&mut self) {
        self.primitives.clear();
        self.focused = None;
        self.clear_buffers();
    }

    fn on_hover(&mut self, handle: &u64, binding: &HoverBinding) {
        self.focused = Some(*handle);
        let tooltip = self.tooltip.get_or_insert_with(String::new);
        *tooltip = format!("{} {}", binding.style_class, binding.label());
    }

    fn on_hover_end(&mut self, handle: &u64) {
        if self.focused == Some(*handle) {
            self.focused = None;
        }
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.clear();
        }
    }
}

fn glyph_for(primitive: &CanvasPrimitive, focused: bool) -> (char, u8) {
    if focused {
        return ('@', 5);
    }
    match primitive.geometry.kind {
        PrimitiveKind::Graticule => ('.', 1),
        PrimitiveKind::Outline => ('#', 2),
        PrimitiveKind::Arc => ('*', 3),
        PrimitiveKind::Point if primitive.style_class == LINE_CLASS => ('x', 4),
        PrimitiveKind::Point => ('o', 4),
    }
}

/// Pixels covered by a shape's strokes.
fn sample_shape(shape: &Shape) -> Vec<Point2<f64>> {
    match shape {
        Shape::Polygon(ring) => {
            let mut closed = ring.clone();
            if let Some(first) = ring.first() {
                closed.push(*first);
            }
            sample_path(&closed)
        }
        Shape::Polylines(paths) => paths.iter().flat_map(|path| sample_path(path)).collect(),
        Shape::Point { position, .. } => vec![*position],
        Shape::Circle { center, radius } => {
            let steps = ((std::f64::consts::TAU * radius) / STROKE_STEP).ceil().max(8.0) as usize;
            (0..steps)
                .map(|i| {
                    let theta = std::f64::consts::TAU * i as f64 / steps as f64;
                    Point2::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
                })
                .collect()
        }
    }
}

fn sample_path(path: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut samples = Vec::new();
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let steps = ((b - a).norm() / STROKE_STEP).ceil().max(1.0) as usize;
        for i in 0..steps {
            samples.push(a + (b - a) * (i as f64 / steps as f64));
        }
    }
    if let Some(last) = path.last() {
        samples.push(*last);
    }
    samples
}

/// Terminal color for a style's stroke (`#rgb`, `#rrggbb`, or a few names).
fn style_color(style: &Style) -> Color {
    let Some(stroke) = style.stroke.as_deref() else {
        return Color::Reset;
    };
    if let Some(hex) = stroke.strip_prefix('#') {
        if !hex.is_ascii() {
            return Color::Reset;
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Color::Reset,
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        return match (channel(0), channel(2), channel(4)) {
            (Some(r), Some(g), Some(b)) => Color::Rgb { r, g, b },
            _ => Color::Reset,
        };
    }
    match stroke.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "yellow" => Color::Yellow,
        "cyan" => Color::Cyan,
        "magenta" => Color::Magenta,
        "grey" | "gray" => Color::Grey,
        _ => Color::White,
    }
}
