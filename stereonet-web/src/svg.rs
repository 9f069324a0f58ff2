/// SVG drawing surface for the browser
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::rc::Rc;
use std::time::Duration;

use stereonet_core::{
    Geometry, HoverBinding, PrimitiveUpdate, RenderAdapter, RenderError, Shape, Style,
    VisualState,
};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent, Window};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

const TOOLTIP_STYLE: &str = "position:fixed;pointer-events:none;padding:2px 6px;\
background:rgba(0,0,0,0.75);color:#fff;font:12px sans-serif;border-radius:3px;display:none";

type Listener = Closure<dyn FnMut(MouseEvent)>;

struct SvgPrimitive {
    element: Element,
    opacity: f64,
    listeners: Vec<(&'static str, Listener)>,
}

/// Shared, lazily created tooltip element. One per surface.
#[derive(Clone)]
struct Tooltip {
    document: Document,
    element: Rc<RefCell<Option<Element>>>,
}

impl Tooltip {
    fn element(&self) -> Option<Element> {
        if let Some(element) = self.element.borrow().as_ref() {
            return Some(element.clone());
        }
        let element = self.document.create_element("div").ok()?;
        element.set_attribute("class", "stereonet-tooltip").ok()?;
        element.set_attribute("style", TOOLTIP_STYLE).ok()?;
        self.document.body()?.append_child(&element).ok()?;
        *self.element.borrow_mut() = Some(element.clone());
        Some(element)
    }

    fn show(&self, text: &str, x: i32, y: i32) {
        let Some(element) = self.element() else {
            warn!("tooltip could not be created");
            return;
        };
        element.set_text_content(Some(text));
        let style = format!(
            "{TOOLTIP_STYLE};display:block;left:{}px;top:{}px",
            x + 12,
            y + 12
        );
        let _ = element.set_attribute("style", &style);
    }

    fn hide(&self) {
        if let Some(element) = self.element.borrow().as_ref() {
            let _ = element.set_attribute("style", TOOLTIP_STYLE);
        }
    }

    fn remove(&self) {
        if let Some(element) = self.element.borrow_mut().take() {
            element.remove();
        }
    }
}

/// Render adapter that draws into an `<svg>` element inside a container.
pub struct SvgSurface {
    window: Window,
    document: Document,
    container: Element,
    svg: Element,
    primitives: HashMap<u32, SvgPrimitive>,
    next_handle: u32,
    tooltip: Tooltip,
}

impl SvgSurface {
    pub fn new(window: Window, document: Document, container: Element) -> Result<Self, JsValue> {
        let svg = document.create_element_ns(Some(SVG_NS), "svg")?;
        svg.set_attribute("class", "stereonet")?;
        container.append_child(&svg)?;
        let tooltip = Tooltip {
            document: document.clone(),
            element: Rc::new(RefCell::new(None)),
        };
        Ok(Self {
            window,
            document,
            container,
            svg,
            primitives: HashMap::new(),
            next_handle: 0,
            tooltip,
        })
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Remove the svg and tooltip from the page.
    pub fn detach(&mut self) {
        self.clear();
        self.svg.remove();
        self.tooltip.remove();
    }

    fn build_element(&self, geometry: &Geometry) -> Result<Element, JsValue> {
        let (tag, attributes) = shape_attributes(&geometry.shape);
        let element = self.document.create_element_ns(Some(SVG_NS), tag)?;
        for (name, value) in &attributes {
            element.set_attribute(name, value)?;
        }
        element.set_attribute(
            "transform",
            &format!(
                "rotate({} {} {})",
                geometry.rotation, geometry.center.x, geometry.center.y
            ),
        )?;
        Ok(element)
    }

    fn hover_listeners(&self, element: &Element, binding: HoverBinding) -> Vec<(&'static str, Listener)> {
        let label = binding.label();
        let show = {
            let tooltip = self.tooltip.clone();
            Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                tooltip.show(&label, event.client_x(), event.client_y());
            })
        };
        let hide = {
            let tooltip = self.tooltip.clone();
            Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| tooltip.hide())
        };
        let mut listeners = Vec::new();
        for (name, callback) in [("mouseover", show), ("mouseout", hide)] {
            match element.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref()) {
                Ok(()) => listeners.push((name, callback)),
                Err(err) => warn!(?err, name, "hover listener not attached"),
            }
        }
        listeners
    }
}

impl RenderAdapter for SvgSurface {
    type Handle = u32;

    fn surface_size(&self) -> Option<f64> {
        let width = self.container.client_width();
        (width > 0).then_some(width as f64)
    }

    fn create_primitive(
        &mut self,
        geometry: &Geometry,
        style_class: &str,
        style: &Style,
        hover: Option<HoverBinding>,
    ) -> Result<u32, RenderError> {
        let element = self.build_element(geometry).map_err(js_error)?;
        element.set_attribute("class", style_class).map_err(js_error)?;
        apply_style(&element, style).map_err(js_error)?;
        self.svg.append_child(&element).map_err(js_error)?;

        let listeners = match hover {
            Some(binding) => self.hover_listeners(&element, binding),
            None => Vec::new(),
        };
        let handle = self.next_handle;
        self.next_handle += 1;
        self.primitives.insert(
            handle,
            SvgPrimitive {
                element,
                opacity: style.opacity.unwrap_or(1.0),
                listeners,
            },
        );
        debug!(handle, style_class, "svg primitive created");
        Ok(handle)
    }

    fn update_primitive(&mut self, handle: &u32, update: PrimitiveUpdate) -> Result<(), RenderError> {
        let primitive = self
            .primitives
            .get_mut(handle)
            .ok_or_else(|| RenderError::new(format!("no svg primitive {handle}")))?;
        match update {
            PrimitiveUpdate::Shape(shape) => {
                let (tag, attributes) = shape_attributes(&shape);
                let current = primitive.element.tag_name();
                if current != tag {
                    return Err(RenderError::new(format!(
                        "cannot reshape svg <{current}> {handle} into <{tag}>"
                    )));
                }
                for (name, value) in &attributes {
                    primitive
                        .element
                        .set_attribute(name, value)
                        .map_err(js_error)?;
                }
            }
            PrimitiveUpdate::Rotation(rotation) => {
                let transform = primitive
                    .element
                    .get_attribute("transform")
                    .unwrap_or_default();
                // Keep the rotation center, swap the angle
                let center = transform
                    .trim_start_matches("rotate(")
                    .trim_end_matches(')')
                    .splitn(2, ' ')
                    .nth(1)
                    .unwrap_or("0 0")
                    .to_string();
                primitive
                    .element
                    .set_attribute("transform", &format!("rotate({rotation} {center})"))
                    .map_err(js_error)?;
            }
            PrimitiveUpdate::Style(style) => {
                apply_style(&primitive.element, &style).map_err(js_error)?;
                if let Some(opacity) = style.opacity {
                    primitive.opacity = opacity;
                }
            }
        }
        Ok(())
    }

    fn dispose_primitive(&mut self, handle: u32) {
        if let Some(primitive) = self.primitives.remove(&handle) {
            for (name, callback) in &primitive.listeners {
                let _ = primitive
                    .element
                    .remove_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
            }
            primitive.element.remove();
        }
    }

    fn clear(&mut self) {
        let handles: Vec<u32> = self.primitives.keys().copied().collect();
        for handle in handles {
            self.dispose_primitive(handle);
        }
        self.svg.set_inner_html("");
        self.tooltip.hide();
    }

    fn resize(&mut self, size: f64) {
        for (name, value) in [
            ("width", size.to_string()),
            ("height", size.to_string()),
            ("viewBox", format!("0 0 {size} {size}")),
        ] {
            if let Err(err) = self.svg.set_attribute(name, &value) {
                warn!(?err, name, "svg attribute not set");
            }
        }
    }

    fn animate(&mut self, handle: &u32, from: VisualState, to: VisualState, duration: Duration) {
        let Some(primitive) = self.primitives.get(handle) else {
            return;
        };
        let element = primitive.element.clone();
        let base = primitive.opacity;
        let transition = format!("transition:opacity {}ms ease-out", duration.as_millis());
        let _ = element.set_attribute("style", &format!("opacity:{};{transition}", base * from.opacity));

        // Fire and forget; a disposed element just ignores the late update
        let target = base * to.opacity;
        let callback = Closure::once_into_js(move || {
            let _ = element.set_attribute("style", &format!("opacity:{target};{transition}"));
        });
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 16)
        {
            warn!(?err, "fade-in not scheduled");
        }
    }

    fn on_hover(&mut self, handle: &u32, binding: &HoverBinding) {
        let Some(primitive) = self.primitives.get(handle) else {
            return;
        };
        let rect = primitive.element.get_bounding_client_rect();
        self.tooltip
            .show(&binding.label(), rect.right() as i32, rect.top() as i32);
    }

    fn on_hover_end(&mut self, _handle: &u32) {
        self.tooltip.hide();
    }
}

/// SVG element name and geometry attributes for a shape.
fn shape_attributes(shape: &Shape) -> (&'static str, Vec<(&'static str, String)>) {
    match shape {
        Shape::Polygon(ring) => ("path", vec![("d", path_data(std::slice::from_ref(ring), true))]),
        Shape::Polylines(paths) => ("path", vec![("d", path_data(paths, false))]),
        Shape::Point {
            position: center,
            radius,
        }
        | Shape::Circle { center, radius } => (
            "circle",
            vec![
                ("cx", center.x.to_string()),
                ("cy", center.y.to_string()),
                ("r", radius.to_string()),
            ],
        ),
    }
}

fn apply_style(element: &Element, style: &Style) -> Result<(), JsValue> {
    if let Some(stroke) = &style.stroke {
        element.set_attribute("stroke", stroke)?;
    }
    if let Some(fill) = &style.fill {
        element.set_attribute("fill", fill)?;
    }
    if let Some(width) = style.stroke_width {
        element.set_attribute("stroke-width", &width.to_string())?;
    }
    if let Some(opacity) = style.opacity {
        element.set_attribute("opacity", &opacity.to_string())?;
    }
    Ok(())
}

/// SVG path data for one or more point runs.
pub fn path_data(paths: &[Vec<nalgebra::Point2<f64>>], closed: bool) -> String {
    let mut data = String::new();
    for path in paths {
        for (i, point) in path.iter().enumerate() {
            let command = if i == 0 { 'M' } else { 'L' };
            let _ = write!(data, "{command}{:.2},{:.2}", point.x, point.y);
        }
        if closed && !path.is_empty() {
            data.push('Z');
        }
    }
    data
}

fn js_error(err: JsValue) -> RenderError {
    RenderError::new(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
