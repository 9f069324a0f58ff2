/// Stereonet Web - SVG stereonet for the browser via wasm-bindgen
///
/// Exposes [`WebStereonet`] to JavaScript. Geometry is drawn by
/// [`svg::SvgSurface`]; the plot follows window resizes unless a fixed size
/// was given.
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use stereonet_core::{
    LineId, PlaneId, RenderAdapter, Stereonet, StereonetConfig, StereonetError, Style,
};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

pub mod svg;

use svg::SvgSurface;

type SharedPlot = Rc<RefCell<Stereonet<SvgSurface>>>;

/// Window resize listener, detached on `unsubscribe` or drop.
pub struct ResizeSubscription {
    window: Window,
    callback: Closure<dyn FnMut()>,
}

impl ResizeSubscription {
    fn attach(window: &Window, plot: &SharedPlot) -> Result<Self, JsValue> {
        let plot = Rc::clone(plot);
        let callback = Closure::<dyn FnMut()>::new(move || {
            let Ok(mut plot) = plot.try_borrow_mut() else {
                return;
            };
            let Some(width) = plot.adapter().surface_size() else {
                return;
            };
            if (width - plot.layout().width()).abs() < 0.5 {
                return;
            }
            if let Err(err) = plot.resize(width) {
                warn!(%err, width, "resize failed");
            }
        });
        window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
        Ok(Self {
            window: window.clone(),
            callback,
        })
    }

    pub fn unsubscribe(self) {}
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
    }
}

#[wasm_bindgen]
pub struct WebStereonet {
    plot: SharedPlot,
    subscription: Option<ResizeSubscription>,
}

#[wasm_bindgen]
impl WebStereonet {
    /// Create a plot inside a container. Exactly one of `selector` and
    /// `container` must be given.
    #[wasm_bindgen(constructor)]
    pub fn new(
        selector: Option<String>,
        container: Option<Element>,
        size: Option<f64>,
        representation: Option<String>,
        animation_ms: Option<u32>,
        show_graticule: Option<bool>,
        point_size: Option<f64>,
    ) -> Result<WebStereonet, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let container = match (selector, container) {
            (Some(selector), None) => document.query_selector(&selector)?.ok_or_else(|| {
                JsValue::from_str(&format!("no element matches selector `{selector}`"))
            })?,
            (None, Some(container)) => container,
            (Some(_), Some(_)) => {
                return Err(JsValue::from_str(
                    "pass either a selector or a container element, not both",
                ))
            }
            (None, None) => return Err(to_js(StereonetError::MissingSurface)),
        };

        let mut config = StereonetConfig::default();
        if let Some(size) = size {
            config = config.with_size(size);
        }
        if let Some(mode) = representation {
            config = config.with_representation(mode.parse().map_err(to_js)?);
        }
        if let Some(ms) = animation_ms {
            config = config.with_animation(Some(Duration::from_millis(ms as u64)));
        }
        if let Some(visible) = show_graticule {
            config = config.with_graticule(visible);
        }
        if let Some(point_size) = point_size {
            config = config.with_point_size(point_size);
        }

        let surface = SvgSurface::new(window.clone(), document, container)?;
        let plot = Rc::new(RefCell::new(Stereonet::new(surface, config).map_err(to_js)?));
        let subscription = match size {
            Some(_) => None,
            None => Some(ResizeSubscription::attach(&window, &plot)?),
        };
        info!("stereonet attached");
        Ok(WebStereonet { plot, subscription })
    }

    #[wasm_bindgen(js_name = addPlane)]
    pub fn add_plane(&self, dip_angle: f64, dip_direction: f64) -> Result<Option<u32>, JsValue> {
        let id = self
            .plot
            .borrow_mut()
            .add_plane(dip_angle, dip_direction)
            .map_err(to_js)?;
        Ok(id.map(|id| id.0))
    }

    #[wasm_bindgen(js_name = addLine)]
    pub fn add_line(&self, dip_angle: f64, dip_direction: f64) -> Result<Option<u32>, JsValue> {
        let id = self
            .plot
            .borrow_mut()
            .add_line(dip_angle, dip_direction)
            .map_err(to_js)?;
        Ok(id.map(|id| id.0))
    }

    #[wasm_bindgen(js_name = removePlane)]
    pub fn remove_plane(&self, id: u32) {
        self.plot.borrow_mut().remove_plane(PlaneId(id));
    }

    #[wasm_bindgen(js_name = removeLine)]
    pub fn remove_line(&self, id: u32) {
        self.plot.borrow_mut().remove_line(LineId(id));
    }

    /// Plane ids in insertion order.
    #[wasm_bindgen(js_name = getPlanes)]
    pub fn planes(&self) -> Vec<u32> {
        self.plot
            .borrow()
            .planes()
            .into_iter()
            .map(|(id, _)| id.0)
            .collect()
    }

    /// Line ids in insertion order.
    #[wasm_bindgen(js_name = getLines)]
    pub fn lines(&self) -> Vec<u32> {
        self.plot
            .borrow()
            .lines()
            .into_iter()
            .map(|(id, _)| id.0)
            .collect()
    }

    #[wasm_bindgen(js_name = setRepresentation)]
    pub fn set_representation(&self, mode: &str) -> Result<(), JsValue> {
        self.plot
            .borrow_mut()
            .set_representation_str(mode)
            .map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn representation(&self) -> String {
        self.plot.borrow().representation().to_string()
    }

    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(
        &self,
        class_name: &str,
        stroke: Option<String>,
        fill: Option<String>,
        stroke_width: Option<f64>,
        opacity: Option<f64>,
    ) {
        let style = Style {
            stroke,
            fill,
            stroke_width,
            opacity,
        };
        self.plot.borrow_mut().set_style(class_name, &style);
    }

    /// Style of a class as a CSS declaration list.
    #[wasm_bindgen(js_name = getStyle)]
    pub fn style(&self, class_name: &str) -> Result<String, JsValue> {
        let plot = self.plot.borrow();
        let style = plot.style(class_name).map_err(to_js)?;
        Ok(css_declarations(style))
    }

    #[wasm_bindgen(js_name = setGraticuleVisible)]
    pub fn set_graticule_visible(&self, visible: bool) -> Result<(), JsValue> {
        self.plot
            .borrow_mut()
            .set_graticule_visible(visible)
            .map_err(to_js)
    }

    /// Rebuild the plot at an explicit width.
    pub fn resize(&self, width: f64) -> Result<(), JsValue> {
        self.plot.borrow_mut().resize(width).map_err(to_js)
    }

    /// Stop following window resizes and remove the plot from the page.
    pub fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.plot.borrow_mut().adapter_mut().detach();
    }
}

fn css_declarations(style: &Style) -> String {
    let mut parts = Vec::new();
    if let Some(stroke) = &style.stroke {
        parts.push(format!("stroke:{stroke}"));
    }
    if let Some(fill) = &style.fill {
        parts.push(format!("fill:{fill}"));
    }
    if let Some(width) = style.stroke_width {
        parts.push(format!("stroke-width:{width}"));
    }
    if let Some(opacity) = style.opacity {
        parts.push(format!("opacity:{opacity}"));
    }
    parts.join(";")
}

fn to_js(err: StereonetError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
