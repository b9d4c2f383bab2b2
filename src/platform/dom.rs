//! DOM bindings (WASM only)

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use super::{classes, entity_classes, px};
use crate::engine::{GameSpec, GameView, GeometryProvider, InputKind, Rect};

/// Geometry read from live layout via `getBoundingClientRect`
pub struct DomGeometry {
    document: Document,
}

impl DomGeometry {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl GeometryProvider for DomGeometry {
    fn bounds(&self, region: &str) -> Option<Rect> {
        let el = self.document.get_element_by_id(region)?;
        let r = el.get_bounding_client_rect();
        Some(Rect::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        ))
    }
}

/// Milliseconds from `performance.now()`
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

pub fn toggle_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Show or hide an element with the `hidden` class
pub fn set_hidden(document: &Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        toggle_class(&el, classes::HIDDEN, hidden);
    }
}

/// Push a game snapshot into its entity element
pub fn apply_view(document: &Document, spec: &GameSpec, view: &GameView) {
    let Some(el) = document.get_element_by_id(spec.entity) else {
        return;
    };

    match spec.input {
        InputKind::Pointer { .. } => {
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                let style = html.style();
                let _ = style.set_property("left", &px(view.position.x));
                let _ = style.set_property("top", &px(view.position.y));
            }
        }
        InputKind::Slider { .. } => {
            if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                let value = view.value.round().to_string();
                if input.value() != value {
                    input.set_value(&value);
                }
            }
        }
    }

    for (class, on) in entity_classes(view) {
        toggle_class(&el, class, on);
    }
}
