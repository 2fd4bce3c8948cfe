use std::cell::Cell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::SURFACE_ID_PREFIX;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Attach a click handler to `#element_id`. The handler receives the element
/// the listener is bound to (the button), not the innermost click target.
#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(web::Element) + 'static,
) -> bool {
    let Some(el) = document.get_element_by_id(element_id) else {
        return false;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Some(target) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
        {
            handler(target);
        }
    }) as Box<dyn FnMut(_)>);
    _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
    true
}

/// Run `f` once after `ms` milliseconds.
pub fn set_timeout(ms: u64, f: impl FnOnce() + 'static) {
    if let Some(w) = web::window() {
        let cb = Closure::once_into_js(f);
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref::<js_sys::Function>(),
            ms.min(i32::MAX as u64) as i32,
        );
    }
}

/// The element an element-targeted demo acts on: the previous sibling of the
/// button's parent.
pub fn demo_target_for(button: &web::Element) -> Option<web::Element> {
    button.parent_element()?.previous_element_sibling()
}

/// The element's id, assigning a generated one if it has none.
pub fn ensure_id(el: &web::Element) -> String {
    thread_local! {
        static NEXT_ID: Cell<u32> = const { Cell::new(1) };
    }
    let id = el.id();
    if !id.is_empty() {
        return id;
    }
    let n = NEXT_ID.with(|c| {
        let n = c.get();
        c.set(n + 1);
        n
    });
    let id = format!("{}{}", SURFACE_ID_PREFIX, n);
    el.set_id(&id);
    id
}

/// Page-absolute rectangle of an element: (left, top, width, height).
pub fn page_rect(el: &web::Element) -> (f64, f64, f64, f64) {
    let rect = el.get_bounding_client_rect();
    let (sx, sy) = web::window()
        .map(|w| (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
        .unwrap_or((0.0, 0.0));
    (rect.left() + sx, rect.top() + sy, rect.width(), rect.height())
}

pub fn viewport_size() -> (f64, f64) {
    web::window()
        .map(|w| {
            let px = |v: Result<wasm_bindgen::JsValue, _>| {
                v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
            };
            (px(w.inner_width()), px(w.inner_height()))
        })
        .unwrap_or((0.0, 0.0))
}

/// Grow the element to double height and half width, then back, each leg
/// taking `leg_ms`. Inline sizes are cleared once the element is back.
pub fn animate_grow_shrink(el: &web::HtmlElement, leg_ms: u64) {
    let (_, _, w, h) = page_rect(el);
    let style = el.style();
    _ = style.set_property("transition", &format!("width {0}ms, height {0}ms", leg_ms));
    _ = style.set_property("width", &format!("{}px", w));
    _ = style.set_property("height", &format!("{}px", h));
    // Let the start size land before changing it, or no transition runs.
    let grow = el.clone();
    set_timeout(0, move || {
        let style = grow.style();
        _ = style.set_property("width", &format!("{}px", w / 2.0));
        _ = style.set_property("height", &format!("{}px", h * 2.0));
    });
    let shrink = el.clone();
    set_timeout(leg_ms, move || {
        let style = shrink.style();
        _ = style.set_property("width", &format!("{}px", w));
        _ = style.set_property("height", &format!("{}px", h));
    });
    let reset = el.clone();
    set_timeout(2 * leg_ms, move || {
        let style = reset.style();
        for prop in ["transition", "width", "height"] {
            _ = style.remove_property(prop);
        }
    });
}
