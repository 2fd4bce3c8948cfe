use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use overlay_core::presets::{self, Preset};
use overlay_core::{OverlayConfig, OverlayController, OverlayError};

use crate::constants::{DEMO_BUTTON_IDS, HIDE_ALL_KEY, OPTIONS_ATTRIBUTE};
use crate::dom;
use crate::overlay::DomRenderer;

pub type SharedController = Rc<RefCell<OverlayController<DomRenderer>>>;

/// Preset config, with the button's `data-overlay` options applied on top.
fn config_for(preset: &Preset, button: &web::Element) -> Result<OverlayConfig, OverlayError> {
    match button.get_attribute(OPTIONS_ATTRIBUTE) {
        Some(options) => preset.config.clone().with_options(&options),
        None => Ok(preset.config.clone()),
    }
}

fn on_demo_click(controller: &SharedController, preset: &Preset, button: &web::Element) {
    let target = match preset.target {
        presets::PresetTarget::Viewport => None,
        presets::PresetTarget::Element => match dom::demo_target_for(button) {
            Some(el) => Some(el),
            None => {
                log::warn!("[demo] {}: no target element next to the button", preset.name);
                return;
            }
        },
    };
    let element_id = target.as_ref().map(dom::ensure_id).unwrap_or_default();
    let surface = preset.surface(&element_id);

    let config = match config_for(preset, button) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("[demo] {}: {}", preset.name, e);
            return;
        }
    };

    let shown = controller.borrow_mut().show(surface, config);
    match shown {
        Ok(handle) => {
            log::info!("[demo] {} shown as {}", preset.name, handle);
            if let (Some(ms), Some(el)) = (preset.animation_ms, target) {
                if let Ok(html) = el.dyn_into::<web::HtmlElement>() {
                    dom::animate_grow_shrink(&html, ms);
                }
            }
        }
        // Clicking again while busy is expected; nothing to do.
        Err(OverlayError::AlreadyActive(s)) => log::debug!("[demo] {} busy on {}", preset.name, s),
        Err(e) => log::warn!("[demo] {}: {}", preset.name, e),
    }
}

/// Bind every demo button present on the page to its preset.
pub fn wire_demo_buttons(document: &web::Document, controller: &SharedController) {
    let mut wired = 0;
    for id in DEMO_BUTTON_IDS {
        let Some(preset) = presets::by_name(id) else {
            log::warn!("[demo] no preset named {}", id);
            continue;
        };
        let ctrl = controller.clone();
        if dom::add_click_listener(document, id, move |button| {
            on_demo_click(&ctrl, &preset, &button)
        }) {
            wired += 1;
        }
    }
    log::info!("[demo] wired {} of {} demo buttons", wired, DEMO_BUTTON_IDS.len());
}

// Escape tears down every overlay, including the plain "loading" one that
// never hides on its own.
pub fn wire_hide_all_key(controller: &SharedController) {
    if let Some(window) = web::window() {
        let ctrl = controller.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if ev.key() == HIDE_ALL_KEY {
                    let hidden = ctrl.borrow_mut().hide_all(false);
                    if hidden > 0 {
                        log::info!("[demo] hid {} overlays", hidden);
                        ev.prevent_default();
                    }
                }
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
