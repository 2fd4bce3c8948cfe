#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use overlay_core::OverlayController;

mod clock;
mod constants;
mod demo;
mod dom;
mod frame;
mod overlay;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("overlay-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    // Page scripts may call start() again on hot reload; wire handlers once.
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let controller: demo::SharedController = Rc::new(RefCell::new(OverlayController::new(
        overlay::DomRenderer::new(document.clone()),
    )));

    demo::wire_demo_buttons(&document, &controller);
    demo::wire_hide_all_key(&controller);

    frame::start_loop(Rc::new(RefCell::new(frame::Pump::new(controller))));
    Ok(())
}
