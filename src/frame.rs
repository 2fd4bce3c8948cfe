use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use overlay_core::LifecycleEvent;

use crate::clock::FrameClock;
use crate::constants::MAX_FRAME_ADVANCE_MS;
use crate::demo::SharedController;

/// Drives the controller's timeline from wall-clock time.
pub struct Pump {
    controller: SharedController,
    last_instant: Instant,
    clock: FrameClock,
}

impl Pump {
    pub fn new(controller: SharedController) -> Self {
        Self {
            controller,
            last_instant: Instant::now(),
            clock: FrameClock::new(MAX_FRAME_ADVANCE_MS),
        }
    }

    /// Advance by the time since the previous frame. Long gaps (hidden tabs)
    /// are capped, so overlays pause rather than expiring all at once.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let timeline_ms = self.clock.advance(now.duration_since(self.last_instant));
        self.last_instant = now;

        let events = self.controller.borrow_mut().advance_to(timeline_ms);
        for event in events {
            match event {
                LifecycleEvent::AutoHidden { handle, surface } => {
                    log::info!("[pump] {} on {} hid itself", handle, surface)
                }
                LifecycleEvent::Ticked { handle, outcome } => {
                    log::debug!("[pump] {} ticked: {:?}", handle, outcome)
                }
                LifecycleEvent::Relayout { .. } => {}
            }
        }
    }
}

pub fn start_loop(pump: Rc<RefCell<Pump>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pump.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
