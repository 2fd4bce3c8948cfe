//! Overlay lifecycle controller.
//!
//! Each surface moves `Idle -> Active -> Idle`. A surface with a session is
//! locked: a second `show` is rejected rather than queued. Timers (auto-hide,
//! tick intervals, relayout) live on the controller's own timeline and are
//! fired by [`OverlayController::advance_to`]; hiding a session cancels all of
//! its timers, and a timer whose session is gone is dropped without effect.

use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::config::OverlayConfig;
use crate::constants::PROGRESS_MAX;
use crate::content::{ContentUpdate, Counter, CustomContent};
use crate::error::{OverlayError, Result};
use crate::renderer::Renderer;
use crate::session::{OverlaySession, SessionHandle};
use crate::surface::{SurfaceId, SurfaceState};
use crate::timer::{TimerQueue, TimerTask};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Complete,
}

/// Something a timer did during [`OverlayController::advance_to`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    AutoHidden {
        handle: SessionHandle,
        surface: SurfaceId,
    },
    Ticked {
        handle: SessionHandle,
        outcome: TickOutcome,
    },
    Relayout {
        handle: SessionHandle,
    },
}

pub struct OverlayController<R: Renderer> {
    renderer: R,
    sessions: FnvHashMap<SessionHandle, OverlaySession>,
    // Request lock: present while the surface is Active.
    surfaces: FnvHashMap<SurfaceId, SessionHandle>,
    timers: TimerQueue,
    now_ms: u64,
    next_session: u64,
}

impl<R: Renderer> OverlayController<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            sessions: FnvHashMap::default(),
            surfaces: FnvHashMap::default(),
            timers: TimerQueue::new(),
            now_ms: 0,
            next_session: 1,
        }
    }

    pub fn show(&mut self, surface: SurfaceId, config: OverlayConfig) -> Result<SessionHandle> {
        config.validate()?;
        if let Some(existing) = self.surfaces.get(&surface) {
            log::debug!(
                "[overlay] show on {} rejected, session {} is active",
                surface,
                existing
            );
            return Err(OverlayError::AlreadyActive(surface));
        }

        let handle = SessionHandle::new(self.next_session);
        self.next_session += 1;
        let render = self.renderer.render(&surface, &config);

        let mut timers = SmallVec::new();
        if let Some(ms) = config.auto_hide_after_ms {
            let due = self.now_ms.saturating_add(ms);
            timers.push(self.timers.schedule(due, TimerTask::AutoHide(handle)));
        }
        if let (Some(ms), Some(_)) = (config.tick_interval_ms, config.counter) {
            let due = self.now_ms.saturating_add(ms);
            timers.push(self.timers.schedule(due, TimerTask::Tick(handle)));
        }
        if let Some(ms) = config.resize_interval_ms {
            let due = self.now_ms.saturating_add(ms);
            timers.push(self.timers.schedule(due, TimerTask::Relayout(handle)));
        }

        log::debug!(
            "[overlay] show {} on {} at {}ms ({} timers)",
            handle,
            surface,
            self.now_ms,
            timers.len()
        );
        let session = OverlaySession {
            handle,
            surface: surface.clone(),
            custom: config.custom.clone(),
            counter: config.counter.map(Counter::new),
            config,
            started_at_ms: self.now_ms,
            render,
            timers,
        };
        self.surfaces.insert(surface, handle);
        self.sessions.insert(handle, session);
        Ok(handle)
    }

    /// Hide with the renderer's fade-out.
    pub fn hide(&mut self, handle: SessionHandle) -> Result<()> {
        self.hide_with(handle, false)
    }

    pub fn hide_with(&mut self, handle: SessionHandle, immediate: bool) -> Result<()> {
        let session = self
            .sessions
            .remove(&handle)
            .ok_or(OverlayError::NotFound(handle))?;
        for id in &session.timers {
            self.timers.cancel(*id);
        }
        self.surfaces.remove(&session.surface);
        self.renderer.unrender(session.render, immediate);
        log::debug!(
            "[overlay] hide {} on {} after {}ms",
            handle,
            session.surface,
            self.now_ms.saturating_sub(session.started_at_ms)
        );
        // Dropping the session releases its custom content.
        Ok(())
    }

    /// Hide whatever is shown on `surface`.
    pub fn hide_surface(&mut self, surface: &SurfaceId, immediate: bool) -> Result<SessionHandle> {
        let handle = *self
            .surfaces
            .get(surface)
            .ok_or_else(|| OverlayError::Idle(surface.clone()))?;
        self.hide_with(handle, immediate)?;
        Ok(handle)
    }

    /// Hide every active session, oldest first. Returns how many were hidden.
    pub fn hide_all(&mut self, immediate: bool) -> usize {
        let mut handles: Vec<SessionHandle> = self.sessions.keys().copied().collect();
        handles.sort();
        handles
            .into_iter()
            .filter(|h| self.hide_with(*h, immediate).is_ok())
            .count()
    }

    pub fn update(&mut self, handle: SessionHandle, update: ContentUpdate) -> Result<()> {
        let session = self
            .sessions
            .get_mut(&handle)
            .ok_or(OverlayError::NotFound(handle))?;
        update.validate()?;
        update.apply_to(&mut session.custom);
        if let Some(content) = &session.custom {
            self.renderer.refresh(session.render, content);
        }
        Ok(())
    }

    /// Step the session counter and push the new value to its content. Hides
    /// the session once the counter reaches its terminal value.
    pub fn tick(&mut self, handle: SessionHandle) -> Result<TickOutcome> {
        let session = self
            .sessions
            .get_mut(&handle)
            .ok_or(OverlayError::NotFound(handle))?;
        let counter = session
            .counter
            .as_mut()
            .ok_or(OverlayError::NoCounter(handle))?;
        let value = counter.advance();
        let complete = counter.is_complete();
        let update = match session.custom {
            Some(CustomContent::Progress { .. }) => {
                ContentUpdate::Progress(value.clamp(0, i32::from(PROGRESS_MAX)) as u8)
            }
            _ => ContentUpdate::Text(value.to_string()),
        };
        self.update(handle, update)?;
        if complete {
            self.hide(handle)?;
            Ok(TickOutcome::Complete)
        } else {
            Ok(TickOutcome::Continue)
        }
    }

    /// Move the timeline to `now_ms`, firing every timer due on the way.
    /// The timeline never moves backwards.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<LifecycleEvent> {
        let mut events = Vec::new();
        while let Some((id, due, task)) = self.timers.pop_due(now_ms) {
            self.now_ms = self.now_ms.max(due);
            let handle = task.session();
            let Some(session) = self.sessions.get_mut(&handle) else {
                log::debug!("[timer] dropping {:?}, session {} is gone", task, handle);
                continue;
            };
            session.timers.retain(|t| *t != id);
            let surface = session.surface.clone();
            let render = session.render;
            let tick_every = session.config.tick_interval_ms;
            let relayout_every = session.config.resize_interval_ms;

            match task {
                TimerTask::AutoHide(_) => {
                    if self.hide(handle).is_ok() {
                        events.push(LifecycleEvent::AutoHidden { handle, surface });
                    }
                }
                TimerTask::Tick(_) => match self.tick(handle) {
                    Ok(outcome) => {
                        if let (TickOutcome::Continue, Some(ms)) = (outcome, tick_every) {
                            self.reschedule(due.saturating_add(ms), TimerTask::Tick(handle));
                        }
                        events.push(LifecycleEvent::Ticked { handle, outcome });
                    }
                    Err(e) => log::warn!("[timer] tick for {} failed: {}", handle, e),
                },
                TimerTask::Relayout(_) => {
                    self.renderer.relayout(render);
                    if let Some(ms) = relayout_every {
                        self.reschedule(due.saturating_add(ms), TimerTask::Relayout(handle));
                    }
                    events.push(LifecycleEvent::Relayout { handle });
                }
            }
        }
        self.now_ms = self.now_ms.max(now_ms);
        events
    }

    pub fn advance_by(&mut self, ms: u64) -> Vec<LifecycleEvent> {
        self.advance_to(self.now_ms.saturating_add(ms))
    }

    fn reschedule(&mut self, due_ms: u64, task: TimerTask) {
        let id = self.timers.schedule(due_ms, task);
        match self.sessions.get_mut(&task.session()) {
            Some(session) => session.timers.push(id),
            None => {
                self.timers.cancel(id);
            }
        }
    }

    pub fn surface_state(&self, surface: &SurfaceId) -> SurfaceState {
        if self.surfaces.contains_key(surface) {
            SurfaceState::Active
        } else {
            SurfaceState::Idle
        }
    }

    /// Session currently shown on `surface`, if any.
    pub fn active_on(&self, surface: &SurfaceId) -> Option<SessionHandle> {
        self.surfaces.get(surface).copied()
    }

    pub fn session(&self, handle: SessionHandle) -> Option<&OverlaySession> {
        self.sessions.get(&handle)
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the next live timer, for hosts that sleep between frames.
    pub fn next_due(&self) -> Option<u64> {
        self.timers.next_due()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
