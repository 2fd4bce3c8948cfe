use smallvec::SmallVec;
use std::fmt;

use crate::config::OverlayConfig;
use crate::content::{Counter, CustomContent};
use crate::renderer::RenderHandle;
use crate::surface::SurfaceId;
use crate::timer::TimerId;

/// Handle to one show→hide lifecycle. Never reused, so a handle kept after
/// its session was hidden keeps failing with `NotFound`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionHandle(u64);

impl SessionHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Reconstruct a handle from a raw id, e.g. one stored in a DOM attribute.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An active overlay, owned by the controller.
#[derive(Debug)]
pub struct OverlaySession {
    pub(crate) handle: SessionHandle,
    pub(crate) surface: SurfaceId,
    pub(crate) config: OverlayConfig,
    pub(crate) started_at_ms: u64,
    pub(crate) render: RenderHandle,
    pub(crate) custom: Option<CustomContent>,
    pub(crate) counter: Option<Counter>,
    // auto-hide, tick and relayout at most
    pub(crate) timers: SmallVec<[TimerId; 3]>,
}

impl OverlaySession {
    pub fn handle(&self) -> SessionHandle {
        self.handle
    }

    pub fn surface(&self) -> &SurfaceId {
        &self.surface
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn auto_hide_after_ms(&self) -> Option<u64> {
        self.config.auto_hide_after_ms
    }

    pub fn render_handle(&self) -> RenderHandle {
        self.render
    }

    pub fn custom(&self) -> Option<&CustomContent> {
        self.custom.as_ref()
    }

    pub fn counter_value(&self) -> Option<i32> {
        self.counter.map(|c| c.value())
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
