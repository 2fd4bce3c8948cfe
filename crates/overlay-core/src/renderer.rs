use crate::config::OverlayConfig;
use crate::content::CustomContent;
use crate::surface::SurfaceId;

/// Handle issued by a [`Renderer`] for one drawn overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderHandle(u64);

impl RenderHandle {
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The collaborator that actually draws overlays. The controller calls it and
/// never looks inside the config beyond its timing fields.
pub trait Renderer {
    /// Draw the overlay described by `config` on `surface`.
    fn render(&mut self, surface: &SurfaceId, config: &OverlayConfig) -> RenderHandle;

    /// Remove an overlay. With `immediate == false` the renderer may run its
    /// fade-out before removing it.
    fn unrender(&mut self, handle: RenderHandle, immediate: bool);

    /// Redraw custom content after an update.
    fn refresh(&mut self, handle: RenderHandle, content: &CustomContent);

    /// Re-fit the overlay to its surface's current bounds.
    fn relayout(&mut self, _handle: RenderHandle) {}
}
