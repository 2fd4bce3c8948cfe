// Shared test double: a renderer that records every call it receives.

#![allow(dead_code)]

use overlay_core::{CustomContent, OverlayConfig, RenderHandle, Renderer, SurfaceId};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Render(SurfaceId, RenderHandle),
    Unrender(RenderHandle, bool),
    Refresh(RenderHandle, CustomContent),
    Relayout(RenderHandle),
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<Call>,
    next_id: u64,
}

impl RecordingRenderer {
    pub fn renders(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Render(..)))
            .count()
    }

    pub fn unrenders(&self) -> Vec<(RenderHandle, bool)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Unrender(h, immediate) => Some((*h, *immediate)),
                _ => None,
            })
            .collect()
    }

    pub fn relayouts(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Relayout(_)))
            .count()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Refresh(_, CustomContent::Text { text, .. }) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn progress(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Refresh(_, CustomContent::Progress { percent }) => Some(*percent),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, surface: &SurfaceId, _config: &OverlayConfig) -> RenderHandle {
        self.next_id += 1;
        let handle = RenderHandle::from_raw(self.next_id);
        self.calls.push(Call::Render(surface.clone(), handle));
        handle
    }

    fn unrender(&mut self, handle: RenderHandle, immediate: bool) {
        self.calls.push(Call::Unrender(handle, immediate));
    }

    fn refresh(&mut self, handle: RenderHandle, content: &CustomContent) {
        self.calls.push(Call::Refresh(handle, content.clone()));
    }

    fn relayout(&mut self, handle: RenderHandle) {
        self.calls.push(Call::Relayout(handle));
    }
}
