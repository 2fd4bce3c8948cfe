use fnv::FnvHashMap;

use overlay_core::{
    presets::{self, Preset},
    CustomContent, LifecycleEvent, OverlayConfig, OverlayController, OverlayError, RenderHandle,
    Renderer, SurfaceId, SurfaceState,
};

// Simulated frame length when stepping the timeline.
const FRAME_MS: u64 = 16;
// Presets without a timer of their own are hidden by hand after this long.
const MANUAL_HIDE_AFTER_MS: u64 = 2000;
// Stand-in for the element next to each demo button.
const DEMO_ELEMENT_ID: &str = "demo-panel";

/// Renderer that draws nothing and logs every call.
#[derive(Default)]
struct LogRenderer {
    next_id: u64,
    live: FnvHashMap<RenderHandle, String>,
    relayouts: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, surface: &SurfaceId, config: &OverlayConfig) -> RenderHandle {
        self.next_id += 1;
        let handle = RenderHandle::from_raw(self.next_id);
        log::info!(
            "[render] {:?} on {} color={} size={:?} indicator={:?} fade={}ms/{}ms",
            handle,
            surface,
            config.color.to_css(),
            config.size,
            config.indicator(),
            config.fade.in_ms,
            config.fade.out_ms
        );
        self.live.insert(handle, surface.to_string());
        handle
    }

    fn unrender(&mut self, handle: RenderHandle, immediate: bool) {
        let surface = self.live.remove(&handle).unwrap_or_default();
        log::info!(
            "[render] remove {:?} from {} ({})",
            handle,
            surface,
            if immediate { "immediate" } else { "fade out" }
        );
    }

    fn refresh(&mut self, handle: RenderHandle, content: &CustomContent) {
        match content {
            CustomContent::Text { text, .. } => log::info!("[render] {:?} text={}", handle, text),
            CustomContent::Progress { percent } => {
                // Progress moves in single steps; log every tenth.
                if percent % 10 == 0 {
                    log::info!("[render] {:?} progress={}%", handle, percent);
                }
            }
        }
    }

    fn relayout(&mut self, _handle: RenderHandle) {
        self.relayouts += 1;
    }
}

fn run_preset(preset: &Preset) -> anyhow::Result<()> {
    log::info!("[demo] ---- {} ----", preset.name);
    let mut controller = OverlayController::new(LogRenderer::default());
    let surface = preset.surface(DEMO_ELEMENT_ID);
    let handle = controller.show(surface.clone(), preset.config.clone())?;

    // A second click while busy is rejected, as on the page.
    match controller.show(surface.clone(), preset.config.clone()) {
        Err(OverlayError::AlreadyActive(s)) => log::info!("[demo] second click on {} rejected", s),
        Err(e) => return Err(e.into()),
        Ok(h) => anyhow::bail!("surface {} accepted a second session {}", surface, h),
    }

    let limit = preset
        .expected_lifetime_ms()
        .unwrap_or(MANUAL_HIDE_AFTER_MS);
    while controller.surface_state(&surface) == SurfaceState::Active {
        if controller.now_ms() >= limit {
            controller.hide(handle)?;
            log::info!("[demo] hid {} by hand at {}ms", handle, controller.now_ms());
            break;
        }
        for event in controller.advance_by(FRAME_MS) {
            match event {
                LifecycleEvent::AutoHidden { handle, surface } => log::info!(
                    "[demo] {} on {} auto-hidden at {}ms",
                    handle,
                    surface,
                    controller.now_ms()
                ),
                LifecycleEvent::Ticked { handle, outcome } => {
                    log::debug!("[demo] {} ticked: {:?}", handle, outcome)
                }
                LifecycleEvent::Relayout { .. } => {}
            }
        }
    }

    let relayouts = controller.renderer().relayouts;
    if relayouts > 0 {
        log::info!("[demo] {} relayouts while shown", relayouts);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let names: Vec<String> = std::env::args().skip(1).collect();
    let selected: Vec<Preset> = if names.is_empty() || names.iter().any(|n| n == "all") {
        presets::all()
    } else {
        names
            .iter()
            .map(|n| presets::by_name(n).ok_or_else(|| anyhow::anyhow!("unknown preset `{}`", n)))
            .collect::<anyhow::Result<_>>()?
    };

    for preset in &selected {
        run_preset(preset)?;
    }
    Ok(())
}
