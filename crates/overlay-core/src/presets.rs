//! The demo page's preset interactions, one per button.

use crate::config::OverlayConfig;
use crate::constants::*;
use crate::content::{CounterSpec, CustomContent};
use crate::surface::SurfaceId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetTarget {
    Viewport,
    /// The element next to the clicked button.
    Element,
}

#[derive(Clone, Debug)]
pub struct Preset {
    /// Also the id of the demo button that triggers it.
    pub name: &'static str,
    pub target: PresetTarget,
    pub config: OverlayConfig,
    /// Grow/shrink animation played on the target while the overlay is up.
    pub animation_ms: Option<u64>,
}

impl Preset {
    /// Resolve the surface; `element_id` is ignored for viewport presets.
    pub fn surface(&self, element_id: &str) -> SurfaceId {
        match self.target {
            PresetTarget::Viewport => SurfaceId::Viewport,
            PresetTarget::Element => SurfaceId::element(element_id),
        }
    }

    /// How long the overlay stays up without interaction, if it hides on its own.
    pub fn expected_lifetime_ms(&self) -> Option<u64> {
        let by_counter = match (self.config.counter, self.config.tick_interval_ms) {
            (Some(c), Some(every)) => {
                let steps = (i64::from(c.terminal) - i64::from(c.start)) / i64::from(c.step);
                Some(steps.unsigned_abs() * every)
            }
            _ => None,
        };
        match (self.config.auto_hide_after_ms, by_counter) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

fn preset(name: &'static str, target: PresetTarget, config: OverlayConfig) -> Preset {
    Preset {
        name,
        target,
        config,
        animation_ms: None,
    }
}

pub fn quick_demo() -> Preset {
    preset(
        "quick_demo",
        PresetTarget::Viewport,
        OverlayConfig::default().with_auto_hide(QUICK_DEMO_MS),
    )
}

/// Stays up until hidden explicitly.
pub fn loading() -> Preset {
    preset("loading", PresetTarget::Viewport, OverlayConfig::default())
}

pub fn example2a() -> Preset {
    preset(
        "example2a",
        PresetTarget::Element,
        OverlayConfig::default()
            .with_color(DEMO_GREEN)
            .with_auto_hide(EXAMPLE2_HIDE_MS),
    )
}

/// The element grows then shrinks back while the overlay follows it.
pub fn example2b() -> Preset {
    Preset {
        animation_ms: Some(EXAMPLE2B_ANIMATION_MS),
        ..preset(
            "example2b",
            PresetTarget::Element,
            OverlayConfig::default()
                .with_color(DEMO_GREEN)
                .with_size(EXAMPLE2B_SIZE)
                .with_resize_interval(EXAMPLE2B_RESIZE_INTERVAL_MS)
                .with_auto_hide(2 * EXAMPLE2B_ANIMATION_MS),
        )
    }
}

pub fn example3() -> Preset {
    preset(
        "example3",
        PresetTarget::Viewport,
        OverlayConfig::default()
            .without_image()
            .with_icon(SPINNER_ICON_CLASS)
            .with_auto_hide(EXAMPLE3_HIDE_MS),
    )
}

/// Countdown from 5, one step per second.
pub fn example4() -> Preset {
    preset(
        "example4",
        PresetTarget::Viewport,
        OverlayConfig::default()
            .without_image()
            .with_custom(CustomContent::text(
                COUNTDOWN_START.to_string(),
                COUNTDOWN_FONT_SIZE_PX,
            ))
            .with_counter(CounterSpec::countdown(COUNTDOWN_START))
            .with_tick_interval(COUNTDOWN_INTERVAL_MS),
    )
}

pub fn example6() -> Preset {
    preset(
        "example6",
        PresetTarget::Viewport,
        OverlayConfig::default()
            .with_fade(EXAMPLE6_FADE)
            .with_auto_hide(EXAMPLE6_HIDE_MS),
    )
}

/// Progress bar from 0 to 100.
pub fn extra_progress1() -> Preset {
    preset(
        "extraprogress1",
        PresetTarget::Viewport,
        OverlayConfig::default()
            .with_custom(CustomContent::progress(0))
            .with_counter(CounterSpec::progress())
            .with_tick_interval(PROGRESS_INTERVAL_MS),
    )
}

pub fn all() -> Vec<Preset> {
    vec![
        quick_demo(),
        loading(),
        example2a(),
        example2b(),
        example3(),
        example4(),
        example6(),
        extra_progress1(),
    ]
}

pub fn by_name(name: &str) -> Option<Preset> {
    all().into_iter().find(|p| p.name == name)
}
