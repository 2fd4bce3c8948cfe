use crate::config::{Fade, Rgba, Size};

// Overlay defaults, matching the loading overlay plugin the demo page was built on.

// Look
pub const DEFAULT_COLOR: Rgba = Rgba::new(255, 255, 255, 0.8);
pub const DEFAULT_SIZE: Size = Size::Percent(50.0);
pub const DEFAULT_FADE: Fade = Fade::new(400, 200);
pub const DEFAULT_Z_INDEX: i32 = 9999;
pub const DEFAULT_FONT_SIZE_PX: u32 = 16; // custom text without an explicit size

// Validation limits
pub const MAX_FADE_MS: u64 = 60_000;
pub const PROGRESS_MAX: u8 = 100;

// Demo page timings (milliseconds)
pub const QUICK_DEMO_MS: u64 = 3000;
pub const EXAMPLE2_HIDE_MS: u64 = 3000;
pub const EXAMPLE2B_ANIMATION_MS: u64 = 2500; // one grow or shrink leg
pub const EXAMPLE2B_RESIZE_INTERVAL_MS: u64 = 50;
pub const EXAMPLE3_HIDE_MS: u64 = 3000;
pub const EXAMPLE6_HIDE_MS: u64 = 5000;
pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;
pub const PROGRESS_INTERVAL_MS: u64 = 300;

// Demo page content
pub const DEMO_GREEN: Rgba = Rgba::new(165, 190, 100, 0.5);
pub const EXAMPLE2B_SIZE: Size = Size::Percent(30.0);
pub const EXAMPLE6_FADE: Fade = Fade::new(2000, 1000);
pub const SPINNER_ICON_CLASS: &str = "fa fa-spinner fa-spin";
pub const COUNTDOWN_START: i32 = 5;
pub const COUNTDOWN_FONT_SIZE_PX: u32 = 50;
