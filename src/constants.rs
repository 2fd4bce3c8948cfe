/// Demo page wiring and DOM renderer constants.
///
/// Element ids match the buttons on the demo page; class names match the
/// page stylesheet. Timing caps keep the animation-frame pump well behaved
/// when a tab is backgrounded and frames stop for a while.
// Demo buttons, one per preset (same names as `overlay_core::presets`)
pub const DEMO_BUTTON_IDS: [&str; 8] = [
    "quick_demo",
    "loading",
    "example2a",
    "example2b",
    "example3",
    "example4",
    "example6",
    "extraprogress1",
];

// Optional per-button option override, e.g. data-overlay="color: #336699; autoHide: 1500"
pub const OPTIONS_ATTRIBUTE: &str = "data-overlay";

// Generated ids for target elements that have none
pub const SURFACE_ID_PREFIX: &str = "overlay-surface-";

// Overlay DOM classes
pub const OVERLAY_CLASS: &str = "loadingoverlay";
pub const SPINNER_CLASS: &str = "loadingoverlay_spinner";
pub const TEXT_CLASS: &str = "loadingoverlay_text";
pub const PROGRESS_CLASS: &str = "loadingoverlay_progress";
pub const PROGRESS_BAR_CLASS: &str = "loadingoverlay_progress_bar";

// Key that tears down every overlay (the plain "loading" preset never hides itself)
pub const HIDE_ALL_KEY: &str = "Escape";

// Pump: largest timeline jump applied in a single frame (ms)
pub const MAX_FRAME_ADVANCE_MS: u64 = 250;

// Progress bar geometry, as a fraction of the overlay's smaller side
pub const PROGRESS_BAR_WIDTH_FRAC: f64 = 0.6;
pub const PROGRESS_BAR_HEIGHT_PX: f64 = 6.0;
