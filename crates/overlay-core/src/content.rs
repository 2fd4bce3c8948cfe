//! Custom overlay content and the counters that drive it.
//!
//! A session owns its [`CustomContent`] exclusively; the controller mutates it
//! in place on every update and drops it when the session is hidden.

use crate::constants::{DEFAULT_FONT_SIZE_PX, PROGRESS_MAX};
use crate::error::{invalid, Result};

/// Content drawn in place of (or next to) the spinner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustomContent {
    Text { text: String, font_size_px: u32 },
    Progress { percent: u8 },
}

impl CustomContent {
    pub fn text(text: impl Into<String>, font_size_px: u32) -> Self {
        CustomContent::Text {
            text: text.into(),
            font_size_px,
        }
    }

    pub fn progress(percent: u8) -> Self {
        CustomContent::Progress { percent }
    }

    /// Parse the `custom` option value: `text:<value>[:<font px>]` or
    /// `progress[:<start percent>]`.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let (kind, rest) = match value.split_once(':') {
            Some((k, r)) => (k.trim(), Some(r)),
            None => (value, None),
        };
        match kind {
            "text" => {
                let rest = rest.unwrap_or("");
                // A trailing numeric segment is the font size.
                if let Some((text, px)) = rest.rsplit_once(':') {
                    if let Ok(px) = px.trim().parse::<u32>() {
                        return Ok(CustomContent::text(text, px));
                    }
                }
                Ok(CustomContent::text(rest, DEFAULT_FONT_SIZE_PX))
            }
            "progress" => {
                let percent = match rest.map(str::trim) {
                    None | Some("") => 0,
                    Some(p) => p
                        .parse::<u8>()
                        .map_err(|_| invalid(format!("custom: bad progress value `{}`", p)))?,
                };
                Ok(CustomContent::progress(percent))
            }
            other => Err(invalid(format!("custom: unknown content kind `{}`", other))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            CustomContent::Text { font_size_px, .. } if *font_size_px == 0 => {
                Err(invalid("custom: font size must be positive"))
            }
            CustomContent::Progress { percent } if *percent > PROGRESS_MAX => Err(invalid(
                format!("custom: progress {} is above {}", percent, PROGRESS_MAX),
            )),
            _ => Ok(()),
        }
    }
}

/// Partial replacement for a session's custom content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentUpdate {
    Text(String),
    Progress(u8),
}

impl ContentUpdate {
    pub fn validate(&self) -> Result<()> {
        match self {
            ContentUpdate::Progress(p) if *p > PROGRESS_MAX => Err(invalid(format!(
                "progress {} is above {}",
                p, PROGRESS_MAX
            ))),
            _ => Ok(()),
        }
    }

    /// Merge into `slot`, keeping the existing font size for text updates.
    /// A kind mismatch (or no content yet) replaces the slot outright.
    pub(crate) fn apply_to(self, slot: &mut Option<CustomContent>) {
        match self {
            ContentUpdate::Text(new_text) => {
                if let Some(CustomContent::Text { text, .. }) = slot {
                    *text = new_text;
                } else {
                    *slot = Some(CustomContent::text(new_text, DEFAULT_FONT_SIZE_PX));
                }
            }
            ContentUpdate::Progress(p) => {
                if let Some(CustomContent::Progress { percent }) = slot {
                    *percent = p;
                } else {
                    *slot = Some(CustomContent::progress(p));
                }
            }
        }
    }
}

/// Start, step and terminal value of a session counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterSpec {
    pub start: i32,
    pub step: i32,
    pub terminal: i32,
}

impl CounterSpec {
    pub const fn countdown(from: i32) -> Self {
        Self {
            start: from,
            step: -1,
            terminal: 0,
        }
    }

    pub const fn progress() -> Self {
        Self {
            start: 0,
            step: 1,
            terminal: PROGRESS_MAX as i32,
        }
    }

    /// The step must be non-zero and point from `start` toward `terminal`.
    pub fn validate(&self) -> Result<()> {
        let distance = i64::from(self.terminal) - i64::from(self.start);
        if self.step == 0 {
            return Err(invalid("counter: step must be non-zero"));
        }
        if distance == 0 || distance.signum() != i64::from(self.step).signum() {
            return Err(invalid(format!(
                "counter: {} never reaches {} in steps of {}",
                self.start, self.terminal, self.step
            )));
        }
        Ok(())
    }
}

/// Live counter state held by a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counter {
    spec: CounterSpec,
    value: i32,
}

impl Counter {
    pub fn new(spec: CounterSpec) -> Self {
        Self {
            spec,
            value: spec.start,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn spec(&self) -> CounterSpec {
        self.spec
    }

    /// Apply one step, clamping at the terminal value.
    pub fn advance(&mut self) -> i32 {
        let next = self.value.saturating_add(self.spec.step);
        self.value = if self.spec.step < 0 {
            next.max(self.spec.terminal)
        } else {
            next.min(self.spec.terminal)
        };
        self.value
    }

    pub fn is_complete(&self) -> bool {
        self.value == self.spec.terminal
    }
}
