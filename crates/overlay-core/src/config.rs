//! Overlay options.
//!
//! [`OverlayConfig`] is the closed set of options the controller and its
//! renderers understand. It can be built in code with the `with_*` methods or
//! parsed from the `key: value; key: value` form used by the demo page's
//! `data-overlay` attributes. Unknown keys are rejected, never ignored.

use crate::constants::*;
use crate::content::{CounterSpec, CustomContent};
use crate::error::{invalid, Result};

/// Overlay background colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Accepts `rgba(r, g, b, a)`, `rgb(r, g, b)`, `#rrggbb` and `#rgb`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid(format!("color: bad hex `{}`", s)));
        }
        let (args, want) = if let Some(inner) = strip_call(s, "rgba") {
            (inner, 4)
        } else if let Some(inner) = strip_call(s, "rgb") {
            (inner, 3)
        } else {
            return Err(invalid(format!("color: unsupported format `{}`", s)));
        };
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != want {
            return Err(invalid(format!(
                "color: expected {} components in `{}`",
                want, s
            )));
        }
        let channel = |p: &str| {
            p.parse::<u8>()
                .map_err(|_| invalid(format!("color: channel `{}` not in 0..=255", p)))
        };
        let a = if want == 4 {
            parts[3]
                .parse::<f32>()
                .map_err(|_| invalid(format!("color: bad alpha `{}`", parts[3])))?
        } else {
            1.0
        };
        let color = Rgba::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a);
        color.validate()?;
        Ok(color)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.a.is_finite() || !(0.0..=1.0).contains(&self.a) {
            return Err(invalid(format!("color: alpha {} not in 0..=1", self.a)));
        }
        Ok(())
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

fn strip_call<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let digit = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
    match hex.len() {
        6 => Some(Rgba::new(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?, 1.0)),
        3 => Some(Rgba::new(
            digit(0, 1)? * 17,
            digit(1, 1)? * 17,
            digit(2, 1)? * 17,
            1.0,
        )),
        _ => None,
    }
}

/// Indicator size, relative to the surface or in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Size {
    Percent(f32),
    Px(f32),
}

impl Size {
    /// `30%`, `48px`, or a bare number of pixels.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let num = |n: &str| {
            n.trim()
                .parse::<f32>()
                .map_err(|_| invalid(format!("size: bad value `{}`", s)))
        };
        let size = if let Some(p) = s.strip_suffix('%') {
            Size::Percent(num(p)?)
        } else if let Some(px) = s.strip_suffix("px") {
            Size::Px(num(px)?)
        } else {
            Size::Px(num(s)?)
        };
        size.validate()?;
        Ok(size)
    }

    pub fn validate(&self) -> Result<()> {
        let ok = match *self {
            Size::Percent(p) => p.is_finite() && p > 0.0 && p <= 100.0,
            Size::Px(px) => px.is_finite() && px > 0.0,
        };
        if ok {
            Ok(())
        } else {
            Err(invalid(format!("size: {:?} out of range", self)))
        }
    }

    /// Resolve against the smaller side of the surface.
    pub fn resolve(&self, surface_w: f32, surface_h: f32) -> f32 {
        match *self {
            Size::Percent(p) => surface_w.min(surface_h) * p / 100.0,
            Size::Px(px) => px,
        }
    }
}

/// Fade-in and fade-out durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fade {
    pub in_ms: u64,
    pub out_ms: u64,
}

impl Fade {
    pub const NONE: Fade = Fade::new(0, 0);

    pub const fn new(in_ms: u64, out_ms: u64) -> Self {
        Self { in_ms, out_ms }
    }

    /// `true`, `false`, `<in>,<out>` or `[<in>, <out>]`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let fade = match s {
            "true" => DEFAULT_FADE,
            "false" => Fade::NONE,
            _ => {
                let inner = s
                    .strip_prefix('[')
                    .and_then(|r| r.strip_suffix(']'))
                    .unwrap_or(s);
                let (a, b) = inner
                    .split_once(',')
                    .ok_or_else(|| invalid(format!("fade: expected `in,out`, got `{}`", s)))?;
                Fade::new(parse_ms("fade", a)?, parse_ms("fade", b)?)
            }
        };
        fade.validate()?;
        Ok(fade)
    }

    pub fn validate(&self) -> Result<()> {
        if self.in_ms > MAX_FADE_MS || self.out_ms > MAX_FADE_MS {
            return Err(invalid(format!(
                "fade: durations above {} ms ({}, {})",
                MAX_FADE_MS, self.in_ms, self.out_ms
            )));
        }
        Ok(())
    }
}

/// What the overlay shows while loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Indicator<'a> {
    Spinner,
    Icon(&'a str),
    Nothing,
}

/// Validated overlay options. Opaque to the controller apart from the timing
/// fields; everything else is passed through to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub color: Rgba,
    pub size: Size,
    pub resize_interval_ms: Option<u64>,
    pub image: bool,
    pub icon: Option<String>,
    pub custom: Option<CustomContent>,
    pub fade: Fade,
    pub auto_hide_after_ms: Option<u64>,
    pub counter: Option<CounterSpec>,
    pub tick_interval_ms: Option<u64>,
    pub z_index: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            size: DEFAULT_SIZE,
            resize_interval_ms: None,
            image: true,
            icon: None,
            custom: None,
            fade: DEFAULT_FADE,
            auto_hide_after_ms: None,
            counter: None,
            tick_interval_ms: None,
            z_index: DEFAULT_Z_INDEX,
        }
    }
}

impl OverlayConfig {
    /// Parse an option string on top of the defaults.
    pub fn parse(options: &str) -> Result<Self> {
        OverlayConfig::default().with_options(options)
    }

    /// Apply an option string on top of `self`. On error nothing is returned,
    /// so a caller holding the original config keeps it intact.
    pub fn with_options(mut self, options: &str) -> Result<Self> {
        for entry in options.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = entry
                .split_once(':')
                .ok_or_else(|| invalid(format!("expected `key: value`, got `{}`", entry)))?;
            self.set_option(key.trim(), value.trim())?;
        }
        self.validate()?;
        Ok(self)
    }

    fn set_option(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "color" => self.color = Rgba::parse(value)?,
            "size" => self.size = Size::parse(value)?,
            "resizeInterval" => self.resize_interval_ms = Some(parse_ms(key, value)?),
            "image" => {
                self.image = match value.trim_matches(|c| c == '"' || c == '\'') {
                    "" | "none" | "false" => false,
                    "true" | "spinner" => true,
                    other => return Err(invalid(format!("image: unsupported value `{}`", other))),
                }
            }
            "fontawesome" => self.icon = Some(value.to_string()),
            "custom" => self.custom = Some(CustomContent::parse(value)?),
            "fade" => self.fade = Fade::parse(value)?,
            "autoHide" => self.auto_hide_after_ms = Some(parse_ms(key, value)?),
            "countdown" => {
                let from = value
                    .parse::<i32>()
                    .map_err(|_| invalid(format!("countdown: bad start `{}`", value)))?;
                self.counter = Some(CounterSpec::countdown(from));
            }
            "progress" => match value {
                "" | "true" => self.counter = Some(CounterSpec::progress()),
                other => return Err(invalid(format!("progress: unexpected value `{}`", other))),
            },
            "tickInterval" => self.tick_interval_ms = Some(parse_ms(key, value)?),
            "zIndex" => {
                self.z_index = value
                    .parse::<i32>()
                    .map_err(|_| invalid(format!("zIndex: bad value `{}`", value)))?
            }
            _ => return Err(invalid(format!("unrecognized option `{}`", key))),
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.color.validate()?;
        self.size.validate()?;
        self.fade.validate()?;
        if self.resize_interval_ms == Some(0) {
            return Err(invalid("resizeInterval: must be positive"));
        }
        if self.auto_hide_after_ms == Some(0) {
            return Err(invalid("autoHide: must be positive"));
        }
        if let Some(icon) = &self.icon {
            if icon.trim().is_empty() {
                return Err(invalid("fontawesome: empty icon class"));
            }
        }
        if let Some(custom) = &self.custom {
            custom.validate()?;
        }
        if let Some(counter) = &self.counter {
            counter.validate()?;
        }
        match (self.tick_interval_ms, self.counter) {
            (Some(0), _) => return Err(invalid("tickInterval: must be positive")),
            (Some(_), None) => return Err(invalid("tickInterval: requires a counter")),
            _ => {}
        }
        Ok(())
    }

    pub fn indicator(&self) -> Indicator<'_> {
        match (&self.icon, self.image) {
            (Some(icon), _) => Indicator::Icon(icon),
            (None, true) => Indicator::Spinner,
            (None, false) => Indicator::Nothing,
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_resize_interval(mut self, ms: u64) -> Self {
        self.resize_interval_ms = Some(ms);
        self
    }

    pub fn without_image(mut self) -> Self {
        self.image = false;
        self
    }

    pub fn with_icon(mut self, class: impl Into<String>) -> Self {
        self.icon = Some(class.into());
        self
    }

    pub fn with_custom(mut self, content: CustomContent) -> Self {
        self.custom = Some(content);
        self
    }

    pub fn with_fade(mut self, fade: Fade) -> Self {
        self.fade = fade;
        self
    }

    pub fn with_auto_hide(mut self, ms: u64) -> Self {
        self.auto_hide_after_ms = Some(ms);
        self
    }

    pub fn with_counter(mut self, counter: CounterSpec) -> Self {
        self.counter = Some(counter);
        self
    }

    pub fn with_tick_interval(mut self, ms: u64) -> Self {
        self.tick_interval_ms = Some(ms);
        self
    }

    pub fn with_z_index(mut self, z: i32) -> Self {
        self.z_index = z;
        self
    }
}

fn parse_ms(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .trim_end_matches("ms")
        .trim()
        .parse::<u64>()
        .map_err(|_| invalid(format!("{}: bad duration `{}`", key, value.trim())))
}
