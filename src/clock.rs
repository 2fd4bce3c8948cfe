use std::time::Duration;

/// Turns wall-clock frame deltas into whole-millisecond timeline steps.
///
/// Sub-millisecond remainders are carried to the next frame, so a 60 Hz loop
/// stays in step with real time. Each delta is capped before it is added.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    cap_ms: f64,
    carry_ms: f64,
    timeline_ms: u64,
}

impl FrameClock {
    pub fn new(cap_ms: u64) -> Self {
        Self {
            cap_ms: cap_ms as f64,
            carry_ms: 0.0,
            timeline_ms: 0,
        }
    }

    /// Feed one frame's elapsed time; returns the new timeline position.
    pub fn advance(&mut self, dt: Duration) -> u64 {
        self.carry_ms += (dt.as_secs_f64() * 1000.0).min(self.cap_ms);
        let whole = self.carry_ms.floor();
        self.carry_ms -= whole;
        self.timeline_ms = self.timeline_ms.saturating_add(whole as u64);
        self.timeline_ms
    }

    pub fn timeline_ms(&self) -> u64 {
        self.timeline_ms
    }
}
