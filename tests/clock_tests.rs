// Host-side tests for the web pump's frame clock.
// The main crate is wasm-only, so we include the pure-Rust module directly.

mod clock {
    include!("../src/clock.rs");
}

use clock::FrameClock;
use std::time::Duration;

fn frames_at_60hz(clock: &mut FrameClock, frames: u32) -> u64 {
    let dt = Duration::from_secs(1) / 60;
    let mut t = 0;
    for _ in 0..frames {
        t = clock.advance(dt);
    }
    t
}

#[test]
fn sixty_hz_frames_keep_pace_with_wall_time() {
    let mut clock = FrameClock::new(250);
    // 180 frames is three seconds of wall time.
    let t = frames_at_60hz(&mut clock, 180);
    assert!((2999..=3000).contains(&t), "timeline at {t}ms");
}

#[test]
fn three_second_deadline_is_reached_within_one_frame_of_wall_time() {
    let mut clock = FrameClock::new(250);
    assert!(frames_at_60hz(&mut clock, 178) < 3000);
    let t = frames_at_60hz(&mut clock, 2);
    assert!(t >= 2999);
    assert!(frames_at_60hz(&mut clock, 1) >= 3000);
}

#[test]
fn sub_millisecond_frames_accumulate() {
    let mut clock = FrameClock::new(250);
    for _ in 0..2 {
        assert_eq!(clock.advance(Duration::from_micros(400)), 0);
    }
    assert_eq!(clock.advance(Duration::from_micros(400)), 1);
    assert_eq!(clock.timeline_ms(), 1);
}

#[test]
fn long_gaps_are_capped_per_frame() {
    let mut clock = FrameClock::new(250);
    assert_eq!(clock.advance(Duration::from_secs(60)), 250);
    assert_eq!(clock.advance(Duration::from_millis(10)), 260);
}
