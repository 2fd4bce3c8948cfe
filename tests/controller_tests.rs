// Host-side tests for the overlay lifecycle controller.

mod common;

use common::{Call, RecordingRenderer};
use overlay_core::{
    ContentUpdate, CounterSpec, CustomContent, LifecycleEvent, OverlayConfig, OverlayController,
    OverlayError, SessionHandle, Size, SurfaceId, SurfaceState, TickOutcome,
};

fn controller() -> OverlayController<RecordingRenderer> {
    OverlayController::new(RecordingRenderer::default())
}

fn countdown_config(from: i32) -> OverlayConfig {
    OverlayConfig::default()
        .without_image()
        .with_custom(CustomContent::text(from.to_string(), 50))
        .with_counter(CounterSpec::countdown(from))
}

fn progress_config() -> OverlayConfig {
    OverlayConfig::default()
        .with_custom(CustomContent::progress(0))
        .with_counter(CounterSpec::progress())
}

#[test]
fn show_then_hide_leaves_surface_idle_and_releases_content() {
    for surface in [SurfaceId::Viewport, SurfaceId::element("panel")] {
        let mut c = controller();
        let config = OverlayConfig::default().with_custom(CustomContent::text("busy", 20));
        let h = c.show(surface.clone(), config).expect("show");
        assert_eq!(c.surface_state(&surface), SurfaceState::Active);
        assert_eq!(
            c.session(h).and_then(|s| s.custom()),
            Some(&CustomContent::text("busy", 20))
        );

        c.hide(h).expect("hide");
        assert_eq!(c.surface_state(&surface), SurfaceState::Idle);
        assert!(c.session(h).is_none());
        assert_eq!(c.active_count(), 0);
        assert_eq!(c.renderer().unrenders().len(), 1);
        // Default hide lets the renderer fade out.
        assert!(!c.renderer().unrenders()[0].1);
    }
}

#[test]
fn second_show_on_active_surface_is_rejected_and_leaves_session_untouched() {
    let mut c = controller();
    let first = OverlayConfig::default().with_auto_hide(3000);
    let h = c.show(SurfaceId::Viewport, first.clone()).unwrap();
    c.advance_to(1000);

    let err = c
        .show(SurfaceId::Viewport, OverlayConfig::default().with_z_index(1))
        .unwrap_err();
    assert_eq!(err, OverlayError::AlreadyActive(SurfaceId::Viewport));

    let session = c.session(h).expect("still active");
    assert_eq!(session.config(), &first);
    assert_eq!(session.started_at_ms(), 0);
    assert_eq!(c.active_on(&SurfaceId::Viewport), Some(h));
    assert_eq!(c.renderer().renders(), 1);

    // The original auto-hide still fires on schedule.
    let events = c.advance_to(3000);
    assert_eq!(
        events,
        vec![LifecycleEvent::AutoHidden {
            handle: h,
            surface: SurfaceId::Viewport
        }]
    );
}

#[test]
fn hide_on_idle_surface_is_not_found() {
    let mut c = controller();
    let stray = SessionHandle::from_raw(42);
    assert_eq!(c.hide(stray), Err(OverlayError::NotFound(stray)));
    assert_eq!(
        c.hide_surface(&SurfaceId::Viewport, false),
        Err(OverlayError::Idle(SurfaceId::Viewport))
    );
    assert!(c.renderer().calls.is_empty());
}

#[test]
fn hiding_twice_fails_the_second_time() {
    let mut c = controller();
    let h = c.show(SurfaceId::Viewport, OverlayConfig::default()).unwrap();
    assert_eq!(c.hide(h), Ok(()));
    assert_eq!(c.hide(h), Err(OverlayError::NotFound(h)));
    assert_eq!(c.renderer().unrenders().len(), 1);
    assert_eq!(c.surface_state(&SurfaceId::Viewport), SurfaceState::Idle);
}

#[test]
fn stale_handle_does_not_resolve_after_surface_is_reshown() {
    let mut c = controller();
    let old = c.show(SurfaceId::Viewport, OverlayConfig::default()).unwrap();
    c.hide(old).unwrap();
    let new = c.show(SurfaceId::Viewport, OverlayConfig::default()).unwrap();
    assert_ne!(old, new);
    assert_eq!(c.hide(old), Err(OverlayError::NotFound(old)));
    assert_eq!(c.surface_state(&SurfaceId::Viewport), SurfaceState::Active);
}

#[test]
fn auto_hide_fires_after_its_delay() {
    let mut c = controller();
    let h = c
        .show(SurfaceId::Viewport, OverlayConfig::default().with_auto_hide(3000))
        .unwrap();
    assert!(c.advance_to(2999).is_empty());
    assert_eq!(c.surface_state(&SurfaceId::Viewport), SurfaceState::Active);

    let events = c.advance_by(1);
    assert_eq!(
        events,
        vec![LifecycleEvent::AutoHidden {
            handle: h,
            surface: SurfaceId::Viewport
        }]
    );
    assert_eq!(c.surface_state(&SurfaceId::Viewport), SurfaceState::Idle);
    assert_eq!(c.pending_timers(), 0);
}

#[test]
fn countdown_ticks_down_to_zero_then_hides() {
    let mut c = controller();
    let h = c.show(SurfaceId::Viewport, countdown_config(5)).unwrap();
    for expected in [4, 3, 2, 1] {
        assert_eq!(c.tick(h), Ok(TickOutcome::Continue));
        assert_eq!(c.session(h).and_then(|s| s.counter_value()), Some(expected));
    }
    assert_eq!(c.tick(h), Ok(TickOutcome::Complete));

    assert_eq!(c.renderer().texts(), vec!["4", "3", "2", "1", "0"]);
    assert_eq!(c.surface_state(&SurfaceId::Viewport), SurfaceState::Idle);
    assert_eq!(c.tick(h), Err(OverlayError::NotFound(h)));

    // Text updates keep the original font size.
    assert!(c.renderer().calls.iter().any(|call| matches!(
        call,
        Call::Refresh(_, CustomContent::Text { font_size_px: 50, .. })
    )));
}

#[test]
fn progress_completes_on_the_hundredth_tick() {
    let mut c = controller();
    let h = c.show(SurfaceId::Viewport, progress_config()).unwrap();
    for i in 1..100 {
        assert_eq!(c.tick(h), Ok(TickOutcome::Continue), "tick {i}");
    }
    assert_eq!(c.tick(h), Ok(TickOutcome::Complete));

    let seen = c.renderer().progress();
    assert_eq!(seen.len(), 100);
    assert_eq!(seen.first(), Some(&1));
    assert_eq!(seen.last(), Some(&100));
    assert!(seen.windows(2).all(|w| w[1] == w[0] + 1));
    assert_eq!(c.surface_state(&SurfaceId::Viewport), SurfaceState::Idle);
}

#[test]
fn tick_interval_drives_countdown_within_one_advance() {
    let mut c = controller();
    let h = c
        .show(
            SurfaceId::Viewport,
            countdown_config(5).with_tick_interval(1000),
        )
        .unwrap();

    let events = c.advance_to(5000);
    let outcomes: Vec<TickOutcome> = events
        .iter()
        .filter_map(|e| match e {
            LifecycleEvent::Ticked { handle, outcome } if *handle == h => Some(*outcome),
            _ => None,
        })
        .collect();
    assert_eq!(
        outcomes,
        vec![
            TickOutcome::Continue,
            TickOutcome::Continue,
            TickOutcome::Continue,
            TickOutcome::Continue,
            TickOutcome::Complete
        ]
    );
    assert_eq!(c.renderer().texts(), vec!["4", "3", "2", "1", "0"]);
    assert_eq!(c.pending_timers(), 0);
}

#[test]
fn hide_cancels_pending_timers() {
    let mut c = controller();
    let h = c
        .show(
            SurfaceId::Viewport,
            countdown_config(5)
                .with_tick_interval(1000)
                .with_auto_hide(3000)
                .with_resize_interval(50),
        )
        .unwrap();
    assert_eq!(c.session(h).map(|s| s.pending_timers()), Some(3));
    c.advance_to(500);
    c.hide(h).unwrap();
    assert_eq!(c.pending_timers(), 0);

    let calls_before = c.renderer().calls.len();
    assert!(c.advance_to(10_000).is_empty());
    assert_eq!(c.renderer().calls.len(), calls_before);
    assert!(c.renderer().texts().is_empty());
}

#[test]
fn same_instant_timers_fire_in_scheduling_order() {
    let mut c = controller();
    // Auto-hide is scheduled before the first relayout, so at t=200 it wins
    // and the relayout due at the same instant never runs.
    let h = c
        .show(
            SurfaceId::element("box"),
            OverlayConfig::default()
                .with_auto_hide(200)
                .with_resize_interval(50),
        )
        .unwrap();
    let events = c.advance_to(1000);
    assert_eq!(
        events,
        vec![
            LifecycleEvent::Relayout { handle: h },
            LifecycleEvent::Relayout { handle: h },
            LifecycleEvent::Relayout { handle: h },
            LifecycleEvent::AutoHidden {
                handle: h,
                surface: SurfaceId::element("box")
            },
        ]
    );
    assert_eq!(c.renderer().relayouts(), 3);
}

#[test]
fn surfaces_are_independent() {
    let mut c = controller();
    let page = c.show(SurfaceId::Viewport, OverlayConfig::default()).unwrap();
    let panel = c
        .show(SurfaceId::element("panel"), OverlayConfig::default())
        .unwrap();
    let other = c
        .show(SurfaceId::element("other"), OverlayConfig::default())
        .unwrap();
    assert_eq!(c.active_count(), 3);

    assert_eq!(c.hide_surface(&SurfaceId::element("panel"), false), Ok(panel));
    assert_eq!(c.surface_state(&SurfaceId::Viewport), SurfaceState::Active);
    assert_eq!(c.surface_state(&SurfaceId::element("other")), SurfaceState::Active);
    assert!(c.session(page).is_some());
    assert!(c.session(other).is_some());
}

#[test]
fn invalid_config_is_rejected_without_side_effects() {
    let mut c = controller();
    let bad = OverlayConfig::default().with_size(Size::Percent(0.0));
    assert!(matches!(
        c.show(SurfaceId::Viewport, bad),
        Err(OverlayError::InvalidConfig(_))
    ));
    assert_eq!(c.surface_state(&SurfaceId::Viewport), SurfaceState::Idle);
    assert!(c.renderer().calls.is_empty());

    let no_counter = OverlayConfig::default().with_tick_interval(100);
    assert!(c.show(SurfaceId::Viewport, no_counter).is_err());
    assert_eq!(c.pending_timers(), 0);
}

#[test]
fn tick_without_counter_is_rejected() {
    let mut c = controller();
    let h = c.show(SurfaceId::Viewport, OverlayConfig::default()).unwrap();
    assert_eq!(c.tick(h), Err(OverlayError::NoCounter(h)));
    assert_eq!(c.surface_state(&SurfaceId::Viewport), SurfaceState::Active);
    assert!(c.renderer().texts().is_empty());
}

#[test]
fn update_mutates_content_without_touching_timers() {
    let mut c = controller();
    let h = c
        .show(
            SurfaceId::Viewport,
            OverlayConfig::default()
                .with_custom(CustomContent::progress(0))
                .with_auto_hide(3000),
        )
        .unwrap();
    c.advance_to(1000);
    c.update(h, ContentUpdate::Progress(40)).unwrap();
    assert_eq!(
        c.session(h).and_then(|s| s.custom()),
        Some(&CustomContent::progress(40))
    );
    assert_eq!(c.session(h).map(|s| s.pending_timers()), Some(1));

    assert!(matches!(
        c.update(h, ContentUpdate::Progress(101)),
        Err(OverlayError::InvalidConfig(_))
    ));
    assert_eq!(
        c.session(h).and_then(|s| s.custom()),
        Some(&CustomContent::progress(40))
    );

    assert_eq!(c.advance_to(3000).len(), 1);
    assert_eq!(
        c.update(h, ContentUpdate::Progress(50)),
        Err(OverlayError::NotFound(h))
    );
}

#[test]
fn update_on_session_without_content_creates_it() {
    let mut c = controller();
    let h = c.show(SurfaceId::Viewport, OverlayConfig::default()).unwrap();
    c.update(h, ContentUpdate::Text("Saving".into())).unwrap();
    assert!(matches!(
        c.session(h).and_then(|s| s.custom()),
        Some(CustomContent::Text { text, .. }) if text == "Saving"
    ));
    assert_eq!(c.renderer().texts(), vec!["Saving"]);
}

#[test]
fn hide_all_and_immediate_hides() {
    let mut c = controller();
    c.show(SurfaceId::Viewport, OverlayConfig::default()).unwrap();
    c.show(SurfaceId::element("a"), OverlayConfig::default().with_auto_hide(100))
        .unwrap();
    assert_eq!(c.hide_all(true), 2);
    assert_eq!(c.active_count(), 0);
    assert!(c.renderer().unrenders().iter().all(|(_, immediate)| *immediate));
    assert_eq!(c.hide_all(false), 0);
    assert!(c.advance_to(1000).is_empty());
}

#[test]
fn timeline_never_moves_backwards() {
    let mut c = controller();
    c.advance_to(500);
    c.advance_to(100);
    assert_eq!(c.now_ms(), 500);
    let h = c
        .show(SurfaceId::Viewport, OverlayConfig::default().with_auto_hide(100))
        .unwrap();
    assert_eq!(c.session(h).map(|s| s.started_at_ms()), Some(500));
    assert_eq!(c.next_due(), Some(600));
}

#[test]
fn huge_auto_hide_after_the_timeline_moved_never_fires_early() {
    let mut c = controller();
    c.advance_to(1000);
    let config = OverlayConfig::parse("autoHide: 18446744073709551615").unwrap();
    let h = c.show(SurfaceId::Viewport, config).unwrap();

    assert_eq!(c.next_due(), Some(u64::MAX));
    assert!(c.advance_by(1).is_empty());
    assert!(c.advance_by(1_000_000_000).is_empty());
    assert_eq!(c.active_on(&SurfaceId::Viewport), Some(h));
}

#[test]
fn huge_intervals_saturate_when_rescheduled() {
    let mut c = controller();
    let every = u64::MAX - 10;
    let h = c
        .show(
            SurfaceId::element("panel"),
            countdown_config(5)
                .with_tick_interval(every)
                .with_resize_interval(every),
        )
        .unwrap();

    let events = c.advance_to(every);
    assert_eq!(events.len(), 2);
    assert_eq!(c.session(h).and_then(|s| s.counter_value()), Some(4));
    assert_eq!(c.next_due(), Some(u64::MAX));
    assert_eq!(c.pending_timers(), 2);
}
