use std::time::Duration;

use gemfire_core::{Command, MAX_ROUNDS_PER_SECOND};
use gemfire_system_autofire::{Autofire, Config};

#[test]
fn five_tap_burst_fires_at_the_tap_derived_rate_then_tapers_to_silence() {
    let mut autofire = Autofire::default();
    let mut out = Vec::new();

    // Five taps spread across the 0.2 s window, then evaluation every 10 ms
    // for a full second with no further taps.
    let taps = [0, 40, 80, 120, 160].map(Duration::from_millis);
    let mut fired_at = Vec::new();

    for step in 0..100 {
        let now = Duration::from_millis(step * 10);
        for tap in taps {
            if tap == now {
                autofire.register_tap(tap);
            }
        }

        let before = out.len();
        autofire.handle(now, &mut out);
        if out.len() > before {
            fired_at.push(now);
        }
    }

    assert!(out.iter().all(|command| command == &Command::FireBullet));
    assert!(
        out.len() <= MAX_ROUNDS_PER_SECOND as usize,
        "rate ceiling respected"
    );
    assert!(out.len() >= 2, "burst produced sustained fire");

    // The burst expires 0.2 s after the last tap; nothing fires afterwards.
    let expiry = Duration::from_millis(160 + 200);
    assert!(fired_at.iter().all(|at| *at < expiry));
    assert_eq!(fired_at.first(), Some(&Duration::ZERO));
}

#[test]
fn sustained_tapping_is_capped_at_the_configured_ceiling() {
    let mut autofire = Autofire::default();
    let mut out = Vec::new();

    // Tap every 50 ms for a second so the burst never expires and the tap
    // count drives the rate far past the cap; evaluate every millisecond.
    for millis in 0..1000 {
        let now = Duration::from_millis(millis);
        if millis % 50 == 0 {
            autofire.register_tap(now);
        }
        autofire.handle(now, &mut out);
    }

    assert!(out.len() <= MAX_ROUNDS_PER_SECOND as usize);
    assert!(
        out.len() >= MAX_ROUNDS_PER_SECOND as usize - 5,
        "sustained burst stays near the ceiling, got {}",
        out.len()
    );
}

#[test]
fn a_single_tap_fires_exactly_once_within_its_window() {
    let mut autofire = Autofire::default();
    let mut out = Vec::new();

    autofire.register_tap(Duration::ZERO);
    for millis in 0..200 {
        autofire.handle(Duration::from_millis(millis), &mut out);
    }

    // One tap yields a 5 rounds/s rate, so the 0.2 s burst admits one shot.
    assert_eq!(out.len(), 1);
}

#[test]
fn evaluation_after_the_window_is_silent() {
    let mut autofire = Autofire::new(Config::new(Duration::from_millis(200), 30));
    let mut out = Vec::new();

    autofire.register_tap(Duration::ZERO);
    autofire.handle(Duration::from_millis(200), &mut out);
    autofire.handle(Duration::from_millis(500), &mut out);

    assert!(out.is_empty());
}
