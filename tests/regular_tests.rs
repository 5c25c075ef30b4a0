// Host-side scenario tests for Regular Mode.

use mole_core::testing::{ports_with_recorders, Recorders, ViewCall};
use mole_core::{GameMode, RegularConfig, RegularMode, RoundPhase};

const FRAME: f64 = 17.0;

fn regular() -> (RegularMode, Recorders) {
    let (ports, rec) = ports_with_recorders();
    let mut m = RegularMode::new(RegularConfig::default(), ports);
    m.init();
    m.start();
    (m, rec)
}

fn frame(m: &mut RegularMode, rec: &Recorders) -> f64 {
    let now = rec.clock.advance(FRAME);
    m.update(now);
    now
}

#[test]
fn init_swaps_circle_for_energy_bar() {
    let (_m, rec) = regular();
    let calls = rec.view.calls();
    assert!(calls.contains(&ViewCall::CircleVisible(false)));
    assert!(calls.contains(&ViewCall::EnergyBarVisible(true)));
}

#[test]
fn busy_window_raises_target_and_cm_follows() {
    let (mut m, rec) = regular();
    frame(&mut m, &rec);
    for _ in 0..5 {
        m.handle_shake();
        frame(&mut m, &rec);
    }
    assert_eq!(m.target_cm(), 1.0);

    // frames at 17 ms: the first one at or past 1000 ms closes the window
    while rec.clock.advance(0.0) + FRAME < 1000.0 {
        frame(&mut m, &rec);
        assert_eq!(m.target_cm(), 1.0);
    }
    frame(&mut m, &rec);
    assert_eq!(m.target_cm(), 2.0);
    assert_eq!(m.shakes_in_window(), 0);
    assert!((m.cm() - 1.1).abs() < 1e-9);

    let mut prev = m.cm();
    for _ in 0..50 {
        frame(&mut m, &rec);
        assert!(m.cm() > prev);
        assert!(m.cm() < 2.0);
        prev = m.cm();
    }
    assert!(m.cm() > 1.99);
}

#[test]
fn quiet_windows_walk_target_back_down() {
    let (mut m, rec) = regular();
    // three busy seconds, then silence
    for _ in 0..3 {
        for _ in 0..4 {
            m.handle_shake();
        }
        for _ in 0..59 {
            frame(&mut m, &rec);
        }
    }
    assert_eq!(m.target_cm(), 4.0);
    for _ in 0..(59 * 2) {
        frame(&mut m, &rec);
    }
    assert_eq!(m.target_cm(), 2.0);
}

#[test]
fn exactly_three_shakes_is_not_enough() {
    let (mut m, rec) = regular();
    for _ in 0..3 {
        m.handle_shake();
    }
    for _ in 0..59 {
        frame(&mut m, &rec);
    }
    assert_eq!(m.target_cm(), 1.0);
}

#[test]
fn cm_stays_in_range_and_target_moves_only_on_boundaries() {
    let (mut m, rec) = regular();
    let mut seed: u32 = 0x1234_5678;
    let mut last_boundary = 0.0;
    let mut prev_target = m.target_cm();
    for _ in 0..5_000 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        for _ in 0..(seed % 4) {
            m.handle_shake();
        }
        let now = frame(&mut m, &rec);
        assert!((1.0..=10.0).contains(&m.cm()), "cm {}", m.cm());
        assert!((1.0..=10.0).contains(&m.target_cm()));
        if m.target_cm() != prev_target {
            assert!(now - last_boundary >= 1000.0);
            assert!((m.target_cm() - prev_target).abs() == 1.0);
            last_boundary = now;
            prev_target = m.target_cm();
        }
    }
}

#[test]
fn sustained_shaking_saturates_at_ten() {
    let (mut m, rec) = regular();
    for _ in 0..30 {
        for _ in 0..6 {
            m.handle_shake();
        }
        for _ in 0..59 {
            frame(&mut m, &rec);
        }
    }
    assert_eq!(m.target_cm(), 10.0);
    assert!(m.cm() <= 10.0);
    assert_eq!(m.shake_value(), 10);
    let before = m.score();
    m.handle_shake();
    assert_eq!(m.score(), before + 10);
}

#[test]
fn energy_stays_within_bounds_under_bursts() {
    let (mut m, rec) = regular();
    for _ in 0..2_500 {
        m.handle_shake();
    }
    assert_eq!(m.energy(), 0);
    for _ in 0..(60 * 30) {
        frame(&mut m, &rec);
        assert!(m.energy() <= 1000);
    }
    // about 30 s of regeneration
    assert!((29..=31).contains(&m.energy()), "energy {}", m.energy());

    let now = rec.clock.advance(2_000_000.0);
    m.update(now);
    assert_eq!(m.energy(), 1000);
}

#[test]
fn end_cancels_everything_synchronously() {
    let (mut m, rec) = regular();
    m.handle_shake();
    frame(&mut m, &rec);
    m.end();
    assert_eq!(m.phase(), RoundPhase::Ended);
    assert_eq!(m.pending_timers(), 0);
    rec.view.clear();

    let now = rec.clock.advance(100_000.0);
    m.update(now);
    m.handle_shake();
    assert!(rec.view.calls().is_empty());
    assert_eq!(m.energy(), 999);
}

#[test]
fn restart_begins_a_fresh_round() {
    let (mut m, rec) = regular();
    for _ in 0..10 {
        m.handle_shake();
    }
    m.end();
    assert_eq!(rec.view.calls().last(), Some(&ViewCall::EndOfRound(10)));
    m.start();
    assert_eq!(m.score(), 0);
    assert_eq!(m.energy(), 1000);
    assert_eq!(m.cm(), 1.0);
    assert_eq!(m.pending_timers(), 1);
}
