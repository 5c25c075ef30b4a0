// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use constants::*;
use input::*;

#[test]
fn keys_map_to_actions() {
    assert_eq!(action_for_key(" "), Some(KeyAction::TestShake));
    assert_eq!(action_for_key("d"), Some(KeyAction::ToggleMonitor));
    assert_eq!(action_for_key("D"), Some(KeyAction::ToggleMonitor));
    assert_eq!(action_for_key("["), Some(KeyAction::NudgeThreshold(-1.0)));
    assert_eq!(action_for_key("]"), Some(KeyAction::NudgeThreshold(1.0)));
    assert_eq!(action_for_key("Escape"), Some(KeyAction::BackToMenu));
}

#[test]
fn unmapped_keys_do_nothing() {
    for key in ["a", "Enter", "ArrowUp", "Shift", "", "dd"] {
        assert_eq!(action_for_key(key), None, "key {:?}", key);
    }
}

#[test]
fn threshold_nudge_has_a_floor() {
    assert_eq!(nudged_threshold(25.0, 1.0), 26.0);
    assert_eq!(nudged_threshold(25.0, -1.0), 24.0);
    assert_eq!(nudged_threshold(THRESHOLD_MIN, -THRESHOLD_STEP), THRESHOLD_MIN);
    assert_eq!(nudged_threshold(1.5, -1.0), THRESHOLD_MIN);
}

#[test]
fn threshold_query_parameter() {
    assert_eq!(threshold_from_query("?threshold=18"), Some(18.0));
    assert_eq!(threshold_from_query("?debug=1&threshold=30.5"), Some(30.5));
    assert_eq!(threshold_from_query("threshold=12"), Some(12.0));
    assert_eq!(threshold_from_query(""), None);
    assert_eq!(threshold_from_query("?threshold="), None);
    assert_eq!(threshold_from_query("?threshold=abc"), None);
    assert_eq!(threshold_from_query("?threshold=0"), None);
    assert_eq!(threshold_from_query("?threshold=inf"), None);
    assert_eq!(threshold_from_query("?thresholds=20"), None);
}

#[test]
fn mobile_user_agents() {
    assert!(is_mobile_user_agent(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148"
    ));
    assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
    assert!(!is_mobile_user_agent(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) AppleWebKit/605.1.15"
    ));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn presentation_constants_are_sane() {
    assert!(FEEDBACK_FLASH_MS > 0);
    assert!(VIBRATE_MS > 0);
    assert!(THRESHOLD_STEP > 0.0);
    assert!(CHART_GRID_STEP > 0.0);
    let ids = [
        GAME_AREA_ID,
        CIRCLE_ID,
        TIME_WINDOW_ID,
        FEEDBACK_ID,
        SCORE_ID,
        MOLE_ID,
        FEVER_ID,
        FEVER_COUNTDOWN_ID,
        ENERGY_BAR_ID,
        ENERGY_FILL_ID,
        MODE_BUTTONS_ID,
        CLASSIC_BUTTON_ID,
        REGULAR_BUTTON_ID,
        BACK_BUTTON_ID,
        ACTION_BUTTON_ID,
        SHAKE_TEST_BUTTON_ID,
        MONITOR_ID,
        CHART_CANVAS_ID,
        CHART_LABEL_ID,
    ];
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len(), "duplicate element id");
}
