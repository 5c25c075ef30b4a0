// Pure input mapping: no DOM access here so it can be tested on the host.
use crate::constants::{THRESHOLD_MIN, THRESHOLD_STEP};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    TestShake,
    ToggleMonitor,
    /// Signed change applied to the shake threshold.
    NudgeThreshold(f64),
    BackToMenu,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        " " => Some(KeyAction::TestShake),
        "d" | "D" => Some(KeyAction::ToggleMonitor),
        "[" => Some(KeyAction::NudgeThreshold(-THRESHOLD_STEP)),
        "]" => Some(KeyAction::NudgeThreshold(THRESHOLD_STEP)),
        "Escape" => Some(KeyAction::BackToMenu),
        _ => None,
    }
}

#[inline]
pub fn nudged_threshold(current: f64, delta: f64) -> f64 {
    (current + delta).max(THRESHOLD_MIN)
}

/// Reads `threshold=<number>` from a `location.search` string. Anything that
/// is not a finite number at or above `THRESHOLD_MIN` is ignored.
pub fn threshold_from_query(search: &str) -> Option<f64> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "threshold")
        .and_then(|(_, value)| value.trim().parse::<f64>().ok())
        .filter(|t| t.is_finite() && *t >= THRESHOLD_MIN)
}

/// `Mobi` / `Android` user agents get real shakes; everything else gets the
/// test-shake button.
#[inline]
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    user_agent.contains("Mobi") || user_agent.contains("Android")
}
