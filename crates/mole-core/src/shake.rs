//! Threshold-crossing shake detection.
//!
//! A shake is counted when the acceleration magnitude rises above the
//! threshold and then falls back to or below it. Counting on the falling edge
//! means a sustained high reading produces a single shake once it settles,
//! and a reading that never comes back down produces none.
//!
//! There is no time-based debounce: a signal oscillating tightly around the
//! threshold can report shakes faster than a person could perform them.

use glam::DVec3;

/// One completed shake: the sample stream went above the threshold at
/// `started_at_ms` and came back down at `ended_at_ms`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShakeEvent {
    pub started_at_ms: f64,
    pub ended_at_ms: f64,
}

impl ShakeEvent {
    #[inline]
    pub fn duration_ms(&self) -> f64 {
        (self.ended_at_ms - self.started_at_ms).max(0.0)
    }
}

#[derive(Clone, Debug)]
pub struct ShakeDetector {
    threshold: f64,
    above: bool,
    shake_start_ms: f64,
}

impl ShakeDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            above: false,
            shake_start_ms: 0.0,
        }
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Changes sensitivity; a shake already in progress is still completed
    /// against the new threshold.
    pub fn set_threshold(&mut self, threshold: f64) {
        if !threshold.is_finite() {
            log::warn!("[shake] ignoring non-finite threshold {threshold}");
            return;
        }
        self.threshold = threshold;
    }

    #[inline]
    pub fn is_above_threshold(&self) -> bool {
        self.above
    }

    /// Feed one magnitude sample taken at `now_ms`.
    pub fn update(&mut self, magnitude: f64, now_ms: f64) -> Option<ShakeEvent> {
        if !magnitude.is_finite() {
            log::trace!("[shake] dropping non-finite sample");
            return None;
        }
        if !self.above && magnitude > self.threshold {
            self.above = true;
            self.shake_start_ms = now_ms;
            None
        } else if self.above && magnitude <= self.threshold {
            self.above = false;
            Some(ShakeEvent {
                started_at_ms: self.shake_start_ms,
                ended_at_ms: now_ms,
            })
        } else {
            None
        }
    }

    /// Forget a half-finished shake, e.g. when a round is torn down.
    pub fn reset(&mut self) {
        self.above = false;
        self.shake_start_ms = 0.0;
    }
}

/// Length of a 3-axis acceleration reading. Missing or non-finite axes
/// count as zero.
pub fn acceleration_magnitude(x: f64, y: f64, z: f64) -> f64 {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    DVec3::new(finite(x), finite(y), finite(z)).length()
}
