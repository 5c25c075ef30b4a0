//! Rolling record of recent acceleration magnitudes for the dev monitor.

use crate::constants::{
    ACCEL_HISTORY_CAPACITY, ACCEL_HISTORY_PREFILL, ACCEL_SCALE_FLOOR, ACCEL_SCALE_HEADROOM,
};
use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub struct AccelHistory {
    samples: VecDeque<f64>,
    capacity: usize,
    threshold: f64,
    max_scale: f64,
}

impl AccelHistory {
    pub fn new(threshold: f64) -> Self {
        Self::with_capacity(threshold, ACCEL_HISTORY_CAPACITY)
    }

    /// The window starts flat at zero so the plot scrolls in from the right.
    pub fn with_capacity(threshold: f64, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut samples = VecDeque::with_capacity(capacity + 1);
        samples.extend(std::iter::repeat(0.0).take(ACCEL_HISTORY_PREFILL.min(capacity)));
        Self {
            samples,
            capacity,
            threshold,
            max_scale: ACCEL_SCALE_FLOOR,
        }
    }

    pub fn push(&mut self, magnitude: f64) {
        if !magnitude.is_finite() {
            return;
        }
        self.samples.push_back(magnitude);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        self.max_scale = self.max_scale.max(magnitude);
        self.max_scale = self.max_scale.max(self.threshold + ACCEL_SCALE_HEADROOM);
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Top of the plot's y axis; never shrinks.
    #[inline]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Status line shown above the plot.
    pub fn label(&self) -> String {
        format!(
            "Acc: {:.2} | Threshold: {}",
            self.latest().unwrap_or(0.0),
            self.threshold
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_prefilled_with_zeros() {
        let h = AccelHistory::new(25.0);
        assert_eq!(h.len(), ACCEL_HISTORY_PREFILL);
        assert!(h.samples().all(|s| s == 0.0));
        assert_eq!(h.max_scale(), ACCEL_SCALE_FLOOR);
    }

    #[test]
    fn drops_oldest_past_capacity() {
        let mut h = AccelHistory::with_capacity(25.0, 3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            h.push(v);
        }
        assert_eq!(h.samples().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn scale_tracks_peaks_and_threshold() {
        let mut h = AccelHistory::new(45.0);
        h.push(10.0);
        assert_eq!(h.max_scale(), 55.0);
        h.push(80.0);
        h.push(1.0);
        assert_eq!(h.max_scale(), 80.0);
    }

    #[test]
    fn label_formats_latest_sample() {
        let mut h = AccelHistory::new(25.0);
        h.push(9.8123);
        assert_eq!(h.label(), "Acc: 9.81 | Threshold: 25");
    }
}
