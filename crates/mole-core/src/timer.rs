//! Cancellable one-shot and repeating tasks driven by the frame clock.
//!
//! Modes own a `Scheduler` instead of registering host timers, so tearing a
//! mode down is a single `cancel_all()` and nothing can fire afterwards.

use smallvec::SmallVec;

// Keeps a repeating task from spinning forever inside one poll.
const MIN_PERIOD_MS: f64 = 1.0;
// Most runs one repeating task may report from a single poll.
pub const MAX_CATCH_UP_RUNS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    handle: TimerHandle,
    due_ms: f64,
    period_ms: Option<f64>,
    task: T,
}

#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T: Copy> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once, `delay_ms` after `now_ms`.
    pub fn once(&mut self, now_ms: f64, delay_ms: f64, task: T) -> TimerHandle {
        self.push(now_ms + sanitize(delay_ms), None, task)
    }

    /// Run `task` every `period_ms`, first at `now_ms + period_ms`.
    pub fn every(&mut self, now_ms: f64, period_ms: f64, task: T) -> TimerHandle {
        let period = sanitize(period_ms).max(MIN_PERIOD_MS);
        self.push(now_ms + period, Some(period), task)
    }

    fn push(&mut self, due_ms: f64, period_ms: Option<f64>, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            due_ms,
            period_ms,
            task,
        });
        handle
    }

    /// Returns whether the handle was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect every task due at `now_ms`, earliest first. Repeating tasks
    /// that missed several periods fire once per missed period, up to
    /// [`MAX_CATCH_UP_RUNS`]; older runs past the cap are dropped.
    pub fn poll(&mut self, now_ms: f64) -> SmallVec<[T; 4]> {
        let mut fired: SmallVec<[(f64, u64, T); 4]> = SmallVec::new();
        if !now_ms.is_finite() {
            return SmallVec::new();
        }
        self.entries.retain_mut(|e| {
            if e.due_ms > now_ms {
                return true;
            }
            let Some(period) = e.period_ms else {
                fired.push((e.due_ms, e.handle.0, e.task));
                return false;
            };
            let missed = ((now_ms - e.due_ms) / period).floor() as u64 + 1;
            let runs = missed.min(MAX_CATCH_UP_RUNS);
            if runs < missed {
                log::debug!(
                    "[timer] dropping {} missed runs of task {}",
                    missed - runs,
                    e.handle.0
                );
            }
            let first = e.due_ms + (missed - runs) as f64 * period;
            for k in 0..runs {
                fired.push((first + k as f64 * period, e.handle.0, e.task));
            }
            e.due_ms += missed as f64 * period;
            while e.due_ms <= now_ms {
                e.due_ms += period;
            }
            true
        });
        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, _, t)| t).collect()
    }

    /// Next due time of `handle`, if it is still pending.
    pub fn due_ms(&self, handle: TimerHandle) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.due_ms)
    }
}

#[inline]
fn sanitize(ms: f64) -> f64 {
    if ms.is_finite() {
        ms.max(0.0)
    } else {
        0.0
    }
}
