//! Classic Mode: shake while the shrinking circle sits inside the target ring.
//!
//! Each cycle the circle shrinks from its start size towards zero. A shake
//! while the circle is inside the ring scores, a shake outside it costs a
//! point, and letting the circle collapse without shaking also costs a point.
//! Either way the circle resets and a new cycle begins. The circle shrinks
//! faster as the score grows. Reaching the fever score switches to a timed
//! fever where every shake scores; when the fever runs out the round is over.

use crate::config::ClassicConfig;
use crate::constants::{FEVER_COUNTDOWN_STEP_MS, FRAME_TIME_EPSILON_MS, MAX_CATCH_UP_FRAMES};
use crate::mode::{GameMode, ModeKind, RoundPhase};
use crate::ports::{Feedback, Ports};
use crate::timer::Scheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClassicPhase {
    #[default]
    Idle,
    Shrinking,
    Fever,
    Ended,
}

impl ClassicPhase {
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, ClassicPhase::Shrinking | ClassicPhase::Fever)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClassicTask {
    FeverCountdown,
    FeverEnd,
}

pub struct ClassicMode {
    config: ClassicConfig,
    ports: Ports,
    phase: ClassicPhase,
    score: u32,
    circle_size: f64,
    shrink_speed: f64,
    in_time_window: bool,
    scored_this_cycle: bool,
    // set on fever entry, cleared once the score drops below the threshold
    fever_latched: bool,
    fever_seconds_left: u32,
    last_frame_ms: Option<f64>,
    // time not yet turned into shrink steps
    frame_backlog_ms: f64,
    timers: Scheduler<ClassicTask>,
}

impl ClassicMode {
    pub fn new(config: ClassicConfig, ports: Ports) -> Self {
        let circle_size = config.circle_start_size;
        let shrink_speed = config.shrink_speed_for(0);
        Self {
            config,
            ports,
            phase: ClassicPhase::Idle,
            score: 0,
            circle_size,
            shrink_speed,
            in_time_window: false,
            scored_this_cycle: false,
            fever_latched: false,
            fever_seconds_left: 0,
            last_frame_ms: None,
            frame_backlog_ms: 0.0,
            timers: Scheduler::new(),
        }
    }

    pub fn classic_phase(&self) -> ClassicPhase {
        self.phase
    }

    pub fn circle_size(&self) -> f64 {
        self.circle_size
    }

    pub fn shrink_speed(&self) -> f64 {
        self.shrink_speed
    }

    pub fn is_in_time_window(&self) -> bool {
        self.in_time_window
    }

    pub fn is_fever_mode(&self) -> bool {
        self.phase == ClassicPhase::Fever
    }

    pub fn scored_this_cycle(&self) -> bool {
        self.scored_this_cycle
    }

    pub fn fever_seconds_left(&self) -> u32 {
        self.fever_seconds_left
    }

    /// Timers still scheduled; zero whenever the round is not running.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn config(&self) -> &ClassicConfig {
        &self.config
    }

    /// Advance one logical frame of circle shrinking.
    fn step(&mut self) {
        self.circle_size -= self.shrink_speed;
        if self.circle_size <= 0.0 {
            if !self.scored_this_cycle {
                log::debug!("[classic] circle collapsed without a shake");
                self.change_score(-1);
                self.ports.view.show_feedback(Feedback::Negative);
                self.ports.haptics.pulse();
            }
            self.reset_circle();
        } else {
            self.ports.view.render_circle_size(self.circle_size);
        }
        self.check_time_window();
    }

    /// Turn `elapsed_ms` into whole shrink steps at the configured frame
    /// rate, carrying the remainder. At most [`MAX_CATCH_UP_FRAMES`] steps
    /// run per call; time beyond that is dropped.
    fn advance_frames(&mut self, elapsed_ms: f64) {
        let frame = self.config.frame_duration_ms;
        self.frame_backlog_ms += elapsed_ms;
        let mut steps = 0;
        while self.frame_backlog_ms + FRAME_TIME_EPSILON_MS >= frame {
            if steps == MAX_CATCH_UP_FRAMES {
                log::debug!(
                    "[classic] dropping {:.1} ms of stalled frames",
                    self.frame_backlog_ms
                );
                self.frame_backlog_ms = 0.0;
                break;
            }
            self.frame_backlog_ms -= frame;
            self.step();
            steps += 1;
        }
        self.frame_backlog_ms = self.frame_backlog_ms.max(0.0);
    }

    fn check_time_window(&mut self) {
        if self.circle_size <= self.config.window_edge() {
            if !self.in_time_window {
                self.in_time_window = true;
                self.ports.haptics.pulse();
            }
        } else {
            self.in_time_window = false;
        }
    }

    fn resolve_cycle(&mut self) {
        if self.scored_this_cycle {
            return;
        }
        if self.in_time_window {
            log::debug!("[classic] hit at circle size {:.1}", self.circle_size);
            self.change_score(1);
            self.ports.view.show_feedback(Feedback::Positive);
        } else {
            log::debug!("[classic] early shake at circle size {:.1}", self.circle_size);
            self.change_score(-1);
            self.ports.view.show_feedback(Feedback::Negative);
        }
        self.scored_this_cycle = true;
        // a hit may have started the fever; the circle is hidden then but
        // still returns to its start size for the next round
        self.reset_circle();
    }

    fn reset_circle(&mut self) {
        self.circle_size = self.config.circle_start_size;
        self.in_time_window = false;
        self.scored_this_cycle = false;
        if !self.is_fever_mode() {
            self.shrink_speed = self.config.shrink_speed_for(self.score);
        }
        self.ports.view.render_circle_size(self.circle_size);
    }

    fn change_score(&mut self, delta: i32) {
        self.score = (self.score as i64 + delta as i64).clamp(0, u32::MAX as i64) as u32;
        self.ports.view.render_score(&format!("Score: {}", self.score));
        if !self.is_fever_mode() {
            self.shrink_speed = self.config.shrink_speed_for(self.score);
        }
        self.ports.view.render_mole_level(self.score as f64);

        if self.score < self.config.fever_score_threshold {
            self.fever_latched = false;
        } else if self.phase == ClassicPhase::Shrinking && !self.fever_latched {
            self.enter_fever();
        }
    }

    fn enter_fever(&mut self) {
        let now = self.ports.clock.now_ms();
        self.phase = ClassicPhase::Fever;
        self.fever_latched = true;
        self.fever_seconds_left =
            (self.config.fever_duration_ms / FEVER_COUNTDOWN_STEP_MS).ceil() as u32;
        log::info!(
            "[classic] fever at score {} for {} s",
            self.score,
            self.fever_seconds_left
        );
        self.ports.view.enter_fever();
        self.ports.view.set_circle_visible(false);
        self.ports.view.render_fever_countdown(self.fever_seconds_left);
        // countdown first so its last tick lands before the end on a shared due time
        self.timers
            .every(now, FEVER_COUNTDOWN_STEP_MS, ClassicTask::FeverCountdown);
        self.timers
            .once(now, self.config.fever_duration_ms, ClassicTask::FeverEnd);
    }

    fn run_task(&mut self, task: ClassicTask) {
        match task {
            ClassicTask::FeverCountdown => {
                self.fever_seconds_left = self.fever_seconds_left.saturating_sub(1);
                self.ports
                    .view
                    .render_fever_countdown(self.fever_seconds_left);
            }
            ClassicTask::FeverEnd => {
                log::info!("[classic] fever over");
                self.end();
            }
        }
    }
}

impl GameMode for ClassicMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Classic
    }

    fn init(&mut self) {
        self.ports.view.set_energy_bar_visible(false);
        self.ports.view.set_circle_visible(true);
        self.ports.view.render_circle_size(self.circle_size);
        self.ports.view.render_mole_level(self.score as f64);
    }

    fn start(&mut self) {
        if self.phase.is_running() {
            log::debug!("[classic] start ignored; round already running");
            return;
        }
        self.timers.cancel_all();
        self.phase = ClassicPhase::Shrinking;
        self.score = 0;
        self.fever_latched = false;
        self.fever_seconds_left = 0;
        self.last_frame_ms = None;
        self.frame_backlog_ms = 0.0;
        self.ports.view.set_circle_visible(true);
        self.change_score(0);
        self.reset_circle();
        log::info!("[classic] round started");
    }

    fn update(&mut self, now_ms: f64) {
        if !self.phase.is_running() || !now_ms.is_finite() {
            return;
        }

        for task in self.timers.poll(now_ms) {
            if !self.phase.is_running() {
                return;
            }
            self.run_task(task);
        }
        if !self.phase.is_running() {
            return;
        }

        let last = *self.last_frame_ms.get_or_insert(now_ms);
        let elapsed = now_ms - last;
        if elapsed < 0.0 {
            log::trace!("[classic] clock went backwards by {:.1} ms", -elapsed);
            return;
        }
        self.last_frame_ms = Some(now_ms);
        if self.phase != ClassicPhase::Shrinking {
            self.frame_backlog_ms = 0.0;
            return;
        }
        self.advance_frames(elapsed);
    }

    fn handle_shake(&mut self) {
        match self.phase {
            ClassicPhase::Fever => {
                self.change_score(1);
                self.ports.haptics.pulse();
            }
            ClassicPhase::Shrinking => self.resolve_cycle(),
            phase => log::trace!("[classic] shake ignored while {:?}", phase),
        }
    }

    fn end(&mut self) {
        self.timers.cancel_all();
        if !self.phase.is_running() {
            return;
        }
        let was_fever = self.is_fever_mode();
        self.phase = ClassicPhase::Ended;
        self.last_frame_ms = None;
        self.frame_backlog_ms = 0.0;
        if was_fever {
            self.ports.view.exit_fever();
        }
        self.ports.view.set_circle_visible(true);
        self.ports.view.show_end_of_round(self.score);
        log::info!("[classic] round over with score {}", self.score);
    }

    fn phase(&self) -> RoundPhase {
        match self.phase {
            ClassicPhase::Idle => RoundPhase::Idle,
            ClassicPhase::Shrinking | ClassicPhase::Fever => RoundPhase::Running,
            ClassicPhase::Ended => RoundPhase::Ended,
        }
    }

    fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ports_with_recorders, ViewCall};

    fn mode() -> (ClassicMode, crate::testing::Recorders) {
        let (ports, rec) = ports_with_recorders();
        (ClassicMode::new(ClassicConfig::default(), ports), rec)
    }

    #[test]
    fn idle_mode_ignores_shakes_and_frames() {
        let (mut m, rec) = mode();
        m.handle_shake();
        m.update(0.0);
        m.update(1000.0);
        assert_eq!(m.score(), 0);
        assert_eq!(m.circle_size(), 280.0);
        assert!(rec.view.calls().is_empty());
    }

    #[test]
    fn first_frame_only_seeds_the_throttle() {
        let (mut m, _rec) = mode();
        m.start();
        m.update(500.0);
        assert_eq!(m.circle_size(), 280.0);
        m.update(510.0);
        assert_eq!(m.circle_size(), 280.0);
        m.update(517.0);
        assert_eq!(m.circle_size(), 276.0);
    }

    #[test]
    fn long_gap_replays_a_capped_number_of_frames() {
        let (mut m, _rec) = mode();
        m.start();
        m.update(0.0);
        m.update(1000.0);
        let cap = MAX_CATCH_UP_FRAMES as f64;
        assert_eq!(m.circle_size(), 280.0 - 4.0 * cap);
        // the stalled backlog is gone, the next frame is a single step
        m.update(1000.0 + 1000.0 / 60.0);
        assert_eq!(m.circle_size(), 280.0 - 4.0 * (cap + 1.0));
    }

    #[test]
    fn short_callbacks_accumulate_into_frames() {
        let (mut m, _rec) = mode();
        m.start();
        m.update(0.0);
        m.update(10.0);
        assert_eq!(m.circle_size(), 280.0);
        m.update(20.0);
        assert_eq!(m.circle_size(), 276.0);
        m.update(30.0);
        assert_eq!(m.circle_size(), 276.0);
        m.update(40.0);
        assert_eq!(m.circle_size(), 272.0);
    }

    #[test]
    fn restart_drops_the_frame_backlog() {
        let (mut m, _rec) = mode();
        m.start();
        m.update(0.0);
        m.update(16.0);
        m.end();
        m.start();
        m.update(100.0);
        m.update(101.0);
        assert_eq!(m.circle_size(), 280.0);
    }

    #[test]
    fn window_entry_pulses_haptics_once() {
        let (mut m, rec) = mode();
        m.start();
        let mut t = 0.0;
        m.update(t);
        // 280 - 4 * 32 = 152 is the first size inside the 155 band
        for _ in 0..31 {
            t += 17.0;
            m.update(t);
        }
        assert!(!m.is_in_time_window());
        assert_eq!(rec.haptics.count(), 0);
        t += 17.0;
        m.update(t);
        assert!(m.is_in_time_window());
        assert_eq!(rec.haptics.count(), 1);
        t += 17.0;
        m.update(t);
        assert_eq!(rec.haptics.count(), 1);
    }

    #[test]
    fn early_shake_costs_a_point_but_never_below_zero() {
        let (mut m, rec) = mode();
        m.start();
        m.handle_shake();
        assert_eq!(m.score(), 0);
        assert_eq!(m.circle_size(), 280.0);
        assert!(rec
            .view
            .calls()
            .contains(&ViewCall::Feedback(Feedback::Negative)));
    }

    #[test]
    fn end_is_idempotent_and_cancels_timers() {
        let (mut m, rec) = mode();
        m.start();
        m.end();
        m.end();
        assert_eq!(m.phase(), RoundPhase::Ended);
        assert_eq!(m.pending_timers(), 0);
        let ends = rec
            .view
            .calls()
            .iter()
            .filter(|c| matches!(c, ViewCall::EndOfRound(_)))
            .count();
        assert_eq!(ends, 1);
    }
}
