//! Regular Mode: free shaking against an energy budget.
//!
//! Every shake spends one unit of energy and is worth `round(cm)` points.
//! `cm` is a difficulty multiplier that follows the player's shake rate: once
//! per rate window the target steps up when the player shook more than
//! `rate_raise_above` times, and down otherwise; `cm` then eases toward the
//! target a fixed fraction per frame. Energy trickles back on a timer.

use crate::config::{RegularConfig, ZeroEnergyReward};
use crate::mode::{GameMode, ModeKind, RoundPhase};
use crate::ports::{Feedback, Ports};
use crate::timer::Scheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RegularTask {
    EnergyRegen,
}

pub struct RegularMode {
    config: RegularConfig,
    ports: Ports,
    phase: RoundPhase,
    score: u32,
    energy: u32,
    cm: f64,
    target_cm: f64,
    shakes_in_window: u32,
    // Some while the smoothing loop is live
    window_start_ms: Option<f64>,
    timers: Scheduler<RegularTask>,
}

impl RegularMode {
    pub fn new(config: RegularConfig, ports: Ports) -> Self {
        let energy = config.max_energy;
        let cm = config.cm_min;
        Self {
            config,
            ports,
            phase: RoundPhase::Idle,
            score: 0,
            energy,
            cm,
            target_cm: cm,
            shakes_in_window: 0,
            window_start_ms: None,
            timers: Scheduler::new(),
        }
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn max_energy(&self) -> u32 {
        self.config.max_energy
    }

    pub fn cm(&self) -> f64 {
        self.cm
    }

    pub fn target_cm(&self) -> f64 {
        self.target_cm
    }

    pub fn shakes_in_window(&self) -> u32 {
        self.shakes_in_window
    }

    /// Points the next accepted shake is worth.
    pub fn shake_value(&self) -> u32 {
        self.cm.round().max(0.0) as u32
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_smoothing(&self) -> bool {
        self.window_start_ms.is_some()
    }

    pub fn config(&self) -> &RegularConfig {
        &self.config
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.ports.view.render_score(&format!("Score: {}", self.score));
    }

    fn regenerate(&mut self) {
        if self.energy < self.config.max_energy {
            self.energy = self
                .energy
                .saturating_add(self.config.energy_regen_amount)
                .min(self.config.max_energy);
            self.ports
                .view
                .render_energy(self.energy, self.config.max_energy);
        }
    }

    fn smooth(&mut self, now_ms: f64) {
        let Some(start) = self.window_start_ms else {
            return;
        };
        let elapsed = now_ms - start;
        if elapsed >= self.config.rate_window_ms {
            let before = self.target_cm;
            self.target_cm = if self.shakes_in_window > self.config.rate_raise_above {
                (self.target_cm + 1.0).min(self.config.cm_max)
            } else {
                (self.target_cm - 1.0).max(self.config.cm_min)
            };
            log::debug!(
                "[regular] {} shakes in window, target cm {} -> {}",
                self.shakes_in_window,
                before,
                self.target_cm
            );
            self.shakes_in_window = 0;
            self.window_start_ms = Some(now_ms);
        } else if elapsed < 0.0 {
            log::trace!("[regular] clock went backwards by {:.1} ms", -elapsed);
        }

        self.cm += (self.target_cm - self.cm) * self.config.cm_smoothing;
        // f64::clamp panics on an inverted range
        self.cm = self.cm.max(self.config.cm_min).min(self.config.cm_max);
        self.ports.view.render_mole_level(self.cm);
    }
}

impl GameMode for RegularMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Regular
    }

    fn init(&mut self) {
        self.ports.view.set_circle_visible(false);
        self.ports.view.set_energy_bar_visible(true);
        self.ports
            .view
            .render_energy(self.energy, self.config.max_energy);
        self.ports.view.render_mole_level(self.cm);
    }

    fn start(&mut self) {
        if self.phase == RoundPhase::Running {
            log::debug!("[regular] start ignored; round already running");
            return;
        }
        let now = self.ports.clock.now_ms();
        self.timers.cancel_all();
        self.phase = RoundPhase::Running;
        self.score = 0;
        self.energy = self.config.max_energy;
        self.cm = self.config.cm_min;
        self.target_cm = self.config.cm_min;
        self.shakes_in_window = 0;
        self.window_start_ms = Some(now);
        self.timers.every(
            now,
            self.config.energy_regen_period_ms,
            RegularTask::EnergyRegen,
        );

        self.ports.view.set_circle_visible(false);
        self.ports.view.set_energy_bar_visible(true);
        self.ports.view.render_score("Score: 0");
        self.ports
            .view
            .render_energy(self.energy, self.config.max_energy);
        self.ports.view.render_mole_level(self.cm);
        log::info!("[regular] round started");
    }

    fn update(&mut self, now_ms: f64) {
        if self.phase != RoundPhase::Running || !now_ms.is_finite() {
            return;
        }
        for task in self.timers.poll(now_ms) {
            match task {
                RegularTask::EnergyRegen => self.regenerate(),
            }
        }
        self.smooth(now_ms);
    }

    fn handle_shake(&mut self) {
        if self.phase != RoundPhase::Running {
            log::trace!("[regular] shake ignored while {:?}", self.phase);
            return;
        }
        self.shakes_in_window = self.shakes_in_window.saturating_add(1);

        if self.energy > 0 {
            self.energy -= 1;
            let points = self.shake_value();
            self.add_score(points);
            self.ports
                .view
                .render_energy(self.energy, self.config.max_energy);
            self.ports.haptics.pulse();
            self.ports.view.show_feedback(Feedback::Positive);
        } else {
            match self.config.reward_at_zero_energy {
                ZeroEnergyReward::Granted => {
                    let points = self.shake_value();
                    self.add_score(points);
                }
                ZeroEnergyReward::Withheld => {
                    log::trace!("[regular] out of energy; shake not rewarded");
                }
            }
        }
    }

    fn end(&mut self) {
        self.timers.cancel_all();
        self.window_start_ms = None;
        if self.phase != RoundPhase::Running {
            return;
        }
        self.phase = RoundPhase::Ended;
        self.ports.view.show_end_of_round(self.score);
        log::info!("[regular] round over with score {}", self.score);
    }

    fn phase(&self) -> RoundPhase {
        self.phase
    }

    fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ports_with_recorders, Recorders, ViewCall};

    fn mode_with(config: RegularConfig) -> (RegularMode, Recorders) {
        let (ports, rec) = ports_with_recorders();
        (RegularMode::new(config, ports), rec)
    }

    #[test]
    fn start_resets_state() {
        let (mut m, rec) = mode_with(RegularConfig::default());
        m.start();
        assert_eq!(m.energy(), 1000);
        assert_eq!(m.cm(), 1.0);
        assert_eq!(m.target_cm(), 1.0);
        assert_eq!(m.pending_timers(), 1);
        assert!(rec.view.calls().contains(&ViewCall::Energy(1000, 1000)));
    }

    #[test]
    fn shake_spends_energy_and_scores_rounded_cm() {
        let (mut m, rec) = mode_with(RegularConfig::default());
        m.start();
        m.handle_shake();
        assert_eq!(m.energy(), 999);
        assert_eq!(m.score(), 1);
        assert_eq!(rec.haptics.count(), 1);
        assert_eq!(rec.view.last_score_text().as_deref(), Some("Score: 1"));
    }

    #[test]
    fn regen_tops_up_but_never_exceeds_max() {
        let (mut m, rec) = mode_with(RegularConfig::default());
        m.start();
        m.handle_shake();
        m.handle_shake();
        rec.view.clear();
        m.update(1000.0);
        assert_eq!(m.energy(), 999);
        m.update(2000.0);
        assert_eq!(m.energy(), 1000);
        m.update(3000.0);
        assert_eq!(m.energy(), 1000);
        assert_eq!(rec.view.count(|c| matches!(c, ViewCall::Energy(..))), 2);
    }

    #[test]
    fn zero_energy_policy_is_configurable() {
        let withheld = RegularConfig {
            max_energy: 1,
            reward_at_zero_energy: ZeroEnergyReward::Withheld,
            ..RegularConfig::default()
        };
        let (mut m, rec) = mode_with(withheld);
        m.start();
        m.handle_shake();
        m.handle_shake();
        assert_eq!(m.energy(), 0);
        assert_eq!(m.score(), 1);
        assert_eq!(m.shakes_in_window(), 2);
        assert_eq!(rec.haptics.count(), 1);

        let granted = RegularConfig {
            max_energy: 1,
            ..RegularConfig::default()
        };
        let (mut m, rec) = mode_with(granted);
        m.start();
        m.handle_shake();
        m.handle_shake();
        assert_eq!(m.score(), 2);
        assert_eq!(rec.haptics.count(), 1);
        assert_eq!(
            rec.view
                .count(|c| matches!(c, ViewCall::Feedback(Feedback::Positive))),
            1
        );
    }

    #[test]
    fn quiet_window_lowers_target_but_not_below_min() {
        let (mut m, _rec) = mode_with(RegularConfig::default());
        m.start();
        m.update(1000.0);
        assert_eq!(m.target_cm(), 1.0);
        assert_eq!(m.cm(), 1.0);
    }

    #[test]
    fn end_stops_regen_and_smoothing() {
        let (mut m, _rec) = mode_with(RegularConfig::default());
        m.start();
        m.handle_shake();
        m.end();
        assert_eq!(m.pending_timers(), 0);
        assert!(!m.is_smoothing());
        m.update(5000.0);
        assert_eq!(m.energy(), 999);
        m.handle_shake();
        assert_eq!(m.score(), 1);
    }

    #[test]
    fn inverted_cm_range_does_not_panic() {
        let config = RegularConfig {
            cm_min: 5.0,
            cm_max: 2.0,
            ..RegularConfig::default()
        };
        let (mut m, rec) = mode_with(config);
        m.start();
        for i in 1..=5 {
            m.handle_shake();
            m.update(i as f64 * 500.0);
        }
        assert_eq!(m.cm(), 2.0);
        assert!(rec.view.count(|c| matches!(c, ViewCall::MoleLevel(_))) > 0);

        let config = RegularConfig {
            cm_min: f64::NAN,
            ..RegularConfig::default()
        };
        let (mut m, _rec) = mode_with(config);
        m.start();
        m.update(16.0);
        assert!(m.cm().is_finite());
    }
}
