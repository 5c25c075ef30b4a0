//! Drives a [`GameController`] from a recorded trace on a simulated clock.

use crate::trace::Sample;
use mole_core::constants::FRAME_DURATION_MS;
use mole_core::{
    Clock, Feedback, GameConfig, GameController, GameView, Haptics, ModeKind, Ports,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Clock whose time only moves when the replay says so.
#[derive(Default)]
pub struct TraceClock {
    now: Cell<f64>,
}

impl TraceClock {
    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }
}

impl Clock for TraceClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// View that narrates to the log and remembers what a player would see at
/// the end.
#[derive(Default)]
pub struct LoggingView {
    score_text: RefCell<String>,
    final_score: Cell<Option<u32>>,
    fevers: Cell<u32>,
}

impl GameView for LoggingView {
    fn render_circle_size(&self, size: f64) {
        log::trace!("circle {:.1}", size);
    }
    fn render_mole_level(&self, level: f64) {
        log::trace!("mole level {:.2}", level);
    }
    fn show_feedback(&self, kind: Feedback) {
        log::debug!("feedback {:?}", kind);
    }
    fn render_score(&self, text: &str) {
        log::debug!("{}", text);
        *self.score_text.borrow_mut() = text.to_string();
    }
    fn enter_fever(&self) {
        self.fevers.set(self.fevers.get() + 1);
        log::info!("fever!");
    }
    fn exit_fever(&self) {
        log::info!("fever over");
    }
    fn render_fever_countdown(&self, seconds_left: u32) {
        log::debug!("fever {}s left", seconds_left);
    }
    fn render_energy(&self, energy: u32, max_energy: u32) {
        log::trace!("energy {}/{}", energy, max_energy);
    }
    fn set_circle_visible(&self, visible: bool) {
        log::trace!("circle visible={}", visible);
    }
    fn set_energy_bar_visible(&self, visible: bool) {
        log::trace!("energy bar visible={}", visible);
    }
    fn show_end_of_round(&self, final_score: u32) {
        log::info!("round over: {}", final_score);
        self.final_score.set(Some(final_score));
    }
}

pub struct LoggingHaptics;

impl Haptics for LoggingHaptics {
    fn pulse(&self) {
        log::trace!("bzz");
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub mode: ModeKind,
    pub shakes: usize,
    pub frames: usize,
    pub score: u32,
    pub fevers: u32,
    /// Set when the round ended on its own (Classic fever timeout).
    pub round_ended: bool,
    pub last_score_text: String,
}

/// Replay `samples`, ticking frames at 60 Hz between them and for `tail_ms`
/// after the last one.
pub fn run(config: GameConfig, mode: ModeKind, samples: &[Sample], tail_ms: f64) -> Summary {
    let view = Rc::new(LoggingView::default());
    let clock = Rc::new(TraceClock::default());
    let start = samples.first().map_or(0.0, |s| s.t_ms);
    clock.set(start);

    let ports = Ports::new(view.clone(), Rc::new(LoggingHaptics), clock.clone());
    let mut controller = GameController::new(config, ports);
    controller.set_mode(mode);

    let mut next_frame = start;
    let mut frames = 0;
    let mut tick_until = |controller: &mut GameController, until: f64| {
        while next_frame <= until {
            clock.set(next_frame);
            controller.on_frame(next_frame);
            next_frame += FRAME_DURATION_MS;
            frames += 1;
        }
    };

    let mut shakes = 0;
    for sample in samples {
        tick_until(&mut controller, sample.t_ms);
        clock.set(sample.t_ms);
        if controller.on_motion(sample.x, sample.y, sample.z).is_some() {
            shakes += 1;
        }
    }
    let end = samples.last().map_or(start, |s| s.t_ms) + tail_ms.max(0.0);
    tick_until(&mut controller, end);

    let score = controller.score().unwrap_or(0);
    let summary = Summary {
        mode,
        shakes,
        frames,
        score,
        fevers: view.fevers.get(),
        round_ended: view.final_score.get().is_some(),
        last_score_text: view.score_text.borrow().clone(),
    };
    controller.back_to_menu();
    summary
}
