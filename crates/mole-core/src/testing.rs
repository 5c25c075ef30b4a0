//! Recording port implementations for tests and headless runs.

use crate::ports::{Clock, Feedback, GameView, Haptics, Ports};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One call made on a [`GameView`], in the order it happened.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewCall {
    CircleSize(f64),
    MoleLevel(f64),
    Feedback(Feedback),
    Score(String),
    EnterFever,
    ExitFever,
    FeverCountdown(u32),
    Energy(u32, u32),
    CircleVisible(bool),
    EnergyBarVisible(bool),
    EndOfRound(u32),
}

#[derive(Default)]
pub struct RecordingView {
    calls: RefCell<Vec<ViewCall>>,
}

impl RecordingView {
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&ViewCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn last_score_text(&self) -> Option<String> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            ViewCall::Score(s) => Some(s.clone()),
            _ => None,
        })
    }

    fn push(&self, call: ViewCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl GameView for RecordingView {
    fn render_circle_size(&self, size: f64) {
        self.push(ViewCall::CircleSize(size));
    }
    fn render_mole_level(&self, level: f64) {
        self.push(ViewCall::MoleLevel(level));
    }
    fn show_feedback(&self, kind: Feedback) {
        self.push(ViewCall::Feedback(kind));
    }
    fn render_score(&self, text: &str) {
        self.push(ViewCall::Score(text.to_string()));
    }
    fn enter_fever(&self) {
        self.push(ViewCall::EnterFever);
    }
    fn exit_fever(&self) {
        self.push(ViewCall::ExitFever);
    }
    fn render_fever_countdown(&self, seconds_left: u32) {
        self.push(ViewCall::FeverCountdown(seconds_left));
    }
    fn render_energy(&self, energy: u32, max_energy: u32) {
        self.push(ViewCall::Energy(energy, max_energy));
    }
    fn set_circle_visible(&self, visible: bool) {
        self.push(ViewCall::CircleVisible(visible));
    }
    fn set_energy_bar_visible(&self, visible: bool) {
        self.push(ViewCall::EnergyBarVisible(visible));
    }
    fn show_end_of_round(&self, final_score: u32) {
        self.push(ViewCall::EndOfRound(final_score));
    }
}

#[derive(Default)]
pub struct CountingHaptics {
    pulses: Cell<u32>,
}

impl CountingHaptics {
    pub fn count(&self) -> u32 {
        self.pulses.get()
    }
}

impl Haptics for CountingHaptics {
    fn pulse(&self) {
        self.pulses.set(self.pulses.get() + 1);
    }
}

/// Clock that only moves when told to.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, dt_ms: f64) -> f64 {
        let now = self.now.get() + dt_ms;
        self.now.set(now);
        now
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Concrete handles to the recorders behind a [`Ports`] bundle.
#[derive(Clone)]
pub struct Recorders {
    pub view: Rc<RecordingView>,
    pub haptics: Rc<CountingHaptics>,
    pub clock: Rc<ManualClock>,
}

pub fn ports_with_recorders() -> (Ports, Recorders) {
    let rec = Recorders {
        view: Rc::new(RecordingView::default()),
        haptics: Rc::new(CountingHaptics::default()),
        clock: Rc::new(ManualClock::default()),
    };
    let ports = Ports::new(rec.view.clone(), rec.haptics.clone(), rec.clock.clone());
    (ports, rec)
}
