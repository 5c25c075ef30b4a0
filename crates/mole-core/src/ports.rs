//! Collaborator interfaces the game modes talk to.
//!
//! Every call is fire-and-forget: the modes never read anything back from
//! the view or the haptics device. Front-ends implement these traits over
//! the DOM (web) or a logger (native simulator); tests use the recorders in
//! [`crate::testing`].

use instant::Instant;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Positive,
    Negative,
}

/// Visual side effects requested by the modes.
pub trait GameView {
    fn render_circle_size(&self, size: f64);
    /// Mole height input: the score in Classic Mode, `cm` in Regular Mode.
    fn render_mole_level(&self, level: f64);
    fn show_feedback(&self, kind: Feedback);
    fn render_score(&self, text: &str);
    fn enter_fever(&self);
    fn exit_fever(&self);
    fn render_fever_countdown(&self, seconds_left: u32);
    fn render_energy(&self, energy: u32, max_energy: u32);
    /// Classic Mode shows the shrinking circle and target ring, Regular
    /// Mode replaces them with the energy bar.
    fn set_circle_visible(&self, visible: bool);
    fn set_energy_bar_visible(&self, visible: bool);
    fn show_end_of_round(&self, final_score: u32);
}

pub trait Haptics {
    fn pulse(&self);
}

/// Monotonic milliseconds, on the same time base the frame loop reports.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// `Instant`-backed clock; on wasm32 this reads `performance.now()`.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// The three collaborators, cloned into every mode the controller builds.
#[derive(Clone)]
pub struct Ports {
    pub view: Rc<dyn GameView>,
    pub haptics: Rc<dyn Haptics>,
    pub clock: Rc<dyn Clock>,
}

impl Ports {
    pub fn new(view: Rc<dyn GameView>, haptics: Rc<dyn Haptics>, clock: Rc<dyn Clock>) -> Self {
        Self {
            view,
            haptics,
            clock,
        }
    }
}
