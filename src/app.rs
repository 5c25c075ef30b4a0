use crate::chart::AccelChart;
use crate::constants::MONITOR_ID;
use crate::dom;
use crate::input::{nudged_threshold, KeyAction};
use crate::view::DomView;
use mole_core::{AccelHistory, GameController, ModeKind};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Everything the DOM callbacks share: the controller plus the page-level
/// bits (menu, dev monitor) that sit outside the game modes.
pub struct App {
    pub controller: RefCell<GameController>,
    pub view: Rc<DomView>,
    pub history: RefCell<AccelHistory>,
    pub chart: Option<AccelChart>,
    pub document: web::Document,
}

impl App {
    pub fn select_mode(&self, kind: ModeKind) {
        self.view.show_game();
        self.controller.borrow_mut().set_mode(kind);
    }

    pub fn back_to_menu(&self) {
        self.controller.borrow_mut().back_to_menu();
        self.view.show_menu();
    }

    pub fn play_again(&self) {
        self.view.cancel_mole_animation();
        self.view.hide_action_button();
        self.controller.borrow_mut().restart();
    }

    pub fn test_shake(&self) {
        let mut controller = self.controller.borrow_mut();
        if controller.has_active_mode() {
            controller.handle_shake();
        } else {
            log::info!("[app] test shake ignored at the menu");
        }
    }

    /// One `devicemotion` reading, already reduced to a magnitude.
    pub fn on_magnitude(&self, magnitude: f64) {
        if !self.controller.borrow().has_active_mode() {
            return;
        }
        {
            let mut history = self.history.borrow_mut();
            history.push(magnitude);
            if let Some(chart) = &self.chart {
                if dom::is_displayed(&self.document, MONITOR_ID) {
                    chart.draw(&history);
                }
            }
        }
        self.controller.borrow_mut().on_magnitude(magnitude);
    }

    pub fn frame(&self, now_ms: f64) {
        let mut controller = self.controller.borrow_mut();
        if controller.has_active_mode() {
            controller.on_frame(now_ms);
        }
    }

    fn toggle_monitor(&self) {
        let shown = dom::is_displayed(&self.document, MONITOR_ID);
        dom::set_display(&self.document, MONITOR_ID, !shown, "block");
        if !shown {
            if let Some(chart) = &self.chart {
                chart.draw(&self.history.borrow());
            }
        }
        log::info!("[app] dev monitor {}", if shown { "hidden" } else { "shown" });
    }

    fn nudge_threshold(&self, delta: f64) {
        let mut controller = self.controller.borrow_mut();
        let threshold = nudged_threshold(controller.threshold(), delta);
        controller.set_threshold(threshold);
        self.history.borrow_mut().set_threshold(threshold);
    }

    pub fn apply_key(&self, action: KeyAction) {
        match action {
            KeyAction::TestShake => self.test_shake(),
            KeyAction::ToggleMonitor => self.toggle_monitor(),
            KeyAction::NudgeThreshold(delta) => self.nudge_threshold(delta),
            KeyAction::BackToMenu => {
                if self.controller.borrow().has_active_mode() {
                    self.back_to_menu();
                }
            }
        }
    }
}
