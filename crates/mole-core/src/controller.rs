//! Owns the active game mode and routes frames and shakes to it.

use crate::classic::ClassicMode;
use crate::config::GameConfig;
use crate::error::CoreResult;
use crate::mode::{GameMode, ModeKind};
use crate::ports::Ports;
use crate::regular::RegularMode;
use crate::shake::{acceleration_magnitude, ShakeDetector, ShakeEvent};

pub struct GameController {
    config: GameConfig,
    ports: Ports,
    detector: ShakeDetector,
    active: Option<Box<dyn GameMode>>,
}

impl GameController {
    pub fn new(config: GameConfig, ports: Ports) -> Self {
        let detector = ShakeDetector::new(config.shake_threshold);
        Self {
            config,
            ports,
            detector,
            active: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// End whatever is running, then build, init and start `kind`.
    pub fn set_mode(&mut self, kind: ModeKind) {
        let mode: Box<dyn GameMode> = match kind {
            ModeKind::Classic => Box::new(ClassicMode::new(
                self.config.classic.clone(),
                self.ports.clone(),
            )),
            ModeKind::Regular => Box::new(RegularMode::new(
                self.config.regular.clone(),
                self.ports.clone(),
            )),
        };
        self.activate(mode);
    }

    pub fn set_mode_by_name(&mut self, name: &str) -> CoreResult<()> {
        let kind = name.parse::<ModeKind>()?;
        self.set_mode(kind);
        Ok(())
    }

    /// Install an already constructed mode. The previous mode is ended and
    /// dropped first, so none of its tasks can run afterwards.
    pub fn activate(&mut self, mut mode: Box<dyn GameMode>) {
        if let Some(mut previous) = self.active.take() {
            log::info!(
                "[controller] switching {} -> {}",
                previous.kind(),
                mode.kind()
            );
            previous.end();
        } else {
            log::info!("[controller] starting {}", mode.kind());
        }
        self.detector.reset();
        mode.init();
        mode.start();
        self.active = Some(mode);
    }

    /// "Play again": start the current mode once more.
    pub fn restart(&mut self) -> bool {
        match self.active.as_mut() {
            Some(mode) => {
                mode.start();
                true
            }
            None => {
                log::warn!("[controller] restart requested with no mode selected");
                false
            }
        }
    }

    pub fn back_to_menu(&mut self) {
        if let Some(mut mode) = self.active.take() {
            log::info!("[controller] leaving {}", mode.kind());
            mode.end();
        }
        self.detector.reset();
    }

    pub fn has_active_mode(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_mode(&self) -> Option<&dyn GameMode> {
        self.active.as_deref()
    }

    pub fn active_kind(&self) -> Option<ModeKind> {
        self.active.as_ref().map(|m| m.kind())
    }

    pub fn score(&self) -> Option<u32> {
        self.active.as_ref().map(|m| m.score())
    }

    pub fn on_frame(&mut self, now_ms: f64) {
        match self.active.as_mut() {
            Some(mode) => mode.update(now_ms),
            None => log::error!("[controller] frame tick with no active game mode"),
        }
    }

    pub fn handle_shake(&mut self) {
        match self.active.as_mut() {
            Some(mode) => mode.handle_shake(),
            None => log::error!("[controller] shake with no active game mode"),
        }
    }

    /// Feed one raw 3-axis sample. Samples are dropped while no mode is
    /// selected, so the menu never produces shakes.
    pub fn on_motion(&mut self, x: f64, y: f64, z: f64) -> Option<ShakeEvent> {
        if self.active.is_none() {
            return None;
        }
        self.on_magnitude(acceleration_magnitude(x, y, z))
    }

    pub fn on_magnitude(&mut self, magnitude: f64) -> Option<ShakeEvent> {
        if self.active.is_none() {
            return None;
        }
        let now = self.ports.clock.now_ms();
        let event = self.detector.update(magnitude, now)?;
        log::debug!("[controller] shake lasting {:.0} ms", event.duration_ms());
        self.handle_shake();
        Some(event)
    }

    pub fn threshold(&self) -> f64 {
        self.detector.threshold()
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.detector.set_threshold(threshold);
        self.config.shake_threshold = self.detector.threshold();
        log::info!("[controller] shake threshold {}", self.detector.threshold());
    }
}
