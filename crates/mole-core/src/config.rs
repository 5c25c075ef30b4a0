//! Tunable parameters for the two game modes.
//!
//! Defaults come from [`crate::constants`]; front-ends may override single
//! fields and call [`GameConfig::validate`] before handing the config to the
//! controller.

use crate::constants::*;
use crate::error::{CoreError, CoreResult};

#[derive(Clone, Debug, PartialEq)]
pub struct ClassicConfig {
    pub frame_duration_ms: f64,
    pub circle_start_size: f64,
    pub time_window_size: f64,
    pub time_window_margin: f64,
    pub base_shrink_speed: f64,
    pub shrink_speed_per_point: f64,
    pub fever_score_threshold: u32,
    pub fever_duration_ms: f64,
}

impl Default for ClassicConfig {
    fn default() -> Self {
        Self {
            frame_duration_ms: FRAME_DURATION_MS,
            circle_start_size: CIRCLE_START_SIZE,
            time_window_size: TIME_WINDOW_SIZE,
            time_window_margin: TIME_WINDOW_MARGIN,
            base_shrink_speed: BASE_SHRINK_SPEED,
            shrink_speed_per_point: SHRINK_SPEED_PER_POINT,
            fever_score_threshold: FEVER_SCORE_THRESHOLD,
            fever_duration_ms: FEVER_DURATION_MS,
        }
    }
}

impl ClassicConfig {
    /// Circle size at or below which a shake scores.
    #[inline]
    pub fn window_edge(&self) -> f64 {
        self.time_window_size + self.time_window_margin
    }

    #[inline]
    pub fn shrink_speed_for(&self, score: u32) -> f64 {
        self.base_shrink_speed + score as f64 * self.shrink_speed_per_point
    }

    pub fn validate(&self) -> CoreResult<()> {
        positive("frame_duration_ms", self.frame_duration_ms)?;
        positive("circle_start_size", self.circle_start_size)?;
        positive("time_window_size", self.time_window_size)?;
        non_negative("time_window_margin", self.time_window_margin)?;
        positive("base_shrink_speed", self.base_shrink_speed)?;
        non_negative("shrink_speed_per_point", self.shrink_speed_per_point)?;
        positive("fever_duration_ms", self.fever_duration_ms)?;
        Ok(())
    }
}

/// What a shake earns when the energy bar is empty.
///
/// Earlier builds of the game withheld the reward, later ones only skipped
/// the feedback flash and haptic pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ZeroEnergyReward {
    #[default]
    Granted,
    Withheld,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegularConfig {
    pub max_energy: u32,
    pub energy_regen_period_ms: f64,
    pub energy_regen_amount: u32,
    pub cm_min: f64,
    pub cm_max: f64,
    pub cm_smoothing: f64,
    pub rate_window_ms: f64,
    pub rate_raise_above: u32,
    pub reward_at_zero_energy: ZeroEnergyReward,
}

impl Default for RegularConfig {
    fn default() -> Self {
        Self {
            max_energy: MAX_ENERGY,
            energy_regen_period_ms: ENERGY_REGEN_PERIOD_MS,
            energy_regen_amount: ENERGY_REGEN_AMOUNT,
            cm_min: CM_MIN,
            cm_max: CM_MAX,
            cm_smoothing: CM_SMOOTHING,
            rate_window_ms: SHAKE_RATE_WINDOW_MS,
            rate_raise_above: SHAKE_RATE_RAISE_ABOVE,
            reward_at_zero_energy: ZeroEnergyReward::Granted,
        }
    }
}

impl RegularConfig {
    pub fn validate(&self) -> CoreResult<()> {
        positive("energy_regen_period_ms", self.energy_regen_period_ms)?;
        positive("rate_window_ms", self.rate_window_ms)?;
        positive("cm_min", self.cm_min)?;
        positive("cm_max", self.cm_max)?;
        if self.cm_min > self.cm_max {
            return Err(CoreError::EmptyCmRange {
                min: self.cm_min,
                max: self.cm_max,
            });
        }
        // 0 freezes cm, 1 snaps straight to the target
        if !(0.0..=1.0).contains(&self.cm_smoothing) {
            return Err(CoreError::OutOfUnitRange {
                field: "cm_smoothing",
                value: self.cm_smoothing,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub shake_threshold: f64,
    pub classic: ClassicConfig,
    pub regular: RegularConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            shake_threshold: SHAKE_THRESHOLD,
            classic: ClassicConfig::default(),
            regular: RegularConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> CoreResult<()> {
        positive("shake_threshold", self.shake_threshold)?;
        self.classic.validate()?;
        self.regular.validate()
    }
}

fn positive(field: &'static str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::Negative { field, value })
    }
}
