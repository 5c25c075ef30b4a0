use crate::error::CoreError;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Classic,
    Regular,
}

impl ModeKind {
    pub const ALL: [ModeKind; 2] = [ModeKind::Classic, ModeKind::Regular];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeKind::Classic => "classic",
            ModeKind::Regular => "regular",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(ModeKind::Classic),
            "regular" => Ok(ModeKind::Regular),
            _ => Err(CoreError::UnknownMode(s.to_string())),
        }
    }
}

/// Coarse lifecycle shared by both modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RoundPhase {
    #[default]
    Idle,
    Running,
    Ended,
}

/// Capability set every play mode provides to the controller.
///
/// `update` is called once per display frame with a timestamp from the
/// shared clock; `handle_shake` once per detected shake. Both are no-ops
/// unless the round is running. `end` must cancel every pending task of the
/// mode before returning.
pub trait GameMode {
    fn kind(&self) -> ModeKind;
    /// Prepare the view for this mode (circle vs energy bar, initial values).
    fn init(&mut self);
    fn start(&mut self);
    fn update(&mut self, now_ms: f64);
    fn handle_shake(&mut self);
    fn end(&mut self);
    fn phase(&self) -> RoundPhase;
    fn score(&self) -> u32;

    fn is_running(&self) -> bool {
        self.phase() == RoundPhase::Running
    }
}
