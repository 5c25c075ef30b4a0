//! Platform-free game logic for mole-shake.
//!
//! Front-ends feed raw accelerometer readings and frame timestamps into a
//! [`GameController`]; the active mode answers through the [`Ports`] it was
//! built with.

pub mod classic;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod history;
pub mod mode;
pub mod mole;
pub mod ports;
pub mod regular;
pub mod shake;
pub mod testing;
pub mod timer;

pub use classic::{ClassicMode, ClassicPhase};
pub use config::{ClassicConfig, GameConfig, RegularConfig, ZeroEnergyReward};
pub use controller::GameController;
pub use error::{CoreError, CoreResult};
pub use history::AccelHistory;
pub use mode::{GameMode, ModeKind, RoundPhase};
pub use mole::{mole_pose, EndOfRoundAnimation, MoleFrame, MolePose};
pub use ports::{Clock, Feedback, GameView, Haptics, Ports, SystemClock};
pub use regular::RegularMode;
pub use shake::{acceleration_magnitude, ShakeDetector, ShakeEvent};
pub use timer::{Scheduler, TimerHandle};
