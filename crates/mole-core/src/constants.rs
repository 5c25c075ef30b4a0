// Gameplay tuning constants shared by the web and native front-ends.

// Input
pub const SHAKE_THRESHOLD: f64 = 25.0; // m/s², magnitude including gravity

// Simulation pacing
pub const FRAME_DURATION_MS: f64 = 1000.0 / 60.0; // logical frame for Classic Mode
pub const MAX_CATCH_UP_FRAMES: u32 = 4; // frames replayed per callback after a stall
pub const FRAME_TIME_EPSILON_MS: f64 = 1e-6; // absorbs rounding in summed frame times

// Classic Mode circle
pub const CIRCLE_START_SIZE: f64 = 280.0; // px, size at the start of every cycle
pub const TIME_WINDOW_SIZE: f64 = 150.0; // px, inner target ring
pub const TIME_WINDOW_MARGIN: f64 = 5.0; // px of grace above the ring
pub const BASE_SHRINK_SPEED: f64 = 4.0; // px per frame at score 0
pub const SHRINK_SPEED_PER_POINT: f64 = 0.4; // extra px per frame per point

// Classic Mode fever
pub const FEVER_SCORE_THRESHOLD: u32 = 10;
pub const FEVER_DURATION_MS: f64 = 10_000.0;
pub const FEVER_COUNTDOWN_STEP_MS: f64 = 1000.0;

// Regular Mode energy
pub const MAX_ENERGY: u32 = 1000;
pub const ENERGY_REGEN_PERIOD_MS: f64 = 1000.0; // +1 energy per period
pub const ENERGY_REGEN_AMOUNT: u32 = 1;

// Regular Mode difficulty smoothing
pub const CM_MIN: f64 = 1.0;
pub const CM_MAX: f64 = 10.0;
pub const CM_SMOOTHING: f64 = 0.1; // fraction of the gap closed per frame
pub const SHAKE_RATE_WINDOW_MS: f64 = 1000.0;
pub const SHAKE_RATE_RAISE_ABOVE: u32 = 3; // shakes per window that raise the target

// Mole pose
pub const MOLE_MAX_LEVEL: f64 = 10.0; // level at which the mole is fully out
pub const MOLE_HIDDEN_TRANSLATE_PCT: f64 = 75.0;
pub const MOLE_BASE_SCALE_X: f64 = 0.5;
pub const MOLE_SCALE_X_SPAN: f64 = 0.8;

// End-of-round mole animation
pub const MOLE_END_DELAY_MS: f64 = 1000.0; // pause after the round ends
pub const MOLE_WOBBLE_COUNT: u32 = 3;
pub const MOLE_WOBBLE_MS: f64 = 500.0;
pub const MOLE_WOBBLE_GAP_MS: f64 = 500.0; // rest after each wobble
pub const MOLE_WOBBLE_DEG: f64 = 3.0;
pub const MOLE_SINK_MS: f64 = 2500.0;

// Dev monitor
pub const ACCEL_HISTORY_CAPACITY: usize = 100;
pub const ACCEL_HISTORY_PREFILL: usize = 50;
pub const ACCEL_SCALE_FLOOR: f64 = 50.0;
pub const ACCEL_SCALE_HEADROOM: f64 = 10.0; // kept above the threshold line
