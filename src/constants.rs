/// DOM element ids and presentation constants for the browser front-end.
///
/// The page markup (`index.html`) owns the layout; everything the Rust side
/// looks up by id is listed here so a renamed element fails in one place.
// Play field
pub const GAME_AREA_ID: &str = "gameArea";
pub const CIRCLE_ID: &str = "circle";
pub const TIME_WINDOW_ID: &str = "timeWindow";
pub const FEEDBACK_ID: &str = "feedback";
pub const SCORE_ID: &str = "scoreDisplay";
pub const MOLE_ID: &str = "mole";

// Fever overlay
pub const FEVER_ID: &str = "feverMode";
pub const FEVER_COUNTDOWN_ID: &str = "feverCountdown";

// Regular Mode energy bar (created on demand when the page lacks it)
pub const ENERGY_BAR_ID: &str = "energyBar";
pub const ENERGY_FILL_ID: &str = "energyFill";

// Menu and buttons
pub const MODE_BUTTONS_ID: &str = "modeButtons";
pub const CLASSIC_BUTTON_ID: &str = "classicModeButton";
pub const REGULAR_BUTTON_ID: &str = "regularModeButton";
pub const BACK_BUTTON_ID: &str = "backButton";
pub const ACTION_BUTTON_ID: &str = "actionButton";
pub const SHAKE_TEST_BUTTON_ID: &str = "shakeTestButton";

// Dev monitor
pub const MONITOR_ID: &str = "accelerationMonitor";
pub const CHART_CANVAS_ID: &str = "accelerationChart";
pub const CHART_LABEL_ID: &str = "accelerationDisplay";

// Feedback flash
pub const FEEDBACK_FLASH_MS: i32 = 100;
pub const FEEDBACK_OPACITY: &str = "0.7";
pub const POSITIVE_COLOR: &str = "rgba(76, 175, 80, 0.6)";
pub const NEGATIVE_COLOR: &str = "rgba(244, 67, 54, 0.6)";

// Time-window ring: brighter while the circle is inside it
pub const WINDOW_IDLE_COLOR: &str = "rgba(76, 175, 80, 0.4)";
pub const WINDOW_ACTIVE_COLOR: &str = "rgba(76, 175, 80, 0.6)";

pub const ENERGY_FILL_COLOR: &str = "#4CAF50";
pub const ENERGY_TRACK_COLOR: &str = "#ddd";

// Haptics
pub const VIBRATE_MS: u32 = 200;
pub const TELEGRAM_IMPACT_STYLE: &str = "heavy";

// Dev monitor plot
pub const CHART_GRID_STEP: f64 = 10.0;
pub const CHART_LINE_WIDTH: f64 = 2.0;

// Keyboard threshold nudge, and the floor it cannot go below
pub const THRESHOLD_STEP: f64 = 1.0;
pub const THRESHOLD_MIN: f64 = 1.0;

pub const END_OF_ROUND_CURRENCY: &str = "$DEEK";
pub const PLAY_AGAIN_LABEL: &str = "Play Again";
