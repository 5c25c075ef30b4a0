pub mod keyboard;
pub mod motion;

pub use keyboard::wire_global_keydown;
pub use motion::enable_device_motion;
