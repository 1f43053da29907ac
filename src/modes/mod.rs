pub mod headless;
pub mod play;

pub use headless::{HeadlessMode, HeadlessReport, autopilot};
pub use play::PlayMode;
