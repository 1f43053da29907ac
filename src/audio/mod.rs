pub mod dispatcher;

pub use dispatcher::{LogSounds, SoundCue, SoundDispatcher, TerminalBell};
