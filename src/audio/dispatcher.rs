use std::io::{self, Stderr, Write};

use crate::game::Outcome;

/// A short sound played in reaction to a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Bite,
    WallCrash,
    SelfCrash,
}

impl SoundCue {
    /// The cue for a tick outcome; plain moves are silent
    pub fn for_outcome(outcome: Outcome) -> Option<SoundCue> {
        match outcome {
            Outcome::Moved => None,
            Outcome::Ate => Some(SoundCue::Bite),
            Outcome::HitWall => Some(SoundCue::WallCrash),
            Outcome::HitSelf => Some(SoundCue::SelfCrash),
        }
    }

    /// Number of terminal bells rung for this cue
    fn bells(self) -> usize {
        match self {
            SoundCue::Bite => 1,
            SoundCue::WallCrash => 2,
            SoundCue::SelfCrash => 3,
        }
    }
}

/// Plays sound cues. Failures are reported but never stop the game.
pub trait SoundDispatcher {
    fn play(&mut self, cue: SoundCue) -> io::Result<()>;

    /// Play the cue for `outcome`, if it has one
    fn on_outcome(&mut self, outcome: Outcome) -> io::Result<()> {
        match SoundCue::for_outcome(outcome) {
            Some(cue) => self.play(cue),
            None => Ok(()),
        }
    }
}

/// Rings the terminal bell
pub struct TerminalBell<W: Write = Stderr> {
    out: W,
}

impl TerminalBell {
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SoundDispatcher for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) -> io::Result<()> {
        let bells = "\x07".repeat(cue.bells());
        self.out.write_all(bells.as_bytes())?;
        self.out.flush()
    }
}

/// Emits a tracing event per cue instead of a sound
#[derive(Debug, Default)]
pub struct LogSounds;

impl SoundDispatcher for LogSounds {
    fn play(&mut self, cue: SoundCue) -> io::Result<()> {
        tracing::debug!(?cue, "sound cue");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<SoundCue>);

    impl SoundDispatcher for Recorder {
        fn play(&mut self, cue: SoundCue) -> io::Result<()> {
            self.0.push(cue);
            Ok(())
        }
    }

    #[test]
    fn test_cue_mapping() {
        assert_eq!(SoundCue::for_outcome(Outcome::Moved), None);
        assert_eq!(SoundCue::for_outcome(Outcome::Ate), Some(SoundCue::Bite));
        assert_eq!(
            SoundCue::for_outcome(Outcome::HitWall),
            Some(SoundCue::WallCrash)
        );
        assert_eq!(
            SoundCue::for_outcome(Outcome::HitSelf),
            Some(SoundCue::SelfCrash)
        );
    }

    #[test]
    fn test_on_outcome_skips_moves() {
        let mut recorder = Recorder::default();
        for outcome in [Outcome::Moved, Outcome::Ate, Outcome::Moved, Outcome::HitSelf] {
            recorder.on_outcome(outcome).unwrap();
        }
        assert_eq!(recorder.0, vec![SoundCue::Bite, SoundCue::SelfCrash]);
    }

    #[test]
    fn test_terminal_bell_writes_bells() {
        let mut bell = TerminalBell::with_writer(Vec::new());
        bell.play(SoundCue::Bite).unwrap();
        bell.play(SoundCue::WallCrash).unwrap();
        assert_eq!(bell.into_inner(), b"\x07\x07\x07".to_vec());
    }

    #[test]
    fn test_log_sounds_never_fails() {
        let mut sounds = LogSounds;
        assert!(sounds.on_outcome(Outcome::HitWall).is_ok());
    }
}
