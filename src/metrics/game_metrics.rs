use std::time::{Duration, Instant};

use crate::game::Outcome;

/// Per-session statistics shown in the header and logged on exit
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Food eaten in the current run
    pub score: u32,
    pub high_score: u32,
    pub games_played: u32,
    pub wall_crashes: u32,
    pub self_crashes: u32,
    pub ticks: u64,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            score: 0,
            high_score: 0,
            games_played: 0,
            wall_crashes: 0,
            self_crashes: 0,
            ticks: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.score = 0;
    }

    /// Book-keeping for one tick. A crash closes the run and starts the next.
    pub fn on_outcome(&mut self, outcome: Outcome) {
        self.ticks += 1;

        match outcome {
            Outcome::Moved => {}
            Outcome::Ate => self.score += 1,
            Outcome::HitWall => {
                self.wall_crashes += 1;
                self.on_game_over();
            }
            Outcome::HitSelf => {
                self.self_crashes += 1;
                self.on_game_over();
            }
        }
    }

    /// Close the current run: count it and keep its score if it is the best
    pub(crate) fn on_game_over(&mut self) {
        self.games_played += 1;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        self.on_game_start();
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_outcome_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_outcome(Outcome::Ate);
        metrics.on_outcome(Outcome::Moved);
        metrics.on_outcome(Outcome::Ate);
        assert_eq!(metrics.score, 2);
        assert_eq!(metrics.ticks, 3);

        metrics.on_outcome(Outcome::HitWall);
        assert_eq!(metrics.score, 0);
        assert_eq!(metrics.high_score, 2);
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.wall_crashes, 1);

        metrics.on_outcome(Outcome::Ate);
        metrics.on_outcome(Outcome::HitSelf);
        assert_eq!(metrics.high_score, 2); // Should not decrease
        assert_eq!(metrics.games_played, 2);
        assert_eq!(metrics.self_crashes, 1);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
