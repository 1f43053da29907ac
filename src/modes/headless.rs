//! Terminal-free runs driven by a simple autopilot
//!
//! Useful for soak-testing the simulation and for reproducing a run from a
//! seed: the same config, seed and tick count always produce the same report.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::audio::{LogSounds, SoundDispatcher};
use crate::game::{Direction, GameConfig, GridSimulation, Outcome};
use crate::metrics::GameMetrics;

/// Summary of a headless run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadlessReport {
    pub ticks: u64,
    pub moves: u64,
    pub food_eaten: u64,
    pub wall_crashes: u64,
    pub self_crashes: u64,
    /// Longest snake seen during the run
    pub max_length: usize,
    /// Most food eaten in a single game
    pub high_score: u32,
}

impl HeadlessReport {
    fn record(&mut self, outcome: Outcome, length: usize) {
        self.ticks += 1;
        match outcome {
            Outcome::Moved => self.moves += 1,
            Outcome::Ate => self.food_eaten += 1,
            Outcome::HitWall => self.wall_crashes += 1,
            Outcome::HitSelf => self.self_crashes += 1,
        }
        self.max_length = self.max_length.max(length);
    }
}

/// Pick a heading for the next tick: the safe move that gets closest to the
/// food, or the current heading when every move is fatal.
pub fn autopilot(sim: &GridSimulation) -> Direction {
    let current = sim.direction();
    let segments = sim.segments();
    // The tail moves out of the way unless this tick eats.
    let blocking = &segments[..segments.len() - 1];

    Direction::ALL
        .into_iter()
        .filter(|&dir| !current.is_opposite(dir))
        .filter_map(|dir| {
            let next = sim.head().moved_in_direction(dir);
            let safe = sim.is_in_bounds(next) && !blocking.contains(&next);
            safe.then(|| (next.distance(sim.food()), dir != current, dir))
        })
        .min()
        .map(|(_, _, dir)| dir)
        .unwrap_or(current)
}

pub struct HeadlessMode {
    sim: GridSimulation,
    metrics: GameMetrics,
    sounds: Option<LogSounds>,
    ticks: u64,
}

impl HeadlessMode {
    pub fn new(config: GameConfig, seed: u64, ticks: u64) -> Result<Self> {
        let sounds = config.sound.then_some(LogSounds);
        let sim = GridSimulation::with_seed(config, seed)
            .context("Failed to build the simulation")?;

        Ok(Self {
            sim,
            metrics: GameMetrics::new(),
            sounds,
            ticks,
        })
    }

    pub fn run(&mut self) -> HeadlessReport {
        let mut report = HeadlessReport {
            max_length: self.sim.len(),
            ..Default::default()
        };

        info!(
            ticks = self.ticks,
            grid_width = self.sim.grid_width(),
            grid_height = self.sim.grid_height(),
            "headless run started"
        );

        for _ in 0..self.ticks {
            let direction = autopilot(&self.sim);
            self.sim.set_direction(direction);

            let length = self.sim.len();
            let outcome = self.sim.step();
            self.metrics.on_outcome(outcome);
            report.record(outcome, self.sim.len());

            if let Some(sounds) = self.sounds.as_mut() {
                // Logging cues cannot fail
                let _ = sounds.on_outcome(outcome);
            }

            if outcome.is_crash() {
                debug!(?outcome, length, "autopilot crashed");
            }
        }

        report.high_score = self.metrics.high_score.max(self.metrics.score);

        info!(
            ticks = report.ticks,
            food_eaten = report.food_eaten,
            wall_crashes = report.wall_crashes,
            self_crashes = report.self_crashes,
            max_length = report.max_length,
            "headless run finished"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    fn sim_with(segments: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GridSimulation {
        GridSimulation::from_parts_seeded(
            GameConfig::classic(),
            segments.iter().copied().map(Position::from).collect(),
            direction,
            Position::from(food),
            5,
        )
        .unwrap()
    }

    #[test]
    fn test_autopilot_heads_for_food() {
        let sim = sim_with(&[(5, 5), (5, 6), (5, 7)], Direction::Up, (5, 2));
        assert_eq!(autopilot(&sim), Direction::Up);

        let sim = sim_with(&[(5, 5), (5, 6), (5, 7)], Direction::Up, (9, 5));
        assert_eq!(autopilot(&sim), Direction::Right);
    }

    #[test]
    fn test_autopilot_avoids_wall() {
        // Food is behind; going straight would leave the board.
        let sim = sim_with(&[(3, 0), (3, 1), (3, 2)], Direction::Up, (0, 8));
        assert_eq!(autopilot(&sim), Direction::Left);
    }

    #[test]
    fn test_autopilot_avoids_body() {
        // Right is closest to the food but runs into the body.
        let sim = sim_with(
            &[(5, 5), (5, 6), (6, 6), (6, 5), (6, 4)],
            Direction::Up,
            (9, 5),
        );
        assert_eq!(autopilot(&sim), Direction::Up);
    }

    #[test]
    fn test_report_adds_up() {
        let mut mode = HeadlessMode::new(GameConfig::classic(), 7, 2_000).unwrap();
        let report = mode.run();

        assert_eq!(report.ticks, 2_000);
        assert_eq!(
            report.moves + report.food_eaten + report.wall_crashes + report.self_crashes,
            report.ticks
        );
        assert!(report.food_eaten > 0);
        assert!(report.max_length >= 3);
        assert!(report.high_score as u64 <= report.food_eaten);
    }

    #[test]
    fn test_same_seed_same_report() {
        let a = HeadlessMode::new(GameConfig::fine(), 99, 500).unwrap().run();
        let b = HeadlessMode::new(GameConfig::fine(), 99, 500).unwrap().run();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sound_setting_does_not_change_play() {
        let quiet = HeadlessMode::new(GameConfig::classic(), 21, 300).unwrap().run();

        let mut loud = HeadlessMode::new(GameConfig::arcade(), 21, 300).unwrap();
        assert!(loud.sounds.is_some());
        assert_eq!(loud.run(), quiet);
    }
}
