//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Front ends read snapshots from [`GridSimulation`] and react to the [`Outcome`]
//! of each tick.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, GameConfig, RenderStyle};
pub use engine::{GridSimulation, SimulationError};
pub use state::{Outcome, Position, Snake};
