//! Grid Snake - the classic snake game on a fixed grid
//!
//! This library provides:
//! - The grid simulation core (game module), free of any I/O
//! - Terminal rendering with pluggable cell styles (render module)
//! - Keyboard mapping (input module) and optional sound cues (audio module)
//! - Session statistics (metrics module)
//! - Interactive and headless game loops (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
