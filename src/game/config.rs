use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// How grid cells are drawn on the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Distinct glyphs for head, body and food
    #[default]
    Sprite,
    /// Solid coloured blocks
    Block,
}

/// Reasons a [`GameConfig`] is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid_pitch must be non-zero")]
    ZeroPitch,
    #[error("screen {width}x{height} is smaller than one {pitch}px cell")]
    ScreenTooSmall { width: u32, height: u32, pitch: u32 },
    #[error("a {grid_width}x{grid_height} grid exceeds the addressable cell range")]
    GridTooLarge {
        grid_width: usize,
        grid_height: usize,
    },
    #[error("initial_snake_length must be at least 1")]
    ZeroLength,
    #[error("a {length}-cell snake does not fit on a {grid_width}x{grid_height} grid")]
    SnakeDoesNotFit {
        length: usize,
        grid_width: usize,
        grid_height: usize,
    },
    #[error("tick_delay_ms must be non-zero")]
    ZeroTickDelay,
}

/// Configuration for the game
///
/// The grid is derived from a pixel resolution divided by the grid pitch, so
/// `640x480` at a `40` pitch is a 16x12 board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the play field in pixels
    pub screen_width: u32,
    /// Height of the play field in pixels
    pub screen_height: u32,
    /// Size of one cell in pixels
    pub grid_pitch: u32,
    /// Length of the snake after every reset
    pub initial_snake_length: usize,
    /// Delay between two simulation ticks
    pub tick_delay_ms: u64,
    /// Pause after a crash before the next tick (0 disables it)
    pub crash_pause_ms: u64,
    pub render_style: RenderStyle,
    /// Dispatch sound cues on eat/crash
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    /// 640x480 at a 40px pitch, sprites, no sound
    pub fn classic() -> Self {
        Self {
            screen_width: 640,
            screen_height: 480,
            grid_pitch: 40,
            initial_snake_length: 3,
            tick_delay_ms: 150,
            crash_pause_ms: 0,
            render_style: RenderStyle::Sprite,
            sound: false,
        }
    }

    /// Finer 20px pitch with a faster tick
    pub fn fine() -> Self {
        Self {
            grid_pitch: 20,
            tick_delay_ms: 60,
            ..Self::classic()
        }
    }

    /// Plain blocks with sound cues and a pause after each crash
    pub fn arcade() -> Self {
        Self {
            crash_pause_ms: 1500,
            render_style: RenderStyle::Block,
            sound: true,
            ..Self::classic()
        }
    }

    /// Build a config whose grid is exactly `width x height` cells
    pub fn with_grid(width: usize, height: usize) -> Self {
        let pitch = Self::classic().grid_pitch;
        Self {
            screen_width: width as u32 * pitch,
            screen_height: height as u32 * pitch,
            grid_pitch: pitch,
            ..Self::classic()
        }
    }

    /// Number of columns on the board
    pub fn grid_width(&self) -> usize {
        if self.grid_pitch == 0 {
            return 0;
        }
        (self.screen_width / self.grid_pitch) as usize
    }

    /// Number of rows on the board
    pub fn grid_height(&self) -> usize {
        if self.grid_pitch == 0 {
            return 0;
        }
        (self.screen_height / self.grid_pitch) as usize
    }

    /// Check that the board can hold the initial snake plus one food cell
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_pitch == 0 {
            return Err(ConfigError::ZeroPitch);
        }

        let (grid_width, grid_height) = (self.grid_width(), self.grid_height());
        if grid_width == 0 || grid_height == 0 {
            return Err(ConfigError::ScreenTooSmall {
                width: self.screen_width,
                height: self.screen_height,
                pitch: self.grid_pitch,
            });
        }

        let limit = i32::MAX as usize;
        if grid_width > limit || grid_height > limit {
            return Err(ConfigError::GridTooLarge {
                grid_width,
                grid_height,
            });
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::ZeroLength);
        }

        // The snake hangs down from the centre cell and food needs a free cell.
        let length = self.initial_snake_length;
        if grid_height / 2 + length > grid_height
            || grid_width.saturating_mul(grid_height) <= length
        {
            return Err(ConfigError::SnakeDoesNotFit {
                length,
                grid_width,
                grid_height,
            });
        }

        if self.tick_delay_ms == 0 {
            return Err(ConfigError::ZeroTickDelay);
        }

        Ok(())
    }

    /// Load and validate a JSON config file. Missing fields take their
    /// classic defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;

        Ok(config)
    }
}
