use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::audio::{SoundDispatcher, TerminalBell};
use crate::game::{GameConfig, GridSimulation, Outcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Banner, Renderer};

/// Interactive game in the terminal
pub struct PlayMode {
    sim: GridSimulation,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    sounds: Option<Box<dyn SoundDispatcher>>,
    tick_delay: Duration,
    crash_pause: Duration,
    /// Ticks are skipped until this instant after a crash
    resume_at: Option<Instant>,
    paused: bool,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let sim = GridSimulation::new(config).context("Failed to build the simulation")?;
        let sounds: Option<Box<dyn SoundDispatcher>> = if sim.config().sound {
            Some(Box::new(TerminalBell::new()))
        } else {
            None
        };

        Ok(Self::with_parts(sim, sounds))
    }

    /// Build around an existing simulation and sound dispatcher
    pub fn with_parts(sim: GridSimulation, sounds: Option<Box<dyn SoundDispatcher>>) -> Self {
        let config = sim.config();
        let renderer = Renderer::new(config.render_style);
        let tick_delay = Duration::from_millis(config.tick_delay_ms);
        let crash_pause = Duration::from_millis(config.crash_pause_ms);

        Self {
            sim,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            sounds,
            tick_delay,
            crash_pause,
            resume_at: None,
            paused: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            grid_width = self.sim.grid_width(),
            grid_height = self.sim.grid_height(),
            tick_ms = self.tick_delay.as_millis() as u64,
            style = self.renderer.style_name(),
            sound = self.sounds.is_some(),
            "game started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal);

        info!(
            ticks = self.metrics.ticks,
            games = self.metrics.games_played,
            high_score = self.metrics.high_score,
            wall_crashes = self.metrics.wall_crashes,
            self_crashes = self.metrics.self_crashes,
            "game finished"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_delay);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game(Instant::now());
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let banner = self.banner(Instant::now());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.sim, &self.metrics, banner);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                // Steering is ignored while the board is frozen after a crash
                if self.resume_at.is_none() && !self.sim.set_direction(direction) {
                    debug!(?direction, "reverse turn ignored");
                }
            }
            KeyAction::Pause => {
                self.paused = !self.paused;
                debug!(paused = self.paused, "pause toggled");
            }
            KeyAction::Restart => self.restart(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    /// Run one tick unless paused or waiting out a crash
    fn update_game(&mut self, now: Instant) -> Option<Outcome> {
        if self.paused {
            return None;
        }
        if let Some(resume_at) = self.resume_at {
            if now < resume_at {
                return None;
            }
            self.resume_at = None;
        }

        let score = self.metrics.score;
        let outcome = self.sim.step();
        self.metrics.on_outcome(outcome);

        if let Some(sounds) = self.sounds.as_mut() {
            if let Err(err) = sounds.on_outcome(outcome) {
                warn!(?err, "failed to play sound cue");
            }
        }

        match outcome {
            Outcome::Moved => {}
            Outcome::Ate => debug!(length = self.sim.len(), food = %self.sim.food(), "food eaten"),
            Outcome::HitWall | Outcome::HitSelf => {
                info!(?outcome, score, "snake crashed");
                if !self.crash_pause.is_zero() {
                    self.resume_at = Some(now + self.crash_pause);
                }
            }
        }

        Some(outcome)
    }

    fn restart(&mut self) {
        info!(score = self.metrics.score, "run abandoned");
        self.sim.reset();
        self.metrics.on_game_over();
        self.resume_at = None;
        self.paused = false;
        info!("game restarted");
    }

    fn banner(&self, now: Instant) -> Banner {
        match self.resume_at {
            Some(resume_at) if now < resume_at => {
                let left = resume_at - now;
                let seconds_left = left.as_secs() + u64::from(left.subsec_nanos() > 0);
                Banner::Crashed { seconds_left }
            }
            _ if self.paused => Banner::Paused,
            _ => Banner::None,
        }
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) {
        if let Err(err) = disable_raw_mode() {
            tracing::error!(?err, "failed to disable raw mode");
        }
        if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
            tracing::error!(?err, "failed to leave alternate screen");
        }
        if let Err(err) = terminal.show_cursor() {
            tracing::error!(?err, "failed to show cursor");
        }
    }
}
