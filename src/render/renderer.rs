use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::style::{CellKind, CellStyle, style_for};
use crate::game::{GridSimulation, Position, RenderStyle};
use crate::metrics::GameMetrics;

/// Loop state the renderer needs besides the board itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Banner {
    #[default]
    None,
    Paused,
    /// Waiting out the pause after a crash; seconds left, rounded up
    Crashed { seconds_left: u64 },
}

pub struct Renderer {
    style: Box<dyn CellStyle>,
}

impl Renderer {
    pub fn new(render_style: RenderStyle) -> Self {
        Self::with_style(style_for(render_style))
    }

    pub fn with_style(style: Box<dyn CellStyle>) -> Self {
        Self { style }
    }

    pub fn style_name(&self) -> &'static str {
        self.style.name()
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        sim: &GridSimulation,
        metrics: &GameMetrics,
        banner: Banner,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(sim, metrics), chunks[0]);
        frame.render_widget(self.render_grid(sim, banner), chunks[1]);
        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn classify(sim: &GridSimulation, pos: Position) -> CellKind {
        if pos == sim.head() {
            CellKind::Head
        } else if sim.segments().contains(&pos) {
            CellKind::Body
        } else if pos == sim.food() {
            CellKind::Food
        } else {
            CellKind::Empty
        }
    }

    /// One line of styled cells per grid row
    pub fn grid_lines(&self, sim: &GridSimulation) -> Vec<Line<'static>> {
        (0..sim.grid_height())
            .map(|y| {
                let spans: Vec<Span<'static>> = (0..sim.grid_width())
                    .map(|x| {
                        let kind = Self::classify(sim, Position::new(x as i32, y as i32));
                        self.style.span(kind)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn render_grid(&self, sim: &GridSimulation, banner: Banner) -> Paragraph<'static> {
        let title = match banner {
            Banner::None => " Snake ".to_string(),
            Banner::Paused => " Snake - PAUSED ".to_string(),
            Banner::Crashed { seconds_left } => format!(" CRASHED - restarting in {seconds_left} "),
        };
        let border_color = match banner {
            Banner::Crashed { .. } => Color::Red,
            _ => Color::White,
        };

        Paragraph::new(self.grid_lines(sim))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, sim: &GridSimulation, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                metrics.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(sim.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderStyle::default())
    }
}
