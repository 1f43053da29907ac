use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::game::RenderStyle;

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head,
    Body,
    Food,
    Empty,
}

/// Turns a cell into two terminal columns so cells come out roughly square
pub trait CellStyle {
    fn name(&self) -> &'static str;

    fn span(&self, kind: CellKind) -> Span<'static>;
}

/// Distinct glyphs for head, body and food
#[derive(Debug, Default)]
pub struct SpriteStyle;

impl CellStyle for SpriteStyle {
    fn name(&self) -> &'static str {
        "sprite"
    }

    fn span(&self, kind: CellKind) -> Span<'static> {
        match kind {
            CellKind::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            CellKind::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
            CellKind::Food => Span::styled(
                "● ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            CellKind::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }
}

/// Plain filled rectangles, one colour per kind
#[derive(Debug, Default)]
pub struct BlockStyle;

impl CellStyle for BlockStyle {
    fn name(&self) -> &'static str {
        "block"
    }

    fn span(&self, kind: CellKind) -> Span<'static> {
        let color = match kind {
            CellKind::Head => Color::LightGreen,
            CellKind::Body => Color::Green,
            CellKind::Food => Color::Red,
            CellKind::Empty => return Span::raw("  "),
        };
        Span::styled("██", Style::default().fg(color))
    }
}

/// Pick the cell style named in the config
pub fn style_for(render_style: RenderStyle) -> Box<dyn CellStyle> {
    match render_style {
        RenderStyle::Sprite => Box::new(SpriteStyle),
        RenderStyle::Block => Box::new(BlockStyle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [CellKind; 4] = [CellKind::Head, CellKind::Body, CellKind::Food, CellKind::Empty];

    #[test]
    fn test_cells_are_two_columns() {
        for style in [style_for(RenderStyle::Sprite), style_for(RenderStyle::Block)] {
            for kind in KINDS {
                assert_eq!(style.span(kind).width(), 2, "{} {kind:?}", style.name());
            }
        }
    }

    #[test]
    fn test_sprite_head_differs_from_body() {
        let style = SpriteStyle;
        assert_ne!(
            style.span(CellKind::Head).content,
            style.span(CellKind::Body).content
        );
    }

    #[test]
    fn test_block_head_differs_from_body() {
        let style = BlockStyle;
        assert_ne!(
            style.span(CellKind::Head).style,
            style.span(CellKind::Body).style
        );
    }

    #[test]
    fn test_style_for() {
        assert_eq!(style_for(RenderStyle::Sprite).name(), "sprite");
        assert_eq!(style_for(RenderStyle::Block).name(), "block");
    }
}
