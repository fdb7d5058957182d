use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::catalog::Route;
use crate::theme::ThemeMode;
use crate::ui::theme::Palette;

pub struct Header;

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, palette: &Palette, route: Route, mode: ThemeMode) -> Paragraph<'static> {
        let text_style = Style::default().fg(palette.text);
        let separator_style = Style::default().fg(palette.muted);
        let title_style = Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD);
        let mode_label = if mode.is_dark() { "☾ Dark" } else { "☀ Light" };

        let mut spans = vec![
            Span::styled("  ⚡ ", title_style),
            Span::styled("Frontend Bites", title_style),
        ];
        if route != Route::Landing {
            spans.push(Span::styled("  │  ", separator_style));
            spans.push(Span::styled(route.title(), text_style));
        }
        spans.push(Span::styled("  │  ", separator_style));
        spans.push(Span::styled(mode_label, text_style));

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(palette.background))
            .block(
                Block::default()
                    .borders(Borders::TOP | Borders::BOTTOM)
                    .border_style(Style::default().fg(palette.border)),
            )
    }
}
