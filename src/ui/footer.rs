use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::catalog::Route;
use crate::ui::theme::Palette;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    pub fn hints(route: Route) -> &'static str {
        match route {
            Route::Landing => {
                " ↑/↓: Select │ Enter: Open │ Tab/0-3: Filter │ Ctrl+T: Theme │ q: Quit"
            }
            Route::DebounceSearch => {
                " Type to search │ Ctrl+U: Clear │ Esc: Back │ Ctrl+T: Theme │ Ctrl+Q: Quit"
            }
            Route::InfiniteScroll => {
                " ↑/↓/PgUp/PgDn: Scroll │ Home/End │ Esc: Back │ Ctrl+T: Theme │ Ctrl+Q: Quit"
            }
        }
    }

    pub fn widget(
        &self,
        area: Rect,
        palette: &Palette,
        route: Route,
        notice: Option<&str>,
    ) -> Paragraph<'static> {
        let hints = notice.map_or_else(|| Self::hints(route).to_string(), |n| format!(" {n}"));
        let version = format!("v{} ", VERSION);

        // Padding by char count, not byte count
        let hints_width = hints.chars().count();
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(version_width);

        let text_style = Style::default().fg(palette.text).add_modifier(Modifier::DIM);
        let hints_style = if notice.is_some() {
            Style::default().fg(palette.accent)
        } else {
            text_style
        };

        let line = Line::from(vec![
            Span::styled(hints, hints_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(Style::default().bg(palette.background))
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border)),
            )
    }
}
