use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::catalog::{Difficulty, Route};
use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::landing::LandingState;
use crate::ui::layout::{layout_regions, split_top, SCROLL_INTRO_ROWS};
use crate::ui::scroll_page::{ScrollPage, ITEM_ROWS};
use crate::ui::search_page::SearchPage;
use crate::ui::theme::{palette, Palette};

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let palette = palette(app.theme_mode());
    let (header, body, footer) = layout_regions(area);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );
    frame.render_widget(
        Header::new().widget(palette, app.route(), app.theme_mode()),
        header,
    );

    let spinner = SPINNER[(app.ticks() % SPINNER.len() as u64) as usize];
    match app.route() {
        Route::Landing => draw_landing(frame, body, app.landing(), palette),
        Route::DebounceSearch => {
            if let Some(page) = app.search_page() {
                draw_search(frame, body, page, palette, spinner);
            }
        }
        Route::InfiniteScroll => {
            if let Some(page) = app.scroll_page() {
                draw_scroll(frame, body, page, palette, spinner);
            }
        }
    }

    frame.render_widget(
        Footer::new().widget(footer, palette, app.route(), app.notice()),
        footer,
    );
}

fn draw_landing(frame: &mut Frame<'_>, body: Rect, state: &LandingState, palette: &Palette) {
    let text = Style::default().fg(palette.text);
    let muted = Style::default().fg(palette.muted);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Real-world UI features for production apps",
            text.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  Small, focused implementations of common frontend interaction patterns.",
            muted,
        )),
        Line::from(""),
        filter_line(state.filter, palette),
        Line::from(""),
    ];

    let bites = state.visible_bites();
    if bites.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No bites found for this difficulty level.",
            muted,
        )));
    }
    for (index, bite) in bites.iter().enumerate() {
        let selected = index == state.selected;
        let marker = if selected { "  ▸ " } else { "    " };
        let title_style = if selected {
            Style::default()
                .fg(palette.accent)
                .bg(palette.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            text.add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, title_style),
            Span::styled(bite.title, title_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", bite.description),
            muted,
        )));
        let mut tags = vec![
            Span::raw("    "),
            Span::styled(
                format!("[{}]", bite.category.label()),
                Style::default().fg(palette.category(bite.category)),
            ),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", bite.difficulty.label()),
                Style::default().fg(palette.difficulty(bite.difficulty)),
            ),
        ];
        if selected {
            tags.push(Span::styled(
                "   Explore →",
                Style::default().fg(palette.accent),
            ));
        }
        lines.push(Line::from(tags));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);
}

fn filter_line(active: Option<Difficulty>, palette: &Palette) -> Line<'static> {
    let options = std::iter::once((None, "All Bites"))
        .chain(Difficulty::all().iter().map(|d| (Some(*d), d.label())));
    let mut spans = vec![Span::raw("  ")];
    for (key, (filter, label)) in options.enumerate() {
        let style = if filter == active {
            Style::default()
                .fg(palette.background)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(format!(" {key} {label} "), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn draw_search(frame: &mut Frame<'_>, body: Rect, page: &SearchPage, palette: &Palette, spinner: &str) {
    let (input_area, results_area) = split_top(body, 3);
    let text = Style::default().fg(palette.text);
    let muted = Style::default().fg(palette.muted);

    let mut block = Block::default()
        .title(Span::styled(" Search ", Style::default().fg(palette.accent)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));
    if page.is_searching() {
        block = block.title(
            Line::from(Span::styled(format!(" {spinner} searching "), muted)).right_aligned(),
        );
    }
    let input_line = if page.input().is_empty() {
        Line::from(Span::styled("Search frameworks, languages, tools...", muted))
    } else {
        Line::from(Span::styled(page.input().to_string(), text))
    };
    frame.render_widget(Paragraph::new(input_line).block(block), input_area);

    if input_area.width > 2 && input_area.height > 1 {
        let typed = page.input().chars().count() as u16;
        let x = input_area.x + 1 + typed.min(input_area.width.saturating_sub(3));
        frame.set_cursor_position((x, input_area.y + 1));
    }

    let mut lines = vec![
        Line::from(Span::styled(format!("  {}", page.caption()), muted)),
        Line::from(""),
    ];
    if let Some(message) = page.empty_message() {
        lines.push(Line::from(Span::styled(format!("  {message}"), muted)));
    }
    for record in page.results() {
        lines.push(Line::from(vec![
            Span::styled("  • ", muted),
            Span::styled(record.name, text.add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(record.category, Style::default().fg(palette.accent)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), results_area);
}

fn draw_scroll(frame: &mut Frame<'_>, body: Rect, page: &ScrollPage, palette: &Palette, spinner: &str) {
    let (intro_area, list_area) = split_top(body, SCROLL_INTRO_ROWS);
    let muted = Style::default().fg(palette.muted);
    let loader = page.loader();

    let intro = vec![
        Line::from(Span::styled(
            "  Items load automatically as you approach the end of the list.",
            muted,
        )),
        Line::from(Span::styled(
            format!("  Showing {} items", loader.items().len()),
            muted,
        )),
        Line::from(""),
    ];
    frame.render_widget(Paragraph::new(intro), intro_area);

    let width = list_area.width as usize;
    let start = page.offset();
    let end = start + list_area.height as usize;
    let lines: Vec<Line<'static>> = (start..end)
        .map(|row| scroll_row(page, row, width, palette, spinner))
        .collect();
    frame.render_widget(Paragraph::new(lines), list_area);
}

fn scroll_row(
    page: &ScrollPage,
    row: usize,
    width: usize,
    palette: &Palette,
    spinner: &str,
) -> Line<'static> {
    let loader = page.loader();
    let sentinel = page.sentinel_row();
    if row < sentinel {
        let item = &loader.items()[row / ITEM_ROWS];
        return match row % ITEM_ROWS {
            0 => Line::from(vec![
                Span::styled("  ▌ ", Style::default().fg(palette.accent)),
                Span::styled(
                    item.title.clone(),
                    Style::default()
                        .fg(palette.text)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            1 => Line::from(Span::styled(
                truncate(&format!("    {}", item.description), width),
                Style::default().fg(palette.muted),
            )),
            2 => Line::from(Span::styled(
                format!("    ID: {}", item.id),
                Style::default().fg(palette.muted).add_modifier(Modifier::DIM),
            )),
            _ => Line::from(""),
        };
    }
    if row != sentinel {
        return Line::from("");
    }

    let (message, color) = if loader.is_loading() {
        (format!("  {spinner} Loading more items..."), palette.accent)
    } else if !loader.has_more() {
        match loader.last_error() {
            Some(error) => (
                format!(
                    "  Stopped after {} failed attempts: {error}",
                    loader.failures()
                ),
                palette.status_error,
            ),
            None => ("  No more items to load".to_string(), palette.muted),
        }
    } else if let Some(error) = loader.last_error() {
        (
            format!("  Failed to load more items: {error} (retrying)"),
            palette.status_warn,
        )
    } else {
        (String::new(), palette.muted)
    };
    Line::from(Span::styled(message, Style::default().fg(color)))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigStore};
    use crate::preferences::MemoryPreferenceStore;
    use crate::theme::{ThemeController, ThemeMode};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn app() -> App {
        let store = Arc::new(MemoryPreferenceStore::new());
        let theme = ThemeController::with_mode(store, ThemeMode::Dark);
        let config = ConfigStore::new(Config::default(), PathBuf::from("/missing/config.toml"));
        let mut app = App::new(config, theme);
        app.on_resize(80, 24);
        app
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn landing_lists_bites() {
        let text = screen_text(&app());
        assert!(text.contains("Frontend Bites"));
        assert!(text.contains("Infinite Scroll"));
        assert!(text.contains("Debounce Search"));
    }

    #[test]
    fn scroll_page_shows_first_items() {
        let mut app = app();
        app.open(Route::InfiniteScroll);
        let text = screen_text(&app);
        assert!(text.contains("Item 1"));
        assert!(text.contains("Showing 9 items"));
    }

    #[test]
    fn search_page_prompts_for_input() {
        let mut app = app();
        app.open(Route::DebounceSearch);
        assert!(screen_text(&app).contains("Start typing to search"));
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
