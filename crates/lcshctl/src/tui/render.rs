//! Rendering - UI drawing functions and the light/dark palettes

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::state::{Focus, TuiState};

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Theme palette. Toggling dark mode swaps the palette used by the very
/// next draw call, so the theme never flashes wrong.
struct Palette {
    bg: Color,
    fg: Color,
    dim: Color,
    accent: Color,
    error: Color,
    ok: Color,
}

impl Palette {
    fn dark() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            error: Color::Red,
            ok: Color::Green,
        }
    }

    fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Blue,
            error: Color::Red,
            ok: Color::Green,
        }
    }
}

/// Draw the whole form.
pub fn draw_ui(f: &mut Frame, state: &mut TuiState) {
    let palette = if state.session.dark_mode() {
        Palette::dark()
    } else {
        Palette::light()
    };

    let size = f.size();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        size,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // api key field
            Constraint::Min(6),    // text area
            Constraint::Length(3), // status / error
            Constraint::Min(5),    // headings list
        ])
        .split(size);

    draw_header(f, chunks[0], state, &palette);
    draw_api_key_field(f, chunks[1], state, &palette);
    draw_text_area(f, chunks[2], state, &palette);
    draw_status(f, chunks[3], state, &palette);
    draw_headings(f, chunks[4], state, &palette);

    if state.show_help {
        draw_help_overlay(f, size, &palette);
    }
}

fn focus_style(focused: bool, palette: &Palette) -> Style {
    if focused {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.dim)
    }
}

fn draw_header(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let mode = if state.session.dark_mode() { "dark" } else { "light" };
    let title = Line::from(vec![
        Span::styled(
            "LCSH Generator",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("v{} | {} | F1 help", env!("CARGO_PKG_VERSION"), mode),
            Style::default().fg(palette.dim),
        ),
    ]);

    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette.dim)));
    f.render_widget(header, area);
}

fn draw_api_key_field(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let shown = if state.session.reveal_key() {
        state.key.text().to_string()
    } else {
        "•".repeat(state.key.text().chars().count())
    };

    let field = Paragraph::new(shown).style(Style::default().fg(palette.fg)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" DeepSeek API Key (Ctrl+K reveal) ")
            .border_style(focus_style(state.focus == Focus::ApiKey, palette)),
    );
    f.render_widget(field, area);
}

fn draw_text_area(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let text = if state.text.is_empty() && state.focus != Focus::Text {
        Paragraph::new("Enter the text you want to analyze...")
            .style(Style::default().fg(palette.dim))
    } else {
        Paragraph::new(state.text.text()).style(Style::default().fg(palette.fg))
    };

    let widget = text.wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Your text ")
            .border_style(focus_style(state.focus == Focus::Text, palette)),
    );
    f.render_widget(widget, area);
}

fn draw_status(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let line = if state.session.is_loading() {
        Line::from(vec![
            Span::styled(
                SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()],
                Style::default().fg(palette.accent),
            ),
            Span::raw(" Generating..."),
        ])
    } else if let Some(error) = state.session.error() {
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "Ctrl+G generate | Tab switch field | Ctrl+D theme | Ctrl+C quit",
            Style::default().fg(palette.dim),
        ))
    };

    let status = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim)),
    );
    f.render_widget(status, area);
}

fn draw_headings(f: &mut Frame, area: Rect, state: &mut TuiState, palette: &Palette) {
    let copied = state.session.copied_index();

    let items: Vec<ListItem> = state
        .session
        .headings()
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            let mut spans = vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(palette.dim)),
                Span::raw(heading.clone()),
            ];
            if copied == Some(i) {
                spans.push(Span::styled(
                    "  ✓ copied",
                    Style::default().fg(palette.ok).add_modifier(Modifier::BOLD),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if items.is_empty() {
        " Generated Subject Headings "
    } else {
        " Generated Subject Headings (Enter/c to copy) "
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(focus_style(state.focus == Focus::Headings, palette)),
        )
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if state.focus == Focus::Headings && !state.session.headings().is_empty() {
        list_state.select(Some(state.selected));
    }

    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_help_overlay(f: &mut Frame, size: Rect, palette: &Palette) {
    let area = centered_rect(50, 40, size);
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from("Tab      switch field"),
        Line::from("Ctrl+G   generate headings"),
        Line::from("Enter/c  copy selected heading"),
        Line::from("Ctrl+K   reveal/mask API key"),
        Line::from("Ctrl+D   toggle dark mode"),
        Line::from("Ctrl+U   clear focused field"),
        Line::from("F1/Esc   toggle this help"),
        Line::from("Ctrl+C   quit"),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.bg).fg(palette.fg)),
    );
    f.render_widget(help, area);
}

/// Centered overlay rect as a percentage of the full frame.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
