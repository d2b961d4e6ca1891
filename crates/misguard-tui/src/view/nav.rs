use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use crate::app::{App, InputMode, Screen};

/// Brand on the left, page tabs on the right.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let [brand_area, tabs_area] =
        Layout::horizontal([Constraint::Length(26), Constraint::Min(10)]).areas(area);

    let brand = Paragraph::new(Line::from(vec![
        Span::styled(" \u{25C8} ", theme.header_style()),
        Span::styled(
            " Misinformation Guard",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme.border_style()),
    );
    f.render_widget(brand, brand_area);

    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.screen.index())
        .style(Style::default().fg(theme.dim))
        .highlight_style(theme.title_style().add_modifier(Modifier::UNDERLINED))
        .divider(Span::styled(" \u{2502} ", theme.border_style()))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(theme.border_style()),
        );
    f.render_widget(tabs, tabs_area);
}

/// One-line status bar: backend connectivity on the left, key hints on the right.
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let (dot, status, color) = if app.connectivity.is_connected() {
        (
            "\u{25CF}",
            format!("Connected to {}", app.connectivity.base_url()),
            theme.success,
        )
    } else {
        ("\u{25CB}", "Backend Offline".to_string(), theme.error)
    };

    let hints = match app.input_mode {
        InputMode::TextInput => "Enter:done  Esc:stop editing",
        InputMode::MultilineInput => "Enter:new line  Esc/Tab:done",
        InputMode::Normal => "Tab:page  t:theme  b:backend  x:dismiss  ?:help  q:quit",
    };

    let [left, right] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(hints.len() as u16 + 1)])
            .areas(area);

    let left_line = Line::from(vec![
        Span::styled(format!(" {dot} "), Style::default().fg(color)),
        Span::styled(status, Style::default().fg(theme.text)),
        Span::styled(
            format!("   theme: {}", app.settings.theme.as_str()),
            Style::default().fg(theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(left_line).style(theme.footer_style()), left);
    f.render_widget(
        Paragraph::new(Span::styled(hints, theme.footer_style())),
        right,
    );
}
