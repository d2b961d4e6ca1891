use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{App, HOME_BUTTONS};
use crate::model::counter::HOME_COUNTERS;
use crate::theme::Theme;

const FEATURES: [(&str, &str); 4] = [
    (
        "AI-Powered Analysis",
        "Advanced NLP models analyze content for credibility, bias, and factual accuracy",
    ),
    (
        "Real-time Verification",
        "Instant cross-referencing with trusted sources and fact-checking databases",
    ),
    (
        "Multi-source Integration",
        "Connected to 150+ fact-checking organizations and news outlets worldwide",
    ),
    (
        "Trend Analysis",
        "Track misinformation patterns and emerging false narratives in real-time",
    ),
];

/// Render the landing page: hero, animated counters, call-to-action, features.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let [hero, counters, buttons, features] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Min(4),
    ])
    .areas(area);

    render_hero(f, hero, theme);
    render_counters(f, counters, app);
    render_buttons(f, buttons, app);
    render_features(f, features, theme);
}

fn render_hero(f: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Combat Misinformation with",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " AI-Powered Analysis",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Advanced fact-checking platform combining NLP analysis, real-time verification,",
            Style::default().fg(theme.dim),
        )),
        Line::from(Span::styled(
            "and comprehensive credibility scoring for reliable information assessment.",
            Style::default().fg(theme.dim),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_counters(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let elapsed = app.home_elapsed();
    let cols = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

    for (counter, col) in HOME_COUNTERS.iter().zip(cols.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                counter.display_at(elapsed),
                Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(counter.label, Style::default().fg(theme.dim))),
        ];
        let p = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        );
        f.render_widget(p, *col);
    }
}

fn render_buttons(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = Vec::new();
    for (i, label) in HOME_BUTTONS.iter().enumerate() {
        let style = if i == app.home_cursor {
            theme.header_style()
        } else {
            Style::default().fg(theme.active)
        };
        let arrow = if i == 0 { " \u{2192}" } else { "" };
        spans.push(Span::styled(format!(" [ {label}{arrow} ] "), style));
        spans.push(Span::raw("   "));
    }
    let p = Paragraph::new(vec![Line::from(""), Line::from(spans)]).alignment(Alignment::Center);
    f.render_widget(p, area);
}

fn render_features(f: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border_style())
        .title(Span::styled(" Cutting-Edge Features ", theme.title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(inner);
    for ((title, desc), col) in FEATURES.iter().zip(cols.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                *title,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(*desc, Style::default().fg(theme.dim))),
        ];
        let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        );
        f.render_widget(p, *col);
    }
}
