use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

use misguard_core::FormField;
use misguard_core::session::{CHECKPOINTS, STEP_LABELS, SessionState};

use crate::app::{ANALYZE_ITEMS, AnalyzeItem, App, EditTarget};
use crate::theme::Theme;
use crate::view::spinner_char;

/// Render the analysis page: the input form on the left, progress or
/// results on the right.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let [form_area, output_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    render_form(f, form_area, app);

    match app.session.state() {
        SessionState::Idle => render_placeholder(f, output_area, &app.theme),
        SessionState::Running { progress } => render_progress(f, output_area, app, *progress),
        SessionState::Completed(_) | SessionState::Failed { .. } => {
            if let Some(result) = app.session.result() {
                crate::view::results::render(f, output_area, app, &result);
            }
        }
    }
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(Span::styled(" Content Analysis ", theme.title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [mode_row, headline, body, url, buttons] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(2),
    ])
    .areas(inner);

    let focused = app.analyze_item();

    let mode_style = if focused == AnalyzeItem::Mode {
        theme.highlight_style()
    } else {
        Style::default().fg(theme.text)
    };
    let mode_line = Line::from(vec![
        Span::styled(" Mode: ", Style::default().fg(theme.dim)),
        Span::styled(format!("[{}]", app.mode.label()), mode_style),
        Span::styled("  (m to toggle)", Style::default().fg(theme.dim)),
    ]);
    f.render_widget(Paragraph::new(mode_line), mode_row);

    render_field(f, headline, app, FormField::Headline);
    render_field(f, body, app, FormField::Body);
    render_field(f, url, app, FormField::SourceUrl);

    let mut spans = vec![Span::raw(" ")];
    for item in ANALYZE_ITEMS.iter() {
        let label = match item {
            AnalyzeItem::LoadExample => "Load Example",
            AnalyzeItem::Clear => "Clear",
            AnalyzeItem::Submit => {
                if app.session.is_running() {
                    "Analyzing..."
                } else {
                    "Analyze Content"
                }
            }
            _ => continue,
        };
        let style = if *item == focused {
            theme.header_style()
        } else {
            Style::default().fg(theme.active)
        };
        spans.push(Span::styled(format!("[ {label} ]"), style));
        spans.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(vec![Line::from(""), Line::from(spans)]), buttons);
}

fn render_field(f: &mut Frame, area: Rect, app: &App, field: FormField) {
    let theme = &app.theme;
    let focused = app.analyze_item() == AnalyzeItem::Field(field);
    let editing = app.editing == Some(EditTarget::Form(field));

    let border = if editing {
        Style::default().fg(theme.accent)
    } else if focused {
        Style::default().fg(theme.active)
    } else {
        theme.border_style()
    };

    let mut title = format!(" {} ", field.label());
    if let Some(max) = field.max_chars() {
        title.push_str(&format!("{}/{} ", app.form.char_count(field), max));
    }

    let value = app.form.field(field);
    let mut text = value.to_string();
    if editing {
        text.push('\u{2588}');
    }
    let style = if value.is_empty() && !editing {
        Style::default().fg(theme.dim)
    } else {
        Style::default().fg(theme.text)
    };
    let shown = if value.is_empty() && !editing {
        placeholder(field).to_string()
    } else {
        text
    };

    // Keep the cursor in view for long bodies.
    let inner_height = area.height.saturating_sub(2);
    let inner_width = area.width.saturating_sub(2).max(1);
    let lines_needed: u16 = shown
        .split('\n')
        .map(|line| line.chars().count() as u16 / inner_width + 1)
        .sum();
    let scroll = lines_needed.saturating_sub(inner_height);

    let p = Paragraph::new(Text::styled(shown, style))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        );
    f.render_widget(p, area);
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Headline => "Enter article headline...",
        FormField::Body => "Paste the article text or claim to analyze...",
        FormField::SourceUrl => "https://example.com/article",
    }
}

fn render_placeholder(f: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  No analysis yet",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Enter content on the left and press s to analyze,",
            Style::default().fg(theme.dim),
        )),
        Line::from(Span::styled(
            "  or e to load an example.",
            Style::default().fg(theme.dim),
        )),
    ];
    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(" Results "),
    );
    f.render_widget(p, area);
}

fn render_progress(f: &mut Frame, area: Rect, app: &App, progress: u8) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.active))
        .title(Span::styled(" Analyzing ", theme.title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [gauge_area, _, steps_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(4),
    ])
    .areas(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.active).bg(theme.background))
        .percent(u16::from(progress.min(100)))
        .label(format!("{progress}%"));
    f.render_widget(gauge, gauge_area);

    let spinner = spinner_char(app.tick);
    let lines: Vec<Line> = STEP_LABELS
        .iter()
        .zip(CHECKPOINTS.iter())
        .enumerate()
        .map(|(i, (label, threshold))| {
            let prev = if i == 0 { 0 } else { CHECKPOINTS[i - 1] };
            if progress >= *threshold {
                Line::from(vec![
                    Span::styled(" \u{2713} ", Style::default().fg(theme.success)),
                    Span::styled(*label, Style::default().fg(theme.text)),
                ])
            } else if progress >= prev {
                Line::from(vec![
                    Span::styled(format!(" {spinner} "), Style::default().fg(theme.active)),
                    Span::styled(
                        *label,
                        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(vec![
                    Span::styled(" \u{00B7} ", Style::default().fg(theme.dim)),
                    Span::styled(*label, Style::default().fg(theme.dim)),
                ])
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines), steps_area);
}
