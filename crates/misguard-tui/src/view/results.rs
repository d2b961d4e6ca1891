use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

use misguard_core::{AnalysisReport, AnalysisResult};

use crate::app::App;
use crate::theme::Theme;

/// Render a resolved session: the report card on success, an error card otherwise.
pub fn render(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    match result {
        AnalysisResult::Success(report) => render_report(f, area, app, report),
        AnalysisResult::Error { message } => render_error(f, area, &app.theme, message),
    }
}

/// Score card and breakdown on top, scrollable details below.
fn render_report(f: &mut Frame, area: Rect, app: &App, report: &AnalysisReport) {
    let rows = report.breakdown().len() as u16;
    let [top, details] =
        Layout::vertical([Constraint::Length(rows + 2), Constraint::Min(4)]).areas(area);
    let [score_area, breakdown_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(top);

    render_score_card(f, score_area, &app.theme, report);
    render_breakdown(f, breakdown_area, &app.theme, report);
    render_details(f, details, app, report);
}

fn render_score_card(f: &mut Frame, area: Rect, theme: &Theme, report: &AnalysisReport) {
    let band = report.band();
    let band_color = theme.band_color(band);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(band_color))
        .title(Span::styled(" Credibility Analysis ", theme.title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [gauge_area, _, text_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(2),
    ])
    .areas(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(band_color).bg(theme.background))
        .percent(u16::from(report.credibility_pct()))
        .label(Span::styled(
            format!("{}%", report.credibility_pct()),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    f.render_widget(gauge, gauge_area);

    let lines = vec![
        Line::from(Span::styled(
            band.label(),
            Style::default().fg(band_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Confidence: {}%", report.confidence_pct()),
            Style::default().fg(theme.text),
        )),
    ];
    f.render_widget(Paragraph::new(lines), text_area);
}

/// One labelled gauge per breakdown axis.
fn render_breakdown(f: &mut Frame, area: Rect, theme: &Theme, report: &AnalysisReport) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(Span::styled(" Detailed Analysis ", theme.title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let dims = report.breakdown();
    let rows = Layout::vertical(dims.iter().map(|_| Constraint::Length(1))).split(inner);
    for (dim, row) in dims.iter().zip(rows.iter()) {
        let [label_area, gauge_area] =
            Layout::horizontal([Constraint::Length(12), Constraint::Min(4)]).areas(*row);
        f.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", dim.name),
                Style::default().fg(theme.dim),
            )),
            label_area,
        );
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.accent).bg(theme.background))
            .percent(u16::from(dim.value.min(100)))
            .label(format!("{}", dim.value));
        f.render_widget(gauge, gauge_area);
    }
}

fn render_details(f: &mut Frame, area: Rect, app: &App, report: &AnalysisReport) {
    let theme = &app.theme;
    let band_color = theme.band_color(report.band());

    let mut lines = vec![
        section_header("Metrics", theme),
        metric_line("Sources Found", report.sources_found.len().to_string(), theme),
        metric_line("Fact Checks", report.fact_check_count.to_string(), theme),
        metric_line("Bias Score", format!("{}%", report.balance_pct()), theme),
        metric_line("Readability", report.readability.clone(), theme),
    ];

    if !report.sources_found.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_header("Sources", theme));
        for src in &report.sources_found {
            lines.push(Line::from(vec![
                Span::styled("    \u{2022} ", Style::default().fg(theme.dim)),
                Span::styled(
                    src.as_str(),
                    Style::default()
                        .fg(theme.info)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
    }

    if !report.summary.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_header("Summary", theme));
        lines.push(Line::from(Span::styled(
            format!("    {}", report.summary),
            Style::default().fg(theme.text),
        )));
    }

    if !report.recommendations.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_header("Recommendations", theme));
        for rec in &report.recommendations {
            lines.push(Line::from(vec![
                Span::styled("    \u{2713} ", Style::default().fg(theme.success)),
                Span::styled(rec.as_str(), Style::default().fg(theme.text)),
            ]));
        }
    }

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.results_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(band_color))
                .title(Span::styled(" Analysis Results ", theme.title_style())),
        );
    f.render_widget(p, area);
}

fn render_error(f: &mut Frame, area: Rect, theme: &Theme, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  \u{2717} Analysis Error",
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(theme.text),
        )),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .title(" Analysis Results "),
    );
    f.render_widget(p, area);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    ))
}

fn metric_line<'a>(label: &'a str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {label:<16}"), Style::default().fg(theme.dim)),
        Span::styled(value, Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
    ])
}
