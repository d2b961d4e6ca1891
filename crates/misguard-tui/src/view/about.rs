use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::counter::HOME_COUNTERS;
use crate::theme::Theme;

const TECHNOLOGY: [(&str, &str); 4] = [
    (
        "Natural Language Processing",
        "Transformer models score claims, tone, and readability.",
    ),
    (
        "Source Verification",
        "Claims are cross-referenced against trusted outlets and fact-check databases.",
    ),
    (
        "Bias Detection",
        "Loaded language and one-sided framing are measured and reported.",
    ),
    (
        "Credibility Scoring",
        "Signals are combined into a single score with a confidence estimate.",
    ),
];

pub fn render(f: &mut Frame, area: Rect, theme: &Theme) {
    let heading = Style::default()
        .fg(theme.active)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Our Mission", heading)),
        Line::from(""),
        Line::from(Span::styled(
            "  Misinformation spreads faster than corrections. Misinformation Guard gives readers,",
            Style::default().fg(theme.text),
        )),
        Line::from(Span::styled(
            "  journalists, and researchers a quick, transparent credibility check for any article.",
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(Span::styled("  Technology", heading)),
        Line::from(""),
    ];

    for (title, desc) in TECHNOLOGY {
        lines.push(Line::from(vec![
            Span::styled("  \u{25B8} ", Style::default().fg(theme.accent)),
            Span::styled(
                title,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {desc}"),
            Style::default().fg(theme.dim),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  By the Numbers", heading)));
    lines.push(Line::from(""));
    let mut tiles = vec![Span::raw("  ")];
    for counter in HOME_COUNTERS.iter() {
        tiles.push(Span::styled(
            format!(" {} ", counter.display_at(counter.duration)),
            theme.header_style(),
        ));
        tiles.push(Span::styled(
            format!(" {}    ", counter.label),
            Style::default().fg(theme.dim),
        ));
    }
    lines.push(Line::from(tiles));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Limitations", heading)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Scores are guidance, not verdicts. Always read the sources and check multiple outlets.",
        Style::default().fg(theme.dim),
    )));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(Span::styled(" About ", theme.title_style())),
    );
    f.render_widget(p, area);
}
