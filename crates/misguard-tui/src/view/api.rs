use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::theme::Theme;

const REQUEST_EXAMPLE: &[&str] = &[
    "{",
    "  \"text\": \"Article body to analyze\",",
    "  \"headline\": \"Optional headline\",",
    "  \"url\": \"https://example.com/article\",",
    "  \"mode\": \"basic\"",
    "}",
];

const RESPONSE_EXAMPLE: &[&str] = &[
    "{",
    "  \"credibility_score\": 0.85,",
    "  \"analysis\": {",
    "    \"confidence\": 0.92,",
    "    \"bias_score\": 0.2,",
    "    \"readability\": \"High\",",
    "    \"sources_found\": [\"https://example.com/source1\"],",
    "    \"fact_check_results\": [],",
    "    \"summary\": \"...\",",
    "    \"recommendations\": [\"...\"]",
    "  }",
    "}",
];

/// Static documentation of the backend endpoints this client talks to.
pub fn render(f: &mut Frame, area: Rect, theme: &Theme) {
    let heading = Style::default()
        .fg(theme.active)
        .add_modifier(Modifier::BOLD);
    let code = Style::default().fg(theme.accent);

    let mut lines = vec![
        Line::from(""),
        endpoint_line("GET", "/api/status", "Health check; any 2xx means connected.", theme),
        Line::from(""),
        endpoint_line("POST", "/api/analyze", "Analyze a piece of content.", theme),
        Line::from(""),
        Line::from(Span::styled("  Request body", heading)),
    ];
    lines.extend(
        REQUEST_EXAMPLE
            .iter()
            .map(|l| Line::from(Span::styled(format!("    {l}"), code))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Response body", heading)));
    lines.extend(
        RESPONSE_EXAMPLE
            .iter()
            .map(|l| Line::from(Span::styled(format!("    {l}"), code))),
    );

    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(Span::styled(" API Documentation ", theme.title_style())),
    );
    f.render_widget(p, area);
}

fn endpoint_line<'a>(method: &'a str, path: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {method:<5}"), theme.header_style()),
        Span::styled(
            format!(" {path}"),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {desc}"), Style::default().fg(theme.dim)),
    ])
}
