use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::{App, EditTarget};
use crate::view::{centered_rect, truncate};

/// Render the backend URL dialog as a centered popup.
pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = f.area();
    let width = area.width.saturating_sub(4).min(64);
    let popup = centered_rect(width, 8, area);

    let editing = app.editing == Some(EditTarget::BackendUrl);
    let field_width = width.saturating_sub(6) as usize;
    let mut value = app.backend_prompt.buffer.clone();
    if editing {
        value.push('\u{2588}');
    }
    // Show the tail so the cursor stays visible.
    let shown = if value.chars().count() > field_width {
        let skip = value.chars().count() - field_width;
        value.chars().skip(skip).collect()
    } else {
        value
    };

    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        )
    };
    let hint = |h: &'static str| Span::styled(h, Style::default().fg(theme.dim));

    let help = if editing {
        Line::from(vec![
            Span::raw("  "),
            key("Enter"),
            hint(": save   "),
            key("Esc"),
            hint(": cancel"),
        ])
    } else {
        Line::from(vec![
            Span::raw("  "),
            key("Enter"),
            hint(": edit   "),
            key("Esc"),
            hint(": close"),
        ])
    };

    let status = if app.connectivity.is_connected() {
        Span::styled(
            format!(
                "  Currently connected to {}",
                truncate(app.connectivity.base_url(), field_width.saturating_sub(22))
            ),
            Style::default().fg(theme.success),
        )
    } else {
        Span::styled("  Backend is currently offline", Style::default().fg(theme.error))
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Backend URL",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(shown, theme.highlight_style().fg(theme.text)),
        ]),
        Line::from(status),
        Line::from(""),
        help,
    ];

    let border = if editing { theme.accent } else { theme.active };
    let paragraph = Paragraph::new(lines).style(theme.base_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Backend Configuration "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
