use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;
use crate::view::centered_rect;

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup = centered_rect(64, 36, area);

    let lines = vec![
        Line::from(Span::styled(" Keyboard Shortcuts ", theme.header_style())),
        Line::from(""),
        section_header("Navigation", theme),
        key_line("Tab / l / \u{2192}", "Next page", theme),
        key_line("S-Tab / h / \u{2190}", "Previous page", theme),
        key_line("1-5", "Jump to page", theme),
        key_line("j / \u{2193}", "Move down", theme),
        key_line("k / \u{2191}", "Move up", theme),
        key_line("Enter", "Activate / edit field", theme),
        key_line("Esc", "Back / stop editing", theme),
        Line::from(""),
        section_header("Analyze", theme),
        key_line("s", "Analyze content", theme),
        key_line("e", "Load example", theme),
        key_line("c", "Clear form and results", theme),
        key_line("m", "Toggle basic / advanced mode", theme),
        key_line("J / PgDn", "Scroll results down", theme),
        key_line("K / PgUp", "Scroll results up", theme),
        Line::from(""),
        section_header("Notifications", theme),
        key_line("x", "Dismiss newest", theme),
        key_line("X", "Dismiss all", theme),
        Line::from(""),
        section_header("Global", theme),
        key_line("b", "Configure backend URL", theme),
        key_line("t", "Toggle dark / light theme", theme),
        key_line("d", "Watch demo", theme),
        key_line("?", "Toggle this help", theme),
        key_line("q", "Quit", theme),
        key_line("Ctrl+c", "Force quit", theme),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Help "),
        )
        .style(theme.base_style())
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {key:<18}"), Style::default().fg(theme.text)),
        Span::styled(desc, Style::default().fg(theme.dim)),
    ])
}
