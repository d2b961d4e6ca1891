use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::App;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

/// Stack live notifications in the top-right corner, newest at the bottom.
pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = f.area();
    if area.width < TOAST_WIDTH + 2 || area.height < TOAST_HEIGHT + 4 {
        return;
    }

    let x = area.x + area.width - TOAST_WIDTH - 1;
    let max_rows = (area.height - 4) / TOAST_HEIGHT;
    let skip = app.notifications.len().saturating_sub(max_rows as usize);

    for (row, note) in app.notifications.iter().skip(skip).enumerate() {
        let y = area.y + 3 + row as u16 * TOAST_HEIGHT;
        let rect = Rect::new(x, y, TOAST_WIDTH, TOAST_HEIGHT);
        let color = theme.severity_color(note.severity);

        let lines = vec![
            Line::from(Span::styled(
                note.message.as_str(),
                Style::default().fg(theme.text),
            )),
            Line::from(Span::styled("x to dismiss", Style::default().fg(theme.dim))),
        ];
        let p = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .style(theme.base_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(Span::styled(
                        format!(" {} ", note.severity.label()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )),
            );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}
