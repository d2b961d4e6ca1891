use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use misguard_core::ContactField;

use crate::app::{App, EditTarget};
use crate::theme::Theme;
use crate::view::{spinner_char, truncate};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let [form_area, info_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);
    render_form(f, form_area, app);
    render_info(f, info_area, &app.theme);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(Span::styled(" Send us a Message ", theme.title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints: Vec<Constraint> = ContactField::all()
        .iter()
        .map(|field| match field {
            ContactField::Message => Constraint::Min(4),
            _ => Constraint::Length(3),
        })
        .collect();
    constraints.push(Constraint::Length(2));
    let rows = Layout::vertical(constraints).split(inner);

    for (i, field) in ContactField::all().iter().enumerate() {
        let focused = app.contact_cursor == i;
        let editing = app.editing == Some(EditTarget::Contact(*field));
        let border = if editing {
            Style::default().fg(theme.accent)
        } else if focused {
            Style::default().fg(theme.active)
        } else {
            theme.border_style()
        };
        let title = if field.required() {
            format!(" {} * ", field.label())
        } else {
            format!(" {} ", field.label())
        };
        let mut value = app.contact.field(*field).to_string();
        if editing {
            value.push('\u{2588}');
        }
        let p = Paragraph::new(Text::styled(value, Style::default().fg(theme.text)))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(title),
            );
        f.render_widget(p, rows[i]);
    }

    let send_focused = app.contact_cursor == ContactField::all().len();
    let button = if app.contact_sending {
        Span::styled(
            format!("[ {} Sending... ]", spinner_char(app.tick)),
            Style::default().fg(theme.dim),
        )
    } else if send_focused {
        Span::styled("[ Send Message ]", theme.header_style())
    } else {
        Span::styled("[ Send Message ]", Style::default().fg(theme.active))
    };
    let last = rows.len() - 1;
    f.render_widget(
        Paragraph::new(vec![Line::from(""), Line::from(vec![Span::raw(" "), button])]),
        rows[last],
    );
}

fn render_info(f: &mut Frame, area: Rect, theme: &Theme) {
    let width = area.width.saturating_sub(6) as usize;
    let label = Style::default()
        .fg(theme.text)
        .add_modifier(Modifier::BOLD);
    let value = Style::default().fg(theme.dim);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Email", label)),
        Line::from(Span::styled(
            format!("  {}", truncate("support@misinformationguard.com", width)),
            value,
        )),
        Line::from(""),
        Line::from(Span::styled("  Response Time", label)),
        Line::from(Span::styled("  Within 24 hours", value)),
        Line::from(""),
        Line::from(Span::styled("  Fields marked * are required.", value)),
    ];
    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(Span::styled(" Get in Touch ", theme.title_style())),
    );
    f.render_widget(p, area);
}
