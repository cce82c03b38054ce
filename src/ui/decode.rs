use crate::app::StatusMessage;
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw_decode_popup(f: &mut Frame, buffer: &str, status: Option<&StatusMessage>) {
    let area = centered_rect(80, 70, f.area());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let body = if buffer.is_empty() {
        Paragraph::new("[Paste Base64 here, armor lines are fine...]").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Paragraph::new(buffer)
    };
    let lines = buffer.lines().count() as u16;
    let visible = chunks[0].height.saturating_sub(2);
    f.render_widget(
        body.wrap(Wrap { trim: false })
            .scroll((lines.saturating_sub(visible), 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Decode questions.json")
                    .border_style(Style::default().fg(Color::Cyan)),
            ),
        chunks[0],
    );

    if let Some(status) = status {
        f.render_widget(
            Paragraph::new(status.text.as_str()).style(if status.is_error {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            }),
            chunks[1],
        );
    }

    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Ctrl+S", key),
            Span::from(" Decode & Save  "),
            Span::styled("Ctrl+U", key),
            Span::from(" Clear  "),
            Span::styled("Esc", key),
            Span::from(" Back"),
        ])),
        chunks[2],
    );
}
