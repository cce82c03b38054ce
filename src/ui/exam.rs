use crate::app::StatusMessage;
use crate::session::ExamSession;
use crate::timer::Band;
use crate::ui::layout::calculate_exam_chunks;
use crate::ui::{draw_help, draw_status};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn band_color(band: Band) -> Color {
    match band {
        Band::Calm => Color::Rgb(0x2e, 0xcc, 0x71),
        Band::Caution => Color::Rgb(0xf1, 0xc4, 0x0f),
        Band::Warning => Color::Rgb(0xe6, 0x7e, 0x22),
        Band::Critical => Color::Rgb(0xe7, 0x4c, 0x3c),
    }
}

/// Critical time flashes by swapping foreground and background every second.
pub fn timer_style(band: Band, remaining_secs: u64) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    if band.pulsing() && remaining_secs % 2 == 1 {
        base.fg(band_color(band)).bg(Color::Black)
    } else {
        base.fg(Color::Black).bg(band_color(band))
    }
}

pub fn draw_exam(f: &mut Frame, session: &ExamSession, status: Option<&StatusMessage>) {
    let layout = calculate_exam_chunks(f.area());
    let total = session.questions().len();

    let header = Paragraph::new(format!(
        "Question {} / {}  ·  Answered {} / {}",
        session.current_index + 1,
        total,
        session.answered_count(),
        total
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let countdown = session.countdown();
    let timer = Paragraph::new(countdown.display())
        .style(timer_style(countdown.band(), countdown.remaining_secs()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(timer, layout.timer_area);

    let Some(question) = session.current_question() else {
        return;
    };

    let question_text = Text::from(vec![
        Line::from(Span::styled(
            format!("{}. {}", session.current_index + 1, question.question),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            question.topic.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    f.render_widget(
        Paragraph::new(question_text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Question")),
        layout.question_area,
    );

    let selected = session.selected_option(session.current_index);
    let option_lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let radio = if selected == Some(i) { "(•)" } else { "( )" };
            let style = if i == session.highlighted_option {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{} {} {}", i + 1, radio, option), style))
        })
        .collect();
    f.render_widget(
        Paragraph::new(option_lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Options")),
        layout.options_area,
    );

    draw_status(f, status, layout.status_area);
    draw_help(
        f,
        &[
            ("↑/↓", "Highlight"),
            ("Enter/1-9", "Select"),
            ("←/→", "Question"),
            ("Backspace", "Clear"),
            ("s", "Submit"),
            ("Ctrl+C", "Exit"),
        ],
        layout.help_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_colors_are_distinct() {
        let colors = [Band::Calm, Band::Caution, Band::Warning, Band::Critical].map(band_color);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_only_critical_flashes() {
        assert_eq!(
            timer_style(Band::Warning, 200),
            timer_style(Band::Warning, 201)
        );
        assert_ne!(
            timer_style(Band::Critical, 100),
            timer_style(Band::Critical, 101)
        );
    }
}
