use crate::app::StatusMessage;
use crate::grader::GradeReport;
use crate::session::ExamSession;
use crate::ui::layout::calculate_results_chunks;
use crate::ui::{draw_help, draw_status};
use crate::utils::{calculate_max_scroll, estimate_text_height, format_report_time, truncate_string};
use ratatui::{
    layout::{Alignment, Constraint},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Every question with all its options: the correct one always marked, a
/// wrong pick flagged on its own line.
pub fn build_review(session: &ExamSession, report: &GradeReport) -> Text<'static> {
    let mut text = Text::default();

    for (item, question) in report.questions.iter().zip(session.questions()) {
        let (badge, badge_color) = if item.is_correct {
            ("Correct", Color::Green)
        } else {
            ("Incorrect", Color::Red)
        };
        text.push_line(Line::from(vec![
            Span::styled(
                format!("{}. {}", item.index, item.question),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::from("  "),
            Span::styled(
                format!("[{}]", badge),
                Style::default()
                    .fg(badge_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        text.push_line(Line::from(Span::styled(
            format!("   Topic: {}", item.topic),
            Style::default().fg(Color::DarkGray),
        )));

        let user_answer = item.user_answer.as_deref();
        for option in &question.options {
            let is_answer = *option == item.correct_answer;
            let is_pick = user_answer == Some(option.as_str());
            let line = if is_answer {
                let tag = if is_pick { " (correct, your choice)" } else { " (correct)" };
                Line::from(Span::styled(
                    format!("   ✓ {}{}", option, tag),
                    Style::default().fg(Color::Green),
                ))
            } else if is_pick {
                Line::from(Span::styled(
                    format!("   ✗ {} (your choice, incorrect)", option),
                    Style::default().fg(Color::Red),
                ))
            } else {
                Line::from(format!("     {}", option))
            };
            text.push_line(line);
        }

        text.push_line(Line::from(format!(
            "   Your answer: {}",
            user_answer.unwrap_or("None selected")
        )));
        text.push_line(Line::from(format!(
            "   Correct answer: {}",
            item.correct_answer
        )));
        text.push_line(Line::from(""));
    }

    text
}

pub fn draw_results(
    f: &mut Frame,
    session: &ExamSession,
    report: &GradeReport,
    status: Option<&StatusMessage>,
    review_scroll: &mut u16,
) {
    let layout = calculate_results_chunks(f.area());

    let score = Paragraph::new(format!(
        "Overall Score: {:.1}% ({}/{})  ·  {}",
        report.overall_score_percent,
        report.total_correct,
        report.total_questions,
        format_report_time(&report.timestamp)
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Results"));
    f.render_widget(score, layout.header_area);

    let topic_width = layout.breakdown_area.width.saturating_sub(34).max(10) as usize;
    let rows: Vec<Row> = report
        .category_breakdown
        .iter()
        .map(|(topic, stats)| {
            Row::new(vec![
                Cell::from(truncate_string(topic, topic_width)),
                Cell::from(stats.correct.to_string()),
                Cell::from(stats.total.to_string()),
                Cell::from(format!("{:.1}%", stats.accuracy_percent())),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new(vec!["Category", "Correct", "Total", "Accuracy"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(Block::default().borders(Borders::ALL).title("Breakdown"));
    f.render_widget(table, layout.breakdown_area);

    let review = build_review(session, report);
    let visible_height = layout.review_area.height.saturating_sub(2) as usize;
    let text_width = layout.review_area.width.saturating_sub(2) as usize;
    let max_scroll = calculate_max_scroll(estimate_text_height(&review, text_width), visible_height);
    *review_scroll = (*review_scroll).min(max_scroll);

    f.render_widget(
        Paragraph::new(review)
            .wrap(Wrap { trim: false })
            .scroll((*review_scroll, 0))
            .block(Block::default().borders(Borders::ALL).title("Review")),
        layout.review_area,
    );

    draw_status(f, status, layout.status_area);
    draw_help(
        f,
        &[
            ("↑/↓", "Scroll"),
            ("e", "Save results.json"),
            ("r", "Restart"),
            ("q", "Quit"),
        ],
        layout.help_area,
    );
}
