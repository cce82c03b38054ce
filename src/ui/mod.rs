pub mod layout;
mod decode;
mod exam;
mod results;
mod setup;

pub use decode::draw_decode_popup;
pub use exam::{band_color, draw_exam, timer_style};
pub use layout::{calculate_exam_chunks, calculate_results_chunks, calculate_setup_chunks};
pub use results::{build_review, draw_results};
pub use setup::draw_setup;

use crate::app::{App, StatusMessage};
use crate::machine::Phase;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    match app.machine.phase() {
        Phase::Setup => {
            draw_setup(f, app);
            if app.decode_open {
                draw_decode_popup(f, &app.decode_buffer, app.status.as_ref());
            }
        }
        Phase::InProgress(session) => draw_exam(f, session, app.status.as_ref()),
        Phase::Graded { session, report } => draw_results(
            f,
            session,
            report,
            app.status.as_ref(),
            &mut app.review_scroll,
        ),
    }
}

pub(crate) fn draw_status(f: &mut Frame, status: Option<&StatusMessage>, area: Rect) {
    let Some(status) = status else {
        return;
    };
    let style = if status.is_error {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    f.render_widget(
        Paragraph::new(status.text.as_str())
            .style(style)
            .alignment(Alignment::Center),
        area,
    );
}

pub(crate) fn draw_help(f: &mut Frame, keys: &[(&str, &str)], area: Rect) {
    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::from(format!(" {}  ", label)));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}
