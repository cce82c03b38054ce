use crate::app::{App, SetupFocus};
use crate::topics::TOPIC_GROUPS;
use crate::ui::layout::calculate_setup_chunks;
use crate::ui::{draw_help, draw_status};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
}

fn cursor_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn draw_setup(f: &mut Frame, app: &App) {
    let layout = calculate_setup_chunks(f.area());

    let title = Paragraph::new("LEED Exam Simulator")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let files_focused = app.focus == SetupFocus::Files;
    let file_items: Vec<ListItem> = if app.question_files.is_empty() {
        vec![ListItem::new(format!(
            "No question files in {}",
            app.config.questions_dir.display()
        ))
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        app.question_files
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                ListItem::new(name)
                    .style(cursor_style(i == app.selected_file_index && files_focused))
            })
            .collect()
    };
    let mut file_state = ListState::default().with_selected(Some(app.selected_file_index));
    f.render_stateful_widget(
        List::new(file_items).block(panel_block("[Tab] Question Files", files_focused)),
        layout.files_area,
        &mut file_state,
    );

    let settings_focused = app.focus == SetupFocus::Settings;
    let settings_lines = vec![
        Line::from(Span::styled(
            format!("Number of questions: ◀ {} ▶", app.settings.num_questions),
            cursor_style(settings_focused && app.settings_cursor == 0),
        )),
        Line::from(Span::styled(
            format!("Time limit (minutes): ◀ {} ▶", app.settings.time_limit),
            cursor_style(settings_focused && app.settings_cursor == 1),
        )),
    ];
    f.render_widget(
        Paragraph::new(settings_lines).block(panel_block("Settings", settings_focused)),
        layout.settings_area,
    );

    let topics_focused = app.focus == SetupFocus::Topics;
    let mut topic_items = Vec::new();
    let mut cursor_row = 0;
    let mut index = 0;
    for group in TOPIC_GROUPS {
        topic_items.push(
            ListItem::new(group.name).style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        );
        for topic in group.topics {
            if index == app.topic_cursor {
                cursor_row = topic_items.len();
            }
            let mark = if app.topics.is_checked(index) { "[x]" } else { "[ ]" };
            topic_items.push(
                ListItem::new(format!("  {} {}", mark, topic))
                    .style(cursor_style(topics_focused && index == app.topic_cursor)),
            );
            index += 1;
        }
    }
    // Group headings take rows too, so the cursor row is offset from the index.
    let mut topic_state = ListState::default().with_selected(Some(cursor_row));
    f.render_stateful_widget(
        List::new(topic_items).block(panel_block("Topics", topics_focused)),
        layout.topics_area,
        &mut topic_state,
    );

    draw_status(f, app.status.as_ref(), layout.status_area);
    draw_help(
        f,
        &[
            ("Tab", "Focus"),
            ("↑/↓", "Navigate"),
            ("Space", "Toggle"),
            ("←/→", "Adjust"),
            ("Enter/s", "Start Exam"),
            ("c", "Save Config"),
            ("d", "Decode Bundle"),
            ("q", "Quit"),
        ],
        layout.help_area,
    );
}
