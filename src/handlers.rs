use crate::app::{App, SetupFocus};
use crate::models::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.state() {
        AppState::Setup => handle_setup_input(app, key),
        AppState::Decode => handle_decode_input(app, key),
        AppState::Exam => handle_exam_input(app, key),
        AppState::Results => handle_results_input(app, key),
    }
}

pub fn handle_setup_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::Char('s') => app.start_selected_exam(),
        KeyCode::Char('c') => app.export_config(),
        KeyCode::Char('d') => app.open_decoder(),
        KeyCode::Char('r') => app.refresh_question_files(),
        KeyCode::Up => match app.focus {
            SetupFocus::Files => {
                app.selected_file_index = app.selected_file_index.saturating_sub(1);
            }
            SetupFocus::Topics => app.topic_cursor = app.topic_cursor.saturating_sub(1),
            SetupFocus::Settings => app.settings_cursor = 0,
        },
        KeyCode::Down => match app.focus {
            SetupFocus::Files => {
                if app.selected_file_index < app.question_files.len().saturating_sub(1) {
                    app.selected_file_index += 1;
                }
            }
            SetupFocus::Topics => {
                if app.topic_cursor < app.topics.len().saturating_sub(1) {
                    app.topic_cursor += 1;
                }
            }
            SetupFocus::Settings => app.settings_cursor = 1,
        },
        KeyCode::Left if app.focus == SetupFocus::Settings => app.adjust_setting(-1),
        KeyCode::Right if app.focus == SetupFocus::Settings => app.adjust_setting(1),
        KeyCode::Char(' ') if app.focus == SetupFocus::Topics => app.toggle_topic(),
        KeyCode::Enter => match app.focus {
            SetupFocus::Files => app.start_selected_exam(),
            SetupFocus::Topics => app.toggle_topic(),
            SetupFocus::Settings => {}
        },
        _ => {}
    }
}

pub fn handle_decode_input(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.close_decoder(),
        KeyCode::Char('s') if ctrl => app.decode_bundle(),
        KeyCode::Char('u') if ctrl => app.decode_buffer.clear(),
        KeyCode::Enter => app.decode_buffer.push('\n'),
        KeyCode::Backspace => {
            app.decode_buffer.pop();
        }
        KeyCode::Char(c) if !ctrl => app.decode_buffer.push(c),
        _ => {}
    }
}

pub fn handle_exam_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(session) = app.machine.session_mut() {
                session.highlight_previous();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(session) = app.machine.session_mut() {
                session.highlight_next();
            }
        }
        KeyCode::Right | KeyCode::Char('n') => {
            if let Some(session) = app.machine.session_mut() {
                session.next_question();
            }
        }
        KeyCode::Left | KeyCode::Char('p') => {
            if let Some(session) = app.machine.session_mut() {
                session.previous_question();
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.select_highlighted(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(question) = app.machine.session().map(|s| s.current_index) {
                let option = c as usize - '1' as usize;
                app.select(question, option);
            }
        }
        KeyCode::Backspace | KeyCode::Delete => app.clear_current(),
        KeyCode::Char('s') => app.submit(),
        _ => {}
    }
}

pub fn handle_results_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('e') => app.export_results(),
        KeyCode::Char('r') => app.restart(),
        KeyCode::Up => app.review_scroll = app.review_scroll.saturating_sub(1),
        KeyCode::Down => app.review_scroll = app.review_scroll.saturating_add(1),
        KeyCode::PageUp => app.review_scroll = app.review_scroll.saturating_sub(10),
        KeyCode::PageDown => app.review_scroll = app.review_scroll.saturating_add(10),
        _ => {}
    }
}
