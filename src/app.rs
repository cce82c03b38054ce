use crate::bank::{get_question_files, load_question_bank};
use crate::clock::Clock;
use crate::config::AppConfig;
use crate::decode::decode_to_file;
use crate::error::{ExamError, Result};
use crate::export::{export_config, export_results};
use crate::logger;
use crate::machine::{Command, ExamMachine, Phase, Transition};
use crate::models::{AppState, SetupSettings};
use crate::timer::TimerEvent;
use crate::topics::TopicChecklist;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupFocus {
    Files,
    Topics,
    Settings,
}

impl SetupFocus {
    pub fn next(self) -> Self {
        match self {
            SetupFocus::Files => SetupFocus::Topics,
            SetupFocus::Topics => SetupFocus::Settings,
            SetupFocus::Settings => SetupFocus::Files,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Everything the terminal front end needs; the exam itself lives in
/// `machine`.
#[derive(Debug)]
pub struct App {
    pub config: AppConfig,
    pub machine: ExamMachine,
    pub settings: SetupSettings,
    pub topics: TopicChecklist,
    pub question_files: Vec<PathBuf>,
    pub selected_file_index: usize,
    pub focus: SetupFocus,
    pub topic_cursor: usize,
    /// 0 = question count, 1 = time limit.
    pub settings_cursor: usize,
    pub decode_open: bool,
    pub decode_buffer: String,
    pub review_scroll: u16,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, tick_tx: Option<UnboundedSender<TimerEvent>>) -> Self {
        Self::with_clock(config, Clock::default(), tick_tx)
    }

    pub fn with_clock(
        config: AppConfig,
        clock: Clock,
        tick_tx: Option<UnboundedSender<TimerEvent>>,
    ) -> Self {
        let mut app = Self {
            machine: ExamMachine::new(clock, tick_tx),
            settings: SetupSettings::default(),
            topics: TopicChecklist::default(),
            question_files: Vec::new(),
            selected_file_index: 0,
            focus: SetupFocus::Files,
            topic_cursor: 0,
            settings_cursor: 0,
            decode_open: false,
            decode_buffer: String::new(),
            review_scroll: 0,
            status: None,
            should_quit: false,
            config,
        };
        app.refresh_question_files();
        app
    }

    pub fn state(&self) -> AppState {
        match self.machine.phase() {
            Phase::Setup if self.decode_open => AppState::Decode,
            Phase::Setup => AppState::Setup,
            Phase::InProgress(_) => AppState::Exam,
            Phase::Graded { .. } => AppState::Results,
        }
    }

    /// Rescans the questions directory; a CLI-supplied bank is listed first.
    pub fn refresh_question_files(&mut self) {
        let mut files = get_question_files(&self.config.questions_dir);
        if let Some(initial) = &self.config.initial_bank
            && !files.contains(initial)
        {
            files.insert(0, initial.clone());
        }
        self.question_files = files;
        self.selected_file_index = self
            .selected_file_index
            .min(self.question_files.len().saturating_sub(1));
    }

    pub fn selected_file(&self) -> Option<&PathBuf> {
        self.question_files.get(self.selected_file_index)
    }

    pub fn start_selected_exam(&mut self) {
        let result = self.try_start();
        self.report_result(result);
    }

    fn try_start(&mut self) -> Result<String> {
        let path = self.selected_file().cloned().ok_or(ExamError::NoQuestionFile)?;
        let bank = load_question_bank(&path).inspect_err(|e| {
            logger::log(&format!("Failed to load {}: {}", path.display(), e));
        })?;
        match self.machine.dispatch(Command::Start(bank))? {
            Transition::Started { questions, .. } => {
                self.review_scroll = 0;
                Ok(format!("Exam started with {} questions", questions))
            }
            _ => Ok(String::new()),
        }
    }

    /// Selects the highlighted option of the current question.
    pub fn select_highlighted(&mut self) {
        let Some(session) = self.machine.session() else {
            return;
        };
        let (question, option) = (session.current_index, session.highlighted_option);
        self.select(question, option);
    }

    pub fn select(&mut self, question: usize, option: usize) {
        let result = self
            .machine
            .dispatch(Command::Select { question, option })
            .map(|_| {
                if let Some(session) = self.machine.session_mut() {
                    session.highlighted_option = option;
                }
                String::new()
            });
        self.report_result(result);
    }

    pub fn clear_current(&mut self) {
        let Some(question) = self.machine.session().map(|s| s.current_index) else {
            return;
        };
        let result = self
            .machine
            .dispatch(Command::Clear { question })
            .map(|_| String::new());
        self.report_result(result);
    }

    pub fn submit(&mut self) {
        let result = self.machine.dispatch(Command::Submit).map(|t| match t {
            Transition::Submitted => self.score_line(),
            _ => String::new(),
        });
        self.report_result(result);
    }

    pub fn handle_timer_event(&mut self, event: TimerEvent) {
        let TimerEvent::Tick { session_id } = event;
        let result = self
            .machine
            .dispatch(Command::Tick { session_id })
            .map(|t| match t {
                Transition::Expired => format!("Time is up! {}", self.score_line()),
                _ => String::new(),
            });
        self.report_result(result);
    }

    pub fn restart(&mut self) {
        let result = self
            .machine
            .dispatch(Command::Restart)
            .map(|_| "Ready for a new exam".to_string());
        self.review_scroll = 0;
        self.refresh_question_files();
        self.report_result(result);
    }

    pub fn export_results(&mut self) {
        let result = export_results(self.machine.report(), &self.config.export_dir)
            .map(|path| format!("Saved {}", path.display()));
        self.report_result(result);
    }

    pub fn export_config(&mut self) {
        self.settings.topics = self.topics.selected_labels();
        let result = export_config(&self.settings, &self.config.export_dir)
            .map(|path| format!("Saved {}", path.display()));
        self.report_result(result);
    }

    pub fn open_decoder(&mut self) {
        self.decode_open = true;
        self.status = None;
    }

    pub fn close_decoder(&mut self) {
        self.decode_open = false;
    }

    pub fn paste(&mut self, text: &str) {
        if self.decode_open {
            self.decode_buffer.push_str(text);
        }
    }

    /// Decoded banks land in the questions directory so they can be picked
    /// straight away.
    pub fn decode_bundle(&mut self) {
        let result = decode_to_file(&self.decode_buffer, &self.config.questions_dir);
        match result {
            Ok(path) => {
                self.decode_buffer.clear();
                self.decode_open = false;
                self.refresh_question_files();
                if let Some(idx) = self.question_files.iter().position(|p| *p == path) {
                    self.selected_file_index = idx;
                }
                self.report_result(Ok(format!("✅ {} saved", path.display())));
            }
            Err(e) => self.report_result(Err(e)),
        }
    }

    pub fn toggle_topic(&mut self) {
        self.topics.toggle(self.topic_cursor);
        self.settings.topics = self.topics.selected_labels();
    }

    /// Adjusts the focused setting by `delta`; the question count also
    /// rescales the time limit.
    pub fn adjust_setting(&mut self, delta: i64) {
        if self.settings_cursor == 0 {
            let count = (self.settings.num_questions as i64 + delta).max(1) as usize;
            self.settings.set_num_questions(count);
        } else {
            let minutes = (self.settings.time_limit as i64 + delta).max(1) as u64;
            self.settings.set_time_limit(minutes);
        }
    }

    fn score_line(&self) -> String {
        self.machine
            .report()
            .map(|r| {
                format!(
                    "Overall Score: {:.1}% ({}/{})",
                    r.overall_score_percent, r.total_correct, r.total_questions
                )
            })
            .unwrap_or_default()
    }

    fn report_result(&mut self, result: Result<String>) {
        match result {
            Ok(text) if text.is_empty() => {}
            Ok(text) => {
                self.status = Some(StatusMessage {
                    text,
                    is_error: false,
                })
            }
            Err(e) => {
                logger::log(&format!("Error: {}", e));
                self.status = Some(StatusMessage {
                    text: e.to_string(),
                    is_error: true,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::fixed_clock;
    use std::fs;

    const BANK: &str = r#"{
        "exam": { "num_questions": 3, "time_limit": 1 },
        "questions": [
            { "topic": "LT", "question": "Q1", "options": ["A", "B", "C"], "answer": "A" },
            { "topic": "SS", "question": "Q2", "options": ["A", "B", "C"], "answer": "B" },
            { "topic": "LT", "question": "Q3", "options": ["A", "B", "C"], "answer": "C" }
        ]
    }"#;

    fn app_with_bank(dir: &tempfile::TempDir, content: &str) -> App {
        let questions_dir = dir.path().join("questions");
        fs::create_dir_all(&questions_dir).unwrap();
        fs::write(questions_dir.join("leed.json"), content).unwrap();
        let config = AppConfig {
            questions_dir,
            export_dir: dir.path().join("out"),
            log_file: dir.path().join("exam.log"),
            initial_bank: None,
        };
        App::with_clock(config, fixed_clock(), None)
    }

    #[test]
    fn test_start_from_selected_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_bank(&dir, BANK);
        assert_eq!(app.state(), AppState::Setup);

        app.start_selected_exam();
        assert_eq!(app.state(), AppState::Exam);
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "Exam started with 3 questions"
        );
    }

    #[test]
    fn test_invalid_file_stays_in_setup() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_bank(&dir, r#"{ "questions": [] }"#);
        app.start_selected_exam();

        assert_eq!(app.state(), AppState::Setup);
        let status = app.status.unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("'exam' and 'questions'"));
    }

    #[test]
    fn test_start_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            questions_dir: dir.path().join("missing"),
            ..AppConfig::default()
        };
        let mut app = App::with_clock(config, fixed_clock(), None);
        app.start_selected_exam();
        assert_eq!(app.state(), AppState::Setup);
        assert_eq!(app.status.unwrap().text, "Select a question file first!");
    }

    #[test]
    fn test_full_flow_with_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_bank(&dir, BANK);

        app.export_results();
        assert!(app.status.as_ref().unwrap().is_error);
        assert!(!dir.path().join("out").join("results.json").exists());

        app.start_selected_exam();
        app.select(0, 0);
        app.select(1, 1);
        app.submit();
        assert_eq!(app.state(), AppState::Results);
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "Overall Score: 66.7% (2/3)"
        );

        app.export_results();
        assert!(!app.status.as_ref().unwrap().is_error);
        assert!(dir.path().join("out").join("results.json").exists());
    }

    #[test]
    fn test_timer_expiry_moves_to_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_bank(&dir, BANK);
        app.start_selected_exam();
        let id = app.machine.session().unwrap().id();

        for _ in 0..60 {
            app.handle_timer_event(TimerEvent::Tick { session_id: id });
        }
        assert_eq!(app.state(), AppState::Results);
        assert!(app.status.as_ref().unwrap().text.starts_with("Time is up!"));
    }

    #[test]
    fn test_restart_returns_to_setup_with_clean_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_bank(&dir, BANK);
        app.start_selected_exam();
        app.select(0, 2);
        app.submit();

        app.restart();
        assert_eq!(app.state(), AppState::Setup);
        assert!(app.machine.report().is_none());

        app.start_selected_exam();
        assert_eq!(app.machine.session().unwrap().answered_count(), 0);
    }

    #[test]
    fn test_export_config_uses_checked_topics() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_bank(&dir, BANK);
        app.topic_cursor = 3;
        app.toggle_topic();
        app.settings_cursor = 0;
        app.adjust_setting(-40);
        app.export_config();

        let content = fs::read_to_string(dir.path().join("out").join("config.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["num_questions"], 10);
        assert_eq!(value["time_limit"], 12);
        assert_eq!(value["topics"][0], "Synergies & Trade-offs (ST)");
    }

    #[test]
    fn test_decode_bundle_selects_new_file() {
        use base64::Engine;
        use base64::engine::general_purpose::STANDARD;

        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_bank(&dir, BANK);
        assert_ne!(app.config.questions_dir, app.config.export_dir);
        app.open_decoder();
        assert_eq!(app.state(), AppState::Decode);

        app.paste("-----BEGIN QUESTIONS-----\n");
        app.paste(&STANDARD.encode(BANK));
        app.paste("\n-----END QUESTIONS-----");
        app.decode_bundle();

        assert_eq!(app.state(), AppState::Setup);
        assert!(app.decode_buffer.is_empty());
        assert_eq!(
            app.selected_file().unwrap(),
            &dir.path().join("questions").join("questions.json")
        );
        assert_eq!(app.question_files.len(), 2);

        app.start_selected_exam();
        assert_eq!(app.state(), AppState::Exam);
    }

    #[test]
    fn test_second_decode_keeps_first_bank() {
        use base64::Engine;
        use base64::engine::general_purpose::STANDARD;

        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_bank(&dir, BANK);
        for _ in 0..2 {
            app.open_decoder();
            app.paste(&STANDARD.encode(BANK));
            app.decode_bundle();
        }

        let status = app.status.as_ref().unwrap();
        assert!(!status.is_error);
        assert!(status.text.contains("questions-1.json"));
        assert_eq!(
            app.selected_file().unwrap(),
            &dir.path().join("questions").join("questions-1.json")
        );
        assert_eq!(app.question_files.len(), 3);
    }

    #[test]
    fn test_decode_failure_keeps_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_bank(&dir, BANK);
        app.open_decoder();
        app.paste("@@@");
        app.decode_bundle();

        assert_eq!(app.state(), AppState::Decode);
        assert_eq!(app.decode_buffer, "@@@");
        assert!(app.status.unwrap().is_error);
    }
}
