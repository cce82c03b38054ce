pub mod app;
pub mod bank;
pub mod clock;
pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod grader;
pub mod handlers;
pub mod logger;
pub mod machine;
pub mod models;
pub mod session;
pub mod timer;
pub mod topics;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use app::App;
pub use bank::{get_question_files, load_question_bank, parse_question_bank};
pub use config::AppConfig;
pub use decode::{decode_bundle, decode_to_file};
pub use error::{ExamError, Result};
pub use export::{export_config, export_results};
pub use grader::{grade, grade_session, GradeReport, TopicScore};
pub use handlers::handle_key;
pub use machine::{Command, ExamMachine, Phase, Transition};
pub use models::{AppState, ExamConfig, Question, QuestionBank, SetupSettings};
pub use session::ExamSession;
pub use timer::{Band, Countdown, TimerEvent};
pub use ui::draw;
