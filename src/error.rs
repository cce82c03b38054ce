use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExamError {
    #[error("Invalid format. The file must contain 'exam' and 'questions' sections.")]
    MissingSections,
    #[error("The question bank contains no questions.")]
    EmptyQuestionBank,
    #[error("Invalid exam parameters: {0}")]
    InvalidExamConfig(String),
    #[error("Invalid questions.json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Select a question file first!")]
    NoQuestionFile,
    #[error("Paste Base64 first!")]
    EmptyBundle,
    #[error("Decoding failed: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("Decoding failed: {0}")]
    InvalidBundle(String),
    #[error("No results to download yet.")]
    NoResults,
    #[error("Question {0} does not exist")]
    QuestionOutOfRange(usize),
    #[error("Question {question} has no option {option}")]
    OptionOutOfRange { question: usize, option: usize },
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExamError>;
