use crate::error::{ExamError, Result};
use crate::models::{ExamConfig, Question, QuestionBank};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Both sections are optional here so a missing one can be reported as such
/// instead of as a generic serde error.
#[derive(Deserialize)]
struct RawBank {
    exam: Option<ExamConfig>,
    questions: Option<Vec<Question>>,
}

pub fn get_question_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            if let Some(ext) = entry.path().extension()
                && ext == "json"
            {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    files
}

pub fn load_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = fs::read_to_string(path)?;
    parse_question_bank(&content)
}

/// A leading byte order mark is skipped, as editors on Windows often write one.
pub fn parse_question_bank(content: &str) -> Result<QuestionBank> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let raw: RawBank = serde_json::from_str(content)?;

    let (Some(exam), Some(questions)) = (raw.exam, raw.questions) else {
        return Err(ExamError::MissingSections);
    };

    if questions.is_empty() {
        return Err(ExamError::EmptyQuestionBank);
    }
    if exam.num_questions == 0 {
        return Err(ExamError::InvalidExamConfig(
            "num_questions must be at least 1".to_string(),
        ));
    }
    if exam.time_limit == 0 {
        return Err(ExamError::InvalidExamConfig(
            "time_limit must be at least 1 minute".to_string(),
        ));
    }

    Ok(QuestionBank { exam, questions })
}
