use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub topic: String,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// Exam parameters carried by the `exam` section of a question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamConfig {
    pub num_questions: usize,
    /// Minutes.
    pub time_limit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub exam: ExamConfig,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// The questions an exam will actually use: the first `num_questions`,
    /// clamped to the bank length. Never padded.
    pub fn selected(&self) -> &[Question] {
        let n = self.exam.num_questions.min(self.questions.len());
        &self.questions[..n]
    }
}

/// Setup screen inputs, exported as `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupSettings {
    pub num_questions: usize,
    pub time_limit: u64,
    pub topics: Vec<String>,
}

impl Default for SetupSettings {
    fn default() -> Self {
        let num_questions = 50;
        Self {
            num_questions,
            time_limit: scaled_time_limit(num_questions),
            topics: Vec::new(),
        }
    }
}

impl SetupSettings {
    /// Changing the question count rescales the time limit.
    pub fn set_num_questions(&mut self, num_questions: usize) {
        self.num_questions = num_questions.max(1);
        self.time_limit = scaled_time_limit(self.num_questions);
    }

    pub fn set_time_limit(&mut self, minutes: u64) {
        self.time_limit = minutes.max(1);
    }
}

/// 1.2 minutes per question, rounded, at least one minute.
pub fn scaled_time_limit(num_questions: usize) -> u64 {
    ((num_questions as f64 * 1.2).round() as u64).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Setup,
    Exam,
    Results,
    Decode,
}
