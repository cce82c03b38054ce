use crate::error::{ExamError, Result};
use crate::models::{Question, QuestionBank};
use crate::timer::{Countdown, TickOutcome, Ticker};

/// One exam attempt: the selected questions, one optional pick per question
/// and the countdown. Owns its ticker; dropping the session cancels it.
#[derive(Debug)]
pub struct ExamSession {
    id: u64,
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    countdown: Countdown,
    ticker: Option<Ticker>,
    pub current_index: usize,
    pub highlighted_option: usize,
}

impl ExamSession {
    pub fn new(id: u64, bank: &QuestionBank) -> Self {
        let questions = bank.selected().to_vec();
        let answers = vec![None; questions.len()];
        Self {
            id,
            questions,
            answers,
            countdown: Countdown::from_minutes(bank.exam.time_limit),
            ticker: None,
            current_index: 0,
            highlighted_option: 0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Picks option `option` for question `question`, replacing any earlier pick.
    pub fn select(&mut self, question: usize, option: usize) -> Result<()> {
        let q = self
            .questions
            .get(question)
            .ok_or(ExamError::QuestionOutOfRange(question))?;
        if option >= q.options.len() {
            return Err(ExamError::OptionOutOfRange { question, option });
        }
        self.answers[question] = Some(option);
        Ok(())
    }

    pub fn clear(&mut self, question: usize) -> Result<()> {
        let slot = self
            .answers
            .get_mut(question)
            .ok_or(ExamError::QuestionOutOfRange(question))?;
        *slot = None;
        Ok(())
    }

    pub fn selected_option(&self, question: usize) -> Option<usize> {
        self.answers.get(question).copied().flatten()
    }

    /// Text of the picked option, if any.
    pub fn selected_answer(&self, question: usize) -> Option<&str> {
        let option = self.selected_option(question)?;
        self.questions
            .get(question)
            .and_then(|q| q.options.get(option))
            .map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Ticks addressed to another session are ignored.
    pub fn tick(&mut self, session_id: u64) -> TickOutcome {
        if session_id != self.id {
            return TickOutcome::Stopped;
        }
        self.countdown.tick()
    }

    /// Replaces any previous ticker; the old one is cancelled first.
    pub fn attach_ticker(&mut self, ticker: Ticker) {
        if let Some(old) = self.ticker.take() {
            old.cancel();
        }
        self.ticker = Some(ticker);
    }

    pub fn has_live_ticker(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stops the countdown for good and cancels the ticker.
    pub fn stop_clock(&mut self) {
        self.countdown.stop();
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    pub fn next_question(&mut self) {
        if self.current_index < self.questions.len().saturating_sub(1) {
            self.current_index += 1;
            self.sync_highlight();
        }
    }

    pub fn previous_question(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
            self.sync_highlight();
        }
    }

    pub fn highlight_next(&mut self) {
        let len = self.current_question().map_or(0, |q| q.options.len());
        if self.highlighted_option < len.saturating_sub(1) {
            self.highlighted_option += 1;
        }
    }

    pub fn highlight_previous(&mut self) {
        self.highlighted_option = self.highlighted_option.saturating_sub(1);
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Moves the highlight onto the current pick, or the first option.
    fn sync_highlight(&mut self) {
        self.highlighted_option = self.selected_option(self.current_index).unwrap_or(0);
    }
}
