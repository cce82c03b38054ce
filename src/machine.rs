use crate::clock::Clock;
use crate::error::{ExamError, Result};
use crate::grader::{self, GradeReport};
use crate::logger;
use crate::models::QuestionBank;
use crate::session::ExamSession;
use crate::timer::{TickOutcome, Ticker, TimerEvent};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Default)]
pub enum Phase {
    #[default]
    Setup,
    InProgress(ExamSession),
    Graded {
        session: ExamSession,
        report: GradeReport,
    },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Setup => "in setup",
            Phase::InProgress(_) => "an exam is in progress",
            Phase::Graded { .. } => "showing results",
        }
    }
}

#[derive(Debug)]
pub enum Command {
    Start(QuestionBank),
    Select { question: usize, option: usize },
    Clear { question: usize },
    Submit,
    Tick { session_id: u64 },
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started { session_id: u64, questions: usize },
    Answered,
    Ticked,
    Submitted,
    Expired,
    Reset,
    /// The command had no effect (stale tick, repeated submit).
    Ignored,
}

/// Owns the exam lifecycle. Every command goes through `dispatch`; a
/// rejected command leaves the phase exactly as it was.
#[derive(Debug)]
pub struct ExamMachine {
    phase: Phase,
    next_session_id: u64,
    clock: Clock,
    tick_tx: Option<UnboundedSender<TimerEvent>>,
}

impl ExamMachine {
    /// Without a tick sender no ticker is spawned and ticks must be
    /// dispatched by hand.
    pub fn new(clock: Clock, tick_tx: Option<UnboundedSender<TimerEvent>>) -> Self {
        Self {
            phase: Phase::Setup,
            next_session_id: 1,
            clock,
            tick_tx,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn session(&self) -> Option<&ExamSession> {
        match &self.phase {
            Phase::InProgress(session) | Phase::Graded { session, .. } => Some(session),
            Phase::Setup => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut ExamSession> {
        match &mut self.phase {
            Phase::InProgress(session) | Phase::Graded { session, .. } => Some(session),
            Phase::Setup => None,
        }
    }

    pub fn report(&self) -> Option<&GradeReport> {
        match &self.phase {
            Phase::Graded { report, .. } => Some(report),
            _ => None,
        }
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Transition> {
        match command {
            Command::Start(bank) => self.start(bank),
            Command::Select { question, option } => {
                self.in_progress("select an answer")?.select(question, option)?;
                Ok(Transition::Answered)
            }
            Command::Clear { question } => {
                self.in_progress("clear an answer")?.clear(question)?;
                Ok(Transition::Answered)
            }
            Command::Submit => match self.phase {
                Phase::InProgress(_) => {
                    self.finish()?;
                    Ok(Transition::Submitted)
                }
                Phase::Graded { .. } => Ok(Transition::Ignored),
                Phase::Setup => Err(self.invalid("submit")),
            },
            Command::Tick { session_id } => self.tick(session_id),
            Command::Restart => {
                // Dropping the old phase drops the session and its ticker.
                let old = std::mem::take(&mut self.phase);
                if let Some(id) = match &old {
                    Phase::InProgress(s) | Phase::Graded { session: s, .. } => Some(s.id()),
                    Phase::Setup => None,
                } {
                    logger::log(&format!("Restart: discarding session {}", id));
                }
                drop(old);
                Ok(Transition::Reset)
            }
        }
    }

    fn start(&mut self, bank: QuestionBank) -> Result<Transition> {
        if !matches!(self.phase, Phase::Setup) {
            return Err(self.invalid("start an exam"));
        }
        if bank.questions.is_empty() {
            return Err(ExamError::EmptyQuestionBank);
        }

        let session_id = self.next_session_id;
        self.next_session_id += 1;

        let mut session = ExamSession::new(session_id, &bank);
        if let Some(tx) = &self.tick_tx {
            session.attach_ticker(Ticker::spawn(session_id, tx.clone()));
        }
        let questions = session.questions().len();
        logger::log(&format!(
            "Session {} started: {} questions, {} minutes",
            session_id, questions, bank.exam.time_limit
        ));
        self.phase = Phase::InProgress(session);
        Ok(Transition::Started {
            session_id,
            questions,
        })
    }

    fn tick(&mut self, session_id: u64) -> Result<Transition> {
        let Phase::InProgress(session) = &mut self.phase else {
            return Ok(Transition::Ignored);
        };
        match session.tick(session_id) {
            TickOutcome::Running => Ok(Transition::Ticked),
            TickOutcome::Stopped => Ok(Transition::Ignored),
            TickOutcome::Expired => {
                logger::log(&format!("Session {} expired, grading", session_id));
                self.finish()?;
                Ok(Transition::Expired)
            }
        }
    }

    /// Grades the in-progress session and moves to `Graded`.
    fn finish(&mut self) -> Result<()> {
        let Phase::InProgress(session) = &self.phase else {
            return Err(self.invalid("grade"));
        };
        let report = grader::grade_session(session, self.clock.now())?;

        if let Phase::InProgress(mut session) = std::mem::take(&mut self.phase) {
            session.stop_clock();
            logger::log(&format!(
                "Session {} graded: {}/{} ({}%)",
                session.id(),
                report.total_correct,
                report.total_questions,
                report.overall_score_percent
            ));
            self.phase = Phase::Graded { session, report };
        }
        Ok(())
    }

    fn in_progress(&mut self, action: &'static str) -> Result<&mut ExamSession> {
        let state = self.phase.name();
        match &mut self.phase {
            Phase::InProgress(session) => Ok(session),
            _ => Err(ExamError::InvalidTransition { action, state }),
        }
    }

    fn invalid(&self, action: &'static str) -> ExamError {
        ExamError::InvalidTransition {
            action,
            state: self.phase.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::fixed_clock;
    use crate::models::{ExamConfig, Question};
    use tokio::sync::mpsc;

    fn bank(num_questions: usize, time_limit: u64) -> QuestionBank {
        let q = |topic: &str, text: &str, answer: &str| Question {
            topic: topic.to_string(),
            question: text.to_string(),
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            answer: answer.to_string(),
        };
        QuestionBank {
            exam: ExamConfig {
                num_questions,
                time_limit,
            },
            questions: vec![
                q("Integrative Strategies (IS)", "Q1", "A"),
                q("Innovation (IN)", "Q2", "B"),
                q("Integrative Strategies (IS)", "Q3", "C"),
            ],
        }
    }

    fn machine() -> ExamMachine {
        ExamMachine::new(fixed_clock(), None)
    }

    fn started(num_questions: usize, time_limit: u64) -> (ExamMachine, u64) {
        let mut m = machine();
        let Transition::Started { session_id, .. } =
            m.dispatch(Command::Start(bank(num_questions, time_limit))).unwrap()
        else {
            panic!("expected Started");
        };
        (m, session_id)
    }

    #[test]
    fn test_start_moves_to_in_progress() {
        let mut m = machine();
        let t = m.dispatch(Command::Start(bank(2, 5))).unwrap();
        assert_eq!(
            t,
            Transition::Started {
                session_id: 1,
                questions: 2
            }
        );
        assert!(matches!(m.phase(), Phase::InProgress(_)));
        assert_eq!(m.session().unwrap().questions().len(), 2);
    }

    #[test]
    fn test_start_clamps_to_bank_length() {
        let (m, _) = started(50, 5);
        assert_eq!(m.session().unwrap().questions().len(), 3);
    }

    #[test]
    fn test_start_rejects_empty_bank() {
        let mut m = machine();
        let mut b = bank(1, 1);
        b.questions.clear();
        assert!(matches!(
            m.dispatch(Command::Start(b)),
            Err(ExamError::EmptyQuestionBank)
        ));
        assert!(matches!(m.phase(), Phase::Setup));
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let (mut m, id) = started(3, 5);
        m.dispatch(Command::Select {
            question: 0,
            option: 0,
        })
        .unwrap();
        assert!(m.dispatch(Command::Start(bank(3, 5))).is_err());
        let session = m.session().unwrap();
        assert_eq!(session.id(), id);
        assert_eq!(session.selected_answer(0), Some("A"));
    }

    #[test]
    fn test_commands_rejected_in_setup() {
        let mut m = machine();
        assert!(m.dispatch(Command::Submit).is_err());
        assert!(
            m.dispatch(Command::Select {
                question: 0,
                option: 0
            })
            .is_err()
        );
        assert_eq!(
            m.dispatch(Command::Tick { session_id: 1 }).unwrap(),
            Transition::Ignored
        );
        assert!(matches!(m.phase(), Phase::Setup));
    }

    #[test]
    fn test_bad_selection_leaves_state_unchanged() {
        let (mut m, _) = started(3, 5);
        m.dispatch(Command::Select {
            question: 1,
            option: 1,
        })
        .unwrap();
        assert!(
            m.dispatch(Command::Select {
                question: 1,
                option: 7
            })
            .is_err()
        );
        assert_eq!(m.session().unwrap().selected_answer(1), Some("B"));
    }

    #[test]
    fn test_manual_submit_grades() {
        let (mut m, _) = started(3, 5);
        m.dispatch(Command::Select {
            question: 0,
            option: 0,
        })
        .unwrap();
        m.dispatch(Command::Select {
            question: 1,
            option: 1,
        })
        .unwrap();

        assert_eq!(m.dispatch(Command::Submit).unwrap(), Transition::Submitted);
        let report = m.report().unwrap();
        assert_eq!(report.total_correct, 2);
        assert_eq!(report.total_questions, 3);
        assert_eq!(report.overall_score_percent, 66.7);

        let is = report
            .category_breakdown
            .get("Integrative Strategies (IS)")
            .unwrap();
        assert_eq!((is.correct, is.total), (1, 2));
        assert!(!m.session().unwrap().countdown().is_running());
    }

    #[test]
    fn test_second_submit_is_noop() {
        let (mut m, _) = started(3, 5);
        m.dispatch(Command::Submit).unwrap();
        let first = m.report().unwrap().clone();

        assert_eq!(m.dispatch(Command::Submit).unwrap(), Transition::Ignored);
        assert_eq!(m.report().unwrap(), &first);
    }

    #[test]
    fn test_answers_frozen_after_grading() {
        let (mut m, _) = started(3, 5);
        m.dispatch(Command::Submit).unwrap();
        assert!(
            m.dispatch(Command::Select {
                question: 0,
                option: 0
            })
            .is_err()
        );
        assert_eq!(m.report().unwrap().total_correct, 0);
    }

    #[test]
    fn test_expiry_grades_exactly_once_and_matches_manual_submit() {
        let answer_two = |m: &mut ExamMachine| {
            m.dispatch(Command::Select {
                question: 0,
                option: 0,
            })
            .unwrap();
            m.dispatch(Command::Select {
                question: 1,
                option: 1,
            })
            .unwrap();
        };

        let (mut timed, id) = started(3, 1);
        answer_two(&mut timed);

        let transitions: Vec<_> = (0..65)
            .map(|_| timed.dispatch(Command::Tick { session_id: id }).unwrap())
            .collect();
        let expired = transitions
            .iter()
            .filter(|t| **t == Transition::Expired)
            .count();
        assert_eq!(expired, 1);
        assert_eq!(transitions[59], Transition::Expired);
        assert!(transitions[60..].iter().all(|t| *t == Transition::Ignored));

        let (mut manual, _) = started(3, 1);
        answer_two(&mut manual);
        manual.dispatch(Command::Submit).unwrap();

        assert_eq!(timed.report().unwrap(), manual.report().unwrap());
        assert_eq!(timed.report().unwrap().total_correct, 2);
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let (mut m, id) = started(3, 1);
        assert_eq!(
            m.dispatch(Command::Tick { session_id: id + 1 }).unwrap(),
            Transition::Ignored
        );
        assert_eq!(m.session().unwrap().countdown().remaining_secs(), 60);
    }

    #[test]
    fn test_restart_clears_prior_answers() {
        let (mut m, first_id) = started(3, 5);
        m.dispatch(Command::Select {
            question: 2,
            option: 2,
        })
        .unwrap();
        m.dispatch(Command::Submit).unwrap();

        assert_eq!(m.dispatch(Command::Restart).unwrap(), Transition::Reset);
        assert!(matches!(m.phase(), Phase::Setup));
        assert!(m.report().is_none());

        m.dispatch(Command::Start(bank(3, 5))).unwrap();
        let session = m.session().unwrap();
        assert_ne!(session.id(), first_id);
        assert_eq!(session.answered_count(), 0);

        // A tick from the first session cannot touch the new one.
        assert_eq!(
            m.dispatch(Command::Tick {
                session_id: first_id
            })
            .unwrap(),
            Transition::Ignored
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_drives_expiry() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut m = ExamMachine::new(fixed_clock(), Some(tx));
        m.dispatch(Command::Start(bank(3, 1))).unwrap();
        assert!(m.session().unwrap().has_live_ticker());

        let mut expired = 0;
        while let Some(TimerEvent::Tick { session_id }) = rx.recv().await {
            if m.dispatch(Command::Tick { session_id }).unwrap() == Transition::Expired {
                expired += 1;
            }
            if matches!(m.phase(), Phase::Graded { .. }) {
                break;
            }
        }
        assert_eq!(expired, 1);
        assert!(!m.session().unwrap().has_live_ticker());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_cancels_ticker() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut m = ExamMachine::new(fixed_clock(), Some(tx));
        m.dispatch(Command::Start(bank(3, 1))).unwrap();
        assert!(rx.recv().await.is_some());

        m.dispatch(Command::Restart).unwrap();
        // The machine still holds a sender, so the channel stays open; no
        // tick may arrive within the old session's lifetime.
        let late = tokio::time::timeout(std::time::Duration::from_secs(120), rx.recv()).await;
        assert!(late.is_err());
    }
}
