use crate::error::{ExamError, Result};
use crate::models::Question;
use crate::session::ExamSession;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopicScore {
    pub correct: usize,
    pub total: usize,
}

impl TopicScore {
    pub fn accuracy_percent(&self) -> f64 {
        percent(self.correct, self.total)
    }
}

/// Per-topic tallies in the order topics were first seen. Serializes as a
/// JSON object keyed by topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicBreakdown(Vec<(String, TopicScore)>);

impl TopicBreakdown {
    fn record(&mut self, topic: &str, is_correct: bool) {
        let idx = match self.0.iter().position(|(t, _)| t == topic) {
            Some(idx) => idx,
            None => {
                self.0.push((topic.to_string(), TopicScore { correct: 0, total: 0 }));
                self.0.len() - 1
            }
        };
        let score = &mut self.0[idx].1;
        score.total += 1;
        if is_correct {
            score.correct += 1;
        }
    }

    pub fn get(&self, topic: &str) -> Option<&TopicScore> {
        self.0.iter().find(|(t, _)| t == topic).map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TopicScore)> {
        self.0.iter().map(|(t, s)| (t.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TopicBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (topic, score) in &self.0 {
            map.serialize_entry(topic, score)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionResult {
    /// 1-based.
    pub index: usize,
    pub topic: String,
    pub question: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReport {
    pub overall_score_percent: f64,
    pub total_correct: usize,
    pub total_questions: usize,
    pub category_breakdown: TopicBreakdown,
    pub questions: Vec<QuestionResult>,
    pub timestamp: DateTime<Utc>,
}

impl GradeReport {
    /// Equal in everything but the timestamp.
    pub fn same_outcome(&self, other: &GradeReport) -> bool {
        self.overall_score_percent == other.overall_score_percent
            && self.total_correct == other.total_correct
            && self.total_questions == other.total_questions
            && self.category_breakdown == other.category_breakdown
            && self.questions == other.questions
    }
}

/// Rounded to one decimal place, half away from zero.
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// `answers[i]` is the picked option text for `questions[i]`; missing
/// entries count as unanswered.
pub fn grade(
    questions: &[Question],
    answers: &[Option<&str>],
    timestamp: DateTime<Utc>,
) -> Result<GradeReport> {
    if questions.is_empty() {
        return Err(ExamError::EmptyQuestionBank);
    }

    let mut total_correct = 0;
    let mut breakdown = TopicBreakdown::default();
    let mut results = Vec::with_capacity(questions.len());

    for (idx, q) in questions.iter().enumerate() {
        let user_answer = answers.get(idx).copied().flatten();
        let is_correct = user_answer == Some(q.answer.as_str());
        if is_correct {
            total_correct += 1;
        }
        breakdown.record(&q.topic, is_correct);

        results.push(QuestionResult {
            index: idx + 1,
            topic: q.topic.clone(),
            question: q.question.clone(),
            user_answer: user_answer.map(str::to_string),
            correct_answer: q.answer.clone(),
            is_correct,
        });
    }

    Ok(GradeReport {
        overall_score_percent: percent(total_correct, questions.len()),
        total_correct,
        total_questions: questions.len(),
        category_breakdown: breakdown,
        questions: results,
        timestamp,
    })
}

pub fn grade_session(session: &ExamSession, timestamp: DateTime<Utc>) -> Result<GradeReport> {
    let answers: Vec<Option<&str>> = (0..session.questions().len())
        .map(|i| session.selected_answer(i))
        .collect();
    grade(session.questions(), &answers, timestamp)
}
