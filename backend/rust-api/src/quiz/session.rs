use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::quiz::Question;

/// Default countdown budget for a quiz (30 minutes).
pub const DEFAULT_TIME_LIMIT_SECONDS: u32 = 1800;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Quiz has no questions")]
    EmptyQuiz,

    #[error("Quiz already completed")]
    AlreadyCompleted,

    #[error("Question index {index} out of range (quiz has {total} questions)")]
    QuestionOutOfRange { index: usize, total: usize },

    #[error("Option '{option}' is not a choice of question {index}")]
    InvalidOption { index: usize, option: String },

    #[error("Question {0} has no answer yet")]
    Unanswered(usize),

    #[error("Already at the first question")]
    AtFirstQuestion,

    #[error("Quiz can only be submitted from the last question (currently on question {current} of {total})")]
    NotOnLastQuestion { current: usize, total: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    Submitted,
    TimedOut,
}

/// Frozen outcome of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    /// Percentage, 0..=100.
    pub score: u32,
    pub correct_count: usize,
    pub total_questions: usize,
    pub answers: BTreeMap<usize, String>,
    pub time_taken_seconds: u32,
    pub reason: CompletionReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    InProgress {
        current_index: usize,
        remaining_seconds: u32,
    },
    Completed(QuizResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Moved(usize),
    Completed(QuizResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Running(u32),
    Expired(QuizResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// This call performed the transition.
    Completed(QuizResult),
    /// The session was already frozen; the stored result is returned untouched.
    AlreadyCompleted(QuizResult),
}

impl SubmitOutcome {
    pub fn result(&self) -> &QuizResult {
        match self {
            SubmitOutcome::Completed(result) | SubmitOutcome::AlreadyCompleted(result) => result,
        }
    }
}

/// In-memory state machine for one pass through a fixed multiple-choice question set.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: BTreeMap<usize, String>,
    time_limit_seconds: u32,
    state: QuizState,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>, time_limit_seconds: u32) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }

        Ok(Self {
            questions,
            answers: BTreeMap::new(),
            time_limit_seconds,
            state: QuizState::InProgress {
                current_index: 0,
                remaining_seconds: time_limit_seconds,
            },
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, QuizState::Completed(_))
    }

    pub fn result(&self) -> Option<&QuizResult> {
        match &self.state {
            QuizState::Completed(result) => Some(result),
            QuizState::InProgress { .. } => None,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            QuizState::InProgress { current_index, .. } => Some(current_index),
            QuizState::Completed(_) => None,
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        match &self.state {
            QuizState::InProgress {
                remaining_seconds, ..
            } => *remaining_seconds,
            QuizState::Completed(result) => self
                .time_limit_seconds
                .saturating_sub(result.time_taken_seconds),
        }
    }

    pub fn select_answer(&mut self, index: usize, option: &str) -> Result<(), QuizError> {
        self.ensure_in_progress()?;

        let total = self.questions.len();
        let question = self
            .questions
            .get(index)
            .ok_or(QuizError::QuestionOutOfRange { index, total })?;

        if !question.has_option(option) {
            return Err(QuizError::InvalidOption {
                index,
                option: option.to_string(),
            });
        }

        self.answers.insert(index, option.to_string());
        Ok(())
    }

    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        let QuizState::InProgress { current_index, .. } = self.state else {
            return Err(QuizError::AlreadyCompleted);
        };

        if !self.answers.contains_key(&current_index) {
            return Err(QuizError::Unanswered(current_index));
        }

        if current_index + 1 >= self.questions.len() {
            let result = self.complete(CompletionReason::Submitted);
            return Ok(Advance::Completed(result));
        }

        let next = current_index + 1;
        if let QuizState::InProgress { current_index, .. } = &mut self.state {
            *current_index = next;
        }
        Ok(Advance::Moved(next))
    }

    pub fn retreat(&mut self) -> Result<usize, QuizError> {
        match &mut self.state {
            QuizState::Completed(_) => Err(QuizError::AlreadyCompleted),
            QuizState::InProgress { current_index, .. } if *current_index == 0 => {
                Err(QuizError::AtFirstQuestion)
            }
            QuizState::InProgress { current_index, .. } => {
                *current_index -= 1;
                Ok(*current_index)
            }
        }
    }

    pub fn tick(&mut self) -> Result<Tick, QuizError> {
        let QuizState::InProgress {
            remaining_seconds, ..
        } = &mut self.state
        else {
            return Err(QuizError::AlreadyCompleted);
        };

        *remaining_seconds = remaining_seconds.saturating_sub(1);
        if *remaining_seconds > 0 {
            return Ok(Tick::Running(*remaining_seconds));
        }

        Ok(Tick::Expired(self.complete(CompletionReason::TimedOut)))
    }

    /// Completes from the last question. Once completed, returns the frozen result.
    pub fn submit(&mut self) -> Result<SubmitOutcome, QuizError> {
        match &self.state {
            QuizState::Completed(result) => Ok(SubmitOutcome::AlreadyCompleted(result.clone())),
            QuizState::InProgress { current_index, .. } => {
                let total = self.questions.len();
                if *current_index + 1 != total {
                    return Err(QuizError::NotOnLastQuestion {
                        current: *current_index + 1,
                        total,
                    });
                }
                Ok(SubmitOutcome::Completed(
                    self.complete(CompletionReason::Submitted),
                ))
            }
        }
    }

    fn ensure_in_progress(&self) -> Result<(), QuizError> {
        if self.is_completed() {
            Err(QuizError::AlreadyCompleted)
        } else {
            Ok(())
        }
    }

    fn complete(&mut self, reason: CompletionReason) -> QuizResult {
        let remaining = self.remaining_seconds();
        let correct_count = correct_count(&self.questions, &self.answers);
        let total_questions = self.questions.len();

        let result = QuizResult {
            score: percentage(correct_count, total_questions).unwrap_or(0),
            correct_count,
            total_questions,
            answers: self.answers.clone(),
            time_taken_seconds: self.time_limit_seconds.saturating_sub(remaining),
            reason,
        };

        self.state = QuizState::Completed(result.clone());
        result
    }
}

/// Counts answers equal to the question's correct option. Missing or empty answers never match.
pub fn correct_count(questions: &[Question], answers: &BTreeMap<usize, String>) -> usize {
    questions
        .iter()
        .enumerate()
        .filter(|(index, question)| {
            answers
                .get(index)
                .is_some_and(|answer| !answer.is_empty() && *answer == question.correct_option)
        })
        .count()
}

/// Round-half-up percentage; `None` for an empty quiz.
pub fn percentage(correct: usize, total: usize) -> Option<u32> {
    if total == 0 {
        return None;
    }
    Some(((200 * correct + total) / (2 * total)) as u32)
}

/// `m:ss` countdown label.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(n: usize) -> Question {
        Question {
            prompt: format!("Question {}", n),
            options: vec![
                format!("right {}", n),
                "wrong a".to_string(),
                "wrong b".to_string(),
                "wrong c".to_string(),
            ],
            correct_option: format!("right {}", n),
            explanation: None,
        }
    }

    fn session(len: usize) -> QuizSession {
        QuizSession::new((0..len).map(question).collect(), DEFAULT_TIME_LIMIT_SECONDS).unwrap()
    }

    #[test]
    fn empty_quiz_is_rejected() {
        assert_eq!(
            QuizSession::new(vec![], DEFAULT_TIME_LIMIT_SECONDS).unwrap_err(),
            QuizError::EmptyQuiz
        );
        assert_eq!(percentage(0, 0), None);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), Some(13)); // 12.5
        assert_eq!(percentage(2, 3), Some(67));
        assert_eq!(percentage(1, 3), Some(33));
        assert_eq!(percentage(0, 10), Some(0));
        assert_eq!(percentage(10, 10), Some(100));
    }

    #[test]
    fn timeout_scores_unanswered_as_incorrect() {
        let mut quiz = session(10);
        for i in 0..9 {
            quiz.select_answer(i, &format!("right {}", i)).unwrap();
        }

        let mut expirations = Vec::new();
        for _ in 0..DEFAULT_TIME_LIMIT_SECONDS {
            if let Tick::Expired(result) = quiz.tick().unwrap() {
                expirations.push(result);
            }
        }

        assert_eq!(expirations.len(), 1);
        let result = &expirations[0];
        assert_eq!(result.score, 90);
        assert_eq!(result.correct_count, 9);
        assert_eq!(result.reason, CompletionReason::TimedOut);
        assert_eq!(result.time_taken_seconds, DEFAULT_TIME_LIMIT_SECONDS);

        assert_eq!(quiz.tick(), Err(QuizError::AlreadyCompleted));
        assert_eq!(quiz.result(), Some(result));
    }

    #[test]
    fn answering_everything_and_advancing_past_last_submits() {
        let mut quiz = session(10);
        for i in 0..10 {
            quiz.select_answer(i, &format!("right {}", i)).unwrap();
            let step = quiz.advance().unwrap();
            if i < 9 {
                assert_eq!(step, Advance::Moved(i + 1));
            } else {
                let Advance::Completed(result) = step else {
                    panic!("expected completion on last question");
                };
                assert_eq!(result.score, 100);
                assert_eq!(result.correct_count, 10);
                assert_eq!(result.reason, CompletionReason::Submitted);
            }
        }
        assert!(quiz.is_completed());
    }

    #[test]
    fn submit_is_idempotent() {
        let mut quiz = session(4);
        quiz.select_answer(0, "right 0").unwrap();
        quiz.advance().unwrap();
        quiz.select_answer(1, "wrong a").unwrap();
        quiz.advance().unwrap();
        quiz.select_answer(2, "wrong b").unwrap();
        quiz.advance().unwrap();

        let first = quiz.submit().unwrap();
        assert!(matches!(first, SubmitOutcome::Completed(_)));
        assert_eq!(first.result().score, 25);

        let second = quiz.submit().unwrap();
        assert!(matches!(second, SubmitOutcome::AlreadyCompleted(_)));
        assert_eq!(first.result(), second.result());

        assert_eq!(
            quiz.select_answer(3, "right 3"),
            Err(QuizError::AlreadyCompleted)
        );
        assert_eq!(quiz.answers().len(), 3);
    }

    #[test]
    fn submit_before_last_question_is_rejected() {
        let mut quiz = session(10);
        quiz.select_answer(0, "right 0").unwrap();

        assert_eq!(
            quiz.submit(),
            Err(QuizError::NotOnLastQuestion {
                current: 1,
                total: 10
            })
        );
        assert!(!quiz.is_completed());
        assert_eq!(quiz.current_index(), Some(0));
        assert_eq!(quiz.answers().len(), 1);

        // Answers may still change after the rejected submit.
        quiz.select_answer(0, "wrong a").unwrap();
        assert_eq!(quiz.answers().get(&0).map(String::as_str), Some("wrong a"));
    }

    #[test]
    fn single_question_quiz_submits_immediately() {
        let mut quiz = session(1);
        quiz.select_answer(0, "right 0").unwrap();
        let outcome = quiz.submit().unwrap();
        assert_eq!(outcome.result().score, 100);
        assert_eq!(outcome.result().reason, CompletionReason::Submitted);
    }

    #[test]
    fn unknown_option_leaves_state_untouched() {
        let mut quiz = session(3);
        quiz.select_answer(0, "wrong a").unwrap();

        let err = quiz.select_answer(0, "not an option").unwrap_err();
        assert!(matches!(err, QuizError::InvalidOption { index: 0, .. }));
        assert_eq!(quiz.answers().get(&0).map(String::as_str), Some("wrong a"));

        assert_eq!(
            quiz.select_answer(7, "right 7"),
            Err(QuizError::QuestionOutOfRange { index: 7, total: 3 })
        );
    }

    #[test]
    fn advance_requires_answer_and_retreat_keeps_it() {
        let mut quiz = session(3);
        assert_eq!(quiz.retreat(), Err(QuizError::AtFirstQuestion));
        assert_eq!(quiz.advance(), Err(QuizError::Unanswered(0)));

        quiz.select_answer(0, "right 0").unwrap();
        assert_eq!(quiz.advance(), Ok(Advance::Moved(1)));
        assert_eq!(quiz.retreat(), Ok(0));
        assert_eq!(quiz.current_index(), Some(0));
        assert_eq!(quiz.answers().get(&0).map(String::as_str), Some("right 0"));
    }

    #[test]
    fn selecting_again_overwrites() {
        let mut quiz = session(2);
        quiz.select_answer(1, "wrong b").unwrap();
        quiz.select_answer(1, "right 1").unwrap();
        quiz.select_answer(0, "wrong a").unwrap();
        quiz.advance().unwrap();
        assert_eq!(quiz.submit().unwrap().result().correct_count, 1);
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(1800), "30:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(0), "0:00");
    }
}
