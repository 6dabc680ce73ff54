use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use super::lesson::ContentOrigin;
use crate::quiz::{CompletionReason, QuizResult};

pub const OPTIONS_PER_QUESTION: usize = 4;
pub const DEFAULT_PASSING_SCORE: usize = 7;

/// One multiple-choice question as produced by the completion API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_option: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    pub fn is_well_formed(&self) -> bool {
        self.options.len() == OPTIONS_PER_QUESTION && self.has_option(&self.correct_option)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizContent {
    pub multiple_choice: Vec<Question>,
    pub total_questions: usize,
    pub passing_score: usize,
    /// Minutes
    pub time_limit: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200, message = "Topic is required"))]
    pub topic: String,

    #[validate(length(min = 1, max = 50, message = "Grade is required"))]
    pub grade: String,

    pub lesson_plan_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SelectAnswerRequest {
    pub question_index: usize,

    #[validate(length(min = 1, message = "Option must not be empty"))]
    pub option: String,
}

/// Row sent to the `quiz_results` table once a session completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizResultRecord {
    pub user_id: String,
    pub lesson_plan_id: Option<String>,
    pub score: u32,
    pub correct_count: usize,
    pub total_questions: usize,
    /// Dense list, `None` for unanswered questions
    pub answers: Vec<Option<String>>,
}

impl QuizResultRecord {
    pub fn from_result(user_id: &str, lesson_plan_id: Option<String>, result: &QuizResult) -> Self {
        let answers = (0..result.total_questions)
            .map(|i| result.answers.get(&i).cloned())
            .collect();

        Self {
            user_id: user_id.to_string(),
            lesson_plan_id,
            score: result.score,
            correct_count: result.correct_count,
            total_questions: result.total_questions,
            answers,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQuizResult {
    pub id: String,
    pub user_id: String,
    pub lesson_plan_id: Option<String>,
    pub score: u32,
    pub total_questions: usize,
    pub answers: serde_json::Value,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Outstanding,
    Excellent,
    Good,
    KeepPracticing,
    TryAgain,
}

impl PerformanceBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => PerformanceBand::Outstanding,
            80..=89 => PerformanceBand::Excellent,
            70..=79 => PerformanceBand::Good,
            60..=69 => PerformanceBand::KeepPracticing,
            _ => PerformanceBand::TryAgain,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PerformanceBand::Outstanding => "Outstanding!",
            PerformanceBand::Excellent => "Excellent work!",
            PerformanceBand::Good => "Good job!",
            PerformanceBand::KeepPracticing => "Keep practicing!",
            PerformanceBand::TryAgain => "Don't give up! Try again!",
        }
    }
}

/// Question as shown while the quiz is running: no answer key.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub question: String,
    pub options: Vec<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewItem {
    pub index: usize,
    pub question: String,
    pub your_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizResultView {
    pub score: u32,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub total_questions: usize,
    pub questions_attempted: usize,
    pub time_taken_seconds: u32,
    pub reason: CompletionReason,
    pub band: PerformanceBand,
    pub message: &'static str,
    pub passed: bool,
    pub review: Vec<ReviewItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    pub session_id: String,
    pub lesson_plan_id: Option<String>,
    pub status: QuizStatus,
    pub total_questions: usize,
    pub answered: BTreeMap<usize, String>,
    pub remaining_seconds: u32,
    pub remaining_clock: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<QuizResultView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateQuizResponse {
    pub quiz_session: QuizView,
    pub origin: ContentOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_uses_completion_api_field_names() {
        let raw = r#"{
            "question": "2 + 2?",
            "options": ["3", "4", "5", "22"],
            "correctAnswer": "4",
            "explanation": "Basic addition"
        }"#;
        let q: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(q.prompt, "2 + 2?");
        assert_eq!(q.correct_option, "4");
        assert!(q.is_well_formed());
    }

    #[test]
    fn correct_answer_must_be_an_option() {
        let q = Question {
            prompt: "?".into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_option: "e".into(),
            explanation: None,
        };
        assert!(!q.is_well_formed());
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(PerformanceBand::from_score(100), PerformanceBand::Outstanding);
        assert_eq!(PerformanceBand::from_score(90), PerformanceBand::Outstanding);
        assert_eq!(PerformanceBand::from_score(89), PerformanceBand::Excellent);
        assert_eq!(PerformanceBand::from_score(70), PerformanceBand::Good);
        assert_eq!(PerformanceBand::from_score(60), PerformanceBand::KeepPracticing);
        assert_eq!(PerformanceBand::from_score(59), PerformanceBand::TryAgain);
    }
}
