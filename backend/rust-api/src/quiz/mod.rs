//! Quiz session state machine and scoring.

pub mod session;

pub use session::{
    correct_count, format_clock, percentage, Advance, CompletionReason, QuizError, QuizResult,
    QuizSession, QuizState, SubmitOutcome, Tick, DEFAULT_TIME_LIMIT_SECONDS,
};
