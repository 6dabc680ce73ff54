use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Countdown notifications broadcast by a quiz session's ticker.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TimerEvent {
    TimerTick(TimerTick),
    TimeExpired(TimeExpired),
    QuizSubmitted(QuizSubmitted),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimerTick {
    pub session_id: String,
    pub remaining_seconds: u32,
    pub elapsed_seconds: u32,
    pub total_seconds: u32,
    pub remaining_clock: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimeExpired {
    pub session_id: String,
    pub score: u32,
    pub correct_count: usize,
    pub total_questions: usize,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Sent when the session completes through submit or advancing past the last question.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuizSubmitted {
    pub session_id: String,
    pub score: u32,
    pub correct_count: usize,
    pub total_questions: usize,
    pub timestamp: DateTime<Utc>,
}

impl TimerEvent {
    pub fn to_sse_data(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            TimerEvent::TimerTick(_) => "timer-tick",
            TimerEvent::TimeExpired(_) => "time-expired",
            TimerEvent::QuizSubmitted(_) => "quiz-submitted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TimerEvent::TimeExpired(_) | TimerEvent::QuizSubmitted(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_for_the_client() {
        let event = TimerEvent::TimerTick(TimerTick {
            session_id: "s1".into(),
            remaining_seconds: 59,
            elapsed_seconds: 1,
            total_seconds: 60,
            remaining_clock: "0:59".into(),
            timestamp: Utc::now(),
        });
        let json: serde_json::Value = serde_json::from_str(&event.to_sse_data()).unwrap();
        assert_eq!(json["type"], "timer-tick");
        assert_eq!(json["remaining_seconds"], 59);
        assert_eq!(event.event_name(), "timer-tick");
        assert!(!event.is_terminal());
    }

    #[test]
    fn completion_events_end_the_stream() {
        let expired = TimerEvent::TimeExpired(TimeExpired {
            session_id: "s1".into(),
            score: 90,
            correct_count: 9,
            total_questions: 10,
            timestamp: Utc::now(),
            message: "Time's up!".into(),
        });
        assert!(expired.is_terminal());
        assert_eq!(expired.event_name(), "time-expired");

        let submitted = TimerEvent::QuizSubmitted(QuizSubmitted {
            session_id: "s1".into(),
            score: 100,
            correct_count: 10,
            total_questions: 10,
            timestamp: Utc::now(),
        });
        assert!(submitted.is_terminal());
        let json: serde_json::Value = serde_json::from_str(&submitted.to_sse_data()).unwrap();
        assert_eq!(json["type"], "quiz-submitted");
    }
}
