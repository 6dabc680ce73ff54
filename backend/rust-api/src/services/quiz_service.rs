use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::backend::HostedBackend;
use crate::metrics::{QUIZ_ANSWERS_TOTAL, QUIZ_SESSIONS_ACTIVE, QUIZ_SESSIONS_TOTAL};
use crate::models::{
    quiz::{
        PerformanceBand, Question, QuestionView, QuizContent, QuizResultRecord, QuizResultView,
        QuizStatus, QuizView, ReviewItem,
    },
    timer::{QuizSubmitted, TimeExpired, TimerEvent, TimerTick},
};
use crate::quiz::{
    format_clock, Advance, CompletionReason, QuizError, QuizResult, QuizSession, QuizState,
    SubmitOutcome, Tick,
};

const EVENT_BUFFER: usize = 64;

#[derive(Debug, Error)]
pub enum QuizServiceError {
    #[error("Quiz session not found")]
    NotFound,

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// What a stream subscriber gets: live events, or the final event of a finished session.
pub enum QuizSubscription {
    Live(broadcast::Receiver<TimerEvent>),
    Finished(TimerEvent),
}

struct LiveQuiz {
    owner: String,
    lesson_plan_id: Option<String>,
    passing_score: usize,
    session: QuizSession,
    cancel: CancellationToken,
    events: broadcast::Sender<TimerEvent>,
}

type Sessions = Arc<RwLock<HashMap<String, LiveQuiz>>>;

/// Owns every in-flight quiz session, one per user, and its countdown ticker.
pub struct QuizService {
    sessions: Sessions,
    backend: Arc<dyn HostedBackend>,
    time_limit_seconds: u32,
    tick_interval: Duration,
}

impl QuizService {
    pub fn new(
        backend: Arc<dyn HostedBackend>,
        time_limit_seconds: u32,
        tick_interval: Duration,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            backend,
            time_limit_seconds,
            tick_interval,
        }
    }

    /// Start a session for `owner`, replacing (and cancelling) any session they already had.
    pub async fn open(
        &self,
        owner: &str,
        lesson_plan_id: Option<String>,
        quiz: QuizContent,
    ) -> Result<QuizView, QuizServiceError> {
        let passing_score = quiz.passing_score;
        let session = QuizSession::new(quiz.multiple_choice, self.time_limit_seconds)?;

        let id = Uuid::new_v4().to_string();
        let cancel = CancellationToken::new();
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let live = LiveQuiz {
            owner: owner.to_string(),
            lesson_plan_id,
            passing_score,
            session,
            cancel: cancel.clone(),
            events,
        };
        let view = build_view(&id, &live);

        {
            let mut sessions = self.sessions.write().await;
            let previous: Vec<String> = sessions
                .iter()
                .filter(|(_, live)| live.owner == owner)
                .map(|(id, _)| id.clone())
                .collect();
            for old_id in previous {
                if let Some(old) = sessions.remove(&old_id) {
                    tracing::info!("Replacing quiz session {} for user {}", old_id, owner);
                    retire(&old);
                }
            }
            sessions.insert(id.clone(), live);
        }

        QUIZ_SESSIONS_TOTAL.with_label_values(&["created"]).inc();
        QUIZ_SESSIONS_ACTIVE.inc();
        tracing::info!(
            "Quiz session opened: session={}, user={}, questions={}",
            id,
            owner,
            view.total_questions
        );

        self.spawn_ticker(id, cancel);
        Ok(view)
    }

    pub async fn view(&self, owner: &str, id: &str) -> Result<QuizView, QuizServiceError> {
        let sessions = self.sessions.read().await;
        let live = sessions
            .get(id)
            .filter(|live| live.owner == owner)
            .ok_or(QuizServiceError::NotFound)?;
        Ok(build_view(id, live))
    }

    pub async fn select_answer(
        &self,
        owner: &str,
        id: &str,
        index: usize,
        option: &str,
    ) -> Result<QuizView, QuizServiceError> {
        self.with_session(owner, id, |live| {
            live.session.select_answer(index, option)?;
            let correct = live
                .session
                .questions()
                .get(index)
                .is_some_and(|q| q.correct_option == option);
            QUIZ_ANSWERS_TOTAL
                .with_label_values(&[if correct { "true" } else { "false" }])
                .inc();
            Ok(())
        })
        .await
    }

    pub async fn advance(&self, owner: &str, id: &str) -> Result<QuizView, QuizServiceError> {
        let backend = Arc::clone(&self.backend);
        self.with_session(owner, id, |live| {
            if let Advance::Completed(result) = live.session.advance()? {
                on_completed(&backend, id, live, &result);
            }
            Ok(())
        })
        .await
    }

    pub async fn retreat(&self, owner: &str, id: &str) -> Result<QuizView, QuizServiceError> {
        self.with_session(owner, id, |live| live.session.retreat().map(|_| ()))
            .await
    }

    /// Idempotent: a repeated submit returns the frozen result without persisting again.
    pub async fn submit(&self, owner: &str, id: &str) -> Result<QuizView, QuizServiceError> {
        let backend = Arc::clone(&self.backend);
        self.with_session(owner, id, |live| {
            match live.session.submit()? {
                SubmitOutcome::Completed(result) => on_completed(&backend, id, live, &result),
                SubmitOutcome::AlreadyCompleted(_) => {
                    tracing::debug!("Repeated submit for completed quiz session {}", id)
                }
            }
            Ok(())
        })
        .await
    }

    pub async fn discard(&self, owner: &str, id: &str) -> Result<(), QuizServiceError> {
        let mut sessions = self.sessions.write().await;
        if !sessions.get(id).is_some_and(|live| live.owner == owner) {
            return Err(QuizServiceError::NotFound);
        }
        if let Some(live) = sessions.remove(id) {
            retire(&live);
            tracing::info!("Quiz session discarded: session={}", id);
        }
        Ok(())
    }

    pub async fn subscribe(
        &self,
        owner: &str,
        id: &str,
    ) -> Result<QuizSubscription, QuizServiceError> {
        let sessions = self.sessions.read().await;
        let live = sessions
            .get(id)
            .filter(|live| live.owner == owner)
            .ok_or(QuizServiceError::NotFound)?;

        Ok(match live.session.result() {
            Some(result) => QuizSubscription::Finished(completion_event(id, result)),
            None => QuizSubscription::Live(live.events.subscribe()),
        })
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn with_session(
        &self,
        owner: &str,
        id: &str,
        operation: impl FnOnce(&mut LiveQuiz) -> Result<(), QuizError>,
    ) -> Result<QuizView, QuizServiceError> {
        let mut sessions = self.sessions.write().await;
        let live = sessions
            .get_mut(id)
            .filter(|live| live.owner == owner)
            .ok_or(QuizServiceError::NotFound)?;
        operation(live)?;
        Ok(build_view(id, live))
    }

    fn spawn_ticker(&self, id: String, cancel: CancellationToken) {
        let sessions = Arc::clone(&self.sessions);
        let backend = Arc::clone(&self.backend);
        let period = self.tick_interval;

        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        let mut guard = sessions.write().await;
                        let Some(live) = guard.get_mut(&id) else { break };
                        match live.session.tick() {
                            Ok(Tick::Running(remaining)) => {
                                let total = live.session.time_limit_seconds();
                                let _ = live.events.send(TimerEvent::TimerTick(TimerTick {
                                    session_id: id.clone(),
                                    remaining_seconds: remaining,
                                    elapsed_seconds: total.saturating_sub(remaining),
                                    total_seconds: total,
                                    remaining_clock: format_clock(remaining),
                                    timestamp: Utc::now(),
                                }));
                            }
                            Ok(Tick::Expired(result)) => {
                                tracing::info!(
                                    "Quiz time expired: session={}, score={}",
                                    id,
                                    result.score
                                );
                                on_completed(&backend, &id, live, &result);
                                break;
                            }
                            Err(_) => break,
                        }
                    }
                }
            }
            tracing::debug!("Quiz ticker stopped: session={}", id);
        });
    }
}

/// Stop the ticker of a session leaving the map.
fn retire(live: &LiveQuiz) {
    live.cancel.cancel();
    if !live.session.is_completed() {
        QUIZ_SESSIONS_ACTIVE.dec();
        QUIZ_SESSIONS_TOTAL.with_label_values(&["discarded"]).inc();
    }
}

/// Runs once per session, on the transition into `Completed`.
fn on_completed(backend: &Arc<dyn HostedBackend>, id: &str, live: &LiveQuiz, result: &QuizResult) {
    live.cancel.cancel();
    let _ = live.events.send(completion_event(id, result));

    QUIZ_SESSIONS_ACTIVE.dec();
    QUIZ_SESSIONS_TOTAL
        .with_label_values(&[match result.reason {
            CompletionReason::Submitted => "submitted",
            CompletionReason::TimedOut => "timed_out",
        }])
        .inc();

    let record = QuizResultRecord::from_result(&live.owner, live.lesson_plan_id.clone(), result);
    let backend = Arc::clone(backend);
    tokio::spawn(async move {
        if let Err(e) = backend.insert_quiz_result(&record).await {
            tracing::error!(
                "Failed to persist quiz result for user {}: {}",
                record.user_id,
                e
            );
        }
    });
}

fn completion_event(id: &str, result: &QuizResult) -> TimerEvent {
    match result.reason {
        CompletionReason::TimedOut => TimerEvent::TimeExpired(TimeExpired {
            session_id: id.to_string(),
            score: result.score,
            correct_count: result.correct_count,
            total_questions: result.total_questions,
            timestamp: Utc::now(),
            message: "Time's up! Quiz submitted automatically.".to_string(),
        }),
        CompletionReason::Submitted => TimerEvent::QuizSubmitted(QuizSubmitted {
            session_id: id.to_string(),
            score: result.score,
            correct_count: result.correct_count,
            total_questions: result.total_questions,
            timestamp: Utc::now(),
        }),
    }
}

fn build_view(id: &str, live: &LiveQuiz) -> QuizView {
    let session = &live.session;
    let remaining = session.remaining_seconds();

    let (status, current_index, current_question, result) = match session.state() {
        QuizState::InProgress { current_index, .. } => {
            let question = session
                .questions()
                .get(*current_index)
                .map(|q| QuestionView {
                    index: *current_index,
                    question: q.prompt.clone(),
                    options: q.options.clone(),
                    selected: session.answers().get(current_index).cloned(),
                });
            (QuizStatus::InProgress, Some(*current_index), question, None)
        }
        QuizState::Completed(result) => (
            QuizStatus::Completed,
            None,
            None,
            Some(result_view(session.questions(), result, live.passing_score)),
        ),
    };

    QuizView {
        session_id: id.to_string(),
        lesson_plan_id: live.lesson_plan_id.clone(),
        status,
        total_questions: session.questions().len(),
        answered: session.answers().clone(),
        remaining_seconds: remaining,
        remaining_clock: format_clock(remaining),
        current_index,
        current_question,
        result,
    }
}

fn result_view(questions: &[Question], result: &QuizResult, passing_score: usize) -> QuizResultView {
    let review = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let your_answer = result.answers.get(&index).cloned();
            ReviewItem {
                index,
                question: question.prompt.clone(),
                is_correct: your_answer.as_deref() == Some(question.correct_option.as_str()),
                your_answer,
                correct_answer: question.correct_option.clone(),
                explanation: question.explanation.clone(),
            }
        })
        .collect();

    let band = PerformanceBand::from_score(result.score);
    QuizResultView {
        score: result.score,
        correct_count: result.correct_count,
        incorrect_count: result.total_questions - result.correct_count,
        total_questions: result.total_questions,
        questions_attempted: result.answers.len(),
        time_taken_seconds: result.time_taken_seconds,
        reason: result.reason,
        band,
        message: band.message(),
        passed: result.correct_count >= passing_score,
        review,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::services::demo_content;

    fn service(time_limit: u32, tick_ms: u64) -> (QuizService, Arc<InMemoryBackend>) {
        let backend = Arc::new(InMemoryBackend::new());
        let service = QuizService::new(
            backend.clone(),
            time_limit,
            Duration::from_millis(tick_ms),
        );
        (service, backend)
    }

    fn quiz() -> QuizContent {
        demo_content::quiz("Gravity", "Grade 8")
    }

    #[tokio::test]
    async fn answers_are_hidden_until_completion() {
        let (service, _) = service(1800, 60_000);
        let view = service.open("u1", None, quiz()).await.unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("result").is_none());
        assert!(!json.to_string().contains("correctAnswer"));
        assert_eq!(view.remaining_clock, "30:00");
    }

    #[tokio::test]
    async fn submit_completes_once_and_persists_once() {
        let (service, backend) = service(1800, 60_000);
        let content = quiz();
        let correct: Vec<String> = content
            .multiple_choice
            .iter()
            .map(|q| q.correct_option.clone())
            .collect();
        let id = service.open("u1", Some("plan-1".into()), content).await.unwrap().session_id;

        let last = correct.len() - 1;
        for (index, option) in correct.iter().enumerate() {
            service.select_answer("u1", &id, index, option).await.unwrap();
            if index < last {
                service.advance("u1", &id).await.unwrap();
            }
        }
        let first = service.submit("u1", &id).await.unwrap();
        let second = service.submit("u1", &id).await.unwrap();

        let result = first.result.unwrap();
        assert_eq!(result.score, 100);
        assert!(result.passed);
        assert_eq!(result.band, PerformanceBand::Outstanding);
        assert_eq!(second.result.unwrap().score, 100);

        tokio::time::sleep(Duration::from_millis(50)).await;
        let stored = backend.quiz_results_for_user("u1").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].lesson_plan_id.as_deref(), Some("plan-1"));
    }

    #[tokio::test]
    async fn ticker_expires_session_and_broadcasts_once() {
        let (service, backend) = service(3, 50);
        let content = quiz();
        let first_correct = content.multiple_choice[0].correct_option.clone();
        let id = service.open("u1", None, content).await.unwrap().session_id;
        service.select_answer("u1", &id, 0, &first_correct).await.unwrap();

        let QuizSubscription::Live(mut events) = service.subscribe("u1", &id).await.unwrap() else {
            panic!("session should still be live");
        };

        let mut ticks = 0;
        let mut expiries = 0;
        while let Ok(Ok(event)) =
            tokio::time::timeout(Duration::from_secs(2), events.recv()).await
        {
            let terminal = event.is_terminal();
            match event {
                TimerEvent::TimerTick(_) => ticks += 1,
                TimerEvent::TimeExpired(expired) => {
                    expiries += 1;
                    assert_eq!(expired.correct_count, 1);
                    assert_eq!(expired.score, 10);
                }
                TimerEvent::QuizSubmitted(_) => panic!("not submitted"),
            }
            if terminal {
                break;
            }
        }
        assert_eq!(ticks, 2);
        assert_eq!(expiries, 1);

        let view = service.view("u1", &id).await.unwrap();
        assert_eq!(view.status, QuizStatus::Completed);
        assert_eq!(view.result.unwrap().reason, CompletionReason::TimedOut);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(backend.quiz_results_for_user("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn new_session_replaces_previous_one() {
        let (service, _) = service(1800, 60_000);
        let old = service.open("u1", None, quiz()).await.unwrap().session_id;
        let new = service.open("u1", None, quiz()).await.unwrap().session_id;
        service.open("u2", None, quiz()).await.unwrap();

        assert!(matches!(
            service.view("u1", &old).await,
            Err(QuizServiceError::NotFound)
        ));
        assert!(service.view("u1", &new).await.is_ok());
        assert_eq!(service.session_count().await, 2);
    }

    #[tokio::test]
    async fn other_users_cannot_see_or_drive_a_session() {
        let (service, _) = service(1800, 60_000);
        let id = service.open("owner", None, quiz()).await.unwrap().session_id;
        assert!(matches!(
            service.view("intruder", &id).await,
            Err(QuizServiceError::NotFound)
        ));
        assert!(matches!(
            service.submit("intruder", &id).await,
            Err(QuizServiceError::NotFound)
        ));
        assert!(matches!(
            service.discard("intruder", &id).await,
            Err(QuizServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn advance_requires_an_answer_and_retreat_keeps_it() {
        let (service, _) = service(1800, 60_000);
        let content = quiz();
        let option = content.multiple_choice[0].options[1].clone();
        let id = service.open("u1", None, content).await.unwrap().session_id;

        assert!(matches!(
            service.advance("u1", &id).await,
            Err(QuizServiceError::Quiz(QuizError::Unanswered(0)))
        ));
        service.select_answer("u1", &id, 0, &option).await.unwrap();
        assert_eq!(service.advance("u1", &id).await.unwrap().current_index, Some(1));

        let back = service.retreat("u1", &id).await.unwrap();
        assert_eq!(back.current_index, Some(0));
        assert_eq!(back.current_question.unwrap().selected, Some(option));
    }

    #[tokio::test]
    async fn empty_quiz_opens_nothing() {
        let (service, _) = service(1800, 60_000);
        let empty = QuizContent {
            multiple_choice: vec![],
            total_questions: 0,
            passing_score: 7,
            time_limit: 30,
        };
        assert!(matches!(
            service.open("u1", None, empty).await,
            Err(QuizServiceError::Quiz(QuizError::EmptyQuiz))
        ));
        assert_eq!(service.session_count().await, 0);
    }
}
