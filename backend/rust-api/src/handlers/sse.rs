use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Extension,
};
use futures::stream::{self, Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::{
    handlers::quizzes::quiz_error,
    metrics::SSE_CONNECTIONS_ACTIVE,
    middlewares::auth::JwtClaims,
    models::timer::TimerEvent,
    services::{quiz_service::QuizSubscription, AppState},
};

/// Keeps `sse_connections_active` in step with open streams.
struct ConnectionGuard;

impl ConnectionGuard {
    fn new() -> Self {
        SSE_CONNECTIONS_ACTIVE.inc();
        ConnectionGuard
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        SSE_CONNECTIONS_ACTIVE.dec();
    }
}

fn to_sse(event: &TimerEvent) -> Event {
    Event::default()
        .event(event.event_name())
        .data(event.to_sse_data())
}

/// SSE countdown for a quiz session
/// GET /api/v1/quizzes/{id}/stream
pub async fn quiz_stream(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let subscription = state
        .quizzes
        .subscribe(&claims.sub, &session_id)
        .await
        .map_err(quiz_error)?;

    tracing::info!("Client connected to SSE stream: session={}", session_id);

    let stream = match subscription {
        QuizSubscription::Finished(event) => {
            stream::once(async move { Ok::<_, Infallible>(to_sse(&event)) }).boxed()
        }
        QuizSubscription::Live(receiver) => relay(session_id, receiver).boxed(),
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Forwards broadcast events until the terminal one has been sent.
fn relay(
    session_id: String,
    receiver: broadcast::Receiver<TimerEvent>,
) -> impl Stream<Item = Result<Event, Infallible>> + Send {
    stream::unfold(
        (receiver, false, ConnectionGuard::new()),
        move |(mut receiver, finished, guard)| {
            let session_id = session_id.clone();
            async move {
                if finished {
                    return None;
                }
                loop {
                    match receiver.recv().await {
                        Ok(event) => {
                            let terminal = event.is_terminal();
                            if terminal {
                                tracing::info!(
                                    "Quiz stream finished: session={}, event={}",
                                    session_id,
                                    event.event_name()
                                );
                            }
                            return Some((Ok(to_sse(&event)), (receiver, terminal, guard)));
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::debug!(
                                "SSE client lagging: session={}, skipped={}",
                                session_id,
                                skipped
                            );
                        }
                        // Session discarded or replaced.
                        Err(RecvError::Closed) => return None,
                    }
                }
            }
        },
    )
}
