use std::sync::Arc;
use std::time::Duration;

use crate::backend::{self, HostedBackend};
use crate::config::Config;

use auth_service::AuthGate;
use content_service::ContentGenerator;
use preference_service::PreferenceService;
use quiz_service::QuizService;
use video_service::VideoSearch;

pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn HostedBackend>,
    pub auth: AuthGate,
    pub generator: ContentGenerator,
    pub videos: VideoSearch,
    pub quizzes: QuizService,
    pub preferences: PreferenceService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let backend = backend::connect(&config)?;

        tracing::info!("Checking hosted backend ({})...", backend.mode().as_str());
        match tokio::time::timeout(Duration::from_secs(5), backend.ping()).await {
            Ok(Ok(())) => tracing::info!("Hosted backend reachable"),
            Ok(Err(e)) => tracing::warn!("Hosted backend ping failed: {}", e),
            Err(_) => tracing::warn!("Hosted backend ping timeout after 5s"),
        }

        Self::with_backend(config, backend)
    }

    /// State over an already-built backend. Tests pass an `InMemoryBackend` here.
    pub fn with_backend(config: Config, backend: Arc<dyn HostedBackend>) -> anyhow::Result<Self> {
        let generator = ContentGenerator::new(&config)?;
        let videos = VideoSearch::new(&config)?;
        if generator.is_demo() {
            tracing::warn!("Completion API key not set, content generation runs in demo mode");
        }

        let auth = AuthGate::new(
            backend.clone(),
            &config.jwt_secret,
            config.token_ttl_seconds,
        );
        let quizzes = QuizService::new(
            backend.clone(),
            config.quiz_time_limit_seconds,
            Duration::from_millis(config.quiz_tick_interval_ms),
        );

        Ok(Self {
            config,
            backend,
            auth,
            generator,
            videos,
            quizzes,
            preferences: PreferenceService::in_memory(),
        })
    }
}

pub mod auth_service;
pub mod content_service;
pub mod dashboard_service;
pub mod demo_content;
pub mod group_service;
pub mod lesson_service;
pub mod preference_service;
pub mod quiz_service;
pub mod video_service;
