//! Hosted auth/database service.
//!
//! The application talks to its backend-as-a-service through [`HostedBackend`]. Two
//! implementations exist: [`supabase::SupabaseBackend`] speaks the hosted GoTrue/PostgREST HTTP
//! API, and [`memory::InMemoryBackend`] keeps every table in process memory for demo mode.
//! [`connect`] picks one from configuration.

pub mod memory;
pub mod supabase;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;
use crate::models::{
    group::{Group, GroupMember, GroupMemberView, NewGroup},
    lesson::{LessonPlanRecord, NewLessonPlan},
    quiz::{QuizResultRecord, StoredQuizResult},
    user::{NewUserProfile, UpstreamSession, UserProfile, UserRole},
};

pub use memory::{InMemoryBackend, DEMO_USER_ID};
pub use supabase::SupabaseBackend;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Auth service rejection, message passed through unchanged.
    #[error("{0}")]
    Auth(String),

    #[error("Backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode backend response: {0}")]
    Decode(String),

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("{0}")]
    Conflict(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Live,
    Demo,
}

impl BackendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Live => "live",
            BackendMode::Demo => "demo",
        }
    }
}

#[async_trait]
pub trait HostedBackend: Send + Sync {
    fn mode(&self) -> BackendMode;

    async fn ping(&self) -> Result<(), BackendError>;

    // Auth
    async fn sign_in(&self, email: &str, password: &str) -> Result<UpstreamSession, BackendError>;
    async fn sign_up(&self, email: &str, password: &str) -> Result<UpstreamSession, BackendError>;
    async fn sign_out(&self, access_token: Option<&str>) -> Result<(), BackendError>;

    // users
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, BackendError>;
    async fn insert_profile(&self, profile: &NewUserProfile) -> Result<UserProfile, BackendError>;
    async fn touch_last_login(&self, user_id: &str, at: DateTime<Utc>)
        -> Result<(), BackendError>;
    async fn find_user_by_email(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<Option<UserProfile>, BackendError>;

    // lesson_plans
    async fn insert_lesson_plan(
        &self,
        plan: &NewLessonPlan,
    ) -> Result<LessonPlanRecord, BackendError>;
    async fn recent_lesson_plans(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<LessonPlanRecord>, BackendError>;
    async fn count_lesson_plans(&self, user_id: &str) -> Result<u64, BackendError>;

    // quiz_results
    async fn insert_quiz_result(&self, result: &QuizResultRecord) -> Result<(), BackendError>;
    async fn quiz_results_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<StoredQuizResult>, BackendError>;

    // groups / group_members
    async fn insert_group(&self, group: &NewGroup) -> Result<Group, BackendError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, BackendError>;
    async fn groups_for_teacher(&self, teacher_id: &str) -> Result<Vec<Group>, BackendError>;
    async fn groups_for_student(&self, student_id: &str) -> Result<Vec<Group>, BackendError>;
    async fn count_groups_for_teacher(&self, teacher_id: &str) -> Result<u64, BackendError>;
    async fn count_memberships_for_student(&self, student_id: &str)
        -> Result<u64, BackendError>;
    async fn group_members(&self, group_id: &str) -> Result<Vec<GroupMemberView>, BackendError>;
    async fn insert_group_member(
        &self,
        group_id: &str,
        student_id: &str,
    ) -> Result<GroupMember, BackendError>;
}

/// Live backend only when the URL is https and the anon key looks real; demo otherwise.
pub fn is_configured(url: &str, anon_key: &str) -> bool {
    url.starts_with("https://") && anon_key.len() > 20
}

pub fn connect(config: &Config) -> anyhow::Result<Arc<dyn HostedBackend>> {
    if is_configured(&config.supabase_url, &config.supabase_anon_key) {
        tracing::info!("Using hosted backend at {}", config.supabase_url);
        let backend = SupabaseBackend::new(
            &config.supabase_url,
            &config.supabase_anon_key,
            config.supabase_service_key.clone(),
        )?;
        Ok(Arc::new(backend))
    } else {
        tracing::warn!("Hosted backend not configured, running in demo mode with in-memory data");
        Ok(Arc::new(InMemoryBackend::seeded()))
    }
}
