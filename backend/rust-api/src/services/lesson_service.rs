use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    lesson::{
        GenerationOrigins, LessonPlan, LessonPlanRequest, LessonPlanResponse, NewLessonPlan,
        Resource,
    },
    quiz::{CreateQuizRequest, CreateQuizResponse},
};
use crate::services::AppState;

/// Lesson plan and standalone quiz generation for one request.
pub struct LessonService<'a> {
    state: &'a AppState,
}

impl<'a> LessonService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Lesson content, videos and quiz are generated concurrently; the quiz (if it has
    /// questions) becomes the user's active quiz session.
    pub async fn generate(
        &self,
        user_id: &str,
        request: &LessonPlanRequest,
    ) -> Result<LessonPlanResponse> {
        tracing::info!(
            "Generating lesson plan: user={}, subject={}, topic={}, grade={}",
            user_id,
            request.subject,
            request.topic,
            request.grade
        );

        let (lesson, videos, quiz) = tokio::join!(
            self.state.generator.generate_lesson(request),
            self.state.videos.search(&request.topic, &request.grade),
            self.state
                .generator
                .generate_quiz(&request.topic, &request.grade),
        );

        let content = lesson.content;
        let mut plan = LessonPlan {
            id: Uuid::new_v4().to_string(),
            topic: request.topic.clone(),
            subject: request.subject.clone(),
            grade: request.grade.clone(),
            duration: request.duration.clone(),
            learning_objectives: content.learning_objectives,
            lesson_structure: content.lesson_structure,
            activities: content.activities,
            assessment_questions: quiz.content.multiple_choice.clone(),
            resources: videos.iter().map(Resource::from).collect(),
            homework: content.homework,
            amazing_facts: content.amazing_facts,
            jokes: content.jokes,
            quotes: content.quotes,
            notes: content.notes,
            created_at: Utc::now(),
        };

        let row = NewLessonPlan {
            user_id: user_id.to_string(),
            title: format!("{}: {}", request.subject, request.topic),
            subject: plan.subject.clone(),
            grade: plan.grade.clone(),
            topic: plan.topic.clone(),
            content: serde_json::to_value(&plan).context("Failed to serialize lesson plan")?,
        };

        let persisted = match self.state.backend.insert_lesson_plan(&row).await {
            Ok(record) => {
                plan.id = record.id;
                plan.created_at = record.created_at;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to save lesson plan for user {}: {}", user_id, e);
                false
            }
        };

        let quiz_session = match self
            .state
            .quizzes
            .open(user_id, Some(plan.id.clone()), quiz.content)
            .await
        {
            Ok(view) => Some(view),
            Err(e) => {
                tracing::warn!("No quiz session for lesson plan {}: {}", plan.id, e);
                None
            }
        };

        Ok(LessonPlanResponse {
            lesson_plan: plan,
            videos,
            quiz_session,
            origins: GenerationOrigins {
                lesson: lesson.origin,
                quiz: quiz.origin,
            },
            persisted,
        })
    }

    pub async fn generate_quiz(
        &self,
        user_id: &str,
        request: &CreateQuizRequest,
    ) -> Result<CreateQuizResponse, crate::services::quiz_service::QuizServiceError> {
        let quiz = self
            .state
            .generator
            .generate_quiz(&request.topic, &request.grade)
            .await;

        let view = self
            .state
            .quizzes
            .open(user_id, request.lesson_plan_id.clone(), quiz.content)
            .await?;

        Ok(CreateQuizResponse {
            quiz_session: view,
            origin: quiz.origin,
        })
    }
}
