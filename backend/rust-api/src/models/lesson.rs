use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::quiz::{Question, QuizView};

fn default_duration() -> String {
    "60".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LessonPlanRequest {
    #[validate(length(min = 1, max = 100, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, max = 50, message = "Grade is required"))]
    pub grade: String,

    #[validate(length(min = 1, max = 200, message = "Topic is required"))]
    pub topic: String,

    /// Minutes, as the form sends it ("30", "45", "60", "90", "120")
    #[serde(default = "default_duration")]
    #[validate(length(min = 1, max = 10))]
    pub duration: String,
}

/// Where a generated payload came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentOrigin {
    /// Parsed from the completion API reply.
    Live,
    /// No completion key configured; fixed demo payload.
    Demo,
    /// The completion call failed; fixed demo payload stands in.
    Degraded { reason: String },
}

impl ContentOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            ContentOrigin::Live => "live",
            ContentOrigin::Demo => "demo",
            ContentOrigin::Degraded { .. } => "degraded",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Generated<T> {
    pub content: T,
    pub origin: ContentOrigin,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonContent {
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    #[serde(default)]
    pub lesson_structure: Vec<LessonSection>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub homework: Vec<String>,
    #[serde(default)]
    pub amazing_facts: Vec<String>,
    #[serde(default)]
    pub jokes: Vec<String>,
    #[serde(default)]
    pub quotes: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonSection {
    pub section: String,
    pub duration: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub materials: Vec<String>,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Video,
    Article,
    Website,
    Book,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub url: String,
    pub channel_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl From<&Video> for Resource {
    fn from(video: &Video) -> Self {
        Resource {
            kind: ResourceKind::Video,
            title: video.title.clone(),
            url: video.url.clone(),
            description: Some(video.description.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VideoQuery {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    #[validate(length(min = 1, max = 50))]
    pub grade: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonPlan {
    pub id: String,
    pub topic: String,
    pub subject: String,
    pub grade: String,
    pub duration: String,
    pub learning_objectives: Vec<String>,
    pub lesson_structure: Vec<LessonSection>,
    pub activities: Vec<Activity>,
    pub assessment_questions: Vec<Question>,
    pub resources: Vec<Resource>,
    pub homework: Vec<String>,
    pub amazing_facts: Vec<String>,
    pub jokes: Vec<String>,
    pub quotes: Vec<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Row for the `lesson_plans` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLessonPlan {
    pub user_id: String,
    pub title: String,
    pub subject: String,
    pub grade: String,
    pub topic: String,
    pub content: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonPlanRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub subject: String,
    pub grade: String,
    pub topic: String,
    #[serde(default)]
    pub content: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationOrigins {
    pub lesson: ContentOrigin,
    pub quiz: ContentOrigin,
}

#[derive(Debug, Serialize)]
pub struct LessonPlanResponse {
    pub lesson_plan: LessonPlan,
    pub videos: Vec<Video>,
    /// `None` when the generated quiz had no usable questions
    pub quiz_session: Option<QuizView>,
    pub origins: GenerationOrigins,
    pub persisted: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DoubtRequest {
    #[validate(length(min = 1, max = 2000, message = "Question is required"))]
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoubtAnswer {
    pub answer: String,
    pub related_topics: Vec<String>,
    pub study_tips: Vec<String>,
}
