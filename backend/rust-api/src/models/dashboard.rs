use serde::Serialize;

use super::lesson::LessonPlanRecord;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_lessons: u64,
    pub total_quizzes: u64,
    /// Mean of stored quiz percentages, rounded
    pub average_score: u32,
    /// Minutes, from the profile's `usage_time`
    pub time_spent: i64,
    pub groups: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityItem {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub grade: String,
    pub topic: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<LessonPlanRecord> for ActivityItem {
    fn from(record: LessonPlanRecord) -> Self {
        ActivityItem {
            id: record.id,
            title: record.title,
            subject: record.subject,
            grade: record.grade,
            topic: record.topic,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityItem>,
}
