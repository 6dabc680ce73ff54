use std::sync::Arc;

use crate::backend::HostedBackend;
use crate::middlewares::auth::JwtClaims;
use crate::models::dashboard::{ActivityItem, DashboardResponse, DashboardStats};

const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Read-only dashboard aggregation. Every backend failure is logged and zeroed.
pub struct DashboardService {
    backend: Arc<dyn HostedBackend>,
}

impl DashboardService {
    pub fn new(backend: Arc<dyn HostedBackend>) -> Self {
        Self { backend }
    }

    pub async fn overview(&self, claims: &JwtClaims) -> DashboardResponse {
        let (stats, recent_activity) = tokio::join!(self.stats(claims), self.recent(claims));
        DashboardResponse {
            stats,
            recent_activity,
        }
    }

    async fn stats(&self, claims: &JwtClaims) -> DashboardStats {
        let user_id = claims.sub.as_str();
        let groups = async {
            if claims.is_teacher() {
                self.backend.count_groups_for_teacher(user_id).await
            } else {
                self.backend.count_memberships_for_student(user_id).await
            }
        };

        let (lessons, results, profile, groups) = tokio::join!(
            self.backend.count_lesson_plans(user_id),
            self.backend.quiz_results_for_user(user_id),
            self.backend.get_profile(user_id),
            groups,
        );

        let total_lessons = lessons.unwrap_or_else(|e| {
            tracing::warn!("Failed to count lesson plans for {}: {}", user_id, e);
            0
        });
        let scores: Vec<u32> = results
            .map(|rows| rows.into_iter().map(|r| r.score).collect())
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to load quiz results for {}: {}", user_id, e);
                Vec::new()
            });
        let time_spent = match profile {
            Ok(profile) => profile.map(|p| p.usage_time).unwrap_or(0),
            Err(e) => {
                tracing::warn!("Failed to load profile for {}: {}", user_id, e);
                0
            }
        };
        let groups = groups.unwrap_or_else(|e| {
            tracing::warn!("Failed to count groups for {}: {}", user_id, e);
            0
        });

        DashboardStats {
            total_lessons,
            total_quizzes: scores.len() as u64,
            average_score: average_percentage(&scores),
            time_spent,
            groups,
        }
    }

    async fn recent(&self, claims: &JwtClaims) -> Vec<ActivityItem> {
        match self
            .backend
            .recent_lesson_plans(&claims.sub, RECENT_ACTIVITY_LIMIT)
            .await
        {
            Ok(plans) => plans.into_iter().map(ActivityItem::from).collect(),
            Err(e) => {
                tracing::warn!("Failed to load recent activity for {}: {}", claims.sub, e);
                Vec::new()
            }
        }
    }
}

/// Stored scores are already percentages; mean rounded half up.
pub fn average_percentage(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let n = scores.len() as u64;
    let sum: u64 = scores.iter().map(|&s| s as u64).sum();
    ((2 * sum + n) / (2 * n)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{InMemoryBackend, DEMO_USER_ID};
    use crate::models::{quiz::QuizResultRecord, user::UserRole};

    #[test]
    fn average_rounds_half_up() {
        assert_eq!(average_percentage(&[]), 0);
        assert_eq!(average_percentage(&[90, 100]), 95);
        assert_eq!(average_percentage(&[90, 91]), 91);
        assert_eq!(average_percentage(&[70, 80, 80]), 77);
    }

    #[tokio::test]
    async fn overview_reflects_backend_rows() {
        let backend = Arc::new(InMemoryBackend::seeded());
        for score in [80, 100] {
            backend
                .insert_quiz_result(&QuizResultRecord {
                    user_id: DEMO_USER_ID.to_string(),
                    lesson_plan_id: None,
                    score,
                    correct_count: (score / 10) as usize,
                    total_questions: 10,
                    answers: vec![None; 10],
                })
                .await
                .unwrap();
        }

        let claims = JwtClaims {
            sub: DEMO_USER_ID.to_string(),
            sid: "sid".to_string(),
            role: UserRole::Teacher,
            email: "demo@edugenie.com".to_string(),
            exp: 0,
            iat: 0,
        };
        let overview = DashboardService::new(backend).overview(&claims).await;

        assert_eq!(overview.stats.total_quizzes, 2);
        assert_eq!(overview.stats.average_score, 90);
        assert_eq!(overview.stats.groups, 2);
        assert_eq!(overview.stats.total_lessons, 0);
        assert!(overview.recent_activity.is_empty());
    }
}
