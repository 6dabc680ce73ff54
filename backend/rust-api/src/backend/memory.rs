use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BackendError, BackendMode, HostedBackend};
use crate::models::{
    group::{Group, GroupMember, GroupMemberView, NewGroup},
    lesson::{LessonPlanRecord, NewLessonPlan},
    quiz::{QuizResultRecord, StoredQuizResult},
    user::{AuthUser, NewUserProfile, UpstreamSession, UserProfile, UserRole},
};

/// Every demo-mode login resolves to this user.
pub const DEMO_USER_ID: &str = "demo-user-123";
pub const DEMO_USER_EMAIL: &str = "demo@edugenie.com";
const DEMO_ACCESS_TOKEN: &str = "demo-token";

#[derive(Default)]
struct Tables {
    users: HashMap<String, UserProfile>,
    lesson_plans: Vec<LessonPlanRecord>,
    quiz_results: Vec<StoredQuizResult>,
    groups: Vec<Group>,
    group_members: Vec<GroupMember>,
}

/// Demo-mode backend. Auth accepts any credentials and the tables live in memory.
#[derive(Default)]
pub struct InMemoryBackend {
    tables: RwLock<Tables>,
}

fn email_local_part(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demo teacher with two groups and three students.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut tables = Tables::default();

        let profile = |id: &str, email: &str, name: &str, role: UserRole| UserProfile {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role,
            created_at: now,
            last_login: None,
            usage_time: 0,
        };

        let people = [
            profile(DEMO_USER_ID, DEMO_USER_EMAIL, "Demo User", UserRole::Teacher),
            profile("demo-student-john", "john@example.com", "John Doe", UserRole::Student),
            profile("demo-student-jane", "jane@example.com", "Jane Smith", UserRole::Student),
            profile("demo-student-mike", "mike@example.com", "Mike Johnson", UserRole::Student),
        ];
        for person in people {
            tables.users.insert(person.id.clone(), person);
        }

        let science = Group {
            id: "demo-group-science".to_string(),
            teacher_id: DEMO_USER_ID.to_string(),
            name: "Grade 10 Science".to_string(),
            description: "Advanced science concepts for grade 10 students".to_string(),
            created_at: now,
        };
        let maths = Group {
            id: "demo-group-maths".to_string(),
            teacher_id: DEMO_USER_ID.to_string(),
            name: "Mathematics Club".to_string(),
            description: "Extra mathematics practice and problem solving".to_string(),
            created_at: now,
        };

        for (group_id, student_id) in [
            (&science.id, "demo-student-john"),
            (&science.id, "demo-student-jane"),
            (&maths.id, "demo-student-mike"),
        ] {
            tables.group_members.push(GroupMember {
                id: new_id(),
                group_id: group_id.clone(),
                student_id: student_id.to_string(),
                joined_at: now,
            });
        }
        tables.groups.push(science);
        tables.groups.push(maths);

        Self {
            tables: RwLock::new(tables),
        }
    }

    fn session_for(id: String, email: &str) -> UpstreamSession {
        UpstreamSession {
            user: AuthUser {
                id,
                email: email.to_string(),
                name: Some(email_local_part(email)),
            },
            access_token: Some(DEMO_ACCESS_TOKEN.to_string()),
        }
    }
}

#[async_trait]
impl HostedBackend for InMemoryBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Demo
    }

    async fn ping(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<UpstreamSession, BackendError> {
        Ok(Self::session_for(DEMO_USER_ID.to_string(), email))
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<UpstreamSession, BackendError> {
        Ok(Self::session_for(new_id(), email))
    }

    async fn sign_out(&self, _access_token: Option<&str>) -> Result<(), BackendError> {
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, BackendError> {
        Ok(self.tables.read().await.users.get(user_id).cloned())
    }

    async fn insert_profile(&self, profile: &NewUserProfile) -> Result<UserProfile, BackendError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&profile.id)
            || tables
                .users
                .values()
                .any(|u| u.email.eq_ignore_ascii_case(&profile.email))
        {
            return Err(BackendError::Conflict("User already registered".to_string()));
        }

        let row = UserProfile {
            id: profile.id.clone(),
            email: profile.email.clone(),
            name: profile.name.clone(),
            role: profile.role,
            created_at: Utc::now(),
            last_login: None,
            usage_time: profile.usage_time,
        };
        tables.users.insert(row.id.clone(), row.clone());
        Ok(row)
    }

    async fn touch_last_login(
        &self,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), BackendError> {
        if let Some(user) = self.tables.write().await.users.get_mut(user_id) {
            user.last_login = Some(at);
        }
        Ok(())
    }

    async fn find_user_by_email(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<Option<UserProfile>, BackendError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.role == role && u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert_lesson_plan(
        &self,
        plan: &NewLessonPlan,
    ) -> Result<LessonPlanRecord, BackendError> {
        let record = LessonPlanRecord {
            id: new_id(),
            user_id: plan.user_id.clone(),
            title: plan.title.clone(),
            subject: plan.subject.clone(),
            grade: plan.grade.clone(),
            topic: plan.topic.clone(),
            content: plan.content.clone(),
            created_at: Utc::now(),
        };
        self.tables.write().await.lesson_plans.push(record.clone());
        Ok(record)
    }

    async fn recent_lesson_plans(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<LessonPlanRecord>, BackendError> {
        let tables = self.tables.read().await;
        // Insertion order is creation order.
        Ok(tables
            .lesson_plans
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_lesson_plans(&self, user_id: &str) -> Result<u64, BackendError> {
        let tables = self.tables.read().await;
        Ok(tables
            .lesson_plans
            .iter()
            .filter(|p| p.user_id == user_id)
            .count() as u64)
    }

    async fn insert_quiz_result(&self, result: &QuizResultRecord) -> Result<(), BackendError> {
        let answers = serde_json::to_value(&result.answers)
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        let stored = StoredQuizResult {
            id: new_id(),
            user_id: result.user_id.clone(),
            lesson_plan_id: result.lesson_plan_id.clone(),
            score: result.score,
            total_questions: result.total_questions,
            answers,
            completed_at: Utc::now(),
        };
        self.tables.write().await.quiz_results.push(stored);
        Ok(())
    }

    async fn quiz_results_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<StoredQuizResult>, BackendError> {
        let tables = self.tables.read().await;
        Ok(tables
            .quiz_results
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_group(&self, group: &NewGroup) -> Result<Group, BackendError> {
        let row = Group {
            id: new_id(),
            teacher_id: group.teacher_id.clone(),
            name: group.name.clone(),
            description: group.description.clone(),
            created_at: Utc::now(),
        };
        self.tables.write().await.groups.push(row.clone());
        Ok(row)
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, BackendError> {
        let tables = self.tables.read().await;
        Ok(tables.groups.iter().find(|g| g.id == group_id).cloned())
    }

    async fn groups_for_teacher(&self, teacher_id: &str) -> Result<Vec<Group>, BackendError> {
        let tables = self.tables.read().await;
        Ok(tables
            .groups
            .iter()
            .filter(|g| g.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn groups_for_student(&self, student_id: &str) -> Result<Vec<Group>, BackendError> {
        let tables = self.tables.read().await;
        Ok(tables
            .group_members
            .iter()
            .filter(|m| m.student_id == student_id)
            .filter_map(|m| tables.groups.iter().find(|g| g.id == m.group_id))
            .cloned()
            .collect())
    }

    async fn count_groups_for_teacher(&self, teacher_id: &str) -> Result<u64, BackendError> {
        Ok(self.groups_for_teacher(teacher_id).await?.len() as u64)
    }

    async fn count_memberships_for_student(
        &self,
        student_id: &str,
    ) -> Result<u64, BackendError> {
        let tables = self.tables.read().await;
        Ok(tables
            .group_members
            .iter()
            .filter(|m| m.student_id == student_id)
            .count() as u64)
    }

    async fn group_members(&self, group_id: &str) -> Result<Vec<GroupMemberView>, BackendError> {
        let tables = self.tables.read().await;
        Ok(tables
            .group_members
            .iter()
            .filter(|m| m.group_id == group_id)
            .filter_map(|m| {
                tables.users.get(&m.student_id).map(|u| GroupMemberView {
                    id: m.id.clone(),
                    student_id: m.student_id.clone(),
                    name: u.name.clone(),
                    email: u.email.clone(),
                    joined_at: m.joined_at,
                })
            })
            .collect())
    }

    async fn insert_group_member(
        &self,
        group_id: &str,
        student_id: &str,
    ) -> Result<GroupMember, BackendError> {
        let mut tables = self.tables.write().await;
        if !tables.groups.iter().any(|g| g.id == group_id) {
            return Err(BackendError::NotFound { entity: "Group" });
        }
        if tables
            .group_members
            .iter()
            .any(|m| m.group_id == group_id && m.student_id == student_id)
        {
            return Err(BackendError::Conflict(
                "Student is already a member of this group".to_string(),
            ));
        }

        let member = GroupMember {
            id: new_id(),
            group_id: group_id.to_string(),
            student_id: student_id.to_string(),
            joined_at: Utc::now(),
        };
        tables.group_members.push(member.clone());
        Ok(member)
    }
}
