use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::{BackendError, BackendMode, HostedBackend};
use crate::metrics::track_backend_operation;
use crate::models::{
    group::{Group, GroupMember, GroupMemberView, NewGroup},
    lesson::{LessonPlanRecord, NewLessonPlan},
    quiz::{QuizResultRecord, StoredQuizResult},
    user::{AuthUser, NewUserProfile, UpstreamSession, UserProfile, UserRole},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the hosted GoTrue (`/auth/v1`) and PostgREST (`/rest/v1`) APIs.
pub struct SupabaseBackend {
    http: Client,
    base: Url,
    anon_key: String,
    service_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl GoTrueUser {
    fn into_auth_user(self, fallback_email: &str) -> AuthUser {
        let name = self
            .user_metadata
            .get("name")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        AuthUser {
            id: self.id,
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
            name,
        }
    }
}

/// Token grant, or a bare user when sign-up awaits email confirmation.
#[derive(Debug, Deserialize)]
struct GoTrueSession {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<GoTrueUser>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedGroup {
    groups: Option<Group>,
}

#[derive(Debug, Deserialize)]
struct MemberContact {
    name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddedMember {
    id: String,
    student_id: String,
    joined_at: DateTime<Utc>,
    users: Option<MemberContact>,
}

#[derive(Debug, Serialize)]
struct QuizResultRow<'a> {
    user_id: &'a str,
    lesson_plan_id: Option<&'a str>,
    score: u32,
    total_questions: usize,
    answers: &'a [Option<String>],
}

/// Pull the human-readable message out of a GoTrue/PostgREST error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| json.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Parse the total out of a `Content-Range: 0-9/42` (or `*/0`) header.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.trim().parse().ok()
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

impl SupabaseBackend {
    pub fn new(
        url: &str,
        anon_key: &str,
        service_key: Option<String>,
    ) -> Result<Self, BackendError> {
        let mut base = Url::parse(url)
            .map_err(|e| BackendError::Decode(format!("invalid backend URL: {}", e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base,
            anon_key: anon_key.to_string(),
            service_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base
            .join(path)
            .map_err(|e| BackendError::Decode(format!("invalid endpoint {}: {}", path, e)))
    }

    /// Table access authorizes as the service role when one is configured.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.service_key.as_deref().unwrap_or(&self.anon_key);
        request
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
    }

    async fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        Err(match status {
            StatusCode::CONFLICT => BackendError::Conflict(message),
            _ => BackendError::Status {
                status: status.as_u16(),
                message,
            },
        })
    }

    /// Auth endpoints surface their message verbatim on 4xx.
    async fn check_auth(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Auth(error_message(&body)));
        }
        Self::check(response).await
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, BackendError> {
        let url = self.endpoint(&format!("rest/v1/{}", table))?;
        let response = self
            .authorized(self.http.get(url))
            .query(query)
            .send()
            .await?;
        Self::check(response)
            .await?
            .json::<Vec<T>>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T, BackendError> {
        let url = self.endpoint(&format!("rest/v1/{}", table))?;
        let response = self
            .authorized(self.http.post(url))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        let mut rows = Self::check(response)
            .await?
            .json::<Vec<T>>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        if rows.is_empty() {
            return Err(BackendError::Decode(format!(
                "insert into {} returned no rows",
                table
            )));
        }
        Ok(rows.swap_remove(0))
    }

    async fn count(&self, table: &str, query: &[(&str, String)]) -> Result<u64, BackendError> {
        let url = self.endpoint(&format!("rest/v1/{}", table))?;
        let response = self
            .authorized(self.http.head(url))
            .header("Prefer", "count=exact")
            .query(&[("select", "id".to_string())])
            .query(query)
            .send()
            .await?;
        let response = Self::check(response).await?;
        response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| BackendError::Decode("missing Content-Range count".to_string()))
    }

    async fn token_request(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<UpstreamSession, BackendError> {
        let url = self.endpoint(path)?;
        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let session: GoTrueSession = Self::check_auth(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        let user = match (session.user, session.id) {
            (Some(user), _) => user.into_auth_user(email),
            (None, Some(id)) => AuthUser {
                id,
                email: session.email.unwrap_or_else(|| email.to_string()),
                name: None,
            },
            (None, None) => {
                return Err(BackendError::Decode(
                    "auth response carried no user".to_string(),
                ))
            }
        };

        Ok(UpstreamSession {
            user,
            access_token: session.access_token,
        })
    }
}

#[async_trait]
impl HostedBackend for SupabaseBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Live
    }

    async fn ping(&self) -> Result<(), BackendError> {
        let url = self.endpoint("auth/v1/health")?;
        let response = self
            .http
            .get(url)
            .header("apikey", &self.anon_key)
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UpstreamSession, BackendError> {
        track_backend_operation(
            "sign_in",
            "auth",
            self.token_request("auth/v1/token?grant_type=password", email, password),
        )
        .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<UpstreamSession, BackendError> {
        track_backend_operation(
            "sign_up",
            "auth",
            self.token_request("auth/v1/signup", email, password),
        )
        .await
    }

    async fn sign_out(&self, access_token: Option<&str>) -> Result<(), BackendError> {
        let Some(token) = access_token else {
            return Ok(());
        };
        let url = self.endpoint("auth/v1/logout")?;
        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, BackendError> {
        let rows: Vec<UserProfile> = track_backend_operation(
            "select",
            "users",
            self.select("users", &[("select", "*".into()), ("id", eq(user_id))]),
        )
        .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_profile(&self, profile: &NewUserProfile) -> Result<UserProfile, BackendError> {
        track_backend_operation("insert", "users", self.insert("users", profile)).await
    }

    async fn touch_last_login(
        &self,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), BackendError> {
        let url = self.endpoint("rest/v1/users")?;
        let request = self
            .authorized(self.http.patch(url))
            .query(&[("id", eq(user_id))])
            .json(&serde_json::json!({ "last_login": at }));
        track_backend_operation("update", "users", async move {
            Self::check(request.send().await?).await.map(|_| ())
        })
        .await
    }

    async fn find_user_by_email(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<Option<UserProfile>, BackendError> {
        let rows: Vec<UserProfile> = track_backend_operation(
            "select",
            "users",
            self.select(
                "users",
                &[
                    ("select", "*".into()),
                    ("email", eq(email)),
                    ("role", eq(role.as_str())),
                ],
            ),
        )
        .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_lesson_plan(
        &self,
        plan: &NewLessonPlan,
    ) -> Result<LessonPlanRecord, BackendError> {
        track_backend_operation("insert", "lesson_plans", self.insert("lesson_plans", plan)).await
    }

    async fn recent_lesson_plans(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<LessonPlanRecord>, BackendError> {
        track_backend_operation(
            "select",
            "lesson_plans",
            self.select(
                "lesson_plans",
                &[
                    ("select", "*".into()),
                    ("user_id", eq(user_id)),
                    ("order", "created_at.desc".into()),
                    ("limit", limit.to_string()),
                ],
            ),
        )
        .await
    }

    async fn count_lesson_plans(&self, user_id: &str) -> Result<u64, BackendError> {
        track_backend_operation(
            "count",
            "lesson_plans",
            self.count("lesson_plans", &[("user_id", eq(user_id))]),
        )
        .await
    }

    async fn insert_quiz_result(&self, result: &QuizResultRecord) -> Result<(), BackendError> {
        // The table has no correct_count column.
        let row = QuizResultRow {
            user_id: &result.user_id,
            lesson_plan_id: result.lesson_plan_id.as_deref(),
            score: result.score,
            total_questions: result.total_questions,
            answers: &result.answers,
        };
        let _: serde_json::Value = track_backend_operation(
            "insert",
            "quiz_results",
            self.insert("quiz_results", &row),
        )
        .await?;
        Ok(())
    }

    async fn quiz_results_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<StoredQuizResult>, BackendError> {
        track_backend_operation(
            "select",
            "quiz_results",
            self.select(
                "quiz_results",
                &[("select", "*".into()), ("user_id", eq(user_id))],
            ),
        )
        .await
    }

    async fn insert_group(&self, group: &NewGroup) -> Result<Group, BackendError> {
        track_backend_operation("insert", "groups", self.insert("groups", group)).await
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, BackendError> {
        let rows: Vec<Group> = track_backend_operation(
            "select",
            "groups",
            self.select("groups", &[("select", "*".into()), ("id", eq(group_id))]),
        )
        .await?;
        Ok(rows.into_iter().next())
    }

    async fn groups_for_teacher(&self, teacher_id: &str) -> Result<Vec<Group>, BackendError> {
        track_backend_operation(
            "select",
            "groups",
            self.select(
                "groups",
                &[
                    ("select", "*".into()),
                    ("teacher_id", eq(teacher_id)),
                    ("order", "created_at.desc".into()),
                ],
            ),
        )
        .await
    }

    async fn groups_for_student(&self, student_id: &str) -> Result<Vec<Group>, BackendError> {
        let rows: Vec<EmbeddedGroup> = track_backend_operation(
            "select",
            "group_members",
            self.select(
                "group_members",
                &[
                    ("select", "groups(*)".into()),
                    ("student_id", eq(student_id)),
                ],
            ),
        )
        .await?;
        Ok(rows.into_iter().filter_map(|row| row.groups).collect())
    }

    async fn count_groups_for_teacher(&self, teacher_id: &str) -> Result<u64, BackendError> {
        track_backend_operation(
            "count",
            "groups",
            self.count("groups", &[("teacher_id", eq(teacher_id))]),
        )
        .await
    }

    async fn count_memberships_for_student(
        &self,
        student_id: &str,
    ) -> Result<u64, BackendError> {
        track_backend_operation(
            "count",
            "group_members",
            self.count("group_members", &[("student_id", eq(student_id))]),
        )
        .await
    }

    async fn group_members(&self, group_id: &str) -> Result<Vec<GroupMemberView>, BackendError> {
        let rows: Vec<EmbeddedMember> = track_backend_operation(
            "select",
            "group_members",
            self.select(
                "group_members",
                &[
                    ("select", "id,student_id,joined_at,users(name,email)".into()),
                    ("group_id", eq(group_id)),
                ],
            ),
        )
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let (name, email) = row
                    .users
                    .map(|u| (u.name, u.email))
                    .unwrap_or_default();
                GroupMemberView {
                    id: row.id,
                    student_id: row.student_id,
                    name,
                    email,
                    joined_at: row.joined_at,
                }
            })
            .collect())
    }

    async fn insert_group_member(
        &self,
        group_id: &str,
        student_id: &str,
    ) -> Result<GroupMember, BackendError> {
        let row = serde_json::json!({ "group_id": group_id, "student_id": student_id });
        track_backend_operation(
            "insert",
            "group_members",
            self.insert("group_members", &row),
        )
        .await
    }
}
