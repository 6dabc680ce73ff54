use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Teacher,
    #[default]
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Teacher => "teacher",
            UserRole::Student => "student",
        }
    }
}

/// Row of the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    /// Minutes spent in the app
    #[serde(default)]
    pub usage_time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub usage_time: i64,
}

/// Identity returned by the hosted auth service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    /// From `user_metadata.name` when the service has one
    #[serde(default)]
    pub name: Option<String>,
}

/// Signed-in session from the hosted auth service.
#[derive(Debug, Clone)]
pub struct UpstreamSession {
    pub user: AuthUser,
    /// Absent when sign-up still needs email confirmation.
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    pub role: UserRole,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: AuthUser,
    pub profile: Option<UserProfile>,
    /// "live" or "demo"
    pub mode: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: AuthUser,
    pub profile: Option<UserProfile>,
}
