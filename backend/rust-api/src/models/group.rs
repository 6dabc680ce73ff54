use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Row of the `groups` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: String,
    pub teacher_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroup {
    pub teacher_id: String,
    pub name: String,
    pub description: String,
}

/// Row of the `group_members` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupMember {
    pub id: String,
    pub group_id: String,
    pub student_id: String,
    pub joined_at: DateTime<Utc>,
}

/// Member joined with the student's `users` row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupMemberView {
    pub id: String,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonSummary {
    pub name: String,
    pub email: String,
}

/// Group response for the API (members for the owning teacher, teacher for students).
#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub teacher_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<PersonSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<GroupMemberView>>,
    pub member_count: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddMemberRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}
