use std::sync::Arc;
use thiserror::Error;

use crate::backend::{BackendError, HostedBackend};
use crate::middlewares::auth::JwtClaims;
use crate::models::{
    group::{
        AddMemberRequest, CreateGroupRequest, Group, GroupMemberView, GroupResponse, NewGroup,
        PersonSummary,
    },
    user::UserRole,
};

#[derive(Debug, Error)]
pub enum GroupError {
    #[error("Group not found")]
    NotFound,

    #[error("Only the group's teacher can do that")]
    Forbidden,

    #[error("Student not found with this email")]
    StudentNotFound,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub struct GroupService {
    backend: Arc<dyn HostedBackend>,
}

impl GroupService {
    pub fn new(backend: Arc<dyn HostedBackend>) -> Self {
        Self { backend }
    }

    /// Teachers see the groups they own with members; students see the groups they joined.
    pub async fn list(&self, claims: &JwtClaims) -> Result<Vec<GroupResponse>, GroupError> {
        let mut responses = Vec::new();
        if claims.is_teacher() {
            for group in self.backend.groups_for_teacher(&claims.sub).await? {
                let members = self.backend.group_members(&group.id).await?;
                responses.push(with_members(group, members));
            }
        } else {
            for group in self.backend.groups_for_student(&claims.sub).await? {
                responses.push(self.student_view(group).await?);
            }
        }
        Ok(responses)
    }

    pub async fn create(
        &self,
        claims: &JwtClaims,
        req: &CreateGroupRequest,
    ) -> Result<GroupResponse, GroupError> {
        if !claims.is_teacher() {
            return Err(GroupError::Forbidden);
        }

        let group = self
            .backend
            .insert_group(&NewGroup {
                teacher_id: claims.sub.clone(),
                name: req.name.trim().to_string(),
                description: req.description.trim().to_string(),
            })
            .await?;

        tracing::info!("Group created: {} by teacher {}", group.id, claims.sub);
        Ok(with_members(group, Vec::new()))
    }

    pub async fn get(&self, claims: &JwtClaims, group_id: &str) -> Result<GroupResponse, GroupError> {
        let group = self
            .backend
            .get_group(group_id)
            .await?
            .ok_or(GroupError::NotFound)?;

        if group.teacher_id == claims.sub {
            let members = self.backend.group_members(&group.id).await?;
            return Ok(with_members(group, members));
        }

        let members = self.backend.group_members(&group.id).await?;
        if members.iter().any(|m| m.student_id == claims.sub) {
            return self.student_view(group).await;
        }

        Err(GroupError::NotFound)
    }

    /// Lookup then insert; the two steps are not atomic.
    pub async fn add_member(
        &self,
        claims: &JwtClaims,
        group_id: &str,
        req: &AddMemberRequest,
    ) -> Result<GroupResponse, GroupError> {
        let group = self
            .backend
            .get_group(group_id)
            .await?
            .ok_or(GroupError::NotFound)?;
        if group.teacher_id != claims.sub {
            return Err(GroupError::Forbidden);
        }

        let student = self
            .backend
            .find_user_by_email(&req.email.trim().to_lowercase(), UserRole::Student)
            .await?
            .ok_or(GroupError::StudentNotFound)?;

        self.backend
            .insert_group_member(&group.id, &student.id)
            .await?;
        tracing::info!("Student {} added to group {}", student.id, group.id);

        let members = self.backend.group_members(&group.id).await?;
        Ok(with_members(group, members))
    }

    async fn student_view(&self, group: Group) -> Result<GroupResponse, GroupError> {
        let teacher = self
            .backend
            .get_profile(&group.teacher_id)
            .await?
            .map(|t| PersonSummary {
                name: t.name,
                email: t.email,
            });
        let member_count = self.backend.group_members(&group.id).await?.len();

        Ok(GroupResponse {
            id: group.id,
            name: group.name,
            description: group.description,
            teacher_id: group.teacher_id,
            teacher,
            members: None,
            member_count,
            created_at: group.created_at,
        })
    }
}

fn with_members(group: Group, members: Vec<GroupMemberView>) -> GroupResponse {
    GroupResponse {
        id: group.id,
        name: group.name,
        description: group.description,
        teacher_id: group.teacher_id,
        teacher: None,
        member_count: members.len(),
        members: Some(members),
        created_at: group.created_at,
    }
}
