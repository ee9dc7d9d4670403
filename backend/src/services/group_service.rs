use crate::error::{AppError, AppResult};
use crate::models::{Group, NewGroup};
use crate::repositories::GroupRepository;
use crate::services::AuditTrailService;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Service for managing savings groups
pub struct GroupService {
    group_repo: Arc<GroupRepository>,
    audit: Arc<AuditTrailService>,
}

impl GroupService {
    pub fn new(group_repo: Arc<GroupRepository>, audit: Arc<AuditTrailService>) -> Self {
        Self { group_repo, audit }
    }

    /// Create a new group after checking its fields and cycle window
    pub async fn create_group(&self, new_group: NewGroup) -> AppResult<Group> {
        info!(
            "Creating group: name={}, duration={}, slots={}",
            new_group.name,
            new_group.duration_type.as_str(),
            new_group.max_slots
        );

        new_group.validate()?;

        let group = self.group_repo.create(&new_group).await?;

        info!("Created group {} ({})", group.name, group.id);
        self.audit.log_group_created(&group).await;
        Ok(group)
    }

    /// Fetch a group
    pub async fn get_group(&self, group_id: Uuid) -> AppResult<Group> {
        self.group_repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", group_id)))
    }

    /// All groups, newest first
    pub async fn list_groups(&self) -> AppResult<Vec<Group>> {
        Ok(self.group_repo.list().await?)
    }
}
