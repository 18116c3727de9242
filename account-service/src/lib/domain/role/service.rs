use std::sync::Arc;

use async_trait::async_trait;

use crate::role::errors::RoleError;
use crate::role::models::NewRole;
use crate::role::models::Role;
use crate::role::models::RoleId;
use crate::role::ports::RoleRepository;
use crate::role::ports::RoleServicePort;

/// Domain service implementation for role operations.
pub struct RoleService<RR>
where
    RR: RoleRepository,
{
    repository: Arc<RR>,
}

impl<RR> RoleService<RR>
where
    RR: RoleRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<RR> RoleServicePort for RoleService<RR>
where
    RR: RoleRepository,
{
    async fn create_role(&self, role: NewRole) -> Result<Role, RoleError> {
        let created = self.repository.create(role).await?;
        tracing::info!(role_id = %created.id, role = %created.name, "Role created");
        Ok(created)
    }

    async fn get_role(&self, id: RoleId) -> Result<Role, RoleError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(RoleError::NotFound(id.to_string()))
    }

    async fn list_roles(&self) -> Result<Vec<Role>, RoleError> {
        self.repository.list_all().await
    }

    async fn delete_role(&self, id: RoleId) -> Result<(), RoleError> {
        let role = self.get_role(id).await?;

        let users = self.repository.count_users(id).await?;
        if users > 0 {
            return Err(RoleError::InUse {
                role: role.name.to_string(),
                users,
            });
        }

        if !self.repository.delete(id).await? {
            return Err(RoleError::NotFound(id.to_string()));
        }

        tracing::info!(role_id = %id, "Role deleted");
        Ok(())
    }
}
