use async_trait::async_trait;

use crate::role::errors::RoleError;
use crate::role::models::NewRole;
use crate::role::models::Role;
use crate::role::models::RoleId;

/// Port for role domain service operations.
#[async_trait]
pub trait RoleServicePort: Send + Sync + 'static {
    /// Create a new role.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Another role has this name
    /// * `DatabaseError` - Database operation failed
    async fn create_role(&self, role: NewRole) -> Result<Role, RoleError>;

    /// Retrieve role by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Role does not exist
    async fn get_role(&self, id: RoleId) -> Result<Role, RoleError>;

    /// Retrieve all roles ordered by identifier.
    async fn list_roles(&self) -> Result<Vec<Role>, RoleError>;

    /// Delete a role that no user references.
    ///
    /// # Errors
    /// * `NotFound` - Role does not exist
    /// * `InUse` - At least one user still has this role
    async fn delete_role(&self, id: RoleId) -> Result<(), RoleError>;
}

/// Persistence operations for roles.
#[async_trait]
pub trait RoleRepository: Send + Sync + 'static {
    async fn create(&self, role: NewRole) -> Result<Role, RoleError>;

    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, RoleError>;

    async fn list_all(&self) -> Result<Vec<Role>, RoleError>;

    /// Number of users referencing the role.
    async fn count_users(&self, id: RoleId) -> Result<i64, RoleError>;

    /// Remove role from storage.
    ///
    /// # Returns
    /// False if no role had this identifier
    async fn delete(&self, id: RoleId) -> Result<bool, RoleError>;
}
