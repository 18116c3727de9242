use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;

use crate::audit::ActorContext;
use crate::domain::user::models::CompanyId;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserField;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Credential service: authentication, registration and password changes.
///
/// Holds no state of its own besides the injected repository; every
/// uniqueness check is a fresh store query. Concurrent registrations of the
/// same email are only stopped by the store's unique constraints.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Register the first administrator unless the email is already taken.
    ///
    /// Writes are stamped with [`ActorContext::system`] since no caller
    /// exists yet.
    ///
    /// # Returns
    /// The created user, or `None` when an account with the email exists
    pub async fn ensure_administrator(
        &self,
        admin: NewUser,
        password: &str,
    ) -> Result<Option<User>, UserError> {
        if let Some(existing) = self.repository.find_by_email(admin.email.as_str()).await? {
            tracing::info!(user_id = %existing.id, "Bootstrap administrator already present");
            return Ok(None);
        }

        let created = self
            .register(admin, password, &ActorContext::system())
            .await?;

        tracing::info!(
            user_id = %created.id,
            role_id = %created.role_id,
            "Bootstrap administrator registered"
        );
        Ok(Some(created))
    }

    async fn ensure_email_free(&self, email: &str) -> Result<(), UserError> {
        match self.repository.find_by_email(email).await? {
            Some(_) => Err(UserError::EmailAlreadyExists(email.to_string())),
            None => Ok(()),
        }
    }

    async fn ensure_company_id_free(
        &self,
        company_id: CompanyId,
    ) -> Result<(), UserError> {
        match self.repository.find_by_company_id(company_id).await? {
            Some(_) => Err(UserError::CompanyIdAlreadyExists(company_id)),
            None => Ok(()),
        }
    }

    async fn store_new_password(
        &self,
        mut user: User,
        new_password: &str,
        actor: &ActorContext,
    ) -> Result<(), UserError> {
        user.credential = Some(self.password_hasher.derive(new_password)?);

        self.repository
            .update_partial(&user, &[UserField::Credential], actor)
            .await?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, UserError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Ok(None);
        }

        let Some(user) = self.repository.find_by_email(email).await? else {
            tracing::debug!("Authentication failed: unknown email");
            return Ok(None);
        };

        let Some(credential) = user.credential.as_ref() else {
            tracing::debug!(user_id = %user.id, "Authentication failed: no credential set");
            return Ok(None);
        };

        if !self.password_hasher.verify_credential(password, credential)? {
            tracing::debug!(user_id = %user.id, "Authentication failed: wrong password");
            return Ok(None);
        }

        Ok(Some(user))
    }

    async fn register(
        &self,
        user: NewUser,
        password: &str,
        actor: &ActorContext,
    ) -> Result<User, UserError> {
        if password.trim().is_empty() {
            return Err(UserError::Validation("Password is required".to_string()));
        }

        self.ensure_email_free(user.email.as_str()).await?;
        self.ensure_company_id_free(user.company_id).await?;

        let credential = self.password_hasher.derive(password)?;
        let created = self.repository.create(user, credential, actor).await?;

        tracing::info!(
            user_id = %created.id,
            role_id = %created.role_id,
            "User registered"
        );

        Ok(created)
    }

    async fn change_password(
        &self,
        id: UserId,
        new_password: &str,
        actor: &ActorContext,
    ) -> Result<bool, UserError> {
        let Some(user) = self.repository.find_by_id(id).await? else {
            return Ok(false);
        };

        self.store_new_password(user, new_password, actor).await?;
        Ok(true)
    }

    async fn change_password_verified(
        &self,
        id: UserId,
        new_password: &str,
        old_password: &str,
        actor: &ActorContext,
    ) -> Result<bool, UserError> {
        let Some(user) = self.repository.find_by_id(id).await? else {
            return Ok(false);
        };

        let verified = match user.credential.as_ref() {
            Some(credential) => self
                .password_hasher
                .verify_credential(old_password, credential)?,
            None => false,
        };

        if !verified {
            tracing::info!(user_id = %id, "Password change refused: old password mismatch");
            return Ok(false);
        }

        self.store_new_password(user, new_password, actor).await?;
        Ok(true)
    }

    async fn update_user(
        &self,
        command: UpdateUserCommand,
        actor: &ActorContext,
    ) -> Result<(), UserError> {
        let stored = self
            .repository
            .find_by_id(command.id)
            .await?
            .ok_or(UserError::NotFound(command.id))?;

        if stored.email != command.email {
            self.ensure_email_free(command.email.as_str()).await?;
        }

        if stored.company_id != command.company_id {
            self.ensure_company_id_free(command.company_id).await?;
        }

        let role = if stored.role_id == command.role_id {
            stored.role
        } else {
            None
        };

        let updated = User {
            full_name: command.full_name,
            email: command.email,
            position: command.position,
            role_id: command.role_id,
            role,
            company_id: command.company_id,
            status: command.status,
            ..stored
        };

        self.repository
            .update_partial(&updated, &UserField::PROFILE, actor)
            .await?;

        tracing::info!(user_id = %updated.id, "User updated");
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.find_all_with_role().await
    }

    async fn list_users_page(&self, page: PageRequest) -> Result<Vec<User>, UserError> {
        tracing::debug!(page = page.page(), page_size = page.page_size(), "Listing users");
        self.repository.find_page(page.offset(), page.limit()).await
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, UserError> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            tracing::info!(user_id = %id, "User deleted");
        }
        Ok(deleted)
    }
}
