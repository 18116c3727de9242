use async_trait::async_trait;
use auth::PasswordCredential;

use crate::audit::ActorContext;
use crate::user::errors::UserError;
use crate::user::models::CompanyId;
use crate::user::models::NewUser;
use crate::user::models::PageRequest;
use crate::user::models::UpdateUserCommand;
use crate::user::models::User;
use crate::user::models::UserField;
use crate::user::models::UserId;

/// Port for account and credential operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Check an email/password pair.
    ///
    /// Does not look at the account status; callers reject inactive accounts.
    ///
    /// # Returns
    /// The matching user, or `None` when either input is blank, no user has
    /// the email, or the password does not verify
    ///
    /// # Errors
    /// * `MalformedCredential` - Stored hash or salt is corrupt
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, UserError>;

    /// Register a new user with a password.
    ///
    /// # Errors
    /// * `Validation` - Password is empty or whitespace only
    /// * `EmailAlreadyExists` - Email is already registered (checked first)
    /// * `CompanyIdAlreadyExists` - Company id is already registered
    /// * `UnknownRole` - Role does not exist
    /// * `DatabaseError` - Database operation failed
    async fn register(
        &self,
        user: NewUser,
        password: &str,
        actor: &ActorContext,
    ) -> Result<User, UserError>;

    /// Replace a user's password without checking the current one.
    ///
    /// # Returns
    /// False if no user has this id
    ///
    /// # Errors
    /// * `Validation` - New password is empty or whitespace only
    async fn change_password(
        &self,
        id: UserId,
        new_password: &str,
        actor: &ActorContext,
    ) -> Result<bool, UserError>;

    /// Replace a user's password after verifying the current one.
    ///
    /// # Returns
    /// False if no user has this id or the old password does not verify;
    /// the stored credential is then left untouched
    ///
    /// A blank old password is an input error, not a mismatch.
    ///
    /// # Errors
    /// * `Validation` - A password is empty or whitespace only
    /// * `MalformedCredential` - Stored hash or salt is corrupt
    async fn change_password_verified(
        &self,
        id: UserId,
        new_password: &str,
        old_password: &str,
        actor: &ActorContext,
    ) -> Result<bool, UserError>;

    /// Replace the profile fields of a user. Never touches the credential.
    ///
    /// Email and company id uniqueness is only rechecked for the fields that
    /// differ from the stored record.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `CompanyIdAlreadyExists` - New company id is already registered
    async fn update_user(
        &self,
        command: UpdateUserCommand,
        actor: &ActorContext,
    ) -> Result<(), UserError>;

    /// Retrieve user (with role) by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_user(&self, id: UserId) -> Result<User, UserError>;

    /// Retrieve all users with their roles.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve one page of users with their roles, ordered by id.
    async fn list_users_page(&self, page: PageRequest) -> Result<Vec<User>, UserError>;

    /// Delete a user.
    ///
    /// # Returns
    /// False if no user has this id
    async fn delete_user(&self, id: UserId) -> Result<bool, UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Every call is a fresh query against the store. Writes commit on their own
/// and stamp the audit trail from the given actor.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user together with its credential.
    ///
    /// # Returns
    /// The stored user with its assigned id and role
    ///
    /// # Errors
    /// * `EmailAlreadyExists` / `CompanyIdAlreadyExists` - Unique constraint violated
    /// * `UnknownRole` - Role reference does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        user: NewUser,
        credential: PasswordCredential,
        actor: &ActorContext,
    ) -> Result<User, UserError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Exact, case-sensitive match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    async fn find_by_company_id(&self, company_id: CompanyId)
        -> Result<Option<User>, UserError>;

    /// All users with their role, ordered by id.
    async fn find_all_with_role(&self) -> Result<Vec<User>, UserError>;

    /// A window of users with their role, ordered by id.
    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<User>, UserError>;

    /// Write only the listed fields of `user`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` / `CompanyIdAlreadyExists` - Unique constraint violated
    /// * `UnknownRole` - Role reference does not exist
    async fn update_partial(
        &self,
        user: &User,
        fields: &[UserField],
        actor: &ActorContext,
    ) -> Result<(), UserError>;

    /// Remove user from storage.
    ///
    /// # Returns
    /// False if no user had this identifier
    async fn delete(&self, id: UserId) -> Result<bool, UserError>;
}
