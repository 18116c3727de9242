use anyhow::anyhow;
use anyhow::Context;

use crate::config::BootstrapConfig;
use crate::role::ports::RoleServicePort;
use crate::user::models::CompanyId;
use crate::user::models::EmailAddress;
use crate::user::models::FullName;
use crate::user::models::NewUser;
use crate::user::models::User;
use crate::user::models::UserStatus;
use crate::user::ports::UserRepository;
use crate::user::service::UserService;

/// Create the configured administrator account on a store that lacks it.
///
/// Runs once at startup, before the router accepts requests. The account
/// gets the role named `admin_role`, which must already exist.
///
/// # Returns
/// The created user, or `None` when the email is already registered
pub async fn bootstrap_administrator<UR>(
    users: &UserService<UR>,
    roles: &dyn RoleServicePort,
    admin_role: &str,
    settings: &BootstrapConfig,
) -> anyhow::Result<Option<User>>
where
    UR: UserRepository,
{
    let role = roles
        .list_roles()
        .await?
        .into_iter()
        .find(|role| role.name.as_str() == admin_role)
        .ok_or_else(|| anyhow!("Administrator role '{}' does not exist", admin_role))?;

    let admin = NewUser {
        full_name: FullName::new(settings.admin_name.clone())
            .context("Invalid bootstrap.admin_name")?,
        email: EmailAddress::new(settings.admin_email.clone())
            .context("Invalid bootstrap.admin_email")?,
        position: None,
        role_id: role.id,
        company_id: CompanyId(settings.admin_company_id),
        status: UserStatus::Active,
    };

    let created = users
        .ensure_administrator(admin, &settings.admin_password)
        .await?;

    Ok(created)
}
