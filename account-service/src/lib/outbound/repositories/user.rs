use async_trait::async_trait;
use auth::PasswordCredential;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use sqlx::Row;

use crate::audit::ActorContext;
use crate::audit::AuditTrail;
use crate::domain::user::models::CompanyId;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserField;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserStatus;
use crate::domain::user::ports::UserRepository;
use crate::role::models::Role;
use crate::role::models::RoleId;
use crate::role::models::RoleName;
use crate::user::errors::UserError;

const SELECT_USERS: &str = r#"
    SELECT u.id, u.full_name, u.email, u.position, u.role_id, u.company_id, u.status,
           u.password_hash, u.password_salt,
           u.created_at, u.created_by, u.created_by_role, u.modified_at, u.modified_by,
           r.name AS role_name, r.description AS role_description
    FROM users u
    JOIN roles r ON r.id = u.role_id
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        column: &str,
        value: FilterValue<'_>,
    ) -> Result<Option<User>, UserError> {
        let sql = format!("{} WHERE {} = $1", SELECT_USERS, column);
        let query = sqlx::query(&sql);
        let query = match value {
            FilterValue::Int(v) => query.bind(v),
            FilterValue::Text(v) => query.bind(v),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

enum FilterValue<'a> {
    Int(i32),
    Text(&'a str),
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(
        &self,
        user: NewUser,
        credential: PasswordCredential,
        actor: &ActorContext,
    ) -> Result<User, UserError> {
        let audit = AuditTrail::created(actor, Utc::now());

        let sql = format!(
            r#"
            WITH u AS (
                INSERT INTO users (full_name, email, position, role_id, company_id, status,
                                   password_hash, password_salt,
                                   created_at, created_by, created_by_role)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING *
            )
            {}
            "#,
            SELECT_USERS.replace("FROM users u", "FROM u")
        );

        let row = sqlx::query(&sql)
            .bind(user.full_name.as_str())
            .bind(user.email.as_str())
            .bind(user.position.as_deref())
            .bind(user.role_id.0)
            .bind(user.company_id.0)
            .bind(user.status.as_str())
            .bind(&credential.hash)
            .bind(&credential.salt)
            .bind(audit.created_at)
            .bind(audit.created_by.as_deref())
            .bind(audit.created_by_role.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &user.email, user.company_id, user.role_id))?;

        row_to_user(&row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        self.find_one("u.id", FilterValue::Int(id.0)).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.find_one("u.email", FilterValue::Text(email)).await
    }

    async fn find_by_company_id(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<User>, UserError> {
        self.find_one("u.company_id", FilterValue::Int(company_id.0)).await
    }

    async fn find_all_with_role(&self) -> Result<Vec<User>, UserError> {
        let sql = format!("{} ORDER BY u.id", SELECT_USERS);

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<User>, UserError> {
        let sql = format!("{} ORDER BY u.id OFFSET $1 LIMIT $2", SELECT_USERS);

        let rows = sqlx::query(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn update_partial(
        &self,
        user: &User,
        fields: &[UserField],
        actor: &ActorContext,
    ) -> Result<(), UserError> {
        let mut audit = user.audit.clone();
        audit.touch(actor, Utc::now());

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE users SET modified_at = ");
        builder.push_bind(audit.modified_at);
        builder.push(", modified_by = ");
        builder.push_bind(audit.modified_by);

        for field in fields {
            match field {
                UserField::FullName => {
                    builder.push(", full_name = ");
                    builder.push_bind(user.full_name.as_str());
                }
                UserField::Email => {
                    builder.push(", email = ");
                    builder.push_bind(user.email.as_str());
                }
                UserField::Position => {
                    builder.push(", position = ");
                    builder.push_bind(user.position.as_deref());
                }
                UserField::CompanyId => {
                    builder.push(", company_id = ");
                    builder.push_bind(user.company_id.0);
                }
                UserField::Role => {
                    builder.push(", role_id = ");
                    builder.push_bind(user.role_id.0);
                }
                UserField::Status => {
                    builder.push(", status = ");
                    builder.push_bind(user.status.as_str());
                }
                UserField::Credential => {
                    let credential = user.credential.as_ref();
                    builder.push(", password_hash = ");
                    builder.push_bind(credential.map(|c| c.hash.as_slice()));
                    builder.push(", password_salt = ");
                    builder.push_bind(credential.map(|c| c.salt.as_slice()));
                }
            }
        }

        builder.push(" WHERE id = ");
        builder.push_bind(user.id.0);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &user.email, user.company_id, user.role_id))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id));
        }

        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_write_error(
    e: sqlx::Error,
    email: &EmailAddress,
    company_id: CompanyId,
    role_id: RoleId,
) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("users_email_key") {
                return UserError::EmailAlreadyExists(email.as_str().to_string());
            }
            if db_err.constraint() == Some("users_company_id_key") {
                return UserError::CompanyIdAlreadyExists(company_id);
            }
        }
        if db_err.is_foreign_key_violation() {
            return UserError::UnknownRole(role_id);
        }
    }
    UserError::DatabaseError(e.to_string())
}

fn row_to_user(row: &PgRow) -> Result<User, UserError> {
    let column = |e: sqlx::Error| UserError::DatabaseError(e.to_string());

    let role_id = RoleId(row.try_get("role_id").map_err(column)?);
    let role_name: String = row.try_get("role_name").map_err(column)?;
    let status: String = row.try_get("status").map_err(column)?;

    let credential = PasswordCredential::from_columns(
        row.try_get("password_hash").map_err(column)?,
        row.try_get("password_salt").map_err(column)?,
    )?;

    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(column)?;

    Ok(User {
        id: UserId(row.try_get("id").map_err(column)?),
        full_name: FullName::new(row.try_get("full_name").map_err(column)?)?,
        email: EmailAddress::new(row.try_get("email").map_err(column)?)?,
        position: row.try_get("position").map_err(column)?,
        role_id,
        role: Some(Role {
            id: role_id,
            name: RoleName::new(role_name)
                .map_err(|e| UserError::DatabaseError(format!("Stored role name: {}", e)))?,
            description: row.try_get("role_description").map_err(column)?,
        }),
        company_id: CompanyId(row.try_get("company_id").map_err(column)?),
        status: status.parse::<UserStatus>()?,
        credential,
        audit: AuditTrail {
            created_at,
            created_by: row.try_get("created_by").map_err(column)?,
            created_by_role: row.try_get("created_by_role").map_err(column)?,
            modified_at: row.try_get("modified_at").map_err(column)?,
            modified_by: row.try_get("modified_by").map_err(column)?,
        },
    })
}
