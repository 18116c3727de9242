use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::role::errors::RoleError;
use crate::role::models::NewRole;
use crate::role::models::Role;
use crate::role::models::RoleId;
use crate::role::models::RoleName;
use crate::role::ports::RoleRepository;

pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn create(&self, role: NewRole) -> Result<Role, RoleError> {
        let row = sqlx::query(
            r#"
            INSERT INTO roles (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(role.name.as_str())
        .bind(role.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("roles_name_key") {
                    return RoleError::NameAlreadyExists(role.name.to_string());
                }
            }
            RoleError::DatabaseError(e.to_string())
        })?;

        row_to_role(&row)
    }

    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, RoleError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description
            FROM roles
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RoleError::DatabaseError(e.to_string()))?;

        row.as_ref().map(row_to_role).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Role>, RoleError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description
            FROM roles
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RoleError::DatabaseError(e.to_string()))?;

        rows.iter().map(row_to_role).collect()
    }

    async fn count_users(&self, id: RoleId) -> Result<i64, RoleError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role_id = $1")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RoleError::DatabaseError(e.to_string()))
    }

    async fn delete(&self, id: RoleId) -> Result<bool, RoleError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(e) => {
                let restricted = e
                    .as_database_error()
                    .is_some_and(|db_err| db_err.is_foreign_key_violation());
                if restricted {
                    // A user was assigned between the count and the delete
                    let users = self.count_users(id).await?;
                    return Err(RoleError::InUse {
                        role: id.to_string(),
                        users,
                    });
                }
                Err(RoleError::DatabaseError(e.to_string()))
            }
        }
    }
}

fn row_to_role(row: &PgRow) -> Result<Role, RoleError> {
    let column = |e: sqlx::Error| RoleError::DatabaseError(e.to_string());

    Ok(Role {
        id: RoleId(row.try_get("id").map_err(column)?),
        name: RoleName::new(row.try_get("name").map_err(column)?)?,
        description: row.try_get("description").map_err(column)?,
    })
}
