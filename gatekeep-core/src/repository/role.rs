//! Role repository

use super::transaction::ScopedTransaction;
use crate::domain::Role;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::PgPool;

/// Opens the transaction a single role operation runs in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn RoleTransaction>>;
}

/// Statements available inside a role transaction.
///
/// Dropping the value without calling [`RoleTransaction::commit`] rolls back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleTransaction: Send {
    async fn list(&mut self) -> Result<Vec<Role>>;
    /// Roles whose `visible_name` matches `%pattern%` (case-sensitive LIKE)
    async fn search_by_visible_name(&mut self, pattern: &str) -> Result<Vec<Role>>;
    async fn find_by_name(&mut self, name: &str) -> Result<Option<Role>>;
    async fn insert(&mut self, role: &Role) -> Result<()>;
    /// Returns the number of rows affected
    async fn update_visible_name(&mut self, name: &str, visible_name: &str) -> Result<u64>;
    /// Returns the number of rows affected
    async fn delete(&mut self, name: &str) -> Result<u64>;
    async fn commit(&mut self) -> Result<()>;
}

pub struct RoleRepositoryImpl {
    pool: PgPool,
}

impl RoleRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for RoleRepositoryImpl {
    async fn begin(&self) -> Result<Box<dyn RoleTransaction>> {
        let scope = ScopedTransaction::begin(&self.pool, "roles").await?;
        Ok(Box::new(PgRoleTransaction { scope }))
    }
}

/// A concurrent create that slipped past the existence check surfaces as a
/// primary key violation.
fn map_insert_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict("Role already existing".to_string())
        }
        other => AppError::Database(other),
    }
}

struct PgRoleTransaction {
    scope: ScopedTransaction,
}

#[async_trait]
impl RoleTransaction for PgRoleTransaction {
    async fn list(&mut self) -> Result<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>("SELECT name, visible_name FROM roles")
            .fetch_all(self.scope.conn()?)
            .await?;

        Ok(roles)
    }

    async fn search_by_visible_name(&mut self, pattern: &str) -> Result<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT name, visible_name FROM roles WHERE visible_name LIKE CONCAT('%', $1, '%')",
        )
        .bind(pattern)
        .fetch_all(self.scope.conn()?)
        .await?;

        Ok(roles)
    }

    async fn find_by_name(&mut self, name: &str) -> Result<Option<Role>> {
        let role = sqlx::query_as::<_, Role>(
            "SELECT name, visible_name FROM roles WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(self.scope.conn()?)
        .await?;

        Ok(role)
    }

    async fn insert(&mut self, role: &Role) -> Result<()> {
        sqlx::query("INSERT INTO roles (name, visible_name) VALUES ($1, $2)")
            .bind(&role.name)
            .bind(&role.visible_name)
            .execute(self.scope.conn()?)
            .await
            .map_err(map_insert_error)?;

        Ok(())
    }

    async fn update_visible_name(&mut self, name: &str, visible_name: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE roles SET visible_name = $1 WHERE name = $2")
            .bind(visible_name)
            .bind(name)
            .execute(self.scope.conn()?)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&mut self, name: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM roles WHERE name = $1")
            .bind(name)
            .execute(self.scope.conn()?)
            .await?;

        Ok(result.rows_affected())
    }

    async fn commit(&mut self) -> Result<()> {
        self.scope.commit().await
    }
}
