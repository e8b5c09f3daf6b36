//! User repository

use super::transaction::ScopedTransaction;
use crate::domain::User;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::PgPool;

/// Opens the transaction a single user operation runs in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UserTransaction>>;
}

/// Statements available inside a user transaction.
///
/// Dropping the value without calling [`UserTransaction::commit`] rolls back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserTransaction: Send {
    async fn find_by_email(&mut self, email: &str) -> Result<Option<User>>;
    async fn insert(&mut self, user: &User) -> Result<()>;
    /// Sets `verified = true` for every row with this email; returns rows affected
    async fn mark_verified(&mut self, email: &str) -> Result<u64>;
    async fn commit(&mut self) -> Result<()>;
}

pub struct UserRepositoryImpl {
    pool: PgPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn begin(&self) -> Result<Box<dyn UserTransaction>> {
        let scope = ScopedTransaction::begin(&self.pool, "users").await?;
        Ok(Box::new(PgUserTransaction { scope }))
    }
}

struct PgUserTransaction {
    scope: ScopedTransaction,
}

#[async_trait]
impl UserTransaction for PgUserTransaction {
    async fn find_by_email(&mut self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT first_name, last_name, email, password, verified
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.scope.conn()?)
        .await?;

        Ok(user)
    }

    async fn insert(&mut self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, email, password, verified)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.verified)
        .execute(self.scope.conn()?)
        .await?;

        Ok(())
    }

    async fn mark_verified(&mut self, email: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE users SET verified = true WHERE email = $1")
            .bind(email)
            .execute(self.scope.conn()?)
            .await?;

        Ok(result.rows_affected())
    }

    async fn commit(&mut self) -> Result<()> {
        self.scope.commit().await
    }
}
