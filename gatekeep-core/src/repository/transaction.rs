//! Scoped database transactions
//!
//! A [`ScopedTransaction`] is opened at the start of every service operation.
//! Dropping it without a successful [`ScopedTransaction::commit`] rolls the
//! transaction back, so every early return is a rollback.

use crate::error::{AppError, Result};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

pub struct ScopedTransaction {
    scope: &'static str,
    tx: Option<Transaction<'static, Postgres>>,
}

impl ScopedTransaction {
    /// Acquire a connection from the pool and issue `BEGIN`.
    pub async fn begin(pool: &PgPool, scope: &'static str) -> Result<Self> {
        let tx = pool.begin().await?;
        tracing::trace!(scope, "Transaction opened");
        Ok(Self {
            scope,
            tx: Some(tx),
        })
    }

    /// Connection bound to the open transaction.
    pub fn conn(&mut self) -> Result<&mut PgConnection> {
        let scope = self.scope;
        self.tx.as_deref_mut().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("{} transaction already committed", scope))
        })
    }

    /// Make the transaction's changes durable. Only the first call commits.
    pub async fn commit(&mut self) -> Result<()> {
        let tx = self.tx.take().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("{} transaction already committed", self.scope))
        })?;
        tx.commit().await?;
        tracing::trace!(scope = self.scope, "Transaction committed");
        Ok(())
    }
}

impl Drop for ScopedTransaction {
    fn drop(&mut self) {
        // The inner sqlx transaction issues ROLLBACK when dropped.
        if self.tx.is_some() {
            tracing::trace!(scope = self.scope, "Rolling back uncommitted transaction");
        }
    }
}
