//! Data access layer (Repository pattern)
//!
//! Each repository hands out one transaction per service operation; the
//! transaction object is the only way to touch its table.

pub mod role;
pub mod transaction;
pub mod user;

pub use role::{RoleRepository, RoleTransaction};
pub use transaction::ScopedTransaction;
pub use user::{UserRepository, UserTransaction};

use sqlx::PgPool;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DbPool {
    pool: PgPool,
}

impl DbPool {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Round-trip a trivial statement to confirm the database is reachable.
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
