//! User business logic

use crate::crypto::PasswordDeriver;
use crate::domain::User;
use crate::error::{AppError, Result};
use crate::repository::UserRepository;
use std::sync::Arc;

const USER_EXISTS: &str = "User already exists";
const USER_NOT_FOUND: &str = "No user found with the given email";

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
    passwords: PasswordDeriver,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>, passwords: PasswordDeriver) -> Self {
        Self { repo, passwords }
    }

    /// Register a new, unverified user.
    ///
    /// The existence check and the insert share one transaction but nothing
    /// at the storage level stops two concurrent registrations of the same
    /// email from both succeeding.
    pub async fn registration(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<()> {
        let mut tx = self.repo.begin().await?;
        if tx.find_by_email(email).await?.is_some() {
            tracing::warn!("Registration rejected, email already in use");
            return Err(AppError::BadRequest(USER_EXISTS.to_string()));
        }

        let stored = self.passwords.derive(password)?;
        let user = User::for_registration(first_name, last_name, email, stored);
        tx.insert(&user).await?;
        tx.commit().await?;

        tracing::info!(source = ?self.passwords.source(), "User registered");
        Ok(())
    }

    /// Mark the user verified. Verifying an already verified user succeeds.
    pub async fn verify(&self, email: &str) -> Result<()> {
        let mut tx = self.repo.begin().await?;
        tx.find_by_email(email)
            .await
            .map_err(|e| {
                tracing::debug!("User lookup failed: {}", e);
                AppError::BadInput(USER_NOT_FOUND.to_string())
            })?
            .ok_or_else(|| AppError::BadInput(USER_NOT_FOUND.to_string()))?;

        tx.mark_verified(email).await?;
        tx.commit().await?;

        tracing::info!("User verified");
        Ok(())
    }
}
