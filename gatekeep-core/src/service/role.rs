//! Role business logic

use crate::domain::validation::validate_request;
use crate::domain::{Role, RoleCreationRequest, RoleUpdateRequest};
use crate::error::{AppError, Result};
use crate::repository::RoleRepository;
use std::sync::Arc;

const NAME_REQUIRED: &str = "Name parameter is mandatory";
const ROLE_NOT_FOUND: &str = "No role found with the given name";
const ROLE_EXISTS: &str = "Role already existing";

pub struct RoleService<R: RoleRepository> {
    repo: Arc<R>,
}

impl<R: RoleRepository> RoleService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every role when `query` is empty, otherwise the roles whose visible
    /// name contains it. Read-only; the transaction is never committed.
    pub async fn search_by_visible_name(&self, query: &str) -> Result<Vec<Role>> {
        let mut tx = self.repo.begin().await?;
        let roles = if query.is_empty() {
            tx.list().await?
        } else {
            tx.search_by_visible_name(query).await?
        };
        tracing::debug!(query, count = roles.len(), "Role search");
        Ok(roles)
    }

    /// Missing rows and failed lookups are both reported as bad input.
    pub async fn get(&self, name: &str) -> Result<Role> {
        require_name(name)?;

        let mut tx = self.repo.begin().await?;
        let role = tx
            .find_by_name(name)
            .await
            .map_err(|e| {
                tracing::debug!(role = %name, "Role lookup failed: {}", e);
                AppError::BadInput(ROLE_NOT_FOUND.to_string())
            })?
            .ok_or_else(|| AppError::BadInput(ROLE_NOT_FOUND.to_string()))?;
        tx.commit().await?;

        Ok(role)
    }

    pub async fn create(&self, request: &RoleCreationRequest) -> Result<()> {
        validate_request(request)?;

        let mut tx = self.repo.begin().await?;
        if tx.find_by_name(&request.name).await?.is_some() {
            tracing::warn!(role = %request.name, "Role already exists");
            return Err(AppError::Conflict(ROLE_EXISTS.to_string()));
        }
        tx.insert(&Role::from(request)).await?;
        tx.commit().await?;

        tracing::info!(role = %request.name, "Role created");
        Ok(())
    }

    pub async fn update(&self, name: &str, request: &RoleUpdateRequest) -> Result<()> {
        require_name(name)?;
        validate_request(request)?;

        let mut tx = self.repo.begin().await?;
        let affected = tx.update_visible_name(name, &request.visible_name).await?;
        if affected == 0 {
            return Err(AppError::NotFound(ROLE_NOT_FOUND.to_string()));
        }
        tx.commit().await?;

        tracing::info!(role = %name, "Role updated");
        Ok(())
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        require_name(name)?;

        let mut tx = self.repo.begin().await?;
        let affected = tx.delete(name).await?;
        if affected == 0 {
            return Err(AppError::NotFound(ROLE_NOT_FOUND.to_string()));
        }
        tx.commit().await?;

        tracing::info!(role = %name, "Role deleted");
        Ok(())
    }
}

fn require_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AppError::BadInput(NAME_REQUIRED.to_string()));
    }
    Ok(())
}
