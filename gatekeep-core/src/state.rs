//! Application state traits for dependency injection
//!
//! Handlers are generic over [`HasServices`] so the same router can run
//! against the Postgres-backed `AppState` or an in-memory test state.

use crate::config::Config;
use crate::repository::{RoleRepository, UserRepository};
use crate::service::{RoleService, UserService};
use metrics_exporter_prometheus::PrometheusHandle;

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The role repository type
    type RoleRepo: RoleRepository;
    /// The user repository type
    type UserRepo: UserRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the role service
    fn role_service(&self) -> &RoleService<Self::RoleRepo>;

    /// Get the user service
    fn user_service(&self) -> &UserService<Self::UserRepo>;

    /// Prometheus handle, present when metrics are enabled
    fn prometheus_handle(&self) -> Option<&PrometheusHandle> {
        None
    }

    /// Check whether the database is reachable
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
