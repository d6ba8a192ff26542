//! Application state trait for dependency injection
//!
//! Abstracts the application state so the same router and middleware work
//! with the production `AppState` and with test fixtures backed by mock or
//! in-memory repositories.

use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{
    ClaimRepository, RoleRepository, TenantRepository, TopicRepository, UserRepository,
};
use crate::service::{
    AuthService, ClaimService, RoleService, TenantService, TopicService, UserService,
};
use std::sync::Arc;

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The tenant repository type
    type Tenants: TenantRepository;
    /// The user repository type
    type Users: UserRepository;
    /// The role repository type
    type Roles: RoleRepository;
    /// The topic repository type
    type Topics: TopicRepository;
    /// The claim repository type
    type Claims: ClaimRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the JWT manager
    fn jwt_manager(&self) -> &JwtManager;

    /// Get the user repository (the tenant gate's membership query)
    fn user_repo(&self) -> &Arc<Self::Users>;

    /// Get the authentication service
    fn auth_service(&self) -> &AuthService<Self::Users>;

    /// Get the tenant service
    fn tenant_service(&self) -> &TenantService<Self::Tenants>;

    /// Get the user service
    fn user_service(&self) -> &UserService<Self::Users, Self::Roles>;

    /// Get the role service
    fn role_service(&self) -> &RoleService<Self::Roles>;

    /// Get the topic service
    fn topic_service(&self) -> &TopicService<Self::Topics>;

    /// Get the claim service
    fn claim_service(&self) -> &ClaimService<Self::Claims>;
}
