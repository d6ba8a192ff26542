//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::middleware::{tenant_gate, token_gate};
use crate::migration;
use crate::openapi::ApiDoc;
use crate::repository::{
    ClaimRepositoryImpl, RoleRepositoryImpl, TenantRepositoryImpl, TopicRepositoryImpl,
    UserRepositoryImpl,
};
use crate::service::{
    AuthService, ClaimService, RoleService, TenantService, TopicService, UserService,
};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    jwt_manager: JwtManager,
    user_repo: Arc<UserRepositoryImpl>,
    auth_service: Arc<AuthService<UserRepositoryImpl>>,
    tenant_service: Arc<TenantService<TenantRepositoryImpl>>,
    user_service: Arc<UserService<UserRepositoryImpl, RoleRepositoryImpl>>,
    role_service: Arc<RoleService<RoleRepositoryImpl>>,
    topic_service: Arc<TopicService<TopicRepositoryImpl>>,
    claim_service: Arc<ClaimService<ClaimRepositoryImpl>>,
}

impl AppState {
    pub fn new(config: Config, pool: MySqlPool) -> Self {
        let jwt_manager = JwtManager::new(config.jwt.clone());

        let tenant_repo = Arc::new(TenantRepositoryImpl::new(pool.clone()));
        let user_repo = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let role_repo = Arc::new(RoleRepositoryImpl::new(pool.clone()));
        let topic_repo = Arc::new(TopicRepositoryImpl::new(pool.clone()));
        let claim_repo = Arc::new(ClaimRepositoryImpl::new(pool.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(
                user_repo.clone(),
                jwt_manager.clone(),
                config.hashing.clone(),
            )),
            tenant_service: Arc::new(TenantService::new(tenant_repo)),
            user_service: Arc::new(UserService::new(user_repo.clone(), role_repo.clone())),
            role_service: Arc::new(RoleService::new(role_repo)),
            topic_service: Arc::new(TopicService::new(topic_repo)),
            claim_service: Arc::new(ClaimService::new(claim_repo)),
            config: Arc::new(config),
            db_pool: pool,
            jwt_manager,
            user_repo,
        }
    }
}

impl HasServices for AppState {
    type Tenants = TenantRepositoryImpl;
    type Users = UserRepositoryImpl;
    type Roles = RoleRepositoryImpl;
    type Topics = TopicRepositoryImpl;
    type Claims = ClaimRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    fn user_repo(&self) -> &Arc<Self::Users> {
        &self.user_repo
    }

    fn auth_service(&self) -> &AuthService<Self::Users> {
        &self.auth_service
    }

    fn tenant_service(&self) -> &TenantService<Self::Tenants> {
        &self.tenant_service
    }

    fn user_service(&self) -> &UserService<Self::Users, Self::Roles> {
        &self.user_service
    }

    fn role_service(&self) -> &RoleService<Self::Roles> {
        &self.role_service
    }

    fn topic_service(&self) -> &TopicService<Self::Topics> {
        &self.topic_service
    }

    fn claim_service(&self) -> &ClaimService<Self::Claims> {
        &self.claim_service
    }
}

/// Build the HTTP router with a generic state type.
///
/// Generic over [`HasServices`] so the same routing works for the
/// production `AppState` and for test states backed by in-memory
/// repositories.
pub fn build_router<S: HasServices>(state: S) -> Router {
    let middleware = state.config().middleware.clone();

    let mut router = Router::new()
        // Health endpoint (exempt path "/")
        .route("/", get(api::health::health))
        // Auth endpoints
        .route("/api/v1/auth/login", post(api::auth::login::<S>))
        .route("/api/v1/auth/register", post(api::auth::register::<S>))
        // Tenant endpoints
        .route(
            "/api/v1/tenants",
            get(api::tenant::list::<S>).post(api::tenant::create::<S>),
        )
        .route(
            "/api/v1/tenants/{id}",
            axum::routing::patch(api::tenant::update::<S>).delete(api::tenant::delete::<S>),
        )
        // Role endpoints
        .route(
            "/api/v1/roles",
            get(api::role::list::<S>).post(api::role::create::<S>),
        )
        .route(
            "/api/v1/roles/{id}",
            axum::routing::patch(api::role::update::<S>).delete(api::role::delete::<S>),
        )
        // Topic endpoints, with nested sub-topics
        .route(
            "/api/v1/topics",
            get(api::topic::list::<S>).post(api::topic::create::<S>),
        )
        .route(
            "/api/v1/topics/{id}",
            axum::routing::patch(api::topic::update::<S>).delete(api::topic::delete::<S>),
        )
        .route(
            "/api/v1/topics/{id}/subtopics",
            get(api::topic::list_sub_topics::<S>).post(api::topic::create_sub_topic::<S>),
        )
        .route(
            "/api/v1/topics/{id}/subtopics/{subId}",
            axum::routing::patch(api::topic::update_sub_topic::<S>)
                .delete(api::topic::delete_sub_topic::<S>),
        )
        // Claim endpoints
        .route(
            "/api/v1/claims",
            get(api::claim::list::<S>).post(api::claim::create::<S>),
        )
        .route(
            "/api/v1/claims/{id}",
            axum::routing::patch(api::claim::update::<S>).delete(api::claim::delete::<S>),
        )
        // User endpoints
        .route("/api/v1/users", get(api::user::list::<S>))
        .route(
            "/api/v1/users/{id}",
            get(api::user::get::<S>)
                .patch(api::user::update::<S>)
                .delete(api::user::delete::<S>),
        )
        .with_state(state.clone());

    // Gate ordering is a hard dependency: the token gate must run before
    // the tenant gate, so it is added as the outermost layer.
    if middleware.enable_tenant_gate {
        router = router.layer(from_fn_with_state(state.clone(), tenant_gate::<S>));
    }
    if middleware.enable_auth_gate {
        router = router.layer(from_fn_with_state(state.clone(), token_gate::<S>));
    }

    if middleware.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router = router.layer(cors);
    }
    if middleware.enable_trace {
        router = router.layer(TraceLayer::new_for_http());
    }

    // API documentation, exempt paths /swagger and /docs
    router
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/docs", ApiDoc::openapi()))
}

/// Connect to the database, run migrations, and serve HTTP until shutdown.
pub async fn run(config: Config) -> Result<()> {
    migration::ensure_database_exists(&config).await?;

    let pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    migration::run_migrations(&pool).await?;

    info!("Exempt paths: {:?}", config.exempt_paths.as_slice());

    let state = AppState::new(config.clone(), pool);
    let router = build_router(state);

    let listener = TcpListener::bind(config.http_addr()).await?;
    info!("HTTP server ready on {}", config.http_addr());
    axum::serve(listener, router).await?;

    Ok(())
}
