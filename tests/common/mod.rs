//! Common test utilities: in-memory repositories and a test application
//! state, so router-level tests run without a database.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use tenantd::config::{
    Config, DatabaseConfig, ExemptPaths, HashingConfig, JwtConfig, MiddlewareConfig,
};
use tenantd::domain::{Claim, Role, SubTopic, SubTopicWithTopic, Tenant, Topic, User, UserWithRole};
use tenantd::error::Result;
use tenantd::jwt::JwtManager;
use tenantd::repository::{
    ClaimChanges, ClaimRepository, NewUser, RoleRepository, TenantRepository, TopicRepository,
    UserChanges, UserRepository,
};
use tenantd::service::{
    AuthService, ClaimService, RoleService, TenantService, TopicService, UserService,
};
use tenantd::state::HasServices;

pub const TEST_SECRET: &str = "integration-test-secret-key";
pub const TEST_ISSUER: &str = "tenantd-test";

pub fn test_config() -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 0,
        database: DatabaseConfig {
            url: "mysql://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            issuer: TEST_ISSUER.to_string(),
            ttl_minutes: 60,
        },
        // Low-cost parameters keep the test suite fast
        hashing: HashingConfig {
            memory_kib: 1024,
            time_cost: 1,
            parallelism: 1,
        },
        middleware: MiddlewareConfig::default(),
        exempt_paths: ExemptPaths::default(),
    }
}

fn next(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

// ---------------------------------------------------------------- tenants

#[derive(Default)]
pub struct InMemoryTenants {
    rows: Mutex<Vec<Tenant>>,
    next_id: AtomicI64,
}

#[async_trait]
impl TenantRepository for InMemoryTenants {
    async fn find_all(&self) -> Result<Vec<Tenant>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Tenant>> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn exists_by_name(&self, name: &str, exclude_id: Option<i64>) -> Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|t| t.name == name && exclude_id.map_or(true, |ex| t.id != ex)))
    }

    async fn create(&self, name: &str) -> Result<i64> {
        let id = next(&self.next_id);
        self.rows.lock().unwrap().push(Tenant {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: None,
        });
        Ok(id)
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(tenant) = rows.iter_mut().find(|t| t.id == id) {
            tenant.name = name.to_string();
            tenant.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.rows.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }
}

// ------------------------------------------------------------------ roles

#[derive(Default)]
pub struct InMemoryRoles {
    rows: Mutex<Vec<Role>>,
    next_id: AtomicI64,
}

#[async_trait]
impl RoleRepository for InMemoryRoles {
    async fn find_all(&self, tenant_id: i64) -> Result<Vec<Role>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64, tenant_id: i64) -> Result<Option<Role>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id && r.tenant_id == tenant_id)
            .cloned())
    }

    async fn exists_by_name(
        &self,
        name: &str,
        tenant_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        Ok(self.rows.lock().unwrap().iter().any(|r| {
            r.name == name && r.tenant_id == tenant_id && exclude_id.map_or(true, |ex| r.id != ex)
        }))
    }

    async fn exists_by_id(&self, id: i64, tenant_id: i64) -> Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.id == id && r.tenant_id == tenant_id))
    }

    async fn create(&self, name: &str, tenant_id: i64) -> Result<i64> {
        let id = next(&self.next_id);
        self.rows.lock().unwrap().push(Role {
            id,
            name: name.to_string(),
            tenant_id,
            created_at: Utc::now(),
            updated_at: None,
        });
        Ok(id)
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(role) = rows.iter_mut().find(|r| r.id == id) {
            role.name = name.to_string();
            role.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.rows.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

// ------------------------------------------------------------------ users

pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
    next_id: AtomicI64,
    roles: Arc<InMemoryRoles>,
}

impl InMemoryUsers {
    pub fn new(roles: Arc<InMemoryRoles>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(0),
            roles,
        }
    }

    fn role_name(&self, role_id: i64) -> String {
        self.roles
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == role_id)
            .map(|r| r.name.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self.rows.lock().unwrap().iter().any(|u| u.email == email))
    }

    async fn exists_in_tenant(&self, user_id: i64, tenant_id: i64) -> Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.id == user_id && u.tenant_id == tenant_id))
    }

    async fn find_all(&self, tenant_id: i64) -> Result<Vec<UserWithRole>> {
        let rows = self.rows.lock().unwrap().clone();
        Ok(rows
            .iter()
            .filter(|u| u.tenant_id == tenant_id)
            .map(|u| UserWithRole {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                vsc_account: u.vsc_account.clone(),
                role_id: u.role_id,
                role_name: self.role_name(u.role_id),
            })
            .collect())
    }

    async fn find_with_role(&self, id: i64, tenant_id: i64) -> Result<Option<UserWithRole>> {
        let rows = self.rows.lock().unwrap().clone();
        Ok(rows
            .iter()
            .find(|u| u.id == id && u.tenant_id == tenant_id)
            .map(|u| UserWithRole {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                vsc_account: u.vsc_account.clone(),
                role_id: u.role_id,
                role_name: self.role_name(u.role_id),
            }))
    }

    async fn find_by_id(&self, id: i64, tenant_id: i64) -> Result<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id && u.tenant_id == tenant_id)
            .cloned())
    }

    async fn exists_by_email_in_tenant(
        &self,
        email: &str,
        tenant_id: i64,
        exclude_id: i64,
    ) -> Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.email == email && u.tenant_id == tenant_id && u.id != exclude_id))
    }

    async fn exists_by_vsc_account(
        &self,
        vsc_account: &str,
        tenant_id: i64,
        exclude_id: i64,
    ) -> Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.vsc_account == vsc_account && u.tenant_id == tenant_id && u.id != exclude_id))
    }

    async fn create(&self, input: &NewUser) -> Result<i64> {
        let id = next(&self.next_id);
        self.rows.lock().unwrap().push(User {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            vsc_account: input.vsc_account.clone(),
            password: input.password.clone(),
            role_id: input.role_id,
            tenant_id: input.tenant_id,
            created_at: Utc::now(),
            updated_at: None,
        });
        Ok(id)
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(user) = rows.iter_mut().find(|u| u.id == id) {
            if let Some(name) = &changes.name {
                user.name = name.clone();
            }
            if let Some(email) = &changes.email {
                user.email = email.clone();
            }
            if let Some(vsc_account) = &changes.vsc_account {
                user.vsc_account = vsc_account.clone();
            }
            if let Some(role_id) = changes.role_id {
                user.role_id = role_id;
            }
            user.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.rows.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }
}

// ----------------------------------------------------------------- topics

#[derive(Default)]
pub struct InMemoryTopics {
    topics: Mutex<Vec<Topic>>,
    sub_topics: Mutex<Vec<SubTopic>>,
    next_id: AtomicI64,
}

#[async_trait]
impl TopicRepository for InMemoryTopics {
    async fn find_all(&self, tenant_id: i64) -> Result<Vec<Topic>> {
        Ok(self
            .topics
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64, tenant_id: i64) -> Result<Option<Topic>> {
        Ok(self
            .topics
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id && t.tenant_id == tenant_id)
            .cloned())
    }

    async fn exists_by_name(
        &self,
        name: &str,
        tenant_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        Ok(self.topics.lock().unwrap().iter().any(|t| {
            t.name == name && t.tenant_id == tenant_id && exclude_id.map_or(true, |ex| t.id != ex)
        }))
    }

    async fn create(&self, name: &str, tenant_id: i64) -> Result<i64> {
        let id = next(&self.next_id);
        self.topics.lock().unwrap().push(Topic {
            id,
            name: name.to_string(),
            tenant_id,
            created_at: Utc::now(),
            updated_at: None,
        });
        Ok(id)
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<()> {
        let mut topics = self.topics.lock().unwrap();
        if let Some(topic) = topics.iter_mut().find(|t| t.id == id) {
            topic.name = name.to_string();
            topic.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.topics.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }

    async fn find_sub_topics(
        &self,
        topic_id: i64,
        tenant_id: i64,
    ) -> Result<Vec<SubTopicWithTopic>> {
        let topic_name = self
            .topics
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == topic_id)
            .map(|t| t.name.clone())
            .unwrap_or_default();

        Ok(self
            .sub_topics
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.topic_id == topic_id && s.tenant_id == tenant_id)
            .map(|s| SubTopicWithTopic {
                id: s.id,
                name: s.name.clone(),
                topic_id: s.topic_id,
                topic_name: topic_name.clone(),
            })
            .collect())
    }

    async fn find_sub_topic(
        &self,
        id: i64,
        topic_id: i64,
        tenant_id: i64,
    ) -> Result<Option<SubTopic>> {
        Ok(self
            .sub_topics
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id && s.topic_id == topic_id && s.tenant_id == tenant_id)
            .cloned())
    }

    async fn sub_topic_exists_by_name(
        &self,
        name: &str,
        topic_id: i64,
        tenant_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        Ok(self.sub_topics.lock().unwrap().iter().any(|s| {
            s.name == name
                && s.topic_id == topic_id
                && s.tenant_id == tenant_id
                && exclude_id.map_or(true, |ex| s.id != ex)
        }))
    }

    async fn create_sub_topic(&self, name: &str, topic_id: i64, tenant_id: i64) -> Result<i64> {
        let id = next(&self.next_id);
        self.sub_topics.lock().unwrap().push(SubTopic {
            id,
            name: name.to_string(),
            topic_id,
            tenant_id,
            created_at: Utc::now(),
            updated_at: None,
        });
        Ok(id)
    }

    async fn update_sub_topic_name(&self, id: i64, name: &str) -> Result<()> {
        let mut sub_topics = self.sub_topics.lock().unwrap();
        if let Some(sub_topic) = sub_topics.iter_mut().find(|s| s.id == id) {
            sub_topic.name = name.to_string();
            sub_topic.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete_sub_topic(&self, id: i64) -> Result<()> {
        self.sub_topics.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}

// ----------------------------------------------------------------- claims

#[derive(Default)]
pub struct InMemoryClaims {
    rows: Mutex<Vec<Claim>>,
    next_id: AtomicI64,
}

#[async_trait]
impl ClaimRepository for InMemoryClaims {
    async fn find_all(&self, tenant_id: i64) -> Result<Vec<Claim>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64, tenant_id: i64) -> Result<Option<Claim>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id && c.tenant_id == tenant_id)
            .cloned())
    }

    async fn exists_by_name(
        &self,
        name: &str,
        tenant_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        Ok(self.rows.lock().unwrap().iter().any(|c| {
            c.name == name && c.tenant_id == tenant_id && exclude_id.map_or(true, |ex| c.id != ex)
        }))
    }

    async fn create<'a>(
        &self,
        name: &str,
        description: Option<&'a str>,
        tenant_id: i64,
    ) -> Result<i64> {
        let id = next(&self.next_id);
        self.rows.lock().unwrap().push(Claim {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            tenant_id,
            created_at: Utc::now(),
            updated_at: None,
        });
        Ok(id)
    }

    async fn update(&self, id: i64, changes: &ClaimChanges) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(claim) = rows.iter_mut().find(|c| c.id == id) {
            if let Some(name) = &changes.name {
                claim.name = name.clone();
            }
            if let Some(description) = &changes.description {
                claim.description = Some(description.clone());
            }
            claim.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.rows.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

// ------------------------------------------------------------- test state

/// Application state wired to in-memory repositories.
#[derive(Clone)]
pub struct TestState {
    config: Arc<Config>,
    jwt_manager: JwtManager,
    pub tenants: Arc<InMemoryTenants>,
    pub roles: Arc<InMemoryRoles>,
    pub users: Arc<InMemoryUsers>,
    pub topics: Arc<InMemoryTopics>,
    pub claims: Arc<InMemoryClaims>,
    auth_service: Arc<AuthService<InMemoryUsers>>,
    tenant_service: Arc<TenantService<InMemoryTenants>>,
    user_service: Arc<UserService<InMemoryUsers, InMemoryRoles>>,
    role_service: Arc<RoleService<InMemoryRoles>>,
    topic_service: Arc<TopicService<InMemoryTopics>>,
    claim_service: Arc<ClaimService<InMemoryClaims>>,
}

impl TestState {
    pub fn new(config: Config) -> Self {
        let jwt_manager = JwtManager::new(config.jwt.clone());

        let tenants = Arc::new(InMemoryTenants::default());
        let roles = Arc::new(InMemoryRoles::default());
        let users = Arc::new(InMemoryUsers::new(roles.clone()));
        let topics = Arc::new(InMemoryTopics::default());
        let claims = Arc::new(InMemoryClaims::default());

        Self {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                jwt_manager.clone(),
                config.hashing.clone(),
            )),
            tenant_service: Arc::new(TenantService::new(tenants.clone())),
            user_service: Arc::new(UserService::new(users.clone(), roles.clone())),
            role_service: Arc::new(RoleService::new(roles.clone())),
            topic_service: Arc::new(TopicService::new(topics.clone())),
            claim_service: Arc::new(ClaimService::new(claims.clone())),
            config: Arc::new(config),
            jwt_manager,
            tenants,
            roles,
            users,
            topics,
            claims,
        }
    }

    /// Seed one tenant and one role, returning (tenant_id, role_id).
    pub async fn seed_tenant_and_role(&self) -> (i64, i64) {
        let tenant_id = self.tenants.create("ACME").await.unwrap();
        let role_id = self.roles.create("ADMIN", tenant_id).await.unwrap();
        (tenant_id, role_id)
    }

    pub fn mint_token(&self, user_id: i64, email: &str) -> String {
        self.jwt_manager.mint(user_id, email).unwrap()
    }
}

impl HasServices for TestState {
    type Tenants = InMemoryTenants;
    type Users = InMemoryUsers;
    type Roles = InMemoryRoles;
    type Topics = InMemoryTopics;
    type Claims = InMemoryClaims;

    fn config(&self) -> &Config {
        &self.config
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    fn user_repo(&self) -> &Arc<Self::Users> {
        &self.users
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

// ---------------------------------------------------------------- helpers

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use tower::ServiceExt;

pub fn test_router() -> (Router, TestState) {
    let state = TestState::new(test_config());
    let router = tenantd::server::build_router(state.clone());
    (router, state)
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
