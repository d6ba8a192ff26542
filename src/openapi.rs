//! OpenAPI 3.0 documentation assembly
//!
//! Aggregates the domain schemas into a single OpenAPI specification,
//! served via Swagger UI at `/swagger` and ReDoc at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tenantd API",
        version = "0.3.0",
        description = "Multi-tenant Admin Service Backend API"
    ),
    tags(
        (name = "Auth", description = "Login and registration"),
        (name = "Tenants", description = "Tenant administration"),
        (name = "Users", description = "Tenant-scoped user administration"),
        (name = "Roles", description = "Tenant-scoped roles"),
        (name = "Topics", description = "Tenant-scoped topics and sub-topics"),
        (name = "Claims", description = "Tenant-scoped claims"),
    ),
    components(schemas(
        // Shared response types
        crate::api::IdResponse,
        crate::api::TokenResponse,
        crate::api::RegisterResponse,

        // Tenant domain
        crate::domain::TenantDto,
        crate::domain::CreateTenantInput,
        crate::domain::UpdateTenantInput,

        // User domain
        crate::domain::UserDto,
        crate::domain::UpdateUserInput,
        crate::domain::LoginInput,
        crate::domain::RegisterInput,

        // Role domain
        crate::domain::RoleDto,
        crate::domain::CreateRoleInput,
        crate::domain::UpdateRoleInput,

        // Topic domain
        crate::domain::TopicDto,
        crate::domain::SubTopicDto,
        crate::domain::CreateTopicInput,
        crate::domain::UpdateTopicInput,
        crate::domain::CreateSubTopicInput,
        crate::domain::UpdateSubTopicInput,

        // Claim domain
        crate::domain::ClaimDto,
        crate::domain::CreateClaimInput,
        crate::domain::UpdateClaimInput,
    ))
)]
pub struct ApiDoc;
