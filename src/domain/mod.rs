//! Domain models and request/response shapes

pub mod claim;
pub mod common;
pub mod role;
pub mod tenant;
pub mod topic;
pub mod user;

pub use claim::{Claim, ClaimDto, CreateClaimInput, UpdateClaimInput};
pub use common::{canonicalize_name, AuthContext, Principal};
pub use role::{CreateRoleInput, Role, RoleDto, UpdateRoleInput};
pub use tenant::{CreateTenantInput, Tenant, TenantDto, UpdateTenantInput};
pub use topic::{
    CreateSubTopicInput, CreateTopicInput, SubTopic, SubTopicDto, SubTopicWithTopic, Topic,
    TopicDto, UpdateSubTopicInput, UpdateTopicInput,
};
pub use user::{LoginInput, RegisterInput, UpdateUserInput, User, UserDto, UserWithRole};
