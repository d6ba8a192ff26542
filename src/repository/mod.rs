//! Data access layer
//!
//! One repository trait per entity with a sqlx/MySQL implementation. The
//! traits are automocked in tests so services can be unit-tested without a
//! database.

pub mod claim;
pub mod role;
pub mod tenant;
pub mod topic;
pub mod user;

pub use claim::{ClaimChanges, ClaimRepository, ClaimRepositoryImpl};
pub use role::{RoleRepository, RoleRepositoryImpl};
pub use tenant::{TenantRepository, TenantRepositoryImpl};
pub use topic::{TopicRepository, TopicRepositoryImpl};
pub use user::{NewUser, UserChanges, UserRepository, UserRepositoryImpl};
