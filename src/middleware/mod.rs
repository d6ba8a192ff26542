//! HTTP middleware for Tenantd
//!
//! - Token gate: Bearer JWT verification (runs first)
//! - Tenant gate: X-TENANT-ID validation and membership check (runs second,
//!   consumes the token gate's output)
//!
//! Both gates skip the same exempt-path list from configuration.

pub mod auth;
pub mod tenant;

pub use auth::token_gate;
pub use tenant::{tenant_gate, TENANT_HEADER};
