//! Configuration management for Tenantd

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Password hashing configuration
    pub hashing: HashingConfig,
    /// Middleware feature toggles
    pub middleware: MiddlewareConfig,
    /// Paths exempt from both the token gate and the tenant gate.
    ///
    /// A single list shared by both gates; matching is by exact path.
    pub exempt_paths: ExemptPaths,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub ttl_minutes: i64,
}

/// Argon2id cost parameters used when hashing new passwords.
///
/// Verification reads its parameters from the stored hash string, so these
/// can change without invalidating existing hashes.
#[derive(Debug, Clone)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            time_cost: 1,
            parallelism: 4,
        }
    }
}

/// Per-layer middleware toggles
#[derive(Debug, Clone)]
pub struct MiddlewareConfig {
    pub enable_auth_gate: bool,
    pub enable_tenant_gate: bool,
    pub enable_cors: bool,
    pub enable_trace: bool,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            enable_auth_gate: true,
            enable_tenant_gate: true,
            enable_cors: true,
            enable_trace: true,
        }
    }
}

/// Ordered set of exact paths that skip authentication and tenant checks.
#[derive(Debug, Clone)]
pub struct ExemptPaths {
    paths: Vec<String>,
}

impl ExemptPaths {
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }

    /// Exact-match check; no prefix or glob semantics.
    pub fn is_exempt(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }
}

impl Default for ExemptPaths {
    fn default() -> Self {
        Self::new(
            [
                "/",
                "/swagger",
                "/docs",
                "/api/v1/auth/login",
                "/api/v1/auth/register",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        )
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .unwrap_or(2),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").context("JWT_SECRET is required")?,
                issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "tenantd".to_string()),
                ttl_minutes: env::var("JWT_TTL_MINUTES")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .unwrap_or(60),
            },
            hashing: HashingConfig {
                memory_kib: env::var("HASH_ARGON2_MEMORY_KIB")
                    .unwrap_or_else(|_| "65536".to_string())
                    .parse()
                    .unwrap_or(64 * 1024),
                time_cost: env::var("HASH_ARGON2_TIME")
                    .unwrap_or_else(|_| "1".to_string())
                    .parse()
                    .unwrap_or(1),
                parallelism: env::var("HASH_ARGON2_PARALLELISM")
                    .unwrap_or_else(|_| "4".to_string())
                    .parse()
                    .unwrap_or(4),
            },
            middleware: MiddlewareConfig {
                enable_auth_gate: env_toggle("MIDDLEWARE_ENABLE_AUTH", true),
                enable_tenant_gate: env_toggle("MIDDLEWARE_ENABLE_TENANT", true),
                enable_cors: env_toggle("MIDDLEWARE_ENABLE_CORS", true),
                enable_trace: env_toggle("MIDDLEWARE_ENABLE_TRACE", true),
            },
            exempt_paths: env::var("AUTH_EXEMPT_PATHS")
                .map(|s| {
                    ExemptPaths::new(
                        s.split(',')
                            .map(|p| p.trim().to_string())
                            .filter(|p| !p.is_empty())
                            .collect(),
                    )
                })
                .unwrap_or_default(),
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn env_toggle(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|s| s.to_lowercase() == "true")
        .unwrap_or(default)
}
