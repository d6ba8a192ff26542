//! Authentication business logic: login, registration, password hashing

use crate::config::HashingConfig;
use crate::domain::{LoginInput, RegisterInput};
use crate::error::{AppError, Duplicate, Result};
use crate::jwt::JwtManager;
use crate::repository::{NewUser, UserRepository};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

/// Outcome of a successful registration
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub id: i64,
    pub token: String,
}

pub struct AuthService<U: UserRepository> {
    users: Arc<U>,
    jwt: JwtManager,
    hashing: HashingConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: Arc<U>, jwt: JwtManager, hashing: HashingConfig) -> Self {
        Self {
            users,
            jwt,
            hashing,
        }
    }

    /// Authenticate by email and password, minting an access token.
    ///
    /// Unknown email and wrong password both fail with the same
    /// `unauthorized` error, so the response does not reveal whether an
    /// account exists.
    pub async fn login(&self, input: LoginInput) -> Result<String> {
        input.validate()?;

        let user = match self.users.find_by_email(&input.email).await? {
            Some(user) => user,
            None => {
                debug!(email = %input.email, "login for unknown email");
                return Err(AppError::Unauthorized);
            }
        };

        if !verify_password(&input.password, &user.password)? {
            debug!(user_id = user.id, "password mismatch");
            return Err(AppError::Unauthorized);
        }

        self.jwt.mint(user.id, &user.email)
    }

    /// Create a new user and mint a token identical in shape to login's.
    pub async fn register(&self, input: RegisterInput) -> Result<RegisteredUser> {
        input.validate()?;

        if self.users.exists_by_email(&input.email).await? {
            debug!(email = %input.email, "user with given email already exists");
            return Err(AppError::Conflict(Duplicate::User));
        }

        let password = hash_password(&input.password, &self.hashing)?;

        let id = self
            .users
            .create(&NewUser {
                name: input.name,
                email: input.email.clone(),
                vsc_account: input.vsc_account,
                password,
                role_id: input.role_id,
                tenant_id: input.tenant_id,
            })
            .await?;

        let token = self.jwt.mint(id, &input.email)?;
        Ok(RegisteredUser { id, token })
    }
}

/// Derive an Argon2id PHC hash string from a password.
///
/// The PHC string is self-describing (`$argon2id$v=19$m=..,t=..,p=..$..$..`),
/// so cost parameters can change without invalidating stored hashes.
pub fn hash_password(password: &str, config: &HashingConfig) -> Result<String> {
    let params = argon2::Params::new(config.memory_kib, config.time_cost, config.parallelism, None)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid argon2 params: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to hash password: {e}")))?;

    Ok(hash.to_string())
}

/// Constant-time comparison of a password against a stored PHC hash;
/// verification parameters come from the hash string itself.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stored password hash is invalid: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
