//! Unified error handling for Tenantd

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Entity kinds used by the `NotFound` error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Tenant,
    User,
    Role,
    Topic,
    SubTopic,
    Claim,
}

impl Resource {
    pub fn error_type(&self) -> &'static str {
        match self {
            Resource::Tenant => "TENANT_NOT_FOUND",
            Resource::User => "USER_NOT_FOUND",
            Resource::Role => "ROLE_NOT_FOUND",
            Resource::Topic => "TOPIC_NOT_FOUND",
            Resource::SubTopic => "SUB_TOPIC_NOT_FOUND",
            Resource::Claim => "CLAIM_NOT_FOUND",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Resource::Tenant => "Tenant not found",
            Resource::User => "User not found",
            Resource::Role => "Role not found",
            Resource::Topic => "Topic not found",
            Resource::SubTopic => "Sub topic not found",
            Resource::Claim => "Claim not found",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Uniqueness violations reported by the `Conflict` error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duplicate {
    Tenant,
    User,
    UserEmail,
    UserVscAccount,
    Role,
    Topic,
    SubTopic,
    Claim,
}

impl Duplicate {
    pub fn error_type(&self) -> &'static str {
        match self {
            Duplicate::Tenant => "TENANT_ALREADY_EXISTS",
            Duplicate::User => "USER_ALREADY_EXISTS",
            Duplicate::UserEmail => "USER_EMAIL_ALREADY_EXISTS",
            Duplicate::UserVscAccount => "USER_VSC_ACCOUNT_ALREADY_EXISTS",
            Duplicate::Role => "ROLE_ALREADY_EXISTS",
            Duplicate::Topic => "TOPIC_ALREADY_EXISTS",
            Duplicate::SubTopic => "SUB_TOPIC_ALREADY_EXISTS",
            Duplicate::Claim => "CLAIM_ALREADY_EXISTS",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Duplicate::Tenant => "Tenant with given name already exists",
            Duplicate::User => "User with given email already exists",
            Duplicate::UserEmail => "User email already exists",
            Duplicate::UserVscAccount => "User vsc account already exists",
            Duplicate::Role => "Role with given name already exists",
            Duplicate::Topic => "Topic with given name already exists",
            Duplicate::SubTopic => "Sub topic with given name already exists",
            Duplicate::Claim => "Claim with given name already exists",
        }
    }
}

impl std::fmt::Display for Duplicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("missing header")]
    MissingHeader,

    #[error("invalid header")]
    InvalidHeader,

    #[error("invalid token")]
    InvalidToken,

    #[error("invalid subject")]
    InvalidSubject,

    #[error("invalid issuer")]
    InvalidIssuer,

    #[error("invalid signing method")]
    InvalidSigningMethod,

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("invalid id")]
    InvalidId,

    #[error("{0}")]
    NotFound(Resource),

    #[error("{0}")]
    Conflict(Duplicate),

    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body: numeric code, machine-readable type, human title.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(rename = "validationErrors", skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<ValidationErrorDetail>>,
}

#[derive(Debug, Serialize)]
pub struct ValidationErrorDetail {
    pub key: String,
    #[serde(rename = "in")]
    pub location: String,
    pub error: String,
}

impl AppError {
    /// HTTP status code this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingHeader
            | AppError::InvalidHeader
            | AppError::InvalidToken
            | AppError::InvalidSubject
            | AppError::InvalidIssuer
            | AppError::InvalidSigningMethod
            | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InvalidId | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingHeader => "MISSING_HEADER",
            AppError::InvalidHeader => "INVALID_HEADER",
            AppError::InvalidToken => "invalid_token",
            AppError::InvalidSubject => "invalid_subject",
            AppError::InvalidIssuer => "invalid_issuer",
            AppError::InvalidSigningMethod => "invalid_signing_method",
            AppError::Unauthorized => "unauthorized",
            AppError::Forbidden => "forbidden",
            AppError::InvalidId => "INVALID_ID",
            AppError::NotFound(r) => r.error_type(),
            AppError::Conflict(d) => d.error_type(),
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) | AppError::Internal(_) => "INTERNAL_SERVER",
        }
    }

    fn title(&self) -> String {
        match self {
            AppError::MissingHeader => "missing_header".to_string(),
            AppError::InvalidHeader => "invalid_header".to_string(),
            AppError::InvalidToken => "invalid_token".to_string(),
            AppError::InvalidSubject => "invalid_subject".to_string(),
            AppError::InvalidIssuer => "invalid_issuer".to_string(),
            AppError::InvalidSigningMethod => "invalid_signing_method".to_string(),
            AppError::Unauthorized => "unauthorized".to_string(),
            AppError::Forbidden => "forbidden".to_string(),
            AppError::InvalidId => "Invalid ID".to_string(),
            AppError::NotFound(r) => r.title().to_string(),
            AppError::Conflict(d) => d.title().to_string(),
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::Database(_) | AppError::Internal(_) => "Internal Server Error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Data-access and internal failures are logged with context and
        // returned opaque; everything else is safe to serialize as-is.
        let validation_errors = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                None
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                None
            }
            AppError::Validation(errors) => Some(collect_validation_details(errors)),
            _ => None,
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            error_type: self.error_type().to_string(),
            title: self.title(),
            detail: None,
            validation_errors,
        });

        (status, body).into_response()
    }
}

fn collect_validation_details(errors: &validator::ValidationErrors) -> Vec<ValidationErrorDetail> {
    let mut details = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for err in field_errors.iter() {
            details.push(ValidationErrorDetail {
                key: field.to_string(),
                location: "body".to_string(),
                error: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            });
        }
    }
    details
}
