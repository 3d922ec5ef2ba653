use serde::Serialize;
use thiserror::Error;

/// Failure taxonomy surfaced by every coordinator operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AuthRequired,
    SessionExpired,
    NotAuthorized,
    CapacityExceeded,
    AlreadyMember,
    DuplicateInvite,
    NotFound,
    InvalidInput,
    TransientError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthRequired => "auth_required",
            Self::SessionExpired => "session_expired",
            Self::NotAuthorized => "not_authorized",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::AlreadyMember => "already_member",
            Self::DuplicateInvite => "duplicate_invite",
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::TransientError => "transient_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors are `Clone` so a coalesced join can hand the same failure to every waiter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Authentication required")]
    AuthRequired,

    #[error("Session expired")]
    SessionExpired,

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Already a member: {0}")]
    AlreadyMember(String),

    #[error("Duplicate invite: {0}")]
    DuplicateInvite(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transient error: {0}")]
    Transient(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthRequired => ErrorKind::AuthRequired,
            Self::SessionExpired => ErrorKind::SessionExpired,
            Self::NotAuthorized(_) => ErrorKind::NotAuthorized,
            Self::CapacityExceeded(_) => ErrorKind::CapacityExceeded,
            Self::AlreadyMember(_) => ErrorKind::AlreadyMember,
            Self::DuplicateInvite(_) => ErrorKind::DuplicateInvite,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Transient(_) | Self::Internal(_) => ErrorKind::TransientError,
        }
    }

    /// Human-readable text suitable for showing to the user
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::AuthRequired => "Please sign in to continue".to_string(),
            Self::SessionExpired => "Your session has expired, please sign in again".to_string(),
            Self::NotAuthorized(msg)
            | Self::CapacityExceeded(msg)
            | Self::AlreadyMember(msg)
            | Self::DuplicateInvite(msg)
            | Self::NotFound(msg)
            | Self::InvalidInput(msg) => msg.clone(),
            Self::Transient(_) | Self::Internal(_) => {
                "Something went wrong, please try again".to_string()
            }
        }
    }

    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::Internal(_))
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().unwrap_or_default();
                match code.as_ref() {
                    // PostgreSQL unique_violation
                    "23505" => match db_err.constraint() {
                        Some(c) if c.contains("invite") => {
                            Self::DuplicateInvite("Invite pending".to_string())
                        }
                        Some(c) if c.contains("participant") => {
                            Self::AlreadyMember("Already a member of this room".to_string())
                        }
                        _ => Self::InvalidInput("Resource already exists".to_string()),
                    },
                    // PostgreSQL foreign_key_violation
                    "23503" => Self::NotFound("Referenced resource not found".to_string()),
                    // PostgreSQL check_violation
                    "23514" => Self::InvalidInput("Constraint check failed".to_string()),
                    _ => Self::Transient(err.to_string()),
                }
            }
            _ => Self::Transient(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
