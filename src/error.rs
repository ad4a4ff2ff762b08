//! error.rs
//!
//! One error enum per concern. Age and milestone lookups return `Option`
//! instead and never appear here.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Access checks performed before a premium-only query or mutation.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("user not found")]
    UserNotFound,

    #[error("premium subscription required")]
    PremiumRequired,

    #[error("account lookup failed: {0}")]
    Resolver(#[from] anyhow::Error),
}

impl AccessError {
    /// Stable code a calling layer can match on, e.g. to show an upgrade prompt.
    pub fn code(&self) -> &'static str {
        match self {
            AccessError::Unauthenticated => "UNAUTHENTICATED",
            AccessError::UserNotFound => "USER_NOT_FOUND",
            AccessError::PremiumRequired => "PREMIUM_REQUIRED",
            AccessError::Resolver(_) => "RESOLVER_FAILED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("invalid URL `{0}`")]
    InvalidUrl(String),

    #[error("unsupported URL scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeletionError {
    #[error("restorable deadline {restorable_until} is before deletion time {deleted_at}")]
    DeadlineBeforeDeletion {
        deleted_at: DateTime<Utc>,
        restorable_until: DateTime<Utc>,
    },

    #[error("restorable window of {restorable_days} days is out of range")]
    WindowOutOfRange { restorable_days: u32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
