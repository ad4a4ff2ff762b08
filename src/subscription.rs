//! subscription.rs
//!
//! Premium entitlement checks.
//!
//! `is_premium` is a pure rule over a subscription record. The `assert_*`
//! helpers resolve the calling user through an [`AccountResolver`] first and
//! report why access was refused.
//!
//! A past-due subscription keeps premium features until its grace period
//! ends.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AccessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Free,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Canceled,
    PastDue,
    Trialing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub tier: Tier,
    pub status: Status,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub grace_period_ends_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_cat_user_id: Option<String>,
}

impl Subscription {
    pub fn free() -> Self {
        Self::new(Tier::Free, Status::Active)
    }

    pub fn new(tier: Tier, status: Status) -> Self {
        Self {
            tier,
            status,
            ends_at: None,
            grace_period_ends_at: None,
            revenue_cat_user_id: None,
        }
    }

    pub fn with_grace_period_ends_at(mut self, at: DateTime<Utc>) -> Self {
        self.grace_period_ends_at = Some(at);
        self
    }
}

/// Authenticated caller as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub token_identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub token_identifier: String,
    pub name: String,
    pub email: String,
    pub subscription: Subscription,
}

/// Identity and user-record lookup, provided by the hosting backend.
pub trait AccountResolver {
    /// The authenticated caller, or `None` for an anonymous request.
    fn current_identity(&self) -> Result<Option<Identity>>;

    fn user_by_token(&self, token_identifier: &str) -> Result<Option<User>>;
}

pub fn is_premium(subscription: &Subscription) -> bool {
    is_premium_at(subscription, Utc::now())
}

pub fn is_premium_at(subscription: &Subscription, now: DateTime<Utc>) -> bool {
    if subscription.tier != Tier::Premium {
        return false;
    }

    match subscription.status {
        Status::Active | Status::Trialing => true,
        Status::PastDue => subscription
            .grace_period_ends_at
            .is_some_and(|ends| now < ends),
        Status::Canceled => false,
    }
}

/// The calling user's record.
pub fn current_user<R: AccountResolver + ?Sized>(resolver: &R) -> Result<User, AccessError> {
    let identity = resolver
        .current_identity()?
        .ok_or(AccessError::Unauthenticated)?;

    resolver
        .user_by_token(&identity.token_identifier)?
        .ok_or(AccessError::UserNotFound)
}

/// The calling user's record, if they hold premium entitlement.
pub fn assert_premium<R: AccountResolver + ?Sized>(resolver: &R) -> Result<User, AccessError> {
    assert_premium_at(resolver, Utc::now())
}

pub fn assert_premium_at<R: AccountResolver + ?Sized>(
    resolver: &R,
    now: DateTime<Utc>,
) -> Result<User, AccessError> {
    let user = current_user(resolver)?;

    if !is_premium_at(&user.subscription, now) {
        debug!(
            user_id = %user.id,
            tier = ?user.subscription.tier,
            status = ?user.subscription.status,
            "premium required"
        );
        return Err(AccessError::PremiumRequired);
    }

    Ok(user)
}

/// Non-failing variant of [`assert_premium`] for UI gating.
pub fn is_premium_user<R: AccountResolver + ?Sized>(resolver: &R) -> bool {
    assert_premium(resolver).is_ok()
}
