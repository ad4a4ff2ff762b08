//! deletion.rs
//!
//! Soft-deletion marker carried by deletable records.
//!
//! A record is active when its marker is absent and deleted when present.
//! Deleted records can be restored until `restorable_until`; after that an
//! external purge job removes them. Timestamps go over the wire as Unix
//! milliseconds.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::age::MS_PER_DAY;
use crate::error::DeletionError;

pub const DEFAULT_RESTORABLE_DAYS: u32 = 30;
/// Upper bound on a configured restore window, about a century.
pub const MAX_RESTORABLE_DAYS: u32 = 36_500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDeletion")]
pub struct Deletion {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    deleted_at: DateTime<Utc>,
    /// Stored as a plain string so history survives the user being removed.
    pub deleted_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    restorable_until: Option<DateTime<Utc>>,
}

/// Stored shape, checked through `Deletion::from_parts` on the way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeletion {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    deleted_at: DateTime<Utc>,
    deleted_by: String,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    restorable_until: Option<DateTime<Utc>>,
}

impl TryFrom<RawDeletion> for Deletion {
    type Error = DeletionError;

    fn try_from(raw: RawDeletion) -> Result<Self, Self::Error> {
        Deletion::from_parts(
            raw.deleted_at,
            raw.deleted_by,
            raw.reason,
            raw.restorable_until,
        )
    }
}

impl Deletion {
    /// Marks a record deleted now, restorable for `restorable_days`.
    pub fn create(
        deleted_by: impl Into<String>,
        reason: Option<String>,
        restorable_days: u32,
    ) -> Result<Self, DeletionError> {
        Self::create_at(Utc::now(), deleted_by, reason, restorable_days)
    }

    pub fn create_at(
        now: DateTime<Utc>,
        deleted_by: impl Into<String>,
        reason: Option<String>,
        restorable_days: u32,
    ) -> Result<Self, DeletionError> {
        let restorable_until = Duration::try_days(i64::from(restorable_days))
            .and_then(|window| now.checked_add_signed(window))
            .ok_or(DeletionError::WindowOutOfRange { restorable_days })?;

        let deleted_by = deleted_by.into();
        debug!(%deleted_by, %restorable_until, "created deletion marker");

        Ok(Self {
            deleted_at: now,
            deleted_by,
            reason,
            restorable_until: Some(restorable_until),
        })
    }

    /// Rebuilds a marker from stored fields.
    pub fn from_parts(
        deleted_at: DateTime<Utc>,
        deleted_by: impl Into<String>,
        reason: Option<String>,
        restorable_until: Option<DateTime<Utc>>,
    ) -> Result<Self, DeletionError> {
        if let Some(until) = restorable_until {
            if until < deleted_at {
                return Err(DeletionError::DeadlineBeforeDeletion {
                    deleted_at,
                    restorable_until: until,
                });
            }
        }

        Ok(Self {
            deleted_at,
            deleted_by: deleted_by.into(),
            reason,
            restorable_until,
        })
    }

    pub fn deleted_at(&self) -> DateTime<Utc> {
        self.deleted_at
    }

    pub fn restorable_until(&self) -> Option<DateTime<Utc>> {
        self.restorable_until
    }

    /// Deadline for restoring, falling back to the default window when the
    /// marker predates explicit deadlines.
    pub fn restore_deadline(&self) -> DateTime<Utc> {
        self.restorable_until.unwrap_or_else(|| {
            self.deleted_at
                .checked_add_signed(Duration::days(i64::from(DEFAULT_RESTORABLE_DAYS)))
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        })
    }
}

/// Window applied when creating markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeletionPolicy {
    pub restorable_days: u32,
}

impl Default for DeletionPolicy {
    fn default() -> Self {
        Self {
            restorable_days: DEFAULT_RESTORABLE_DAYS,
        }
    }
}

impl DeletionPolicy {
    pub fn create(
        &self,
        deleted_by: impl Into<String>,
        reason: Option<String>,
    ) -> Result<Deletion, DeletionError> {
        Deletion::create(deleted_by, reason, self.restorable_days)
    }

    pub fn create_at(
        &self,
        now: DateTime<Utc>,
        deleted_by: impl Into<String>,
        reason: Option<String>,
    ) -> Result<Deletion, DeletionError> {
        Deletion::create_at(now, deleted_by, reason, self.restorable_days)
    }
}

pub fn is_deleted(marker: Option<&Deletion>) -> bool {
    marker.is_some()
}

pub fn is_restorable(marker: Option<&Deletion>) -> bool {
    is_restorable_at(marker, Utc::now())
}

pub fn is_restorable_at(marker: Option<&Deletion>, now: DateTime<Utc>) -> bool {
    match marker {
        Some(deletion) => now < deletion.restore_deadline(),
        None => false,
    }
}

pub fn remaining_restorable_days(marker: Option<&Deletion>) -> u32 {
    remaining_restorable_days_at(marker, Utc::now())
}

/// Whole days left to restore, rounded up. Zero once the window has closed.
pub fn remaining_restorable_days_at(marker: Option<&Deletion>, now: DateTime<Utc>) -> u32 {
    let Some(deletion) = marker else {
        return 0;
    };
    if !is_restorable_at(Some(deletion), now) {
        return 0;
    }

    let remaining_ms = (deletion.restore_deadline() - now).num_milliseconds();
    let days = (remaining_ms + MS_PER_DAY - 1) / MS_PER_DAY;
    u32::try_from(days).unwrap_or(u32::MAX)
}
