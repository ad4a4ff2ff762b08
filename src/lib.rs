//! Business rules for a pet-tracking app: pet age and human-age
//! conversion, celebration milestones, free-tier quotas, soft deletion and
//! premium gating.
//!
//! Everything here is a pure function of caller-supplied records and
//! instants. Storage, identity and HTTP stay with the hosting backend.

pub mod age;
pub mod config;
pub mod deletion;
pub mod error;
pub mod limits;
pub mod link;
pub mod milestone;
pub mod report;
pub mod species;
pub mod subscription;
pub mod usage;

pub use age::{
    AgeInfo, age, age_info, days_since_birth, describe_human_age, display_string, human_age,
};
pub use config::{Config, LimitsConfig};
pub use deletion::{Deletion, DeletionPolicy};
pub use error::{AccessError, ConfigError, DeletionError, LinkError};
pub use limits::{AlbumLimits, ImageLimits};
pub use milestone::{
    MilestoneDetector, MilestoneInfo, MilestoneKind, format_message, is_birthday_today, milestone,
};
pub use species::Species;
pub use subscription::{AccountResolver, Identity, Status, Subscription, Tier, User};
pub use usage::{QuotaSummary, Usage};
