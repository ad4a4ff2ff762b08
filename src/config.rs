//! config.rs
//!
//! Policy thresholds. Every field is optional in the JSON file and falls
//! back to the free-tier defaults.
//!
//! ```json
//! {
//!   "limits": { "album": { "maxAlbums": 5 }, "image": { "maxImages": 100 } },
//!   "deletion": { "restorableDays": 14 },
//!   "milestone": { "anniversaryWindowDays": 3 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::deletion::{DeletionPolicy, MAX_RESTORABLE_DAYS};
use crate::error::ConfigError;
use crate::limits::{AlbumLimits, ImageLimits};
use crate::milestone::MilestoneDetector;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub limits: LimitsConfig,
    pub deletion: DeletionPolicy,
    pub milestone: MilestoneDetector,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub album: AlbumLimits,
    pub image: ImageLimits,
}

impl Config {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json_str(&raw)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Zero quotas would lock every free user out; the anniversary window may
    /// be zero (exact year boundaries only). The restore window is capped so
    /// deadlines stay representable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let album = &self.limits.album;
        let image = &self.limits.image;

        let zeroed = [
            ("limits.album.maxAlbums", album.max_albums == 0),
            ("limits.album.maxItemsPerAlbum", album.max_items_per_album == 0),
            ("limits.image.maxImages", image.max_images == 0),
            ("limits.image.maxStorageBytes", image.max_storage_bytes == 0),
        ];

        if let Some((field, _)) = zeroed.iter().find(|(_, is_zero)| *is_zero) {
            return Err(ConfigError::Invalid(format!("{field} must be greater than zero")));
        }

        if self.deletion.restorable_days > MAX_RESTORABLE_DAYS {
            return Err(ConfigError::Invalid(format!(
                "deletion.restorableDays must be at most {MAX_RESTORABLE_DAYS}"
            )));
        }

        Ok(())
    }
}
