//! usage.rs
//!
//! Free-tier counters and the remaining capacity derived from them.

use serde::{Deserialize, Serialize};

use crate::config::LimitsConfig;

/// Counters the backend keeps per free-tier user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub album_count: u32,
    pub image_count: u32,
    pub image_storage_used_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaSummary {
    pub remaining_albums: u32,
    pub remaining_images: u32,
    pub remaining_storage_bytes: u64,
    pub album_limit_reached: bool,
    pub image_limit_reached: bool,
}

impl Usage {
    pub fn quota(&self, limits: &LimitsConfig) -> QuotaSummary {
        QuotaSummary {
            remaining_albums: limits.album.remaining_albums(self.album_count),
            remaining_images: limits.image.remaining_images(self.image_count),
            remaining_storage_bytes: limits
                .image
                .remaining_storage_bytes(self.image_storage_used_bytes),
            album_limit_reached: limits.album.is_album_limit_reached(self.album_count),
            image_limit_reached: limits
                .image
                .is_image_limit_reached(self.image_count, self.image_storage_used_bytes),
        }
    }
}
