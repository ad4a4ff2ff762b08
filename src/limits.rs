//! limits.rs
//!
//! Free-tier quotas for albums and images.
//!
//! Every check is a pure predicate over counters the caller already holds.
//! Premium users are not routed through here at all.

use serde::{Deserialize, Serialize};

pub const FREE_ALBUM_LIMIT: u32 = 2;
pub const FREE_ALBUM_ITEM_LIMIT: u32 = 20;
pub const FREE_IMAGE_LIMIT: u32 = 50;
/// About 25 MiB: 50 images at roughly 500 KiB each.
pub const FREE_IMAGE_STORAGE_LIMIT_BYTES: u64 = 25 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlbumLimits {
    pub max_albums: u32,
    pub max_items_per_album: u32,
}

impl Default for AlbumLimits {
    fn default() -> Self {
        Self {
            max_albums: FREE_ALBUM_LIMIT,
            max_items_per_album: FREE_ALBUM_ITEM_LIMIT,
        }
    }
}

impl AlbumLimits {
    pub fn can_create_album(&self, album_count: u32) -> bool {
        album_count < self.max_albums
    }

    pub fn is_album_limit_reached(&self, album_count: u32) -> bool {
        album_count >= self.max_albums
    }

    pub fn remaining_albums(&self, album_count: u32) -> u32 {
        self.max_albums.saturating_sub(album_count)
    }

    /// Whether `new_items` more items fit into an album holding `item_count`.
    pub fn can_add_items(&self, item_count: u32, new_items: u32) -> bool {
        item_count.saturating_add(new_items) <= self.max_items_per_album
    }

    pub fn is_item_limit_reached(&self, item_count: u32) -> bool {
        item_count >= self.max_items_per_album
    }

    pub fn remaining_items(&self, item_count: u32) -> u32 {
        self.max_items_per_album.saturating_sub(item_count)
    }
}

/// Count and byte budgets for uploaded images. Both must hold for an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageLimits {
    pub max_images: u32,
    pub max_storage_bytes: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            max_images: FREE_IMAGE_LIMIT,
            max_storage_bytes: FREE_IMAGE_STORAGE_LIMIT_BYTES,
        }
    }
}

impl ImageLimits {
    pub fn can_upload_image(
        &self,
        image_count: u32,
        used_bytes: u64,
        new_image_bytes: u64,
    ) -> bool {
        if image_count >= self.max_images {
            return false;
        }

        used_bytes.saturating_add(new_image_bytes) <= self.max_storage_bytes
    }

    pub fn is_image_limit_reached(&self, image_count: u32, used_bytes: u64) -> bool {
        image_count >= self.max_images || used_bytes >= self.max_storage_bytes
    }

    pub fn remaining_images(&self, image_count: u32) -> u32 {
        self.max_images.saturating_sub(image_count)
    }

    pub fn remaining_storage_bytes(&self, used_bytes: u64) -> u64 {
        self.max_storage_bytes.saturating_sub(used_bytes)
    }
}
