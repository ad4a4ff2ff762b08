//! link.rs
//!
//! Link-preview helpers for curated articles.
//!
//! Fetching the page is left to the hosting backend. This module validates
//! the URL before any request is made and pulls Open Graph metadata out of
//! the HTML that comes back.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

use crate::error::LinkError;

const UNTITLED: &str = "Untitled";

static OG_TITLE: LazyLock<Regex> = LazyLock::new(|| og_property("og:title"));
static OG_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| og_property("og:description"));
static OG_IMAGE: LazyLock<Regex> = LazyLock::new(|| og_property("og:image"));
static OG_SITE_NAME: LazyLock<Regex> = LazyLock::new(|| og_property("og:site_name"));
static TITLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title>([^<]+)</title>").expect("valid title regex"));

fn og_property(property: &str) -> Regex {
    let pattern = format!(
        r#"(?i)<meta\s+property=["']{}["']\s+content=["']([^"']+)["']"#,
        regex::escape(property)
    );
    Regex::new(&pattern).expect("valid og regex")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OgInfo {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub site_name: Option<String>,
}

/// Parses `raw` and accepts only `http` and `https` URLs.
pub fn sanitize_url(raw: &str) -> Result<Url, LinkError> {
    let url = Url::parse(raw.trim()).map_err(|_| {
        warn!(url = raw, "rejected unparsable url");
        LinkError::InvalidUrl(raw.to_string())
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => {
            warn!(url = raw, scheme = other, "rejected url scheme");
            Err(LinkError::UnsupportedScheme(other.to_string()))
        }
    }
}

pub fn extract_og_info(html: &str) -> OgInfo {
    let capture = |re: &Regex| {
        re.captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    };

    OgInfo {
        title: capture(&OG_TITLE)
            .or_else(|| capture(&TITLE_TAG))
            .unwrap_or_else(|| UNTITLED.to_string()),
        description: capture(&OG_DESCRIPTION).unwrap_or_default(),
        image_url: capture(&OG_IMAGE),
        site_name: capture(&OG_SITE_NAME),
    }
}
