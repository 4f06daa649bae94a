//! Read-only views of backend payloads, used by the client and CLI.
//!
//! The gateway never parses these; the backend owns the schema. Every field
//! is optional or defaulted so an unexpected payload still renders.

use serde::{Deserialize, Serialize};

/// A generated bead as listed by `GET /api/feed`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedItem {
    pub id: String,
    pub author: Option<String>,
    pub title: String,
    pub content: String,
    pub created_at: Option<String>,
    pub audio_url: Option<String>,
}

/// `GET /api/feed` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedPage {
    pub feed: Vec<FeedItem>,
}

/// An inspiration profile as listed by `GET /api/inspirations`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub hero_image_url: Option<String>,
    pub source_count: Option<u64>,
    pub bead_count: Option<u64>,
    pub analyzed_from_urls: Vec<String>,
    pub is_default: bool,
}

/// `GET /api/inspirations` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileList {
    pub profiles: Vec<Profile>,
}

/// Body for creating or updating a profile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProfileDraft {
    pub name: String,
    pub description: Option<String>,
    pub hero_image_url: Option<String>,
    pub tiktok_urls: Vec<String>,
    pub is_default: bool,
}

impl ProfileDraft {
    /// Build a draft the way the editor form does: trim everything, blank
    /// optional fields become `null`, blank URLs are dropped.
    pub fn from_form(
        name: &str,
        description: Option<&str>,
        hero_image_url: Option<&str>,
        urls: &[String],
        is_default: bool,
    ) -> Self {
        let optional = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            name: name.trim().to_string(),
            description: optional(description),
            hero_image_url: optional(hero_image_url),
            tiktok_urls: urls
                .iter()
                .flat_map(|u| u.lines())
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string)
                .collect(),
            is_default,
        }
    }
}
