//! Core types for Social Sync

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Media Types
// ============================================================================

/// Display URLs an image provider returns for one image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
    /// Grid-sized rendering
    pub small: String,
    /// Thumbnail used in the side-panel preview
    pub thumb: String,
    /// Full-size rendering
    pub full: String,
}

/// An image selected from the search provider
///
/// Created by the image search collaborator and never mutated afterwards.
/// `id` is unique per provider and is the identity used for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: String,
    pub urls: ImageUrls,
    pub alt_text: String,
    /// Photographer or owner credited under the image
    pub attribution_name: String,
}

impl ImageRef {
    /// Alt text, falling back to a generic label when the provider sent none
    pub fn alt_or_default(&self) -> &str {
        if self.alt_text.trim().is_empty() {
            "Image"
        } else {
            &self.alt_text
        }
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Identifier of an externally provided account
///
/// Audience membership is decided by comparing these identifiers, never by
/// comparing whole `Account` values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Social platform an account lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
    Twitter,
    LinkedIn,
    TikTok,
    YouTube,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
            Self::LinkedIn => "linkedin",
            Self::TikTok => "tiktok",
            Self::YouTube => "youtube",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A destination account supplied by the account registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub platform: Platform,
    pub display_name: String,
    pub avatar_url: String,
}

// ============================================================================
// Composition Types
// ============================================================================

/// Category of content being composed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Standard feed post
    #[default]
    Post,
    /// Short-form video (reel / short)
    Reel,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Reel => "reel",
        }
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "post" => Ok(ContentType::Post),
            "reel" | "short" => Ok(ContentType::Reel),
            _ => Err(format!(
                "Invalid content type: '{}'. Valid options: post, reel",
                s
            )),
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a post goes out immediately or at a confirmed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    #[default]
    Now,
    Scheduled,
}

impl std::fmt::Display for ScheduleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Now => write!(f, "now"),
            Self::Scheduled => write!(f, "scheduled"),
        }
    }
}
