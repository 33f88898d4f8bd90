//! Social Sync - post composition core
//!
//! This library holds the composition state machine behind the Social Sync
//! composer: draft text and images, scheduling, per-content-type audience
//! selection and the rules that decide when a post may be submitted.
//! Network delivery, image search and account discovery are collaborators
//! injected through traits.

pub mod accounts;
pub mod compose;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod publish;
pub mod search;
pub mod types;

// Re-export commonly used types
pub use accounts::{AccountRegistry, StaticAccounts, WatchedAccounts};
pub use compose::{Composer, ComposerConfig, SubmitPolicy};
pub use config::Config;
pub use error::{Result, SocialSyncError};
pub use publish::{PublishRequest, Publisher};
pub use search::ImageSearch;
pub use types::{Account, AccountId, ContentType, ImageRef, ImageUrls, Platform, ScheduleMode};
