//! Image search providers
//!
//! The composer treats image search as a paginated black box: a query and
//! a page size go in, an ordered list of [`ImageRef`] comes out. Failures
//! are reported as [`SearchError`] and the composer degrades them to an
//! empty result set.
//!
//! # Examples
//!
//! ```no_run
//! use libsocialsync::search::{ImageSearch, unsplash::UnsplashSearch};
//! use libsocialsync::config::SearchConfig;
//!
//! # async fn example() -> Result<(), libsocialsync::error::SearchError> {
//! let provider = UnsplashSearch::from_config(&SearchConfig::default())?;
//! let images = provider.search("sunset", 12).await?;
//! println!("{} images", images.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::SearchError;
use crate::types::ImageRef;

pub mod mock;
pub mod unsplash;

#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Run one search request
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Network` when the provider cannot be reached
    /// and `SearchError::Parse` when its response cannot be decoded.
    async fn search(&self, query: &str, page_size: usize) -> Result<Vec<ImageRef>, SearchError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
