//! Mock image search provider
//!
//! Scripted responses per query plus call recording, so composer tests can
//! exercise search flows without network access. Available in all builds
//! so integration tests and front ends can use it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use super::ImageSearch;
use crate::error::SearchError;
use crate::types::{ImageRef, ImageUrls};

#[derive(Clone, Default)]
pub struct MockImageSearch {
    responses: Arc<Mutex<HashMap<String, Result<Vec<ImageRef>, SearchError>>>>,
    calls: Arc<Mutex<Vec<(String, usize)>>>,
    delay: Duration,
}

impl MockImageSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `query` with `images`
    pub fn with_results(self, query: &str, images: Vec<ImageRef>) -> Self {
        self.lock_responses().insert(query.to_string(), Ok(images));
        self
    }

    /// Respond to `query` with an error
    pub fn with_failure(self, query: &str, error: SearchError) -> Self {
        self.lock_responses().insert(query.to_string(), Err(error));
        self
    }

    /// Delay every response (simulates provider latency)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// `(query, page_size)` of every request made so far
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn lock_responses(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<String, Result<Vec<ImageRef>, SearchError>>> {
        // A poisoned lock only means a test panicked mid-insert
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ImageSearch for MockImageSearch {
    async fn search(&self, query: &str, page_size: usize) -> Result<Vec<ImageRef>, SearchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((query.to_string(), page_size));
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.lock_responses().get(query) {
            Some(Ok(images)) => Ok(images.iter().take(page_size).cloned().collect()),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Build a throwaway image record with predictable URLs
pub fn sample_image(id: &str) -> ImageRef {
    ImageRef {
        id: id.to_string(),
        urls: ImageUrls {
            small: format!("https://images.test/{}/small.jpg", id),
            thumb: format!("https://images.test/{}/thumb.jpg", id),
            full: format!("https://images.test/{}/full.jpg", id),
        },
        alt_text: format!("image {}", id),
        attribution_name: "Test Photographer".to_string(),
    }
}
