//! Publish collaborators
//!
//! The composer's responsibility ends at building a well-formed
//! [`PublishRequest`] and handing it to a [`Publisher`]. Delivery, retries
//! and confirmation belong to the publisher.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::compose::schedule::ConfirmedSchedule;
use crate::error::PublishError;
use crate::types::{AccountId, ContentType, ImageRef, ScheduleMode};

/// Finished, submit-ready post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Unique identifier for the request (UUID v4)
    pub id: String,
    pub text: String,
    /// Attached images in the order they were selected
    pub images: Vec<ImageRef>,
    pub mode: ScheduleMode,
    /// Present exactly when `mode` is `Scheduled`
    pub schedule: Option<ConfirmedSchedule>,
    pub content_type: ContentType,
    /// Selected accounts for `content_type`, in selection order
    pub account_ids: Vec<AccountId>,
    /// When the request was assembled (Unix timestamp)
    pub created_at: i64,
}

pub trait Publisher {
    fn publish(&self, request: &PublishRequest) -> Result<(), PublishError>;
}

/// Forwards requests to an async delivery task over a tokio channel
#[derive(Clone)]
pub struct QueuePublisher {
    sender: mpsc::UnboundedSender<PublishRequest>,
}

impl QueuePublisher {
    /// Create a publisher and the receiving end for the delivery task
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PublishRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Publisher for QueuePublisher {
    fn publish(&self, request: &PublishRequest) -> Result<(), PublishError> {
        self.sender
            .send(request.clone())
            .map_err(|_| PublishError::Unavailable("delivery task has shut down".to_string()))
    }
}

/// Records published requests; optionally rejects them
#[derive(Clone, Default)]
pub struct MockPublisher {
    published: Arc<Mutex<Vec<PublishRequest>>>,
    reject_with: Option<String>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher that rejects every request with `reason`
    pub fn rejecting(reason: &str) -> Self {
        Self {
            reject_with: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<PublishRequest> {
        self.published
            .lock()
            .map(|published| published.clone())
            .unwrap_or_default()
    }
}

impl Publisher for MockPublisher {
    fn publish(&self, request: &PublishRequest) -> Result<(), PublishError> {
        if let Some(reason) = &self.reject_with {
            return Err(PublishError::Rejected(reason.clone()));
        }
        if let Ok(mut published) = self.published.lock() {
            published.push(request.clone());
        }
        Ok(())
    }
}
