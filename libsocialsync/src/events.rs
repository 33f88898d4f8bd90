//! Composer change notifications
//!
//! The composer emits a [`ComposerEvent`] after every state change so a
//! presenter can re-render without polling. The bus is a
//! `tokio::sync::broadcast` channel: emitting never blocks, and events are
//! dropped when nobody is subscribed.
//!
//! ```
//! use libsocialsync::events::{ComposerEvent, EventBus};
//!
//! let bus = EventBus::new(32);
//! let mut rx = bus.subscribe();
//! bus.emit(ComposerEvent::ScheduleCleared);
//! assert!(matches!(rx.try_recv(), Ok(ComposerEvent::ScheduleCleared)));
//! ```

use serde::Serialize;
use tokio::sync::broadcast;

use crate::types::{AccountId, ContentType};

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<ComposerEvent>;

/// Default per-subscriber buffer
pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ComposerEvent>,
}

impl EventBus {
    /// `capacity` is how many events a lagging subscriber may fall behind
    /// before the oldest are dropped
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: ComposerEvent) {
        // Err only means there are no receivers
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComposerEvent {
    DraftChanged {
        char_count: usize,
    },

    ImageAttached {
        image_id: String,
        total: usize,
    },

    ImageRemoved {
        image_id: String,
        total: usize,
    },

    ScheduleConfirmed {
        /// e.g. "Wed, Jan 1, 2025 at 10:00 AM"
        summary: String,
    },

    ScheduleCleared,

    AudienceChanged {
        content_type: ContentType,
        account_id: AccountId,
        selected: bool,
        can_submit: bool,
    },

    SearchCompleted {
        query: String,
        results: usize,
    },

    Submitted {
        request_id: String,
        account_count: usize,
    },
}
