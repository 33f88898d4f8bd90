//! Per-content-type audience selection

use crate::types::{AccountId, ContentType};

/// Selected destination accounts, one independent set per content type
///
/// Each set keeps ids in the order they were first toggled on. Ids are not
/// validated against any registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudienceSelector {
    post: Vec<AccountId>,
    reel: Vec<AccountId>,
}

impl AudienceSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `account_id` if absent, remove it if present
    ///
    /// Returns `true` when the id is selected afterwards. The other content
    /// type's set is never touched.
    pub fn toggle(&mut self, content_type: ContentType, account_id: AccountId) -> bool {
        let set = self.set_mut(content_type);
        match set.iter().position(|id| *id == account_id) {
            Some(index) => {
                set.remove(index);
                false
            }
            None => {
                set.push(account_id);
                true
            }
        }
    }

    pub fn is_selected(&self, content_type: ContentType, account_id: &AccountId) -> bool {
        self.selected(content_type).contains(account_id)
    }

    pub fn selected(&self, content_type: ContentType) -> &[AccountId] {
        match content_type {
            ContentType::Post => &self.post,
            ContentType::Reel => &self.reel,
        }
    }

    pub fn is_empty(&self, content_type: ContentType) -> bool {
        self.selected(content_type).is_empty()
    }

    fn set_mut(&mut self, content_type: ContentType) -> &mut Vec<AccountId> {
        match content_type {
            ContentType::Post => &mut self.post,
            ContentType::Reel => &mut self.reel,
        }
    }
}
