//! Composition coordinator
//!
//! [`Composer`] owns the draft and coordinates the sub-components:
//!
//! - `media`: attached images, unique by id
//! - `schedule`: now vs. scheduled, plus the schedule dialog
//! - `audience`: selected accounts per content type
//! - `search`: the image search dialog and its request sequencing
//! - `panel`: read-only side-panel projections
//!
//! Every mutating operation is synchronous and runs through `&mut self`.
//! After each change the composer emits a [`ComposerEvent`] so presenters
//! can refresh.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use libsocialsync::{Composer, ComposerConfig, ContentType, StaticAccounts};
//! use libsocialsync::publish::MockPublisher;
//!
//! let mut composer =
//!     Composer::new(Arc::new(StaticAccounts::default()), ComposerConfig::default());
//! composer.set_text("Hello world");
//! assert!(!composer.can_submit(ContentType::Post));
//!
//! composer.toggle_account(ContentType::Post, "fb-1");
//! let publisher = MockPublisher::new();
//! let request = composer.submit(&publisher).unwrap();
//! assert_eq!(request.account_ids.len(), 1);
//! ```

pub mod audience;
pub mod media;
pub mod panel;
pub mod schedule;
pub mod search;

use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, info};

use self::audience::AudienceSelector;
use self::media::MediaSelection;
use self::panel::{PanelView, SidePanelTab};
use self::schedule::{ConfirmedSchedule, ScheduleNegotiator, ScheduleProposal};
use self::search::{ImageSearchDialog, SearchSession, SearchStatus, SearchTicket};
use crate::accounts::AccountRegistry;
use crate::config::{Config, DEFAULT_PAGE_SIZE};
use crate::error::{Result, SearchError, SubmissionError, ValidationError};
use crate::events::{ComposerEvent, EventBus, EventReceiver};
use crate::publish::{PublishRequest, Publisher};
use crate::search::ImageSearch;
use crate::types::{Account, AccountId, ContentType, ImageRef, ScheduleMode};

pub const LABEL_PUBLISH_NOW: &str = "Publish Now";
pub const LABEL_SCHEDULE: &str = "Schedule Post";

/// Rules beyond "at least one account" that gate submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitPolicy {
    /// Permit a draft with blank text and no images
    pub allow_empty: bool,
}

impl Default for SubmitPolicy {
    fn default() -> Self {
        Self { allow_empty: true }
    }
}

#[derive(Debug, Clone)]
pub struct ComposerConfig {
    pub policy: SubmitPolicy,
    /// Results requested per image search
    pub page_size: usize,
    pub default_content_type: ContentType,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            policy: SubmitPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            default_content_type: ContentType::default(),
        }
    }
}

impl ComposerConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            policy: SubmitPolicy {
                allow_empty: config.compose.allow_empty,
            },
            page_size: config.search.page_size,
            default_content_type: config.compose.default_content_type,
        }
    }
}

/// Which modal dialog is open
///
/// Opening one dialog does not close the other; when both are open the
/// schedule dialog is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Idle,
    Schedule,
    ImageSearch,
}

/// Floating surfaces the presentation layer may ask to dismiss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    EmojiPicker,
    ImageSearch,
}

/// Derived submit control state for the active content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitState {
    pub can_submit: bool,
    pub label: &'static str,
    pub blocked_reason: Option<SubmissionError>,
}

pub struct Composer {
    text: String,
    media: MediaSelection,
    schedule: ScheduleNegotiator,
    audience: AudienceSelector,
    search: ImageSearchDialog,
    content_type: ContentType,
    active_tab: SidePanelTab,
    emoji_picker_open: bool,
    accounts: Arc<dyn AccountRegistry>,
    config: ComposerConfig,
    events: EventBus,
}

impl Composer {
    /// Create a composer with an empty draft and its own event bus
    ///
    /// # Arguments
    ///
    /// * `accounts` - Source of candidate destination accounts
    /// * `config` - Submit policy, search page size and initial content type
    pub fn new(accounts: Arc<dyn AccountRegistry>, config: ComposerConfig) -> Self {
        Self::with_event_bus(accounts, config, EventBus::default())
    }

    /// Create a composer that emits on a shared `events` bus
    pub fn with_event_bus(
        accounts: Arc<dyn AccountRegistry>,
        config: ComposerConfig,
        events: EventBus,
    ) -> Self {
        Self {
            text: String::new(),
            media: MediaSelection::new(),
            schedule: ScheduleNegotiator::new(),
            audience: AudienceSelector::new(),
            search: ImageSearchDialog::new(config.page_size),
            content_type: config.default_content_type,
            active_tab: SidePanelTab::default(),
            emoji_picker_open: false,
            accounts,
            config,
            events,
        }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    // === Draft ===

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters, not bytes
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.draft_changed();
    }

    /// Append characters produced by the emoji picker
    pub fn insert_emoji(&mut self, emoji: &str) {
        self.text.push_str(emoji);
        self.draft_changed();
    }

    fn draft_changed(&self) {
        self.events.emit(ComposerEvent::DraftChanged {
            char_count: self.char_count(),
        });
    }

    pub fn toggle_emoji_picker(&mut self) {
        self.emoji_picker_open = !self.emoji_picker_open;
    }

    pub fn emoji_picker_open(&self) -> bool {
        self.emoji_picker_open
    }

    /// Explicit dismissal raised by the presentation layer
    pub fn dismiss(&mut self, overlay: Overlay) {
        match overlay {
            Overlay::EmojiPicker => self.emoji_picker_open = false,
            Overlay::ImageSearch => self.close_image_search(),
        }
    }

    // === Media ===

    pub fn images(&self) -> &[ImageRef] {
        self.media.images()
    }

    /// Attach an image; returns `false` if its id was already attached
    pub fn select_image(&mut self, image: ImageRef) -> bool {
        let image_id = image.id.clone();
        let attached = self.media.select(image);
        if attached {
            debug!(image_id = %image_id, "image attached");
            self.events.emit(ComposerEvent::ImageAttached {
                image_id,
                total: self.media.len(),
            });
        }
        attached
    }

    pub fn remove_image(&mut self, id: &str) -> bool {
        let removed = self.media.remove(id);
        if removed {
            debug!(image_id = id, "image removed");
            self.events.emit(ComposerEvent::ImageRemoved {
                image_id: id.to_string(),
                total: self.media.len(),
            });
        }
        removed
    }

    // === Image search ===

    pub fn open_image_search(&mut self) {
        self.search.open();
    }

    /// Close the search dialog; late responses for it are ignored
    pub fn close_image_search(&mut self) {
        self.search.close();
    }

    pub fn search_session(&self) -> Option<&SearchSession> {
        self.search.session()
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search.set_query(query);
    }

    /// Issue a search ticket for the current query
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        let ticket = self.search.begin();
        if let Some(ticket) = &ticket {
            debug!(generation = ticket.generation, query = %ticket.query, "image search started");
        }
        ticket
    }

    /// Apply a provider response; stale and post-close responses are dropped
    pub fn apply_search_results(
        &mut self,
        ticket: &SearchTicket,
        response: std::result::Result<Vec<ImageRef>, SearchError>,
    ) -> bool {
        let applied = self.search.apply(ticket, response);
        if applied {
            let results = self.search.session().map(|s| s.results().len()).unwrap_or(0);
            self.events.emit(ComposerEvent::SearchCompleted {
                query: ticket.query.clone(),
                results,
            });
        }
        applied
    }

    /// Run the current query against `provider` and apply the outcome
    ///
    /// Equivalent to [`begin_search`](Self::begin_search), awaiting the
    /// provider, then [`apply_search_results`](Self::apply_search_results).
    /// A provider failure is logged and reported as
    /// `SearchStatus::NoResults`; it is never returned as an error.
    ///
    /// # Arguments
    ///
    /// * `provider` - Image search backend to query
    ///
    /// # Returns
    ///
    /// The session's status afterwards. `SearchStatus::Idle` when the dialog
    /// is closed or the query is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use libsocialsync::compose::search::SearchStatus;
    /// use libsocialsync::search::mock::{sample_image, MockImageSearch};
    /// use libsocialsync::{Composer, ComposerConfig, StaticAccounts};
    ///
    /// # async fn example() {
    /// let provider = MockImageSearch::new().with_results("sunset", vec![sample_image("a")]);
    /// let mut composer =
    ///     Composer::new(Arc::new(StaticAccounts::default()), ComposerConfig::default());
    ///
    /// composer.open_image_search();
    /// composer.set_search_query("sunset");
    /// assert_eq!(composer.search_images(&provider).await, SearchStatus::Results(1));
    /// # }
    /// ```
    pub async fn search_images(&mut self, provider: &dyn ImageSearch) -> SearchStatus {
        let Some(ticket) = self.begin_search() else {
            return self.search_status();
        };
        let response = provider.search(&ticket.query, ticket.page_size).await;
        self.apply_search_results(&ticket, response);
        self.search_status()
    }

    pub fn search_status(&self) -> SearchStatus {
        self.search
            .session()
            .map(SearchSession::status)
            .unwrap_or(SearchStatus::Idle)
    }

    /// Attach a result of the open search and close the dialog
    ///
    /// Returns `false`, leaving the dialog open, if no result has that id.
    pub fn select_search_result(&mut self, id: &str) -> bool {
        let Some(image) = self.search.result(id).cloned() else {
            return false;
        };
        self.select_image(image);
        self.close_image_search();
        true
    }

    // === Schedule ===

    pub fn mode(&self) -> ScheduleMode {
        self.schedule.mode()
    }

    pub fn schedule(&self) -> Option<&ConfirmedSchedule> {
        self.schedule.confirmed()
    }

    pub fn schedule_proposal(&self) -> Option<&ScheduleProposal> {
        self.schedule.proposal()
    }

    /// "<date> at <time>" for the open dialog, once both fields are valid
    pub fn schedule_preview(&self) -> Option<String> {
        self.schedule.preview()
    }

    pub fn open_schedule_dialog(&mut self) {
        self.schedule.open_dialog();
    }

    pub fn set_schedule_date(&mut self, date: &str) {
        self.schedule.set_candidate_date(date);
    }

    pub fn set_schedule_time(&mut self, time: &str) {
        self.schedule.set_candidate_time(time);
    }

    /// Confirm a schedule against the local wall clock
    ///
    /// On success the mode becomes `Scheduled`, the dialog closes and a
    /// `ScheduleConfirmed` event is emitted. On failure mode and schedule
    /// are untouched and, if the dialog is open, the error is attached to
    /// its proposal.
    ///
    /// # Arguments
    ///
    /// * `date` - `YYYY-MM-DD`
    /// * `time` - `HH:MM` or `HH:MM:SS`, 24-hour
    ///
    /// # Errors
    ///
    /// - `ValidationError::MissingDate` / `MissingTime` for blank input
    /// - `ValidationError::InvalidDate` / `InvalidTime` for unparseable input
    /// - `ValidationError::NotFuture` unless the instant is strictly later than now
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use libsocialsync::error::ValidationError;
    /// use libsocialsync::{Composer, ComposerConfig, ScheduleMode, StaticAccounts};
    ///
    /// let mut composer =
    ///     Composer::new(Arc::new(StaticAccounts::default()), ComposerConfig::default());
    ///
    /// assert_eq!(
    ///     composer.confirm_schedule("2020-01-01", "10:00"),
    ///     Err(ValidationError::NotFuture)
    /// );
    /// assert_eq!(composer.mode(), ScheduleMode::Now);
    ///
    /// composer.confirm_schedule("2999-01-01", "10:00").unwrap();
    /// assert_eq!(composer.submit_label(), "Schedule Post");
    /// ```
    pub fn confirm_schedule(
        &mut self,
        date: &str,
        time: &str,
    ) -> std::result::Result<ConfirmedSchedule, ValidationError> {
        self.confirm_schedule_at(date, time, Local::now().naive_local())
    }

    /// [`confirm_schedule`](Self::confirm_schedule) with an explicit `now`
    pub fn confirm_schedule_at(
        &mut self,
        date: &str,
        time: &str,
        now: NaiveDateTime,
    ) -> std::result::Result<ConfirmedSchedule, ValidationError> {
        let confirmed = self.schedule.confirm_at(date, time, now)?;
        self.events.emit(ComposerEvent::ScheduleConfirmed {
            summary: confirmed.summary(),
        });
        Ok(confirmed)
    }

    /// Confirm the candidate values held by the open dialog
    pub fn confirm_schedule_proposal(
        &mut self,
    ) -> std::result::Result<ConfirmedSchedule, ValidationError> {
        let confirmed = self.schedule.confirm_proposal_at(Local::now().naive_local())?;
        self.events.emit(ComposerEvent::ScheduleConfirmed {
            summary: confirmed.summary(),
        });
        Ok(confirmed)
    }

    pub fn cancel_schedule_dialog(&mut self) {
        self.schedule.cancel_dialog();
    }

    pub fn switch_to_now(&mut self) {
        let was_scheduled = self.mode() == ScheduleMode::Scheduled;
        self.schedule.switch_to_now();
        if was_scheduled {
            debug!("schedule cleared");
            self.events.emit(ComposerEvent::ScheduleCleared);
        }
    }

    pub fn clear_schedule(&mut self) {
        self.switch_to_now();
    }

    // === Audience ===

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Switch the active content type; neither selection is altered
    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.content_type = content_type;
    }

    /// Add the account to the audience for `content_type`, or remove it
    ///
    /// The other content type's audience is never touched. Ids are not
    /// checked against the registry.
    ///
    /// # Arguments
    ///
    /// * `content_type` - Audience to edit
    /// * `account_id` - Account to toggle
    ///
    /// # Returns
    ///
    /// `true` when the account is selected afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use libsocialsync::{Composer, ComposerConfig, ContentType, StaticAccounts};
    ///
    /// let mut composer =
    ///     Composer::new(Arc::new(StaticAccounts::default()), ComposerConfig::default());
    ///
    /// assert!(composer.toggle_account(ContentType::Reel, "ig-1"));
    /// assert!(composer.can_submit(ContentType::Reel));
    /// assert!(!composer.can_submit(ContentType::Post));
    ///
    /// assert!(!composer.toggle_account(ContentType::Reel, "ig-1"));
    /// ```
    pub fn toggle_account(
        &mut self,
        content_type: ContentType,
        account_id: impl Into<AccountId>,
    ) -> bool {
        let account_id = account_id.into();
        let selected = self.audience.toggle(content_type, account_id.clone());
        self.events.emit(ComposerEvent::AudienceChanged {
            content_type,
            account_id,
            selected,
            can_submit: self.can_submit(content_type),
        });
        selected
    }

    pub fn is_selected(&self, content_type: ContentType, account_id: &AccountId) -> bool {
        self.audience.is_selected(content_type, account_id)
    }

    pub fn selected_accounts(&self, content_type: ContentType) -> &[AccountId] {
        self.audience.selected(content_type)
    }

    /// Candidate accounts from the registry
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.accounts()
    }

    /// Registry entries for the selected ids; unknown ids are skipped
    pub fn selected_account_details(&self, content_type: ContentType) -> Vec<Account> {
        self.audience
            .selected(content_type)
            .iter()
            .filter_map(|id| self.accounts.find(id))
            .collect()
    }

    // === Side panel ===

    pub fn active_tab(&self) -> SidePanelTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: SidePanelTab) {
        self.active_tab = tab;
    }

    pub fn panel_view(&self) -> PanelView {
        panel::project(self)
    }

    pub fn dialog(&self) -> DialogState {
        if self.schedule.is_dialog_open() {
            DialogState::Schedule
        } else if self.search.is_open() {
            DialogState::ImageSearch
        } else {
            DialogState::Idle
        }
    }

    // === Submission ===

    fn check_submit(&self, content_type: ContentType) -> std::result::Result<(), SubmissionError> {
        if self.audience.is_empty(content_type) {
            return Err(SubmissionError::NoAudience(content_type));
        }
        if !self.config.policy.allow_empty && self.text.trim().is_empty() && self.media.is_empty() {
            return Err(SubmissionError::EmptyDraft);
        }
        Ok(())
    }

    /// Whether the audience for `content_type` is non-empty and the draft
    /// satisfies the submit policy
    pub fn can_submit(&self, content_type: ContentType) -> bool {
        self.check_submit(content_type).is_ok()
    }

    /// "Publish Now" or "Schedule Post", following the mode
    pub fn submit_label(&self) -> &'static str {
        match self.mode() {
            ScheduleMode::Now => LABEL_PUBLISH_NOW,
            ScheduleMode::Scheduled => LABEL_SCHEDULE,
        }
    }

    pub fn submit_state(&self) -> SubmitState {
        let blocked_reason = self.check_submit(self.content_type).err();
        SubmitState {
            can_submit: blocked_reason.is_none(),
            label: self.submit_label(),
            blocked_reason,
        }
    }

    /// Assemble the request for the active content type and hand it over
    ///
    /// The composer is left unchanged; call [`clear`](Self::clear) after a
    /// successful publish to start a new draft.
    ///
    /// # Arguments
    ///
    /// * `publisher` - Delivery collaborator that receives the request
    ///
    /// # Returns
    ///
    /// The request that was handed to `publisher`. Images and account ids
    /// are in selection order.
    ///
    /// # Errors
    ///
    /// - `SubmissionError::NoAudience` when no account is selected
    /// - `SubmissionError::EmptyDraft` when the policy forbids empty drafts
    /// - `PublishError` when the publisher refuses the request
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use libsocialsync::publish::MockPublisher;
    /// use libsocialsync::{Composer, ComposerConfig, ContentType, ScheduleMode, StaticAccounts};
    ///
    /// let mut composer =
    ///     Composer::new(Arc::new(StaticAccounts::default()), ComposerConfig::default());
    /// let publisher = MockPublisher::new();
    ///
    /// composer.set_text("Launch day");
    /// assert!(composer.submit(&publisher).is_err());
    ///
    /// composer.toggle_account(ContentType::Post, "li-1");
    /// let request = composer.submit(&publisher).unwrap();
    /// assert_eq!(request.mode, ScheduleMode::Now);
    /// assert_eq!(publisher.published(), vec![request]);
    /// ```
    pub fn submit(&self, publisher: &dyn Publisher) -> Result<PublishRequest> {
        self.check_submit(self.content_type)?;

        let request = PublishRequest {
            id: uuid::Uuid::new_v4().to_string(),
            text: self.text.clone(),
            images: self.media.images().to_vec(),
            mode: self.mode(),
            schedule: self.schedule.confirmed().cloned(),
            content_type: self.content_type,
            account_ids: self.audience.selected(self.content_type).to_vec(),
            created_at: chrono::Utc::now().timestamp(),
        };

        publisher.publish(&request)?;

        info!(
            request_id = %request.id,
            content_type = %request.content_type,
            mode = %request.mode,
            accounts = request.account_ids.len(),
            images = request.images.len(),
            "post submitted"
        );
        self.events.emit(ComposerEvent::Submitted {
            request_id: request.id.clone(),
            account_count: request.account_ids.len(),
        });

        Ok(request)
    }

    /// Reset the draft after a successful publish
    ///
    /// Text, images, schedule and open dialogs are cleared; audience
    /// selections and the active content type are kept.
    pub fn clear(&mut self) {
        self.text.clear();
        self.media.clear();
        self.schedule.cancel_dialog();
        self.switch_to_now();
        self.search.close();
        self.emoji_picker_open = false;
        self.draft_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::StaticAccounts;
    use crate::publish::MockPublisher;
    use crate::search::mock::{sample_image, MockImageSearch};
    use crate::types::Platform;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M").unwrap()
    }

    fn composer() -> Composer {
        let accounts = StaticAccounts::new(vec![
            Account {
                id: AccountId::from("ig-1"),
                platform: Platform::Instagram,
                display_name: "Musharof".to_string(),
                avatar_url: "/images/user/owner.jpg".to_string(),
            },
            Account {
                id: AccountId::from("fb-1"),
                platform: Platform::Facebook,
                display_name: "Brand Page".to_string(),
                avatar_url: "/images/user/user-01.jpg".to_string(),
            },
        ]);
        Composer::new(Arc::new(accounts), ComposerConfig::default())
    }

    #[test]
    fn test_can_submit_tracks_audience() {
        let mut composer = composer();
        assert!(!composer.can_submit(ContentType::Post));

        composer.toggle_account(ContentType::Post, "fb-1");
        assert!(composer.can_submit(ContentType::Post));

        composer.toggle_account(ContentType::Post, "fb-1");
        assert!(!composer.can_submit(ContentType::Post));
    }

    #[test]
    fn test_submit_label_follows_mode() {
        let mut composer = composer();
        assert_eq!(composer.submit_label(), "Publish Now");

        composer
            .confirm_schedule_at("2030-01-01", "10:00", at("2025-01-01", "00:00"))
            .unwrap();
        assert_eq!(composer.submit_label(), "Schedule Post");

        composer.switch_to_now();
        assert_eq!(composer.submit_label(), "Publish Now");
    }

    #[test]
    fn test_submit_without_audience_fails() {
        let composer = composer();
        let publisher = MockPublisher::new();

        let err = composer.submit(&publisher).unwrap_err();
        assert!(matches!(
            err,
            crate::SocialSyncError::Submission(SubmissionError::NoAudience(ContentType::Post))
        ));
        assert!(publisher.published().is_empty());
    }

    #[test]
    fn test_submit_builds_ordered_request() {
        let mut composer = composer();
        composer.set_text("Golden hour");
        composer.select_image(sample_image("b"));
        composer.select_image(sample_image("a"));
        composer.toggle_account(ContentType::Post, "ig-1");
        composer.toggle_account(ContentType::Post, "fb-1");
        composer
            .confirm_schedule_at("2030-05-05", "17:30", at("2025-01-01", "00:00"))
            .unwrap();

        let publisher = MockPublisher::new();
        let request = composer.submit(&publisher).unwrap();

        assert_eq!(request.text, "Golden hour");
        assert_eq!(
            request.images.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            vec!["b", "a"]
        );
        assert_eq!(request.mode, ScheduleMode::Scheduled);
        assert_eq!(request.schedule.as_ref().unwrap().display_time, "5:30 PM");
        assert_eq!(request.content_type, ContentType::Post);
        assert_eq!(request.account_ids, vec![AccountId::from("ig-1"), AccountId::from("fb-1")]);
        assert_eq!(publisher.published(), vec![request]);
    }

    #[test]
    fn test_submit_uses_active_content_type() {
        let mut composer = composer();
        composer.toggle_account(ContentType::Post, "fb-1");
        composer.toggle_account(ContentType::Reel, "ig-1");
        composer.set_content_type(ContentType::Reel);

        let request = composer.submit(&MockPublisher::new()).unwrap();
        assert_eq!(request.content_type, ContentType::Reel);
        assert_eq!(request.account_ids, vec![AccountId::from("ig-1")]);
    }

    #[test]
    fn test_publisher_rejection_surfaces() {
        let mut composer = composer();
        composer.toggle_account(ContentType::Post, "fb-1");

        let err = composer.submit(&MockPublisher::rejecting("quota")).unwrap_err();
        assert!(matches!(err, crate::SocialSyncError::Publish(_)));
    }

    #[test]
    fn test_empty_draft_policy() {
        let config = ComposerConfig {
            policy: SubmitPolicy { allow_empty: false },
            ..ComposerConfig::default()
        };
        let mut composer = Composer::new(Arc::new(StaticAccounts::default()), config);
        composer.toggle_account(ContentType::Post, "fb-1");

        composer.set_text("   ");
        assert!(!composer.can_submit(ContentType::Post));
        assert_eq!(
            composer.submit_state().blocked_reason,
            Some(SubmissionError::EmptyDraft)
        );

        // An image alone satisfies the policy
        composer.select_image(sample_image("a"));
        assert!(composer.can_submit(ContentType::Post));
    }

    #[test]
    fn test_default_policy_allows_empty_draft() {
        let mut composer = composer();
        composer.toggle_account(ContentType::Post, "fb-1");
        assert!(composer.submit(&MockPublisher::new()).is_ok());
    }

    #[test]
    fn test_insert_emoji_appends() {
        let mut composer = composer();
        composer.set_text("Hi ");
        composer.insert_emoji("👋");
        assert_eq!(composer.text(), "Hi 👋");
        assert_eq!(composer.char_count(), 4);
    }

    #[test]
    fn test_dialog_state_transitions() {
        let mut composer = composer();
        assert_eq!(composer.dialog(), DialogState::Idle);

        composer.open_schedule_dialog();
        assert_eq!(composer.dialog(), DialogState::Schedule);
        composer.cancel_schedule_dialog();
        assert_eq!(composer.dialog(), DialogState::Idle);

        composer.open_image_search();
        assert_eq!(composer.dialog(), DialogState::ImageSearch);
        composer.dismiss(Overlay::ImageSearch);
        assert_eq!(composer.dialog(), DialogState::Idle);
    }

    #[test]
    fn test_emoji_picker_dismiss() {
        let mut composer = composer();
        composer.toggle_emoji_picker();
        assert!(composer.emoji_picker_open());
        composer.dismiss(Overlay::EmojiPicker);
        assert!(!composer.emoji_picker_open());
    }

    #[test]
    fn test_select_search_result_attaches_and_closes() {
        let mut composer = composer();
        composer.open_image_search();
        composer.set_search_query("sunset");
        let ticket = composer.begin_search().unwrap();
        composer.apply_search_results(&ticket, Ok(vec![sample_image("a"), sample_image("b")]));

        assert!(!composer.select_search_result("missing"));
        assert_eq!(composer.dialog(), DialogState::ImageSearch);

        assert!(composer.select_search_result("b"));
        assert_eq!(composer.images().len(), 1);
        assert_eq!(composer.dialog(), DialogState::Idle);
        assert!(composer.search_session().is_none());
    }

    #[tokio::test]
    async fn test_search_images_with_provider() {
        let provider = MockImageSearch::new().with_results("sunset", vec![sample_image("a")]);
        let mut composer = composer();
        composer.open_image_search();
        composer.set_search_query("sunset");

        let status = composer.search_images(&provider).await;
        assert_eq!(status, SearchStatus::Results(1));
        assert_eq!(provider.calls(), vec![("sunset".to_string(), DEFAULT_PAGE_SIZE)]);
    }

    #[test]
    fn test_selected_account_details_skips_unknown() {
        let mut composer = composer();
        composer.toggle_account(ContentType::Post, "ghost");
        composer.toggle_account(ContentType::Post, "ig-1");

        let details = composer.selected_account_details(ContentType::Post);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].display_name, "Musharof");
        // The unknown id is still part of the audience
        assert_eq!(composer.selected_accounts(ContentType::Post).len(), 2);
    }

    #[test]
    fn test_clear_keeps_audience() {
        let mut composer = composer();
        composer.set_text("draft");
        composer.select_image(sample_image("a"));
        composer.toggle_account(ContentType::Reel, "ig-1");
        composer
            .confirm_schedule_at("2030-01-01", "10:00", at("2025-01-01", "00:00"))
            .unwrap();

        composer.clear();

        assert!(composer.text().is_empty());
        assert!(composer.images().is_empty());
        assert_eq!(composer.mode(), ScheduleMode::Now);
        assert!(composer.schedule().is_none());
        assert!(composer.is_selected(ContentType::Reel, &AccountId::from("ig-1")));
    }

    #[test]
    fn test_events_emitted_for_changes() {
        let mut composer = composer();
        let mut rx = composer.subscribe();

        composer.set_text("hey");
        composer.toggle_account(ContentType::Post, "fb-1");

        assert_eq!(rx.try_recv().unwrap(), ComposerEvent::DraftChanged { char_count: 3 });
        assert_eq!(
            rx.try_recv().unwrap(),
            ComposerEvent::AudienceChanged {
                content_type: ContentType::Post,
                account_id: AccountId::from("fb-1"),
                selected: true,
                can_submit: true,
            }
        );
    }

    #[test]
    fn test_panel_view_follows_active_tab() {
        let mut composer = composer();
        assert!(matches!(
            composer.panel_view(),
            PanelView::Preview { text: None, .. }
        ));

        composer.set_text("abc");
        composer.select_image(sample_image("a"));
        match composer.panel_view() {
            PanelView::Preview { text, thumbnails } => {
                assert_eq!(text.as_deref(), Some("abc"));
                assert_eq!(thumbnails, vec!["https://images.test/a/thumb.jpg".to_string()]);
            }
            other => panic!("unexpected view {:?}", other),
        }

        composer.set_active_tab(SidePanelTab::Tools);
        assert!(matches!(
            composer.panel_view(),
            PanelView::Tools { char_count: 3, .. }
        ));

        composer.set_active_tab(SidePanelTab::Schedule);
        assert!(matches!(
            composer.panel_view(),
            PanelView::Schedule {
                mode: ScheduleMode::Now,
                summary: None,
                submit_label: "Publish Now"
            }
        ));
    }
}
