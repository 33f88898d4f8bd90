//! Image search dialog state
//!
//! A search is split in two so the provider call can run wherever the
//! caller likes: [`ImageSearchDialog::begin`] issues a [`SearchTicket`] and
//! [`ImageSearchDialog::apply`] accepts the response. Every ticket carries
//! a monotonic generation; only the response for the most recently issued
//! ticket of the currently open session is applied.

use crate::error::SearchError;
use crate::types::ImageRef;

/// One issued search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
    pub page_size: usize,
}

/// What the presenter should show in the results area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// No search run yet in this session
    Idle,
    /// Loading indicator
    Searching,
    Results(usize),
    /// A search completed (or failed) with nothing to show
    NoResults,
}

/// Transient state of one open search dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    query: String,
    results: Vec<ImageRef>,
    in_flight: Option<u64>,
    has_searched: bool,
}

impl SearchSession {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results of the latest applied response, in provider order
    pub fn results(&self) -> &[ImageRef] {
        &self.results
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn status(&self) -> SearchStatus {
        if self.in_flight.is_some() {
            SearchStatus::Searching
        } else if !self.has_searched {
            SearchStatus::Idle
        } else if self.results.is_empty() {
            SearchStatus::NoResults
        } else {
            SearchStatus::Results(self.results.len())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageSearchDialog {
    session: Option<SearchSession>,
    generation: u64,
    page_size: usize,
}

impl ImageSearchDialog {
    pub fn new(page_size: usize) -> Self {
        Self {
            session: None,
            generation: 0,
            page_size,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Generation of the most recently issued ticket
    pub fn latest_generation(&self) -> u64 {
        self.generation
    }

    pub fn open(&mut self) {
        if self.session.is_none() {
            self.session = Some(SearchSession::default());
        }
    }

    /// Drop query, results and any outstanding request
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            if let Some(generation) = session.in_flight {
                tracing::debug!(generation, "search dialog closed with request in flight");
            }
        }
    }

    pub fn set_query(&mut self, query: &str) {
        if let Some(session) = self.session.as_mut() {
            session.query = query.to_string();
        }
    }

    /// Issue a ticket for the session's current query
    ///
    /// Returns `None` when the dialog is closed or the query is blank.
    pub fn begin(&mut self) -> Option<SearchTicket> {
        let session = self.session.as_mut()?;
        let query = session.query.trim().to_string();
        if query.is_empty() {
            return None;
        }

        self.generation += 1;
        session.in_flight = Some(self.generation);
        session.has_searched = true;

        Some(SearchTicket {
            generation: self.generation,
            query,
            page_size: self.page_size,
        })
    }

    /// Apply a provider response; returns `false` if it was discarded
    ///
    /// Failures are logged and shown as an empty result set.
    pub fn apply(
        &mut self,
        ticket: &SearchTicket,
        response: Result<Vec<ImageRef>, SearchError>,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(
                generation = ticket.generation,
                "search response after dialog closed, ignored"
            );
            return false;
        };
        if session.in_flight != Some(ticket.generation) {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.generation,
                "stale search response ignored"
            );
            return false;
        }

        session.in_flight = None;
        session.results = match response {
            Ok(images) => images,
            Err(error) => {
                tracing::warn!(
                    query = %ticket.query,
                    %error,
                    "image search failed, showing no results"
                );
                Vec::new()
            }
        };
        true
    }

    /// Look up a result of the open session by id
    pub fn result(&self, id: &str) -> Option<&ImageRef> {
        self.session
            .as_ref()?
            .results
            .iter()
            .find(|image| image.id == id)
    }
}
