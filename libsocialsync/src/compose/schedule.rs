//! Schedule negotiation
//!
//! Two persistent modes, publish now or at a confirmed time, plus a
//! transient dialog sub-state holding the user's proposal. Mode and
//! schedule are one value ([`Schedule`]) so they can never disagree.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::ScheduleMode;

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
const TIME_INPUT_FORMAT: &str = "%H:%M";
const TIME_SECONDS_FORMAT: &str = "%H:%M:%S";

/// A finalized future publish time
///
/// Wall-clock date and time; no timezone conversion is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedSchedule {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// e.g. "Wed, Jan 1, 2025"
    pub display_date: String,
    /// e.g. "10:00 AM"
    pub display_time: String,
}

impl ConfirmedSchedule {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time,
            display_date: format_display_date(date),
            display_time: format_display_time(time),
        }
    }

    pub fn at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// "Wed, Jan 1, 2025 at 10:00 AM"
    pub fn summary(&self) -> String {
        format!("{} at {}", self.display_date, self.display_time)
    }

    /// Date in the dialog's input format
    pub fn date_input(&self) -> String {
        self.date.format(DATE_INPUT_FORMAT).to_string()
    }

    /// Time in the dialog's input format
    ///
    /// Seconds are kept when non-zero so re-confirming the seeded value
    /// yields the same instant.
    pub fn time_input(&self) -> String {
        if self.time.second() == 0 {
            self.time.format(TIME_INPUT_FORMAT).to_string()
        } else {
            self.time.format(TIME_SECONDS_FORMAT).to_string()
        }
    }
}

/// Weekday, short month, day, year
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// 12-hour clock with AM/PM; midnight is 12:00 AM
pub fn format_display_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input, DATE_INPUT_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

fn parse_time(input: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(input, TIME_INPUT_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(input, TIME_SECONDS_FORMAT))
        .map_err(|_| ValidationError::InvalidTime(input.to_string()))
}

/// Check a date/time pair against `now`
///
/// The combined instant must be strictly later than `now`.
pub fn validate_schedule(
    date: &str,
    time: &str,
    now: NaiveDateTime,
) -> Result<ConfirmedSchedule, ValidationError> {
    let date = date.trim();
    let time = time.trim();

    if date.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    if time.is_empty() {
        return Err(ValidationError::MissingTime);
    }

    let schedule = ConfirmedSchedule::new(parse_date(date)?, parse_time(time)?);
    if schedule.at() <= now {
        return Err(ValidationError::NotFuture);
    }

    Ok(schedule)
}

/// Candidate values while the schedule dialog is open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleProposal {
    pub candidate_date: String,
    pub candidate_time: String,
    /// Inline error from the last failed confirmation
    pub error: Option<ValidationError>,
}

/// Publish timing: now, or at a confirmed schedule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Schedule {
    #[default]
    Now,
    Scheduled(ConfirmedSchedule),
}

impl Schedule {
    pub fn mode(&self) -> ScheduleMode {
        match self {
            Schedule::Now => ScheduleMode::Now,
            Schedule::Scheduled(_) => ScheduleMode::Scheduled,
        }
    }

    pub fn confirmed(&self) -> Option<&ConfirmedSchedule> {
        match self {
            Schedule::Now => None,
            Schedule::Scheduled(confirmed) => Some(confirmed),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleNegotiator {
    schedule: Schedule,
    dialog: Option<ScheduleProposal>,
}

impl ScheduleNegotiator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn mode(&self) -> ScheduleMode {
        self.schedule.mode()
    }

    pub fn confirmed(&self) -> Option<&ConfirmedSchedule> {
        self.schedule.confirmed()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn proposal(&self) -> Option<&ScheduleProposal> {
        self.dialog.as_ref()
    }

    /// Open the dialog, seeded from the confirmed schedule if there is one
    ///
    /// Re-opening an already open dialog keeps the current proposal.
    pub fn open_dialog(&mut self) {
        if self.dialog.is_some() {
            return;
        }
        let proposal = match self.schedule.confirmed() {
            Some(confirmed) => ScheduleProposal {
                candidate_date: confirmed.date_input(),
                candidate_time: confirmed.time_input(),
                error: None,
            },
            None => ScheduleProposal::default(),
        };
        self.dialog = Some(proposal);
    }

    /// Edit the candidate date; clears any inline error
    pub fn set_candidate_date(&mut self, date: &str) {
        if let Some(proposal) = self.dialog.as_mut() {
            proposal.candidate_date = date.to_string();
            proposal.error = None;
        }
    }

    /// Edit the candidate time; clears any inline error
    pub fn set_candidate_time(&mut self, time: &str) {
        if let Some(proposal) = self.dialog.as_mut() {
            proposal.candidate_time = time.to_string();
            proposal.error = None;
        }
    }

    /// "<date> at <time>" once both candidate fields hold valid values
    pub fn preview(&self) -> Option<String> {
        let proposal = self.dialog.as_ref()?;
        let date = parse_date(proposal.candidate_date.trim()).ok()?;
        let time = parse_time(proposal.candidate_time.trim()).ok()?;
        Some(ConfirmedSchedule::new(date, time).summary())
    }

    /// Confirm against the local wall clock
    pub fn confirm(
        &mut self,
        date: &str,
        time: &str,
    ) -> Result<ConfirmedSchedule, ValidationError> {
        self.confirm_at(date, time, Local::now().naive_local())
    }

    /// Confirm against an explicit `now`
    ///
    /// On failure mode and schedule are untouched and the error is attached
    /// to the open proposal. On success the dialog closes.
    pub fn confirm_at(
        &mut self,
        date: &str,
        time: &str,
        now: NaiveDateTime,
    ) -> Result<ConfirmedSchedule, ValidationError> {
        match validate_schedule(date, time, now) {
            Ok(confirmed) => {
                tracing::debug!(at = %confirmed.at(), "schedule confirmed");
                self.schedule = Schedule::Scheduled(confirmed.clone());
                self.dialog = None;
                Ok(confirmed)
            }
            Err(error) => {
                tracing::debug!(%error, "schedule rejected");
                if let Some(proposal) = self.dialog.as_mut() {
                    proposal.candidate_date = date.to_string();
                    proposal.candidate_time = time.to_string();
                    proposal.error = Some(error.clone());
                }
                Err(error)
            }
        }
    }

    /// Confirm whatever the open dialog currently holds
    pub fn confirm_proposal_at(
        &mut self,
        now: NaiveDateTime,
    ) -> Result<ConfirmedSchedule, ValidationError> {
        let (date, time) = self
            .dialog
            .as_ref()
            .map(|p| (p.candidate_date.clone(), p.candidate_time.clone()))
            .unwrap_or_default();
        self.confirm_at(&date, &time, now)
    }

    /// Publish immediately; drops any confirmed schedule
    pub fn switch_to_now(&mut self) {
        self.schedule = Schedule::Now;
    }

    /// Alias of [`switch_to_now`](Self::switch_to_now) for the "clear schedule" action
    pub fn clear(&mut self) {
        self.switch_to_now();
    }

    /// Close the dialog without touching mode or schedule
    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }
}
