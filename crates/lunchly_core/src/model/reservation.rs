//! Reservation domain model.
//!
//! # Responsibility
//! - Represent one booking made by a customer.
//! - Reject invalid guest counts and start times at assignment time.
//!
//! # Invariants
//! - `num_guests >= 1`.
//! - `customer_id` is write-once: a different value is refused and the
//!   original is kept, the same value is accepted as a no-op.
//! - `notes` is always a string, `""` when no notes were given.

use crate::model::customer::CustomerId;
use crate::model::datetime::{format_long, format_relative};
use crate::model::error::{ModelError, ModelResult};
use crate::repo::reservation_repo::ReservationRepository;
use crate::repo::RepoResult;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned reservation identity.
pub type ReservationId = i64;

/// Textual start-time layouts accepted besides RFC 3339, read as UTC.
const START_AT_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%dT%H:%M",
];

/// Raw reservation fields as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationInput {
    pub customer_id: CustomerId,
    pub num_guests: i64,
    pub start_at: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A party booked by one customer at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    id: Option<ReservationId>,
    customer_id: CustomerId,
    num_guests: i64,
    start_at: DateTime<Utc>,
    notes: String,
}

impl Reservation {
    /// Creates an unsaved reservation with empty notes.
    ///
    /// # Errors
    /// - `ModelError::InvalidNumGuests` when `num_guests < 1`.
    pub fn new(
        customer_id: CustomerId,
        num_guests: i64,
        start_at: DateTime<Utc>,
    ) -> ModelResult<Self> {
        validate_num_guests(num_guests)?;
        Ok(Self {
            id: None,
            customer_id,
            num_guests,
            start_at,
            notes: String::new(),
        })
    }

    /// Creates an unsaved reservation from raw input.
    ///
    /// # Errors
    /// - `ModelError::InvalidNumGuests` for a guest count below one.
    /// - `ModelError::InvalidStartAt` when `start_at` does not parse.
    pub fn from_input(input: ReservationInput) -> ModelResult<Self> {
        let start_at = parse_start_at(&input.start_at)?;
        let mut reservation = Self::new(input.customer_id, input.num_guests, start_at)?;
        reservation.set_notes(input.notes);
        Ok(reservation)
    }

    /// Rebuilds a persisted reservation, re-checking stored values.
    pub(crate) fn from_stored(
        id: ReservationId,
        customer_id: CustomerId,
        num_guests: i64,
        start_at: DateTime<Utc>,
        notes: Option<String>,
    ) -> ModelResult<Self> {
        let mut reservation = Self::new(customer_id, num_guests, start_at)?;
        reservation.id = Some(id);
        reservation.set_notes(notes);
        Ok(reservation)
    }

    pub fn id(&self) -> Option<ReservationId> {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn num_guests(&self) -> i64 {
        self.num_guests
    }

    pub fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Links this reservation to `customer_id`.
    ///
    /// # Errors
    /// - `ModelError::CustomerIdConflict` when already linked to another
    ///   customer. The current link is left untouched.
    pub fn set_customer_id(&mut self, customer_id: CustomerId) -> ModelResult<()> {
        if self.customer_id != customer_id {
            return Err(ModelError::CustomerIdConflict {
                current: self.customer_id,
                attempted: customer_id,
            });
        }
        Ok(())
    }

    /// # Errors
    /// - `ModelError::InvalidNumGuests` when `value < 1`; the old count stays.
    pub fn set_num_guests(&mut self, value: i64) -> ModelResult<()> {
        validate_num_guests(value)?;
        self.num_guests = value;
        Ok(())
    }

    pub fn set_start_at(&mut self, value: DateTime<Utc>) {
        self.start_at = value;
    }

    /// Parses and stores a textual start time.
    ///
    /// # Errors
    /// - `ModelError::InvalidStartAt` when `raw` is not a calendar timestamp;
    ///   the old value stays.
    pub fn set_start_at_text(&mut self, raw: &str) -> ModelResult<()> {
        self.start_at = parse_start_at(raw)?;
        Ok(())
    }

    /// Stores notes; absent input becomes `""`.
    pub fn set_notes(&mut self, value: Option<String>) {
        self.notes = value.unwrap_or_default();
    }

    /// Long local-time rendering, e.g. `March 5th 2024, 7:30 pm`.
    pub fn formatted_start_at(&self) -> String {
        format_long(&self.start_at.with_timezone(&Local))
    }

    /// Relative rendering against the current clock, e.g. `in 3 days`.
    pub fn relative_start_at(&self) -> String {
        format_relative(&self.start_at, &Utc::now())
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Inserts this reservation when unsaved, otherwise updates it by id.
    ///
    /// # Side effects
    /// - On first insert, captures the store-assigned id into `self`.
    pub fn save<R: ReservationRepository + ?Sized>(&mut self, repo: &R) -> RepoResult<()> {
        match self.id {
            None => {
                let id = repo.insert_reservation(self)?;
                self.id = Some(id);
            }
            Some(id) => repo.update_reservation(id, self)?,
        }
        Ok(())
    }
}

/// Parses a start time given as RFC 3339 or as a plain `YYYY-MM-DD HH:MM`
/// style value (interpreted as UTC).
///
/// # Errors
/// - `ModelError::InvalidStartAt` when no accepted layout matches.
pub fn parse_start_at(raw: &str) -> ModelResult<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(value.with_timezone(&Utc));
    }

    START_AT_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ModelError::InvalidStartAt(raw.to_string()))
}

fn validate_num_guests(value: i64) -> ModelResult<()> {
    if value < 1 {
        return Err(ModelError::InvalidNumGuests(value));
    }
    Ok(())
}
