//! Customer domain model.
//!
//! # Responsibility
//! - Represent one restaurant patron and normalize contact fields.
//! - Drive insert-or-update persistence through `CustomerRepository`.
//!
//! # Invariants
//! - `phone` is `None` for empty input and never `Some("")`.
//! - `notes` is always a string, `""` when no notes were given.
//! - `middle_name` is `""` when absent.
//! - `id` is `None` until the first save, then never changes.

use crate::model::reservation::Reservation;
use crate::repo::customer_repo::CustomerRepository;
use crate::repo::reservation_repo::ReservationRepository;
use crate::repo::RepoResult;
use log::debug;
use serde::{Deserialize, Serialize};

/// Store-assigned customer identity.
pub type CustomerId = i64;

/// Raw customer fields as submitted by a caller (for example a form post).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A patron of the restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    id: Option<CustomerId>,
    first_name: String,
    middle_name: String,
    last_name: String,
    phone: Option<String>,
    notes: String,
}

impl Customer {
    /// Creates an unsaved customer with no phone and empty notes.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            middle_name: String::new(),
            last_name: last_name.into(),
            phone: None,
            notes: String::new(),
        }
    }

    /// Creates an unsaved customer from raw input, normalizing optional fields.
    pub fn from_input(input: CustomerInput) -> Self {
        let mut customer = Self::new(input.first_name, input.last_name);
        customer.set_middle_name(input.middle_name);
        customer.set_phone(input.phone);
        customer.set_notes(input.notes);
        customer
    }

    /// Rebuilds a persisted customer from stored fields.
    ///
    /// Stored values go through the same normalization as user input.
    pub(crate) fn from_stored(
        id: CustomerId,
        first_name: String,
        last_name: String,
        phone: Option<String>,
        notes: Option<String>,
    ) -> Self {
        let mut customer = Self::new(first_name, last_name);
        customer.id = Some(id);
        customer.set_phone(phone);
        customer.set_notes(notes);
        customer
    }

    pub fn id(&self) -> Option<CustomerId> {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn middle_name(&self) -> &str {
        &self.middle_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Returns `first middle last`.
    ///
    /// An empty middle name leaves two spaces between first and last name;
    /// callers rely on this exact shape.
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.first_name, self.middle_name, self.last_name)
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.first_name = value.into();
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.last_name = value.into();
    }

    pub fn set_middle_name(&mut self, value: Option<String>) {
        self.middle_name = value.unwrap_or_default();
    }

    /// Stores the phone number; empty input becomes `None`.
    pub fn set_phone(&mut self, value: Option<String>) {
        self.phone = value.filter(|phone| !phone.is_empty());
    }

    /// Stores notes; absent input becomes `""`.
    pub fn set_notes(&mut self, value: Option<String>) {
        self.notes = value.unwrap_or_default();
    }

    /// Returns whether the store has assigned an id to this customer.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Inserts this customer when unsaved, otherwise updates it by id.
    ///
    /// # Side effects
    /// - On first insert, captures the store-assigned id into `self`.
    pub fn save<R: CustomerRepository + ?Sized>(&mut self, repo: &R) -> RepoResult<()> {
        match self.id {
            None => {
                let id = repo.insert_customer(self)?;
                self.id = Some(id);
            }
            Some(id) => repo.update_customer(id, self)?,
        }
        Ok(())
    }

    /// Loads every reservation made by this customer.
    ///
    /// An unsaved customer cannot have reservations, so no query is issued.
    pub fn reservations<R: ReservationRepository + ?Sized>(
        &self,
        repo: &R,
    ) -> RepoResult<Vec<Reservation>> {
        match self.id {
            Some(id) => repo.reservations_for_customer(id),
            None => {
                debug!("event=customer_reservations module=model status=skip reason=unsaved");
                Ok(Vec::new())
            }
        }
    }
}
