//! Domain model for restaurant customers and their reservations.
//!
//! # Responsibility
//! - Hold the field invariants of both entities.
//! - Normalize user input at construction/assignment time, before any query.
//!
//! # Invariants
//! - Notes fields are never absent; an empty input becomes `""`.
//! - An entity `id` is only ever assigned by the store.
//! - A reservation refers to its customer by id only.

pub mod customer;
pub mod datetime;
pub mod error;
pub mod reservation;
