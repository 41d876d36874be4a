//! Core domain logic for Lunchly, a restaurant booking application.
//! This crate owns the customer/reservation invariants and their persistence.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::customer::{Customer, CustomerId, CustomerInput};
pub use model::error::{ErrorKind, ModelError, ModelResult};
pub use model::reservation::{parse_start_at, Reservation, ReservationId, ReservationInput};
pub use repo::customer_repo::{CustomerRepository, SqliteCustomerRepository};
pub use repo::reservation_repo::{ReservationRepository, SqliteReservationRepository};
pub use repo::{RepoError, RepoResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
