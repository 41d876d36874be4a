//! Repository layer over the Lunchly store.
//!
//! # Responsibility
//! - Define query contracts for customers and reservations.
//! - Keep SQL text and row decoding inside the persistence boundary.
//!
//! # Invariants
//! - Every row is decoded through a typed row shape (`rows`) and the entity
//!   constructors, so entities never see partially-shaped input.
//! - Store failures are carried unchanged inside `RepoError::Db`.

pub mod customer_repo;
pub mod reservation_repo;
pub mod rows;

use crate::db::DbError;
use crate::model::customer::CustomerId;
use crate::model::error::ModelError;
use rusqlite::Connection;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for customer/reservation queries and writes.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("no such customer: {0}")]
    NotFound(CustomerId),
    #[error(transparent)]
    Validation(#[from] ModelError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error("connection is missing required table `{0}`")]
    MissingRequiredTable(&'static str),
}

impl RepoError {
    /// HTTP-style status a caller may surface for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Db(_) | Self::InvalidData(_) | Self::MissingRequiredTable(_) => 500,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn ensure_table(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;

    if exists != 1 {
        return Err(RepoError::MissingRequiredTable(table));
    }
    Ok(())
}
