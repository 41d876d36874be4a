//! Typed row shapes returned by repository queries.
//!
//! Each query selects exactly the columns of one shape below, under the
//! aliases read here, and maps the shape into an entity.

use crate::model::customer::{Customer, CustomerId};
use crate::model::reservation::{Reservation, ReservationId};
use crate::repo::{RepoError, RepoResult};
use chrono::{DateTime, Utc};
use rusqlite::Row;

/// Column list shared by every customer query.
pub(crate) const CUSTOMER_COLUMNS: &str = r#"c.id AS "id",
    c.first_name AS "firstName",
    c.last_name AS "lastName",
    c.phone AS "phone",
    c.notes AS "notes""#;

pub(crate) const RESERVATION_COLUMNS: &str = r#"id AS "id",
    customer_id AS "customerId",
    num_guests AS "numGuests",
    start_at AS "startAt",
    notes AS "notes""#;

/// Row shape for `customers` reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl CustomerRow {
    pub(crate) fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            first_name: row.get("firstName")?,
            last_name: row.get("lastName")?,
            phone: row.get("phone")?,
            notes: row.get("notes")?,
        })
    }

    pub fn into_customer(self) -> Customer {
        Customer::from_stored(
            self.id,
            self.first_name,
            self.last_name,
            self.phone,
            self.notes,
        )
    }
}

/// Row shape for the reservation-count ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCustomerRow {
    pub customer: CustomerRow,
    pub reservation_count: i64,
}

impl RankedCustomerRow {
    pub(crate) fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            customer: CustomerRow::from_row(row)?,
            reservation_count: row.get("reservationCount")?,
        })
    }
}

/// Row shape for `reservations` reads; `start_at` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRow {
    pub id: ReservationId,
    pub customer_id: CustomerId,
    pub num_guests: i64,
    pub start_at: i64,
    pub notes: Option<String>,
}

impl ReservationRow {
    pub(crate) fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            customer_id: row.get("customerId")?,
            num_guests: row.get("numGuests")?,
            start_at: row.get("startAt")?,
            notes: row.get("notes")?,
        })
    }

    pub fn into_reservation(self) -> RepoResult<Reservation> {
        let start_at = DateTime::<Utc>::from_timestamp_millis(self.start_at).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid start_at value `{}` in reservations.start_at",
                self.start_at
            ))
        })?;

        let reservation = Reservation::from_stored(
            self.id,
            self.customer_id,
            self.num_guests,
            start_at,
            self.notes,
        )?;
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::{CUSTOMER_COLUMNS, RESERVATION_COLUMNS};
    use crate::db::open_db_in_memory;

    fn column_names(sql: &str) -> Vec<String> {
        let conn = open_db_in_memory().unwrap();
        let stmt = conn.prepare(sql).unwrap();
        stmt.column_names().into_iter().map(str::to_string).collect()
    }

    #[test]
    fn customer_columns_use_camel_case_aliases() {
        let names = column_names(&format!("SELECT {CUSTOMER_COLUMNS} FROM customers c;"));
        assert_eq!(names, ["id", "firstName", "lastName", "phone", "notes"]);
    }

    #[test]
    fn reservation_columns_use_camel_case_aliases() {
        let names = column_names(&format!("SELECT {RESERVATION_COLUMNS} FROM reservations;"));
        assert_eq!(names, ["id", "customerId", "numGuests", "startAt", "notes"]);
    }
}
