//! Reservation repository contract and SQLite implementation.
//!
//! # Invariants
//! - `start_at` is stored as UTC epoch milliseconds.
//! - Reservations for one customer come back in id (insertion) order.

use crate::model::customer::CustomerId;
use crate::model::reservation::{Reservation, ReservationId};
use crate::repo::rows::{ReservationRow, RESERVATION_COLUMNS};
use crate::repo::{ensure_table, RepoResult};
use log::{debug, info, warn};
use rusqlite::{params, Connection};

/// Repository interface for reservation reads and writes.
pub trait ReservationRepository {
    /// Every reservation made by `customer_id`.
    fn reservations_for_customer(&self, customer_id: CustomerId) -> RepoResult<Vec<Reservation>>;
    /// Inserts `reservation` and returns the store-assigned id.
    fn insert_reservation(&self, reservation: &Reservation) -> RepoResult<ReservationId>;
    /// Overwrites the stored fields of reservation `id`.
    fn update_reservation(&self, id: ReservationId, reservation: &Reservation) -> RepoResult<()>;
}

/// SQLite-backed reservation repository.
pub struct SqliteReservationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReservationRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "reservations")?;
        Ok(Self { conn })
    }
}

impl ReservationRepository for SqliteReservationRepository<'_> {
    fn reservations_for_customer(&self, customer_id: CustomerId) -> RepoResult<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RESERVATION_COLUMNS}
             FROM reservations
             WHERE customer_id = ?1
             ORDER BY id;"
        ))?;
        let mut rows = stmt.query([customer_id])?;
        let mut reservations = Vec::new();
        while let Some(row) = rows.next()? {
            reservations.push(ReservationRow::from_row(row)?.into_reservation()?);
        }

        debug!(
            "event=reservations_for_customer module=repo status=ok customer_id={} rows={}",
            customer_id,
            reservations.len()
        );
        Ok(reservations)
    }

    fn insert_reservation(&self, reservation: &Reservation) -> RepoResult<ReservationId> {
        self.conn.execute(
            "INSERT INTO reservations (customer_id, num_guests, start_at, notes)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                reservation.customer_id(),
                reservation.num_guests(),
                reservation.start_at().timestamp_millis(),
                reservation.notes(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        info!(
            "event=reservation_save module=repo status=ok mode=insert reservation_id={} customer_id={}",
            id,
            reservation.customer_id()
        );
        Ok(id)
    }

    fn update_reservation(&self, id: ReservationId, reservation: &Reservation) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE reservations
             SET
                customer_id = ?1,
                num_guests = ?2,
                start_at = ?3,
                notes = ?4
             WHERE id = ?5;",
            params![
                reservation.customer_id(),
                reservation.num_guests(),
                reservation.start_at().timestamp_millis(),
                reservation.notes(),
                id,
            ],
        )?;

        if changed == 0 {
            warn!("event=reservation_save module=repo status=noop mode=update reservation_id={id}");
        } else {
            info!("event=reservation_save module=repo status=ok mode=update reservation_id={id}");
        }
        Ok(())
    }
}
