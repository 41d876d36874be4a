//! Customer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the customer finders (`all`, `search`, `top_ten`, `get`).
//! - Persist customers on behalf of `Customer::save`.
//!
//! # Invariants
//! - `get` is the only finder that fails on a missing row (`NotFound`).
//! - `search` is an exact, case-insensitive match on first OR last name.
//! - `top_ten` only ranks customers with at least one reservation.

use crate::model::customer::{Customer, CustomerId};
use crate::repo::rows::{CustomerRow, RankedCustomerRow, CUSTOMER_COLUMNS};
use crate::repo::{ensure_table, RepoError, RepoResult};
use log::{debug, info, warn};
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, Params};

const TOP_CUSTOMERS_LIMIT: i64 = 10;
// SQLite's built-in UPPER only folds ASCII letters.
const UNICODE_UPPER_FN: &str = "unicode_upper";

/// Repository interface for customer reads and writes.
pub trait CustomerRepository {
    /// Every customer, sorted by last name then first name.
    fn all(&self) -> RepoResult<Vec<Customer>>;
    /// Customers whose first or last name equals `name`, ignoring case.
    fn search(&self, name: &str) -> RepoResult<Vec<Customer>>;
    /// Up to ten customers with the most reservations, busiest first.
    fn top_ten(&self) -> RepoResult<Vec<Customer>>;
    /// One customer by id, or `RepoError::NotFound`.
    fn get(&self, id: CustomerId) -> RepoResult<Customer>;
    /// Inserts `customer` and returns the store-assigned id.
    fn insert_customer(&self, customer: &Customer) -> RepoResult<CustomerId>;
    /// Overwrites the stored fields of customer `id`.
    fn update_customer(&self, id: CustomerId, customer: &Customer) -> RepoResult<()>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Constructs a repository over a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "customers")?;
        register_unicode_upper(conn)?;
        Ok(Self { conn })
    }

    fn query_customers<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Customer>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(CustomerRow::from_row(row)?.into_customer());
        }
        Ok(customers)
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn all(&self) -> RepoResult<Vec<Customer>> {
        let customers = self.query_customers(
            &format!(
                "SELECT {CUSTOMER_COLUMNS}
                 FROM customers c
                 ORDER BY c.last_name, c.first_name;"
            ),
            [],
        )?;
        debug!(
            "event=customer_all module=repo status=ok rows={}",
            customers.len()
        );
        Ok(customers)
    }

    fn search(&self, name: &str) -> RepoResult<Vec<Customer>> {
        let customers = self.query_customers(
            &format!(
                "SELECT {CUSTOMER_COLUMNS}
                 FROM customers c
                 WHERE {UNICODE_UPPER_FN}(c.first_name) = ?1
                    OR {UNICODE_UPPER_FN}(c.last_name) = ?1
                 ORDER BY c.id;"
            ),
            [name.to_uppercase()],
        )?;
        debug!(
            "event=customer_search module=repo status=ok rows={}",
            customers.len()
        );
        Ok(customers)
    }

    fn top_ten(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"SELECT {CUSTOMER_COLUMNS}, COUNT(r.id) AS "reservationCount"
               FROM customers c
               INNER JOIN reservations r ON r.customer_id = c.id
               GROUP BY c.id
               ORDER BY "reservationCount" DESC, c.id ASC
               LIMIT ?1;"#
        ))?;
        let mut rows = stmt.query([TOP_CUSTOMERS_LIMIT])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            let ranked = RankedCustomerRow::from_row(row)?;
            debug!(
                "event=customer_top_ten module=repo status=row customer_id={} reservation_count={}",
                ranked.customer.id, ranked.reservation_count
            );
            customers.push(ranked.customer.into_customer());
        }
        debug!(
            "event=customer_top_ten module=repo status=ok rows={}",
            customers.len()
        );
        Ok(customers)
    }

    fn get(&self, id: CustomerId) -> RepoResult<Customer> {
        let mut customers = self.query_customers(
            &format!(
                "SELECT {CUSTOMER_COLUMNS}
                 FROM customers c
                 WHERE c.id = ?1;"
            ),
            [id],
        )?;

        match customers.pop() {
            Some(customer) => Ok(customer),
            None => {
                debug!("event=customer_get module=repo status=not_found customer_id={id}");
                Err(RepoError::NotFound(id))
            }
        }
    }

    fn insert_customer(&self, customer: &Customer) -> RepoResult<CustomerId> {
        self.conn.execute(
            "INSERT INTO customers (first_name, last_name, phone, notes)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                customer.first_name(),
                customer.last_name(),
                customer.phone(),
                customer.notes(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        info!("event=customer_save module=repo status=ok mode=insert customer_id={id}");
        Ok(id)
    }

    fn update_customer(&self, id: CustomerId, customer: &Customer) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE customers
             SET
                first_name = ?1,
                last_name = ?2,
                phone = ?3,
                notes = ?4
             WHERE id = ?5;",
            params![
                customer.first_name(),
                customer.last_name(),
                customer.phone(),
                customer.notes(),
                id,
            ],
        )?;

        if changed == 0 {
            warn!("event=customer_save module=repo status=noop mode=update customer_id={id}");
        } else {
            info!("event=customer_save module=repo status=ok mode=update customer_id={id}");
        }
        Ok(())
    }
}

/// Registers `unicode_upper(text)`, a full Unicode upper-casing that matches
/// `str::to_uppercase` on the Rust side of a comparison.
fn register_unicode_upper(conn: &Connection) -> RepoResult<()> {
    conn.create_scalar_function(
        UNICODE_UPPER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|text| text.to_uppercase()))
        },
    )?;
    Ok(())
}
