use chrono::{TimeZone, Utc};
use lunchly_core::db::open_db_in_memory;
use lunchly_core::{
    Customer, RepoError, Reservation, ReservationRepository, SqliteCustomerRepository,
    SqliteReservationRepository,
};
use rusqlite::{params, Connection};

fn saved_customer(conn: &Connection, first: &str) -> Customer {
    let repo = SqliteCustomerRepository::try_new(conn).unwrap();
    let mut customer = Customer::new(first, "Lee");
    customer.save(&repo).unwrap();
    customer
}

#[test]
fn save_then_list_for_customer_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();
    let customer_id = saved_customer(&conn, "Ann").id().unwrap();
    let start = Utc.with_ymd_and_hms(2024, 3, 5, 19, 30, 0).unwrap();

    let mut reservation = Reservation::new(customer_id, 2, start).unwrap();
    reservation.set_notes(Some("vegan".to_string()));
    reservation.save(&repo).unwrap();
    assert!(reservation.is_persisted());

    let loaded = repo.reservations_for_customer(customer_id).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0], reservation);
    assert_eq!(loaded[0].customer_id(), customer_id);
    assert_eq!(loaded[0].num_guests(), 2);
    assert_eq!(loaded[0].start_at(), start);
    assert_eq!(loaded[0].notes(), "vegan");
}

#[test]
fn second_save_updates_existing_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();
    let customer_id = saved_customer(&conn, "Ann").id().unwrap();
    let start = Utc.with_ymd_and_hms(2024, 3, 5, 19, 30, 0).unwrap();

    let mut reservation = Reservation::new(customer_id, 2, start).unwrap();
    reservation.save(&repo).unwrap();
    let id = reservation.id().unwrap();

    reservation.set_num_guests(6).unwrap();
    reservation.set_start_at_text("2024-03-06 18:00").unwrap();
    reservation.set_notes(None);
    reservation.save(&repo).unwrap();

    assert_eq!(reservation.id(), Some(id));
    let loaded = repo.reservations_for_customer(customer_id).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].num_guests(), 6);
    assert_eq!(
        loaded[0].start_at(),
        Utc.with_ymd_and_hms(2024, 3, 6, 18, 0, 0).unwrap()
    );
    assert_eq!(loaded[0].notes(), "");
}

#[test]
fn reservations_are_scoped_to_customer_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();
    let ann = saved_customer(&conn, "Ann").id().unwrap();
    let bob = saved_customer(&conn, "Bob").id().unwrap();

    let later = Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap();
    let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let mut first = Reservation::new(ann, 2, later).unwrap();
    first.save(&repo).unwrap();
    let mut other = Reservation::new(bob, 3, earlier).unwrap();
    other.save(&repo).unwrap();
    let mut second = Reservation::new(ann, 4, earlier).unwrap();
    second.save(&repo).unwrap();

    let ids: Vec<_> = repo
        .reservations_for_customer(ann)
        .unwrap()
        .iter()
        .map(Reservation::id)
        .collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
    assert!(repo.reservations_for_customer(9999).unwrap().is_empty());
}

#[test]
fn unknown_customer_is_a_persistence_failure() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();
    let start = Utc.with_ymd_and_hms(2024, 3, 5, 19, 30, 0).unwrap();

    let mut reservation = Reservation::new(404, 2, start).unwrap();
    let err = reservation.save(&repo).unwrap_err();

    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(err.status_code(), 500);
    assert_eq!(reservation.id(), None);
}

#[test]
fn corrupted_guest_count_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();
    let customer_id = saved_customer(&conn, "Ann").id().unwrap();

    conn.execute_batch("PRAGMA ignore_check_constraints = ON;").unwrap();
    conn.execute(
        "INSERT INTO reservations (customer_id, num_guests, start_at, notes)
         VALUES (?1, 0, 0, '');",
        params![customer_id],
    )
    .unwrap();

    let err = repo.reservations_for_customer(customer_id).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}
