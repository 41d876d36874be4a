use chrono::{TimeZone, Utc};
use lunchly_core::{parse_start_at, ErrorKind, ModelError, Reservation, ReservationInput};

fn dinner() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 19, 30, 0).unwrap()
}

#[test]
fn new_reservation_starts_unsaved_with_empty_notes() {
    let reservation = Reservation::new(7, 2, dinner()).unwrap();

    assert_eq!(reservation.id(), None);
    assert_eq!(reservation.customer_id(), 7);
    assert_eq!(reservation.num_guests(), 2);
    assert_eq!(reservation.start_at(), dinner());
    assert_eq!(reservation.notes(), "");
}

#[test]
fn guest_count_below_one_is_rejected_at_construction() {
    for value in [0, -1, -50] {
        let err = Reservation::new(7, value, dinner()).unwrap_err();
        assert_eq!(err, ModelError::InvalidNumGuests(value));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
    assert!(Reservation::new(7, 1, dinner()).is_ok());
}

#[test]
fn guest_count_setter_rejects_and_keeps_previous_value() {
    let mut reservation = Reservation::new(7, 4, dinner()).unwrap();

    let err = reservation.set_num_guests(0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(reservation.num_guests(), 4);

    reservation.set_num_guests(1).unwrap();
    assert_eq!(reservation.num_guests(), 1);
}

#[test]
fn customer_id_is_write_once() {
    let mut reservation = Reservation::new(7, 2, dinner()).unwrap();

    let err = reservation.set_customer_id(8).unwrap_err();
    assert_eq!(
        err,
        ModelError::CustomerIdConflict {
            current: 7,
            attempted: 8,
        }
    );
    assert_eq!(err.kind(), ErrorKind::StateConflict);
    assert_eq!(reservation.customer_id(), 7);

    reservation.set_customer_id(7).unwrap();
    assert_eq!(reservation.customer_id(), 7);
}

#[test]
fn malformed_start_time_is_rejected_and_previous_value_kept() {
    let mut reservation = Reservation::new(7, 2, dinner()).unwrap();

    for raw in ["", "tomorrow", "2024-02-30 10:00", "2024-13-01T10:00:00Z"] {
        let err = reservation.set_start_at_text(raw).unwrap_err();
        assert_eq!(err, ModelError::InvalidStartAt(raw.to_string()));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
    assert_eq!(reservation.start_at(), dinner());
}

#[test]
fn start_time_accepts_rfc3339_and_plain_layouts() {
    let expected = Utc.with_ymd_and_hms(2024, 3, 5, 19, 30, 0).unwrap();

    assert_eq!(parse_start_at("2024-03-05T19:30:00Z").unwrap(), expected);
    assert_eq!(parse_start_at("2024-03-05T20:30:00+01:00").unwrap(), expected);
    assert_eq!(parse_start_at("2024-03-05 19:30").unwrap(), expected);
    assert_eq!(parse_start_at("2024-03-05 19:30:00").unwrap(), expected);
}

#[test]
fn notes_are_always_a_string() {
    let mut reservation = Reservation::new(7, 2, dinner()).unwrap();

    reservation.set_notes(Some("vegan".to_string()));
    assert_eq!(reservation.notes(), "vegan");

    reservation.set_notes(None);
    assert_eq!(reservation.notes(), "");
}

#[test]
fn from_input_validates_every_field() {
    let ok = Reservation::from_input(ReservationInput {
        customer_id: 3,
        num_guests: 2,
        start_at: "2024-03-05 19:30".to_string(),
        notes: Some("vegan".to_string()),
    })
    .unwrap();
    assert_eq!(ok.customer_id(), 3);
    assert_eq!(ok.start_at(), dinner());
    assert_eq!(ok.notes(), "vegan");

    let bad_guests = Reservation::from_input(ReservationInput {
        customer_id: 3,
        num_guests: 0,
        start_at: "2024-03-05 19:30".to_string(),
        notes: None,
    })
    .unwrap_err();
    assert_eq!(bad_guests, ModelError::InvalidNumGuests(0));

    let bad_time = Reservation::from_input(ReservationInput {
        customer_id: 3,
        num_guests: 2,
        start_at: "not a date".to_string(),
        notes: None,
    })
    .unwrap_err();
    assert_eq!(bad_time.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn presentation_helpers_render_start_time() {
    let reservation = Reservation::new(7, 2, Utc::now() - chrono::Duration::days(3)).unwrap();

    assert_eq!(reservation.relative_start_at(), "3 days ago");
    assert!(!reservation.formatted_start_at().is_empty());
}

#[test]
fn serialization_uses_camel_case_fields() {
    let mut reservation = Reservation::new(7, 2, dinner()).unwrap();
    reservation.set_notes(Some("vegan".to_string()));

    let json = serde_json::to_value(&reservation).unwrap();
    assert_eq!(json["customerId"], 7);
    assert_eq!(json["numGuests"], 2);
    assert_eq!(json["startAt"], "2024-03-05T19:30:00Z");
    assert_eq!(json["notes"], "vegan");
}
