mod common;

use std::fs;

use anyhow::Result;
use common::{data_file, standard_hotel};
use frontdesk::application::{AppError, Hotel};
use frontdesk::domain::{Booking, RoomKind};

#[test]
fn test_booking_marks_room_taken() -> Result<()> {
    let mut hotel = standard_hotel();

    hotel.book_room(201, 1)?;

    assert!(!hotel.find_room(201).unwrap().available);
    assert_eq!(hotel.bookings(), &[Booking::new(201, 1)]);
    let free: Vec<_> = hotel.available_rooms().map(|r| r.number).collect();
    assert_eq!(free, vec![101, 102]);

    Ok(())
}

#[test]
fn test_booking_taken_room_fails() -> Result<()> {
    let mut hotel = standard_hotel();
    hotel.book_room(102, 1)?;

    let err = hotel.book_room(102, 2).unwrap_err();
    assert!(matches!(err, AppError::Unavailable(_)));
    assert_eq!(hotel.bookings().len(), 1);
    assert!(hotel.bookings()[0].is_open_for(102, 1));

    Ok(())
}

#[test]
fn test_unknown_customer_or_room() -> Result<()> {
    let mut hotel = standard_hotel();

    assert!(matches!(
        hotel.book_room(101, 77),
        Err(AppError::CustomerNotFound(77))
    ));
    assert!(matches!(
        hotel.book_room(999, 1),
        Err(AppError::RoomNotFound(999))
    ));
    assert!(hotel.rooms().iter().all(|r| r.available));

    Ok(())
}

#[test]
fn test_cancel_by_other_customer_fails() -> Result<()> {
    let mut hotel = standard_hotel();
    hotel.book_room(101, 1)?;

    let err = hotel.cancel_booking(101, 2).unwrap_err();
    assert!(matches!(err, AppError::NoActiveBooking { room: 101, guest: 2 }));
    assert!(!hotel.find_room(101).unwrap().available);

    hotel.cancel_booking(101, 1)?;
    assert!(hotel.find_room(101).unwrap().available);

    Ok(())
}

#[test]
fn test_save_load_roundtrip() -> Result<()> {
    let (path, _temp) = data_file("hotel_data.txt")?;
    let mut hotel = standard_hotel();
    hotel.book_room(101, 1)?;
    hotel.book_room(201, 2)?;
    hotel.cancel_booking(201, 2)?;
    hotel.save_data(&path)?;

    let text = fs::read_to_string(&path)?;
    assert!(text.starts_with("Rooms:\n101|Single|0\n102|Double|1\n201|Suite|1\n"));

    let mut loaded = Hotel::new();
    loaded.load_data(&path)?;

    assert_eq!(loaded.rooms(), hotel.rooms());
    assert_eq!(loaded.guests(), hotel.guests());
    assert_eq!(loaded.bookings(), hotel.bookings());
    assert_eq!(loaded.find_room(201).map(|r| r.kind), Some(RoomKind::Suite));

    Ok(())
}

#[test]
fn test_unknown_room_type_aborts_load() -> Result<()> {
    let (path, _temp) = data_file("bad.txt")?;
    fs::write(&path, "Rooms:\n1|Single|1\n2|Attic|1\n")?;

    let mut hotel = Hotel::new();
    assert!(hotel.load_data(&path).is_err());
    assert!(hotel.rooms().is_empty());

    Ok(())
}
