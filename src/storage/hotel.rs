use std::io::{Read, Write};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::domain::{Booking, Guest, GuestId, Room, RoomKind, RoomNumber};

use super::flatfile::{PIPE, SectionWriter, flag, read_sections};

const ROOMS: &str = "Rooms";
const CUSTOMERS: &str = "Customers";
const BOOKINGS: &str = "Bookings";

#[derive(Serialize, Deserialize)]
struct RoomRow {
    number: RoomNumber,
    kind: RoomKind,
    #[serde(with = "flag")]
    available: bool,
}

#[derive(Serialize, Deserialize)]
struct GuestRow {
    id: GuestId,
    name: String,
}

#[derive(Serialize, Deserialize)]
struct BookingRow {
    room_number: RoomNumber,
    guest_id: GuestId,
    #[serde(with = "flag")]
    active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelData {
    pub rooms: Vec<Room>,
    pub guests: Vec<Guest>,
    pub bookings: Vec<Booking>,
}

pub fn write_hotel<W: Write>(
    writer: W,
    rooms: &[Room],
    guests: &[Guest],
    bookings: &[Booking],
) -> Result<()> {
    let mut out = SectionWriter::new(writer, PIPE);

    out.section(ROOMS)?;
    for room in rooms {
        out.row(&RoomRow {
            number: room.number,
            kind: room.kind,
            available: room.available,
        })?;
    }

    out.section(CUSTOMERS)?;
    for guest in guests {
        out.row(&GuestRow {
            id: guest.id,
            name: guest.name.clone(),
        })?;
    }

    out.section(BOOKINGS)?;
    for booking in bookings {
        out.row(&BookingRow {
            room_number: booking.room_number,
            guest_id: booking.guest_id,
            active: booking.active,
        })?;
    }

    out.finish()
}

pub fn read_hotel<R: Read>(reader: R) -> Result<HotelData> {
    let mut data = HotelData::default();

    for record in read_sections(reader, PIPE, &[ROOMS, CUSTOMERS, BOOKINGS])? {
        match record.require_section()? {
            ROOMS => {
                let row: RoomRow = record.decode()?;
                data.rooms.push(Room {
                    number: row.number,
                    kind: row.kind,
                    available: row.available,
                });
            }
            CUSTOMERS => {
                let row: GuestRow = record.decode()?;
                data.guests.push(Guest::new(row.id, row.name));
            }
            BOOKINGS => {
                let row: BookingRow = record.decode()?;
                data.bookings.push(Booking {
                    room_number: row.room_number,
                    guest_id: row.guest_id,
                    active: row.active,
                });
            }
            other => bail!("line {}: unexpected section '{}'", record.line, other),
        }
    }

    Ok(data)
}
