use std::path::Path;

use tracing::{debug, info};

use crate::domain::{Booking, Guest, GuestId, Room, RoomNumber};
use crate::storage::{self, HotelData};

use super::AppError;

#[derive(Debug, Default)]
pub struct Hotel {
    rooms: Vec<Room>,
    guests: Vec<Guest>,
    bookings: Vec<Booking>,
}

impl Hotel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&mut self, room: Room) {
        debug!(number = room.number, kind = %room.kind, "adding room");
        self.rooms.push(room);
    }

    pub fn add_guest(&mut self, guest: Guest) {
        debug!(id = guest.id, "adding customer");
        self.guests.push(guest);
    }

    pub fn find_room(&self, number: RoomNumber) -> Option<&Room> {
        self.rooms.iter().find(|r| r.number == number)
    }

    pub fn find_guest(&self, id: GuestId) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == id)
    }

    pub fn guest_exists(&self, id: GuestId) -> bool {
        self.find_guest(id).is_some()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn available_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| r.available)
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn book_room(&mut self, room_number: RoomNumber, guest_id: GuestId) -> Result<(), AppError> {
        if !self.guest_exists(guest_id) {
            return Err(AppError::CustomerNotFound(guest_id));
        }
        let room = self
            .rooms
            .iter_mut()
            .find(|r| r.number == room_number)
            .ok_or(AppError::RoomNotFound(room_number))?;
        room.reserve()?;

        self.bookings.push(Booking::new(room_number, guest_id));
        debug!(room = room_number, guest = guest_id, "booked room");
        Ok(())
    }

    pub fn cancel_booking(
        &mut self,
        room_number: RoomNumber,
        guest_id: GuestId,
    ) -> Result<(), AppError> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.is_open_for(room_number, guest_id))
            .ok_or(AppError::NoActiveBooking {
                room: room_number,
                guest: guest_id,
            })?;
        booking.cancel();

        if let Some(room) = self.rooms.iter_mut().find(|r| r.number == room_number) {
            room.release();
        }
        debug!(room = room_number, guest = guest_id, "cancelled booking");
        Ok(())
    }

    pub fn save_data(&self, path: &Path) -> Result<(), AppError> {
        storage::save_file(path, |writer| {
            storage::write_hotel(writer, &self.rooms, &self.guests, &self.bookings)
        })?;
        info!(
            path = %path.display(),
            rooms = self.rooms.len(),
            customers = self.guests.len(),
            bookings = self.bookings.len(),
            "saved hotel data"
        );
        Ok(())
    }

    pub fn load_data(&mut self, path: &Path) -> Result<(), AppError> {
        let HotelData {
            rooms,
            guests,
            bookings,
        } = storage::load_file(path, storage::read_hotel)?;
        info!(
            path = %path.display(),
            rooms = rooms.len(),
            customers = guests.len(),
            bookings = bookings.len(),
            "loaded hotel data"
        );
        self.rooms.extend(rooms);
        self.guests.extend(guests);
        self.bookings.extend(bookings);
        Ok(())
    }
}
