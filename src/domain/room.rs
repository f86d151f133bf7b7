use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

pub type RoomNumber = i64;
pub type GuestId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Single,
    Double,
    Suite,
}

impl RoomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomKind::Single => "Single",
            RoomKind::Double => "Double",
            RoomKind::Suite => "Suite",
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(RoomKind::Single),
            "double" => Ok(RoomKind::Double),
            "suite" => Ok(RoomKind::Suite),
            _ => Err(format!(
                "unknown room type '{}' (expected Single, Double or Suite)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub number: RoomNumber,
    pub kind: RoomKind,
    pub available: bool,
}

impl Room {
    pub fn new(number: RoomNumber, kind: RoomKind) -> Self {
        Self {
            number,
            kind,
            available: true,
        }
    }

    pub fn reserve(&mut self) -> Result<(), DomainError> {
        if !self.available {
            return Err(DomainError::Unavailable(format!("Room {}", self.number)));
        }
        self.available = false;
        Ok(())
    }

    pub fn release(&mut self) {
        self.available = true;
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Room Number: {} | Type: {} | {}",
            self.number,
            self.kind,
            if self.available {
                "Available"
            } else {
                "Not Available"
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
}

impl Guest {
    pub fn new(id: GuestId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Guest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer ID: {} | Name: {}", self.id, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub room_number: RoomNumber,
    pub guest_id: GuestId,
    pub active: bool,
}

impl Booking {
    pub fn new(room_number: RoomNumber, guest_id: GuestId) -> Self {
        Self {
            room_number,
            guest_id,
            active: true,
        }
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_open_for(&self, room_number: RoomNumber, guest_id: GuestId) -> bool {
        self.active && self.room_number == room_number && self.guest_id == guest_id
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Room Number: {} | Customer ID: {} | Status: {}",
            self.room_number,
            self.guest_id,
            if self.active { "Active" } else { "Cancelled" }
        )
    }
}
