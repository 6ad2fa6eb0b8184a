//! Room catalog types.
//!
//! Room types are immutable reference data (nightly rate, occupancy limit);
//! rooms are the physical units guests book. A room's [`RoomState`] is
//! derived from its reservations except for manual maintenance toggles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Storage identifier of a room type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomTypeId(pub i64);

/// Storage identifier of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub i64);

impl fmt::Display for RoomTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kinds of room the hotel sells.
///
/// # Examples
///
/// ```
/// use hotel::RoomTypeName;
///
/// let name: RoomTypeName = "Suite".parse().unwrap();
/// assert_eq!(name, RoomTypeName::Suite);
/// assert_eq!(name.as_str(), "suite");
/// assert!("penthouse".parse::<RoomTypeName>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomTypeName {
    /// One guest.
    Single,
    /// Two guests.
    Double,
    /// Premium room.
    Suite,
    /// Family room.
    Family,
}

impl RoomTypeName {
    /// All room type names, in catalog order.
    pub const ALL: [Self; 4] = [Self::Single, Self::Double, Self::Suite, Self::Family];

    /// Returns the canonical lowercase name used for storage and display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Suite => "suite",
            Self::Family => "family",
        }
    }
}

impl fmt::Display for RoomTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomTypeName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == wanted)
            .ok_or_else(|| Error::InvalidRoomType {
                value: s.to_string(),
            })
    }
}

/// Occupancy state of a physical room.
///
/// `Available` and `Occupied` are recomputed after every reservation write;
/// `Maintenance` is only ever set by staff and is never touched by that
/// recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomState {
    /// Free to be booked.
    Available,
    /// A guest is staying in the room today (or staff marked it so).
    Occupied,
    /// Out of service.
    Maintenance,
}

impl RoomState {
    /// All room states.
    pub const ALL: [Self; 3] = [Self::Available, Self::Occupied, Self::Maintenance];

    /// Returns the canonical lowercase name used for storage and display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for RoomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == wanted)
            .ok_or_else(|| Error::InvalidRoomState {
                value: s.to_string(),
            })
    }
}

/// A stored room type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    /// Storage identifier.
    pub id: RoomTypeId,
    /// Unique type name.
    pub name: RoomTypeName,
    /// Optional marketing description.
    pub description: Option<String>,
    /// Price of one night.
    pub nightly_rate: Decimal,
    /// Maximum number of guests per reservation.
    pub max_occupancy: u32,
}

/// A room type that has not been stored yet.
///
/// # Examples
///
/// ```
/// use hotel::{NewRoomType, RoomTypeName};
/// use rust_decimal::Decimal;
///
/// let rate = Decimal::new(2500000, 2); // 25000.00
/// let room_type = NewRoomType::new(RoomTypeName::Double, rate, 2).unwrap();
/// assert_eq!(room_type.max_occupancy, 2);
///
/// assert!(NewRoomType::new(RoomTypeName::Double, rate, 0).is_err());
/// assert!(NewRoomType::new(RoomTypeName::Double, Decimal::ZERO, 2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoomType {
    /// Unique type name.
    pub name: RoomTypeName,
    /// Optional marketing description.
    pub description: Option<String>,
    /// Price of one night.
    pub nightly_rate: Decimal,
    /// Maximum number of guests per reservation.
    pub max_occupancy: u32,
}

impl NewRoomType {
    /// Creates a validated room type.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the rate is not positive, has more than
    /// two decimal places, or the occupancy is zero.
    pub fn new(name: RoomTypeName, nightly_rate: Decimal, max_occupancy: u32) -> Result<Self> {
        if nightly_rate <= Decimal::ZERO {
            return Err(Error::Validation {
                field: "nightly_rate".into(),
                message: format!("nightly rate must be positive, got {nightly_rate}"),
            });
        }
        if nightly_rate.normalize().scale() > 2 {
            return Err(Error::Validation {
                field: "nightly_rate".into(),
                message: format!("nightly rate {nightly_rate} has more than 2 decimal places"),
            });
        }
        if max_occupancy == 0 {
            return Err(Error::Validation {
                field: "max_occupancy".into(),
                message: "maximum occupancy must be at least 1".into(),
            });
        }

        Ok(Self {
            name,
            description: None,
            nightly_rate,
            max_occupancy,
        })
    }

    /// Sets the description; blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = non_blank(description);
        self
    }
}

/// A stored physical room, joined with its room type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Storage identifier.
    pub id: RoomId,
    /// Unique room number, e.g. `"101"`.
    pub number: String,
    /// The room's type.
    pub room_type: RoomType,
    /// Current occupancy state.
    pub state: RoomState,
    /// Floor the room is on.
    pub floor: i32,
    /// Optional description.
    pub description: Option<String>,
    /// When the room was added to the catalog.
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Returns the maximum number of guests this room accepts.
    #[must_use]
    pub const fn max_occupancy(&self) -> u32 {
        self.room_type.max_occupancy
    }

    /// Returns the price of one night in this room.
    #[must_use]
    pub const fn nightly_rate(&self) -> Decimal {
        self.room_type.nightly_rate
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Room {} ({})", self.number, self.room_type.name)
    }
}

/// A room that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    /// Unique room number.
    pub number: String,
    /// Name of the room type the room belongs to.
    pub room_type: RoomTypeName,
    /// Floor the room is on.
    pub floor: i32,
    /// Optional description.
    pub description: Option<String>,
}

impl NewRoom {
    /// Creates a validated room.
    ///
    /// The number is trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the number is empty after trimming.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotel::{NewRoom, RoomTypeName};
    ///
    /// let room = NewRoom::new(" 101 ", RoomTypeName::Double, 1).unwrap();
    /// assert_eq!(room.number, "101");
    /// assert!(NewRoom::new("  ", RoomTypeName::Double, 1).is_err());
    /// ```
    pub fn new(number: impl AsRef<str>, room_type: RoomTypeName, floor: i32) -> Result<Self> {
        let number = number.as_ref().trim();
        if number.is_empty() {
            return Err(Error::Validation {
                field: "number".into(),
                message: "room number must be non-empty after trimming whitespace".into(),
            });
        }

        Ok(Self {
            number: number.to_string(),
            room_type,
            floor,
            description: None,
        })
    }

    /// Sets the description; blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = non_blank(description);
        self
    }
}

/// Trims an optional free-text field, mapping blank text to `None`.
pub(crate) fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_type_name_parse_case_insensitive() {
        assert_eq!("DOUBLE".parse::<RoomTypeName>().unwrap(), RoomTypeName::Double);
        assert_eq!(" family ".parse::<RoomTypeName>().unwrap(), RoomTypeName::Family);
        let err = "doble".parse::<RoomTypeName>().unwrap_err();
        assert!(matches!(err, Error::InvalidRoomType { .. }));
    }

    #[test]
    fn test_room_state_round_trip_names() {
        for state in RoomState::ALL {
            assert_eq!(state.as_str().parse::<RoomState>().unwrap(), state);
        }
        assert!(matches!(
            "closed".parse::<RoomState>(),
            Err(Error::InvalidRoomState { .. })
        ));
    }

    #[test]
    fn test_new_room_type_rejects_sub_cent_rate() {
        let rate = Decimal::new(1_005, 3); // 1.005
        let err = NewRoomType::new(RoomTypeName::Single, rate, 1).unwrap_err();
        assert!(err.to_string().contains("decimal places"));
    }

    #[test]
    fn test_new_room_type_accepts_trailing_zero_scale() {
        // 25000.000 normalizes to 25000
        let rate = Decimal::new(25_000_000, 3);
        assert!(NewRoomType::new(RoomTypeName::Double, rate, 2).is_ok());
    }

    #[test]
    fn test_new_room_type_blank_description() {
        let room_type = NewRoomType::new(RoomTypeName::Suite, Decimal::ONE, 2)
            .unwrap()
            .with_description(Some("   ".into()));
        assert_eq!(room_type.description, None);
    }

    #[test]
    fn test_new_room_description_trimmed() {
        let room = NewRoom::new("201", RoomTypeName::Suite, 2)
            .unwrap()
            .with_description(Some("  garden view ".into()));
        assert_eq!(room.description.as_deref(), Some("garden view"));
    }

    #[test]
    fn test_room_display() {
        let room = Room {
            id: RoomId(1),
            number: "101".into(),
            room_type: RoomType {
                id: RoomTypeId(1),
                name: RoomTypeName::Double,
                description: None,
                nightly_rate: Decimal::new(2_500_000, 2),
                max_occupancy: 2,
            },
            state: RoomState::Available,
            floor: 1,
            description: None,
            created_at: Utc::now(),
        };
        assert_eq!(room.to_string(), "Room 101 (double)");
        assert_eq!(room.max_occupancy(), 2);
    }
}
