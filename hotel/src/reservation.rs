//! Reservation types.
//!
//! This module provides the half-open [`StayRange`], the reservation
//! status lifecycle with its transition table, price computation and the
//! stored [`Reservation`] record with its builder.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::catalog::{non_blank, RoomId};
use crate::error::{Error, Result};
use crate::guest::GuestId;

#[cfg(test)]
mod proptests;

/// Storage identifier of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub i64);

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A stay from check-in (inclusive) to check-out (exclusive).
///
/// The check-out day is free: a stay ending on a given day does not
/// overlap a stay starting that same day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hotel::StayRange;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
///
/// let first = StayRange::new(d(1), d(4)).unwrap();
/// assert_eq!(first.nights(), 3);
///
/// let back_to_back = StayRange::new(d(4), d(6)).unwrap();
/// assert!(!first.overlaps(&back_to_back));
///
/// let inside = StayRange::new(d(2), d(3)).unwrap();
/// assert!(first.overlaps(&inside));
///
/// assert!(StayRange::new(d(4), d(4)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayRange {
    /// Creates a stay range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateRange`] unless `check_in < check_out`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self> {
        if check_in >= check_out {
            return Err(Error::InvalidDateRange {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the arrival date.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the departure date.
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns the number of nights, always at least one.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Returns whether two stays share at least one night.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Returns whether `day` is a night of this stay.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day < self.check_out
    }

    /// Returns the price of this stay at the given nightly rate.
    ///
    /// # Errors
    ///
    /// See [`quote_price`].
    pub fn price(&self, nightly_rate: Decimal) -> Result<Decimal> {
        quote_price(self.nights(), nightly_rate)
    }
}

impl fmt::Display for StayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.check_in, self.check_out)
    }
}

/// Computes `nights * nightly_rate`, rounded half-up to cents.
///
/// # Errors
///
/// Returns a `Validation` error on `total_price` if the product does not
/// fit in a [`Decimal`].
///
/// # Examples
///
/// ```
/// use hotel::quote_price;
/// use rust_decimal::Decimal;
///
/// let rate = Decimal::new(2_500_000, 2); // 25000.00
/// assert_eq!(quote_price(3, rate).unwrap(), Decimal::new(7_500_000, 2));
/// ```
pub fn quote_price(nights: i64, nightly_rate: Decimal) -> Result<Decimal> {
    let total = Decimal::from(nights)
        .checked_mul(nightly_rate)
        .ok_or_else(|| Error::Validation {
            field: "total_price".into(),
            message: format!("{nights} night(s) at {nightly_rate} overflows the price range"),
        })?;
    Ok(total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Booked, awaiting staff confirmation.
    Pending,
    /// Confirmed by staff.
    Confirmed,
    /// Cancelled; frees the room.
    Cancelled,
    /// The stay is over.
    Completed,
}

impl ReservationStatus {
    /// The allowed value set.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Cancelled,
        Self::Completed,
    ];

    /// Returns the canonical lowercase name used for storage and display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Returns whether a reservation in this status holds its room.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// The nominal lifecycle table.
    #[must_use]
    pub const fn successors(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::Cancelled, Self::Completed],
            Self::Cancelled | Self::Completed => &[],
        }
    }

    /// Returns whether `to` is a nominal successor of this status.
    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        self.successors().contains(&to)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| Error::InvalidStatusValue {
                value: s.to_string(),
            })
    }
}

/// How status changes outside the lifecycle table are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any allowed value may replace any other (administrator override).
    #[default]
    Permissive,
    /// Only transitions in [`ReservationStatus::successors`] are accepted.
    Strict,
}

/// Outcome of checking a status change against a [`TransitionPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCheck {
    /// Same status; nothing changes.
    Unchanged,
    /// The change is in the lifecycle table.
    Nominal,
    /// The change is outside the table but the policy lets it through.
    Override,
}

impl TransitionPolicy {
    /// Checks a status change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStatusTransition`] for an off-table change
    /// under the strict policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotel::{ReservationStatus, TransitionCheck, TransitionPolicy};
    ///
    /// let check = TransitionPolicy::Permissive
    ///     .check(ReservationStatus::Completed, ReservationStatus::Pending)
    ///     .unwrap();
    /// assert_eq!(check, TransitionCheck::Override);
    ///
    /// assert!(TransitionPolicy::Strict
    ///     .check(ReservationStatus::Completed, ReservationStatus::Pending)
    ///     .is_err());
    /// ```
    pub fn check(self, from: ReservationStatus, to: ReservationStatus) -> Result<TransitionCheck> {
        if from == to {
            return Ok(TransitionCheck::Unchanged);
        }
        if from.can_transition_to(to) {
            return Ok(TransitionCheck::Nominal);
        }
        match self {
            Self::Permissive => Ok(TransitionCheck::Override),
            Self::Strict => Err(Error::InvalidStatusTransition { from, to }),
        }
    }
}

/// A stored reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    guest_id: GuestId,
    room_id: RoomId,
    room_number: String,
    stay: StayRange,
    guest_count: u32,
    status: ReservationStatus,
    total_price: Decimal,
    created_at: DateTime<Utc>,
    comments: Option<String>,
}

impl Reservation {
    /// Creates a new reservation builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use hotel::{GuestId, Reservation, ReservationId, RoomId, StayRange};
    ///
    /// let stay = StayRange::new(
    ///     NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
    /// )
    /// .unwrap();
    /// let reservation = Reservation::builder(ReservationId(1), GuestId(1), RoomId(1), stay)
    ///     .room_number("101")
    ///     .guest_count(2)
    ///     .build()
    ///     .unwrap();
    /// assert!(reservation.is_active());
    /// ```
    #[must_use]
    pub fn builder(
        id: ReservationId,
        guest_id: GuestId,
        room_id: RoomId,
        stay: StayRange,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id,
            guest_id,
            room_id,
            room_number: String::new(),
            stay,
            guest_count: 1,
            status: ReservationStatus::Pending,
            total_price: Decimal::ZERO,
            created_at: None,
            comments: None,
        }
    }

    /// Returns a builder seeded with this reservation's fields.
    ///
    /// Used to derive the updated record when a reservation is edited.
    #[must_use]
    pub fn to_builder(&self) -> ReservationBuilder {
        ReservationBuilder {
            id: self.id,
            guest_id: self.guest_id,
            room_id: self.room_id,
            room_number: self.room_number.clone(),
            stay: self.stay,
            guest_count: self.guest_count,
            status: self.status,
            total_price: self.total_price,
            created_at: Some(self.created_at),
            comments: self.comments.clone(),
        }
    }

    /// Returns the reservation id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the guest who holds the reservation.
    #[must_use]
    pub const fn guest_id(&self) -> GuestId {
        self.guest_id
    }

    /// Returns the booked room.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Returns the booked room's number.
    #[must_use]
    pub fn room_number(&self) -> &str {
        &self.room_number
    }

    /// Returns the stay range.
    #[must_use]
    pub const fn stay(&self) -> StayRange {
        self.stay
    }

    /// Returns the arrival date.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.stay.check_in
    }

    /// Returns the departure date.
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.stay.check_out
    }

    /// Returns the number of nights booked.
    #[must_use]
    pub fn nights(&self) -> i64 {
        self.stay.nights()
    }

    /// Returns the number of guests.
    #[must_use]
    pub const fn guest_count(&self) -> u32 {
        self.guest_count
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the total price of the stay.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Returns when the reservation was made.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the guest's comments.
    #[must_use]
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    /// Returns whether this reservation holds its room.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns whether this reservation has a guest in the room on `today`.
    #[must_use]
    pub fn occupies(&self, today: NaiveDate) -> bool {
        self.status == ReservationStatus::Confirmed && self.stay.contains(today)
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reservation {} - room {} - {} ({})",
            self.id, self.room_number, self.stay, self.status
        )
    }
}

/// A validated reservation that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    /// The guest making the booking.
    pub guest_id: GuestId,
    /// The booked room.
    pub room_id: RoomId,
    /// The booked room's number.
    pub room_number: String,
    /// The stay range.
    pub stay: StayRange,
    /// Number of guests.
    pub guest_count: u32,
    /// Initial status.
    pub status: ReservationStatus,
    /// Total price of the stay.
    pub total_price: Decimal,
    /// Optional guest comments.
    pub comments: Option<String>,
    /// Booking timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewReservation {
    /// Turns this into a stored reservation with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the fields fail [`ReservationBuilder::build`].
    pub fn into_reservation(self, id: ReservationId) -> Result<Reservation> {
        Reservation::builder(id, self.guest_id, self.room_id, self.stay)
            .room_number(self.room_number)
            .guest_count(self.guest_count)
            .status(self.status)
            .total_price(self.total_price)
            .created_at(self.created_at)
            .comments(self.comments)
            .build()
    }
}

/// Builder for creating `Reservation` instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: ReservationId,
    guest_id: GuestId,
    room_id: RoomId,
    room_number: String,
    stay: StayRange,
    guest_count: u32,
    status: ReservationStatus,
    total_price: Decimal,
    created_at: Option<DateTime<Utc>>,
    comments: Option<String>,
}

impl ReservationBuilder {
    /// Moves the reservation to another room.
    #[must_use]
    pub fn room(mut self, room_id: RoomId, number: impl Into<String>) -> Self {
        self.room_id = room_id;
        self.room_number = number.into();
        self
    }

    /// Sets the stay range.
    #[must_use]
    pub const fn stay(mut self, stay: StayRange) -> Self {
        self.stay = stay;
        self
    }

    /// Sets the room number shown alongside the room id.
    #[must_use]
    pub fn room_number(mut self, number: impl Into<String>) -> Self {
        self.room_number = number.into();
        self
    }

    /// Sets the number of guests.
    #[must_use]
    pub const fn guest_count(mut self, guest_count: u32) -> Self {
        self.guest_count = guest_count;
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the total price.
    #[must_use]
    pub const fn total_price(mut self, total_price: Decimal) -> Self {
        self.total_price = total_price;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the comments; blank comments are dropped.
    #[must_use]
    pub fn comments(mut self, comments: Option<String>) -> Self {
        self.comments = non_blank(comments);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGuestCount`] if the guest count is zero, or a
    /// validation error for a negative price.
    pub fn build(self) -> Result<Reservation> {
        if self.guest_count < 1 {
            return Err(Error::InvalidGuestCount {
                count: self.guest_count,
            });
        }
        if self.total_price < Decimal::ZERO {
            return Err(Error::Validation {
                field: "total_price".into(),
                message: format!("total price cannot be negative, got {}", self.total_price),
            });
        }

        Ok(Reservation {
            id: self.id,
            guest_id: self.guest_id,
            room_id: self.room_id,
            room_number: self.room_number,
            stay: self.stay,
            guest_count: self.guest_count,
            status: self.status,
            total_price: self.total_price,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            comments: self.comments,
        })
    }
}
