//! Booking entity and status.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserId;

/// Lifecycle state of a booking row.
///
/// Bookings are only ever written as confirmed; modification replaces the
/// row rather than moving it through states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// The booking stands for its week.
    Confirmed,
}

impl BookingStatus {
    /// Stored lowercase name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
        }
    }

    /// Interpret a stored status value.
    ///
    /// Unrecognised values are logged and read as [`Self::Confirmed`] so a
    /// stray row cannot take a whole listing down.
    pub fn from_stored(raw: &str) -> Self {
        if raw != Self::Confirmed.as_str() {
            tracing::warn!(value = raw, "unrecognised booking status, reading as confirmed");
        }
        Self::Confirmed
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking row as held in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Store identifier; higher ids are more recent.
    pub id: i32,
    /// Owning user.
    pub user_id: UserId,
    /// Week the booking applies to.
    pub week: i32,
    /// Encoded meal record.
    pub meal_record: String,
    /// Lifecycle state.
    pub status: BookingStatus,
}

/// Field set required to create a booking row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    /// Owning user.
    pub user_id: UserId,
    /// Week the booking applies to.
    pub week: i32,
    /// Encoded meal record.
    pub meal_record: String,
    /// Lifecycle state.
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn status_round_trips_its_stored_name() {
        assert_eq!(BookingStatus::Confirmed.as_str(), "confirmed");
        assert_eq!(BookingStatus::from_stored("confirmed"), BookingStatus::Confirmed);
    }

    #[rstest]
    fn unrecognised_statuses_read_as_confirmed() {
        assert_eq!(BookingStatus::from_stored("pending"), BookingStatus::Confirmed);
    }
}
