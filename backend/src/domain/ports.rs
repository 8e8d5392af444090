//! Store and clock ports implemented by outbound adapters.
//!
//! HTTP handlers depend on these traits only, so tests can exercise the
//! full request path against in-memory implementations.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::booking::{Booking, NewBooking};
use super::error::Error;
use super::menu::{NewWeeklyMenu, WeeklyMenu};
use super::user::{NewUser, User, UserId};

/// Errors surfaced by store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The database could not be reached or a pooled connection checked out.
    #[error("store connection failed: {message}")]
    Connection {
        /// Adapter-provided description.
        message: String,
    },
    /// A query failed or returned something the adapter cannot interpret.
    #[error("store query failed: {message}")]
    Query {
        /// Adapter-provided description.
        message: String,
    },
}

impl StoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<StoreError> for Error {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Connection { message } => Self::service_unavailable(message),
            StoreError::Query { message } => Self::internal(message),
        }
    }
}

/// Source of "today" for week arithmetic.
///
/// Handlers never read the wall clock directly; tests pin the date instead.
pub trait Clock: Send + Sync {
    /// The current calendar date in the server's local timezone.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation of [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// User account persistence port.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by login email.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be queried.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be queried.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Insert a new user row and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the row cannot be written.
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Delete a user row by id, reporting whether a row was removed.
    ///
    /// Dependent rows are intentionally left untouched; deletion may orphan
    /// bookings, cards and reminders.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete cannot be executed.
    async fn delete(&self, id: UserId) -> Result<bool, StoreError>;
}

/// Booking persistence port.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert a new booking row and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the row cannot be written.
    async fn insert(&self, new_booking: NewBooking) -> Result<Booking, StoreError>;

    /// All bookings belonging to a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be queried.
    async fn for_user(&self, user_id: UserId) -> Result<Vec<Booking>, StoreError>;

    /// All bookings for a week, ordered by user id then age.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be queried.
    async fn for_week(&self, week: i32) -> Result<Vec<Booking>, StoreError>;

    /// Whether a user holds any booking for the given week.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be queried.
    async fn exists_for_user_week(&self, user_id: UserId, week: i32) -> Result<bool, StoreError>;

    /// Delete a user's bookings for a week, returning the removed row count.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete cannot be executed.
    async fn delete_for_user_week(&self, user_id: UserId, week: i32)
    -> Result<usize, StoreError>;
}

/// Weekly menu persistence port.
#[async_trait]
pub trait MenuStore: Send + Sync {
    /// Insert a new menu row and return it with its assigned id.
    ///
    /// Duplicate weeks are not prevented here; republishing adds a row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the row cannot be written.
    async fn insert(&self, new_menu: NewWeeklyMenu) -> Result<WeeklyMenu, StoreError>;

    /// The earliest menu row published for a week, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be queried.
    async fn find_by_week(&self, week: i32) -> Result<Option<WeeklyMenu>, StoreError>;
}
