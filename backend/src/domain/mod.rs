//! Domain primitives and aggregates.
//!
//! Purpose: define strongly typed domain entities and the ports the inbound
//! and outbound adapters meet at. Types are transport agnostic; serde
//! contracts are documented on each type.

pub mod auth;
pub mod booking;
pub mod error;
pub mod meal_plan;
pub mod menu;
pub mod ports;
pub mod user;
pub mod week;

pub use self::auth::{LoginCredentials, LoginValidationError, SignUpDetails, SignUpError};
pub use self::booking::{Booking, BookingStatus, NewBooking};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::meal_plan::{MealPlan, MealRecordError, ScheduleEntry, SlotStatus};
pub use self::menu::{MenuContent, MenuRecordError, NewWeeklyMenu, WeeklyMenu};
pub use self::user::{NewUser, Role, UnknownRoleError, User, UserId};
pub use self::week::{WeekError, access_check_week, bookable_week, iso_week};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
