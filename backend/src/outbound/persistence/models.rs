//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{
    access_cards, booking_modification_logs, bookings, reminders, users, weekly_menus,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub initials: String,
    pub surname: String,
    pub username: Option<String>,
    pub password: String,
    pub email: String,
    pub role: String,
}

/// Insertable struct for creating new user records.
///
/// `username` is intentionally absent: sign-up never sets it.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub initials: &'a str,
    pub surname: &'a str,
    pub password: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

/// Row struct for reading from the bookings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: i32,
    pub user_id: i32,
    pub week: i32,
    pub meal_record: String,
    pub status: String,
}

/// Insertable struct for creating new booking records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub user_id: i32,
    pub week: i32,
    pub meal_record: &'a str,
    pub status: &'a str,
}

/// Row struct for reading from the weekly_menus table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = weekly_menus)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WeeklyMenuRow {
    pub id: i32,
    pub week: i32,
    pub menu_content: String,
}

/// Insertable struct for creating new weekly menu records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = weekly_menus)]
pub(crate) struct NewWeeklyMenuRow<'a> {
    pub week: i32,
    pub menu_content: &'a str,
}

/// Row struct for the access_cards table.
#[expect(dead_code, reason = "schema-only table with no exposed routes")]
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = access_cards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccessCardRow {
    pub id: i32,
    pub user_id: i32,
    pub rfid_code: String,
}

/// Row struct for the reminders table.
#[expect(dead_code, reason = "schema-only table with no exposed routes")]
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reminders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReminderRow {
    pub id: i32,
    pub user_id: i32,
    pub reminder_type: String,
    pub created_at: DateTime<Utc>,
}

/// Row struct for the booking_modification_logs table.
#[expect(dead_code, reason = "audit table defined in the schema but never written")]
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = booking_modification_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingModificationLogRow {
    pub id: i32,
    pub booking_id: i32,
    pub user_id: i32,
    pub modified_at: DateTime<Utc>,
    pub modification_text: String,
}
