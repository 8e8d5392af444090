//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.
//!
//! No foreign keys are declared, matching the migrations: account deletion
//! leaves dependent rows in place as orphans.

diesel::table! {
    /// User accounts.
    users (id) {
        /// Primary key.
        id -> Int4,
        /// Short initials shown alongside the surname.
        initials -> Varchar,
        /// Family name.
        surname -> Varchar,
        /// Optional login alias; never populated by sign-up.
        username -> Nullable<Varchar>,
        /// Stored credential, compared verbatim at login.
        password -> Varchar,
        /// Login email address.
        email -> Varchar,
        /// Account role name.
        role -> Varchar,
    }
}

diesel::table! {
    /// Weekly meal bookings.
    bookings (id) {
        /// Primary key; higher ids are more recent.
        id -> Int4,
        /// Owning user id (not constrained; may dangle after deletion).
        user_id -> Int4,
        /// Week the booking applies to.
        week -> Int4,
        /// Encoded meal record.
        meal_record -> Text,
        /// Lifecycle state name.
        status -> Varchar,
    }
}

diesel::table! {
    /// Published weekly menus, referenced by week number rather than row id.
    weekly_menus (id) {
        /// Primary key.
        id -> Int4,
        /// Week the menu was published for.
        week -> Int4,
        /// Encoded menu record.
        menu_content -> Text,
    }
}

diesel::table! {
    /// RFID access cards. Schema only; no routes touch this table.
    access_cards (id) {
        /// Primary key.
        id -> Int4,
        /// Owning user id (not constrained; may dangle after deletion).
        user_id -> Int4,
        /// Card identifier as printed.
        rfid_code -> Varchar,
    }
}

diesel::table! {
    /// Per-user reminders. Schema only; no routes touch this table.
    reminders (id) {
        /// Primary key.
        id -> Int4,
        /// Owning user id (not constrained; may dangle after deletion).
        user_id -> Int4,
        /// Reminder category name.
        reminder_type -> Varchar,
        /// Creation timestamp, defaulted by the database.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Booking modification audit log. Defined but never written.
    booking_modification_logs (id) {
        /// Primary key.
        id -> Int4,
        /// Modified booking id.
        booking_id -> Int4,
        /// Acting user id.
        user_id -> Int4,
        /// Modification timestamp, defaulted by the database.
        modified_at -> Timestamptz,
        /// Free-text description of the change.
        modification_text -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    users,
    bookings,
    weekly_menus,
    access_cards,
    reminders,
    booking_modification_logs,
);
