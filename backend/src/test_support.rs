//! Helpers shared by unit and integration tests.
//!
//! Exposed behind the `test-support` feature so integration tests under
//! `tests/` can build a fully wired application over in-memory stores.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use chrono::NaiveDate;

use crate::domain::ports::UserStore;
use crate::domain::{NewUser, Role, User};
use crate::inbound::http::state::AppState;
use crate::outbound::persistence::memory::{
    FixedClock, MemoryBookingStore, MemoryMenuStore, MemoryUserStore,
};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Concrete store handles kept alongside the state for assertions.
pub struct TestStores {
    /// In-memory user store.
    pub users: Arc<MemoryUserStore>,
    /// In-memory booking store.
    pub bookings: Arc<MemoryBookingStore>,
    /// In-memory menu store.
    pub menus: Arc<MemoryMenuStore>,
}

/// The pinned test date: a Monday in ISO week 29, so bookings land in week
/// 30 and the access check reads week 31.
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 15).expect("valid date")
}

/// Build an application state over fresh in-memory stores.
pub fn test_state() -> (AppState, TestStores) {
    let users = Arc::new(MemoryUserStore::default());
    let bookings = Arc::new(MemoryBookingStore::default());
    let menus = Arc::new(MemoryMenuStore::default());
    let state = AppState::new(
        users.clone(),
        bookings.clone(),
        menus.clone(),
        Arc::new(FixedClock(fixed_today())),
    );
    (
        state,
        TestStores {
            users,
            bookings,
            menus,
        },
    )
}

/// Insert a user with fixed initials/surname and the given credentials.
pub async fn seed_user(stores: &TestStores, email: &str, password: &str, role: Role) -> User {
    stores
        .users
        .insert(NewUser {
            initials: "TS".to_owned(),
            surname: "Tester".to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            role,
        })
        .await
        .expect("seed user")
}
