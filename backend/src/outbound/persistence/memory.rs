//! In-memory store implementations for tests.
//!
//! These mirror the Diesel adapters' observable behaviour (id assignment,
//! ordering, orphaning on delete) without a database, so handler and
//! integration tests can exercise the full request path.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::ports::{BookingStore, Clock, MenuStore, StoreError, UserStore};
use crate::domain::{Booking, NewBooking, NewUser, NewWeeklyMenu, User, UserId, WeeklyMenu};

/// Clock pinned to a fixed date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Default)]
struct UserState {
    rows: Vec<User>,
    next_id: i32,
}

/// In-memory [`UserStore`].
#[derive(Default)]
pub struct MemoryUserStore {
    state: Mutex<UserState>,
}

impl MemoryUserStore {
    /// Seed the store with existing users (ids must be pre-assigned).
    pub fn with_users(users: Vec<User>) -> Self {
        let last_id = users.iter().map(|user| user.id.get()).max().unwrap_or(0);
        Self {
            state: Mutex::new(UserState {
                rows: users,
                next_id: last_id,
            }),
        }
    }

    /// Snapshot of all stored users.
    pub fn users(&self) -> Vec<User> {
        self.state.lock().expect("state lock").rows.clone()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.rows.iter().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.rows.iter().find(|user| user.id == id).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.next_id += 1;
        let user = User {
            id: UserId::new(state.next_id),
            initials: new_user.initials,
            surname: new_user.surname,
            username: None,
            email: new_user.email,
            password: new_user.password,
            role: new_user.role,
        };
        state.rows.push(user.clone());
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        let mut state = self.state.lock().expect("state lock");
        let before = state.rows.len();
        state.rows.retain(|user| user.id != id);
        Ok(state.rows.len() < before)
    }
}

#[derive(Default)]
struct BookingState {
    rows: Vec<Booking>,
    next_id: i32,
}

/// In-memory [`BookingStore`].
#[derive(Default)]
pub struct MemoryBookingStore {
    state: Mutex<BookingState>,
}

impl MemoryBookingStore {
    /// Snapshot of all stored bookings.
    pub fn bookings(&self) -> Vec<Booking> {
        self.state.lock().expect("state lock").rows.clone()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn insert(&self, new_booking: NewBooking) -> Result<Booking, StoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.next_id += 1;
        let booking = Booking {
            id: state.next_id,
            user_id: new_booking.user_id,
            week: new_booking.week,
            meal_record: new_booking.meal_record,
            status: new_booking.status,
        };
        state.rows.push(booking.clone());
        Ok(booking)
    }

    async fn for_user(&self, user_id: UserId) -> Result<Vec<Booking>, StoreError> {
        let state = self.state.lock().expect("state lock");
        let mut rows: Vec<Booking> = state
            .rows
            .iter()
            .filter(|booking| booking.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|booking| booking.id);
        Ok(rows)
    }

    async fn for_week(&self, week: i32) -> Result<Vec<Booking>, StoreError> {
        let state = self.state.lock().expect("state lock");
        let mut rows: Vec<Booking> = state
            .rows
            .iter()
            .filter(|booking| booking.week == week)
            .cloned()
            .collect();
        rows.sort_by_key(|booking| (booking.user_id, booking.id));
        Ok(rows)
    }

    async fn exists_for_user_week(&self, user_id: UserId, week: i32) -> Result<bool, StoreError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .rows
            .iter()
            .any(|booking| booking.user_id == user_id && booking.week == week))
    }

    async fn delete_for_user_week(
        &self,
        user_id: UserId,
        week: i32,
    ) -> Result<usize, StoreError> {
        let mut state = self.state.lock().expect("state lock");
        let before = state.rows.len();
        state
            .rows
            .retain(|booking| !(booking.user_id == user_id && booking.week == week));
        Ok(before - state.rows.len())
    }
}

#[derive(Default)]
struct MenuState {
    rows: Vec<WeeklyMenu>,
    next_id: i32,
}

/// In-memory [`MenuStore`].
#[derive(Default)]
pub struct MemoryMenuStore {
    state: Mutex<MenuState>,
}

impl MemoryMenuStore {
    /// Snapshot of all stored menus.
    pub fn menus(&self) -> Vec<WeeklyMenu> {
        self.state.lock().expect("state lock").rows.clone()
    }
}

#[async_trait]
impl MenuStore for MemoryMenuStore {
    async fn insert(&self, new_menu: NewWeeklyMenu) -> Result<WeeklyMenu, StoreError> {
        let mut state = self.state.lock().expect("state lock");
        state.next_id += 1;
        let menu = WeeklyMenu {
            id: state.next_id,
            week: new_menu.week,
            menu_content: new_menu.menu_content,
        };
        state.rows.push(menu.clone());
        Ok(menu)
    }

    async fn find_by_week(&self, week: i32) -> Result<Option<WeeklyMenu>, StoreError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .rows
            .iter()
            .filter(|menu| menu.week == week)
            .min_by_key(|menu| menu.id)
            .cloned())
    }
}
