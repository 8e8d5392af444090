//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O. It is built once at
//! bootstrap and passed explicitly; there are no ambient globals.

use std::sync::Arc;

use crate::domain::ports::{BookingStore, Clock, MenuStore, UserStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// User account store.
    pub users: Arc<dyn UserStore>,
    /// Booking store.
    pub bookings: Arc<dyn BookingStore>,
    /// Weekly menu store.
    pub menus: Arc<dyn MenuStore>,
    /// Source of "today" for week arithmetic.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Bundle the port implementations handlers depend on.
    pub fn new(
        users: Arc<dyn UserStore>,
        bookings: Arc<dyn BookingStore>,
        menus: Arc<dyn MenuStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            bookings,
            menus,
            clock,
        }
    }
}
