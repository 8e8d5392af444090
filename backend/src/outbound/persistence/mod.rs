//! Persistence adapters backed by Diesel and PostgreSQL.

mod diesel_booking_store;
mod diesel_error_mapping;
mod diesel_menu_store;
mod diesel_user_store;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_booking_store::DieselBookingStore;
pub use diesel_menu_store::DieselMenuStore;
pub use diesel_user_store::DieselUserStore;
pub use pool::{DbPool, PoolConfig, PoolError};
