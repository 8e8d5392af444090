//! PostgreSQL-backed [`BookingStore`] implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookingStore, StoreError};
use crate::domain::{Booking, BookingStatus, NewBooking, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BookingRow, NewBookingRow};
use super::pool::DbPool;
use super::schema::bookings;

/// Diesel-backed implementation of the [`BookingStore`] port.
#[derive(Clone)]
pub struct DieselBookingStore {
    pool: DbPool,
}

impl DieselBookingStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_booking(row: BookingRow) -> Booking {
    Booking {
        id: row.id,
        user_id: UserId::new(row.user_id),
        week: row.week,
        meal_record: row.meal_record,
        status: BookingStatus::from_stored(&row.status),
    }
}

#[async_trait]
impl BookingStore for DieselBookingStore {
    async fn insert(&self, new_booking: NewBooking) -> Result<Booking, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewBookingRow {
            user_id: new_booking.user_id.get(),
            week: new_booking.week,
            meal_record: &new_booking.meal_record,
            status: new_booking.status.as_str(),
        };

        let row = diesel::insert_into(bookings::table)
            .values(&new_row)
            .returning(BookingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_booking(row))
    }

    async fn for_user(&self, user_id: UserId) -> Result<Vec<Booking>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = bookings::table
            .filter(bookings::user_id.eq(user_id.get()))
            .order(bookings::id.asc())
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_booking).collect())
    }

    async fn for_week(&self, week: i32) -> Result<Vec<Booking>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = bookings::table
            .filter(bookings::week.eq(week))
            .order((bookings::user_id.asc(), bookings::id.asc()))
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_booking).collect())
    }

    async fn exists_for_user_week(&self, user_id: UserId, week: i32) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let filter = bookings::table
            .filter(bookings::user_id.eq(user_id.get()))
            .filter(bookings::week.eq(week));

        diesel::select(diesel::dsl::exists(filter))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn delete_for_user_week(
        &self,
        user_id: UserId,
        week: i32,
    ) -> Result<usize, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let filter = bookings::table
            .filter(bookings::user_id.eq(user_id.get()))
            .filter(bookings::week.eq(week));

        diesel::delete(filter)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
