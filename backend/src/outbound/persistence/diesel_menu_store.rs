//! PostgreSQL-backed [`MenuStore`] implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MenuStore, StoreError};
use crate::domain::{NewWeeklyMenu, WeeklyMenu};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewWeeklyMenuRow, WeeklyMenuRow};
use super::pool::DbPool;
use super::schema::weekly_menus;

/// Diesel-backed implementation of the [`MenuStore`] port.
#[derive(Clone)]
pub struct DieselMenuStore {
    pool: DbPool,
}

impl DieselMenuStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_menu(row: WeeklyMenuRow) -> WeeklyMenu {
    WeeklyMenu {
        id: row.id,
        week: row.week,
        menu_content: row.menu_content,
    }
}

#[async_trait]
impl MenuStore for DieselMenuStore {
    async fn insert(&self, new_menu: NewWeeklyMenu) -> Result<WeeklyMenu, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewWeeklyMenuRow {
            week: new_menu.week,
            menu_content: &new_menu.menu_content,
        };

        // No duplicate-week guard: republishing a week adds another row.
        let row = diesel::insert_into(weekly_menus::table)
            .values(&new_row)
            .returning(WeeklyMenuRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_menu(row))
    }

    async fn find_by_week(&self, week: i32) -> Result<Option<WeeklyMenu>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = weekly_menus::table
            .filter(weekly_menus::week.eq(week))
            .order(weekly_menus::id.asc())
            .select(WeeklyMenuRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_menu))
    }
}
