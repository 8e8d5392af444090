//! Weekly menu content and its stored record format.
//!
//! A menu names one dish per slot: breakfast Monday-Friday, brunch
//! Saturday-Sunday, supper all week. Persisted as a versioned JSON record;
//! republishing a week is not prevented and simply adds another row.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored record format version currently written.
const RECORD_VERSION: u32 = 1;

/// Errors raised while decoding a stored menu record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuRecordError {
    /// The stored text is not a recognisable record payload.
    #[error("menu record is not a recognised payload: {0}")]
    InvalidPayload(String),
    /// The record names a format version this build does not understand.
    #[error("unsupported menu record version {0}")]
    UnsupportedVersion(u32),
}

/// Dishes for the five weekday slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeekdayDishes {
    /// Monday's dish.
    pub monday: String,
    /// Tuesday's dish.
    pub tuesday: String,
    /// Wednesday's dish.
    pub wednesday: String,
    /// Thursday's dish.
    pub thursday: String,
    /// Friday's dish.
    pub friday: String,
}

/// Dishes for the two weekend slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeekendDishes {
    /// Saturday's dish.
    pub saturday: String,
    /// Sunday's dish.
    pub sunday: String,
}

/// Dishes for all seven supper slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FullWeekDishes {
    /// Monday's dish.
    pub monday: String,
    /// Tuesday's dish.
    pub tuesday: String,
    /// Wednesday's dish.
    pub wednesday: String,
    /// Thursday's dish.
    pub thursday: String,
    /// Friday's dish.
    pub friday: String,
    /// Saturday's dish.
    pub saturday: String,
    /// Sunday's dish.
    pub sunday: String,
}

/// A full week's published menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuContent {
    /// Weekday breakfast dishes.
    pub breakfast: WeekdayDishes,
    /// Weekend brunch dishes.
    pub brunch: WeekendDishes,
    /// Supper dishes for the whole week.
    pub supper: FullWeekDishes,
}

#[derive(Debug, Serialize, Deserialize)]
struct MenuRecordDto {
    v: u32,
    breakfast: WeekdayDishes,
    brunch: WeekendDishes,
    supper: FullWeekDishes,
}

impl MenuContent {
    /// Serialise the menu into the stored record text.
    pub fn encode(&self) -> String {
        let dto = MenuRecordDto {
            v: RECORD_VERSION,
            breakfast: self.breakfast.clone(),
            brunch: self.brunch.clone(),
            supper: self.supper.clone(),
        };
        serde_json::to_string(&dto)
            .unwrap_or_else(|err| panic!("menu record serialisation failed: {err}"))
    }

    /// Parse a stored record back into menu content.
    ///
    /// # Errors
    ///
    /// Returns [`MenuRecordError`] when the text is not a versioned record or
    /// names an unsupported version.
    pub fn decode(raw: &str) -> Result<Self, MenuRecordError> {
        let dto: MenuRecordDto = serde_json::from_str(raw)
            .map_err(|err| MenuRecordError::InvalidPayload(err.to_string()))?;
        if dto.v != RECORD_VERSION {
            return Err(MenuRecordError::UnsupportedVersion(dto.v));
        }
        Ok(Self {
            breakfast: dto.breakfast,
            brunch: dto.brunch,
            supper: dto.supper,
        })
    }
}

/// Weekly menu row as held in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyMenu {
    /// Store identifier.
    pub id: i32,
    /// Week the menu was published for.
    pub week: i32,
    /// Encoded menu record.
    pub menu_content: String,
}

/// Field set required to create a weekly menu row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWeeklyMenu {
    /// Week the menu is published for.
    pub week: i32,
    /// Encoded menu record.
    pub menu_content: String,
}
