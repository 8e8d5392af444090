//! Weekly meal selections and their stored record format.
//!
//! A week's choices are four fixed-size selection blocks concatenated in the
//! order breakfast, lunch, brunch, supper (19 slots in total). The persisted
//! representation is a versioned JSON record holding one `0`/`1` character
//! per slot; decoding never indexes past the record it was given.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Weekday slot count (Monday-Friday) for breakfast and lunch blocks.
pub const WEEKDAY_SLOTS: usize = 5;
/// Weekend slot count (Saturday-Sunday) for the brunch block.
pub const WEEKEND_SLOTS: usize = 2;
/// Full-week slot count for the supper block.
pub const FULL_WEEK_SLOTS: usize = 7;
/// Total slots in one stored record.
pub const TOTAL_SLOTS: usize = WEEKDAY_SLOTS + WEEKDAY_SLOTS + WEEKEND_SLOTS + FULL_WEEK_SLOTS;

/// Stored record format version currently written.
const RECORD_VERSION: u32 = 1;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Errors raised while decoding a stored meal record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MealRecordError {
    /// The stored text is not a recognisable record payload.
    #[error("booking record is not a recognised payload: {0}")]
    InvalidPayload(String),
    /// The record names a format version this build does not understand.
    #[error("unsupported booking record version {0}")]
    UnsupportedVersion(u32),
    /// The record holds the wrong number of slots.
    #[error("booking record holds {found} slots, expected {expected}")]
    SlotCountMismatch {
        /// Slots a well-formed record holds.
        expected: usize,
        /// Slots found in the stored text.
        found: usize,
    },
}

/// Meal block a schedule entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MealKind {
    /// Weekday breakfast block (5 slots).
    Breakfast,
    /// Weekday lunch block (5 slots).
    Lunch,
    /// Weekend brunch block (2 slots).
    Brunch,
    /// Full-week supper block (7 slots).
    Supper,
}

/// Displayed state of one schedule slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SlotStatus {
    /// The slot was selected.
    #[serde(rename = "Booked")]
    Booked,
    /// The slot was left unselected (or held an unrecognised token).
    #[serde(rename = "Not Booked")]
    NotBooked,
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Booked => f.write_str("Booked"),
            Self::NotBooked => f.write_str("Not Booked"),
        }
    }
}

/// One day/status pair in a decoded weekly schedule.
///
/// Day labels restart at Monday within every meal block, so the two weekend
/// brunch slots are labelled Monday and Tuesday. This mirrors how stored
/// records have always been presented and must not be "corrected" here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ScheduleEntry {
    /// Meal block the slot belongs to.
    pub meal: MealKind,
    /// Day label, cycling Monday onwards within the block.
    #[schema(value_type = String, example = "Monday")]
    pub day: &'static str,
    /// Whether the slot was selected.
    pub status: SlotStatus,
}

/// A full week of meal selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPlan {
    breakfast: [bool; WEEKDAY_SLOTS],
    lunch: [bool; WEEKDAY_SLOTS],
    brunch: [bool; WEEKEND_SLOTS],
    supper: [bool; FULL_WEEK_SLOTS],
}

#[derive(Debug, Serialize, Deserialize)]
struct MealRecordDto {
    v: u32,
    slots: String,
}

fn next_block<const N: usize>(flags: &mut impl Iterator<Item = bool>) -> [bool; N] {
    std::array::from_fn(|_| flags.next().unwrap_or(false))
}

impl MealPlan {
    /// Assemble a plan from the four selection blocks.
    pub const fn new(
        breakfast: [bool; WEEKDAY_SLOTS],
        lunch: [bool; WEEKDAY_SLOTS],
        brunch: [bool; WEEKEND_SLOTS],
        supper: [bool; FULL_WEEK_SLOTS],
    ) -> Self {
        Self {
            breakfast,
            lunch,
            brunch,
            supper,
        }
    }

    /// A plan with every slot unselected.
    pub const fn empty() -> Self {
        Self::new(
            [false; WEEKDAY_SLOTS],
            [false; WEEKDAY_SLOTS],
            [false; WEEKEND_SLOTS],
            [false; FULL_WEEK_SLOTS],
        )
    }

    /// Serialise the plan into the stored record text.
    pub fn encode(&self) -> String {
        let mut slots = String::with_capacity(TOTAL_SLOTS);
        for selected in self.slot_flags() {
            slots.push(if selected { '1' } else { '0' });
        }
        let dto = MealRecordDto {
            v: RECORD_VERSION,
            slots,
        };
        serde_json::to_string(&dto)
            .unwrap_or_else(|err| panic!("meal record serialisation failed: {err}"))
    }

    /// Parse a stored record back into a plan.
    ///
    /// A `'1'` slot character is a selection; any other character counts as
    /// unselected.
    ///
    /// # Errors
    ///
    /// Returns [`MealRecordError`] when the text is not a versioned record,
    /// names an unsupported version, or holds a slot count other than
    /// [`TOTAL_SLOTS`].
    pub fn decode(raw: &str) -> Result<Self, MealRecordError> {
        let dto: MealRecordDto = serde_json::from_str(raw)
            .map_err(|err| MealRecordError::InvalidPayload(err.to_string()))?;
        if dto.v != RECORD_VERSION {
            return Err(MealRecordError::UnsupportedVersion(dto.v));
        }

        let found = dto.slots.chars().count();
        if found != TOTAL_SLOTS {
            return Err(MealRecordError::SlotCountMismatch {
                expected: TOTAL_SLOTS,
                found,
            });
        }

        let mut flags = dto.slots.chars().map(|c| c == '1');
        Ok(Self {
            breakfast: next_block(&mut flags),
            lunch: next_block(&mut flags),
            brunch: next_block(&mut flags),
            supper: next_block(&mut flags),
        })
    }

    /// Day/status pairs for display, in stored slot order.
    pub fn schedule(&self) -> Vec<ScheduleEntry> {
        let blocks: [(MealKind, &[bool]); 4] = [
            (MealKind::Breakfast, &self.breakfast),
            (MealKind::Lunch, &self.lunch),
            (MealKind::Brunch, &self.brunch),
            (MealKind::Supper, &self.supper),
        ];

        let mut entries = Vec::with_capacity(TOTAL_SLOTS);
        for (meal, slots) in blocks {
            for (day_index, selected) in slots.iter().enumerate() {
                entries.push(ScheduleEntry {
                    meal,
                    day: DAY_NAMES[day_index],
                    status: if *selected {
                        SlotStatus::Booked
                    } else {
                        SlotStatus::NotBooked
                    },
                });
            }
        }
        entries
    }

    fn slot_flags(&self) -> impl Iterator<Item = bool> + '_ {
        self.breakfast
            .iter()
            .chain(self.lunch.iter())
            .chain(self.brunch.iter())
            .chain(self.supper.iter())
            .copied()
    }
}
