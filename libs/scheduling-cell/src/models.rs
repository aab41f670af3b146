// libs/scheduling-cell/src/models.rs
use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::calendar::{BREAK_END_HOUR, BREAK_START_HOUR, CLOSING_HOUR, OPENING_HOUR};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    #[error("slot {0:02}:{1:02} is outside clinic hours (08:00-18:00)")]
    OutsideOperatingWindow(u8, u8),

    #[error("slot {0:02}:{1:02} falls in the midday break (12:00-14:00)")]
    DuringMiddayBreak(u8, u8),

    #[error("slot minutes must be 00 or 30, got {0}")]
    UnalignedMinute(u8),

    #[error("cannot parse \"{0}\" as a HH:MM time slot")]
    Unparseable(String),
}

/// A bookable half-hour interval, identified by its start time.
///
/// Construction is validated: a `TimeSlot` always lies inside the clinic's
/// operating window and never inside the midday break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    hour: u8,
    minute: u8,
}

impl TimeSlot {
    pub fn new(hour: u8, minute: u8) -> Result<Self, SlotError> {
        if minute != 0 && minute != 30 {
            return Err(SlotError::UnalignedMinute(minute));
        }
        if hour < OPENING_HOUR || hour >= CLOSING_HOUR {
            return Err(SlotError::OutsideOperatingWindow(hour, minute));
        }
        if hour >= BREAK_START_HOUR && hour < BREAK_END_HOUR {
            return Err(SlotError::DuringMiddayBreak(hour, minute));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // Valid by construction: hour < 24, minute is 0 or 30
        NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, 0).unwrap()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeSlot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparseable = || SlotError::Unparseable(s.to_string());

        let (hour_part, minute_part) = s.trim().split_once(':').ok_or_else(unparseable)?;
        let hour: u8 = hour_part.parse().map_err(|_| unparseable())?;
        let minute: u8 = minute_part.parse().map_err(|_| unparseable())?;

        TimeSlot::new(hour, minute)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

/// The slots a patient picked for one booking, in the order they picked them.
///
/// Duplicate-free: adding a slot that is already present is a no-op, and
/// removal never reorders the remaining slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSelection {
    slots: Vec<TimeSlot>,
}

impl SlotSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent add: returns true if the slot was newly inserted.
    pub fn add(&mut self, slot: TimeSlot) -> bool {
        if self.slots.contains(&slot) {
            return false;
        }
        self.slots.push(slot);
        true
    }

    /// Returns true if the slot was present and removed.
    pub fn remove(&mut self, slot: TimeSlot) -> bool {
        let before = self.slots.len();
        self.slots.retain(|existing| *existing != slot);
        self.slots.len() != before
    }

    pub fn first(&self) -> Option<TimeSlot> {
        self.slots.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl FromIterator<TimeSlot> for SlotSelection {
    fn from_iter<I: IntoIterator<Item = TimeSlot>>(iter: I) -> Self {
        let mut selection = Self::new();
        for slot in iter {
            selection.add(slot);
        }
        selection
    }
}
