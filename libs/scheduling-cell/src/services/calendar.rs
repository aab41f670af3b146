// libs/scheduling-cell/src/services/calendar.rs
use chrono::NaiveDate;

use crate::models::TimeSlot;

pub const OPENING_HOUR: u8 = 8;
pub const CLOSING_HOUR: u8 = 18;
pub const BREAK_START_HOUR: u8 = 12;
pub const BREAK_END_HOUR: u8 = 14;
pub const SLOT_MINUTES: u8 = 30;

/// All bookable slots for a day, ascending: 08:00 up to 18:00 exclusive in
/// 30-minute steps, skipping the 12:00-14:00 midday break. Every date yields
/// the same 16 slots (8 morning + 8 afternoon); the clinic has no per-day
/// schedule variations.
pub fn generate_slots(_date: NaiveDate) -> Vec<TimeSlot> {
    let mut slots = Vec::with_capacity(16);
    let mut hour = OPENING_HOUR;
    let mut minute = 0u8;

    while hour < CLOSING_HOUR {
        if let Ok(slot) = TimeSlot::new(hour, minute) {
            slots.push(slot);
        }

        minute += SLOT_MINUTES;
        if minute == 60 {
            minute = 0;
            hour += 1;
            if hour == BREAK_START_HOUR {
                hour = BREAK_END_HOUR;
            }
        }
    }

    slots
}

/// The day's slots minus every slot already taken, in generation order.
///
/// A fully booked day yields an empty list; that is "no slots available",
/// not an error. This is a read-time filter only: nothing is reserved.
pub fn available_slots(date: NaiveDate, taken: &[TimeSlot]) -> Vec<TimeSlot> {
    generate_slots(date)
        .into_iter()
        .filter(|slot| !taken.contains(slot))
        .collect()
}
