// libs/scheduling-cell/tests/calendar_test.rs
use assert_matches::assert_matches;
use chrono::NaiveDate;

use scheduling_cell::{available_slots, generate_slots, SlotError, SlotSelection, TimeSlot};

fn some_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()
}

fn slot(hour: u8, minute: u8) -> TimeSlot {
    TimeSlot::new(hour, minute).unwrap()
}

// ==============================================================================
// SLOT GENERATION
// ==============================================================================

#[test]
fn a_day_has_sixteen_slots() {
    let slots = generate_slots(some_date());

    assert_eq!(slots.len(), 16);
    assert_eq!(slots.first().unwrap().to_string(), "08:00");
    assert_eq!(slots.last().unwrap().to_string(), "17:30");
}

#[test]
fn no_slot_falls_in_the_midday_break() {
    for slot in generate_slots(some_date()) {
        assert!(
            slot.hour() < 12 || slot.hour() >= 14,
            "slot {} falls in the break window",
            slot
        );
    }
}

#[test]
fn slots_are_ascending_and_half_hour_aligned() {
    let slots = generate_slots(some_date());

    for pair in slots.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    for slot in slots {
        assert!(slot.minute() == 0 || slot.minute() == 30);
    }
}

#[test]
fn every_date_yields_the_same_slots() {
    let other_date = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
    assert_eq!(generate_slots(some_date()), generate_slots(other_date));
}

// ==============================================================================
// AVAILABILITY FILTERING
// ==============================================================================

#[test]
fn taken_slots_are_filtered_out_in_order() {
    let taken = vec![slot(8, 0), slot(14, 30)];
    let available = available_slots(some_date(), &taken);

    assert_eq!(available.len(), 14);
    assert_eq!(available.first().unwrap().to_string(), "08:30");
    assert!(!available.contains(&slot(14, 30)));

    for pair in available.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn fully_booked_day_yields_empty_list() {
    let taken = generate_slots(some_date());
    assert!(available_slots(some_date(), &taken).is_empty());
}

#[test]
fn nothing_taken_yields_the_full_day() {
    assert_eq!(
        available_slots(some_date(), &[]),
        generate_slots(some_date())
    );
}

// ==============================================================================
// SLOT CONSTRUCTION AND PARSING
// ==============================================================================

#[test]
fn slots_outside_clinic_hours_are_rejected() {
    assert_matches!(TimeSlot::new(7, 30), Err(SlotError::OutsideOperatingWindow(7, 30)));
    assert_matches!(TimeSlot::new(18, 0), Err(SlotError::OutsideOperatingWindow(18, 0)));
}

#[test]
fn slots_in_the_break_window_are_rejected() {
    assert_matches!(TimeSlot::new(12, 0), Err(SlotError::DuringMiddayBreak(12, 0)));
    assert_matches!(TimeSlot::new(13, 30), Err(SlotError::DuringMiddayBreak(13, 30)));
    assert!(TimeSlot::new(14, 0).is_ok());
}

#[test]
fn unaligned_minutes_are_rejected() {
    assert_matches!(TimeSlot::new(9, 15), Err(SlotError::UnalignedMinute(15)));
}

#[test]
fn slots_parse_and_display_as_hh_mm() {
    let parsed: TimeSlot = "09:30".parse().unwrap();
    assert_eq!(parsed, slot(9, 30));
    assert_eq!(parsed.to_string(), "09:30");

    assert_matches!("nine o'clock".parse::<TimeSlot>(), Err(SlotError::Unparseable(_)));
    assert_matches!("25:00".parse::<TimeSlot>(), Err(SlotError::OutsideOperatingWindow(25, 0)));
}

#[test]
fn slots_serialize_as_strings() {
    let json = serde_json::to_string(&slot(15, 30)).unwrap();
    assert_eq!(json, "\"15:30\"");

    let back: TimeSlot = serde_json::from_str("\"08:00\"").unwrap();
    assert_eq!(back, slot(8, 0));

    assert!(serde_json::from_str::<TimeSlot>("\"12:30\"").is_err());
}

// ==============================================================================
// SLOT SELECTION
// ==============================================================================

#[test]
fn adding_the_same_slot_twice_is_a_noop() {
    let mut selection = SlotSelection::new();

    assert!(selection.add(slot(9, 0)));
    assert!(!selection.add(slot(9, 0)));
    assert_eq!(selection.len(), 1);
}

#[test]
fn removal_preserves_the_order_of_the_rest() {
    let mut selection: SlotSelection =
        [slot(10, 0), slot(8, 30), slot(15, 0)].into_iter().collect();

    assert!(selection.remove(slot(8, 30)));
    assert!(!selection.remove(slot(8, 30)));

    let remaining: Vec<String> = selection.iter().map(|s| s.to_string()).collect();
    assert_eq!(remaining, vec!["10:00", "15:00"]);
}

#[test]
fn first_slot_follows_insertion_order() {
    let selection: SlotSelection = [slot(16, 30), slot(8, 0)].into_iter().collect();
    assert_eq!(selection.first(), Some(slot(16, 30)));
}
