// libs/appointment-cell/src/services/validation.rs
use chrono::{DateTime, Utc};
use regex::Regex;

use crate::models::{AppointmentDraft, CancelFields, FieldErrors, ScheduleFields};

pub const CARD_NUMBER_DIGITS: usize = 16;

/// Details step for a new booking: doctor, clinic, at least one slot,
/// a date that is not in the past, and a reason.
pub fn validate_create_details(
    draft: &AppointmentDraft,
    now: DateTime<Utc>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if draft.doctor.trim().is_empty() {
        errors.push("doctor", "Select a doctor");
    }
    if draft.clinic.trim().is_empty() {
        errors.push("clinic", "Select a clinic");
    }
    if draft.slots.is_empty() {
        errors.push("slots", "Select at least one time slot");
    }
    if draft.date < now.date_naive() {
        errors.push("date", "Appointment date cannot be in the past");
    }
    if draft.reason.trim().is_empty() {
        errors.push("reason", "Appointment reason is required");
    }

    errors.into_result()
}

/// Payment step for a new booking. Card fields are only required when the
/// chosen method is an actual card; insurance needs no card details.
pub fn validate_create_payment(draft: &AppointmentDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let Some(method) = draft.payment_method else {
        errors.push("payment_method", "Select a payment method");
        return errors.into_result();
    };

    if method.is_card() {
        let card = &draft.card;

        let digits: String = card
            .card_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if digits.len() != CARD_NUMBER_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
            errors.push("card_number", "Card number must be 16 digits");
        }

        if card.cardholder_name.trim().is_empty() {
            errors.push("cardholder_name", "Cardholder name is required");
        }

        let expiry_re = Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").unwrap();
        if !expiry_re.is_match(&card.expiry_date) {
            errors.push("expiry_date", "Expiry date must be in MM/YY format");
        }

        let cvv_re = Regex::new(r"^\d{3,4}$").unwrap();
        if !cvv_re.is_match(&card.cvv) {
            errors.push("cvv", "CVV must be 3 or 4 digits");
        }
    }

    errors.into_result()
}

/// Scheduling an existing pending appointment.
pub fn validate_schedule(fields: &ScheduleFields, now: DateTime<Utc>) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if fields.primary_physician.trim().is_empty() {
        errors.push("primary_physician", "Select a doctor");
    }
    if fields.schedule < now {
        errors.push("schedule", "Schedule cannot be in the past");
    }

    errors.into_result()
}

/// Cancelling an appointment requires a non-empty reason.
pub fn validate_cancel(fields: &CancelFields) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if fields.cancellation_reason.trim().is_empty() {
        errors.push("cancellation_reason", "Cancellation reason is required");
    }

    errors.into_result()
}
