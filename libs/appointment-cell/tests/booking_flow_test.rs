// libs/appointment-cell/tests/booking_flow_test.rs
//
// End-to-end booking flow: draft, details step, payment step, submission,
// and the retry / duplicate-submit edge cases around it.
use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Days, Utc};

use appointment_cell::models::{
    AppointmentDraft, AppointmentIntent, AppointmentStatus, BookingError, CardEntry, PaymentMethod,
};
use appointment_cell::services::booking::{BookingSession, BookingState, SubmitOutcome};
use appointment_cell::services::lifecycle::AppointmentLifecycle;
use appointment_cell::services::receipt::{PaymentDetails, Receipt};
use appointment_cell::store::{AppointmentStore, InMemoryAppointmentStore};
use scheduling_cell::TimeSlot;

fn booking_draft() -> AppointmentDraft {
    AppointmentDraft {
        user_id: "user-1".to_string(),
        patient_id: "patient-1".to_string(),
        doctor: "Dr. Khaled Mansour".to_string(),
        clinic: "Cardiology".to_string(),
        date: Utc::now().date_naive() + Days::new(7),
        slots: [TimeSlot::new(9, 0).unwrap()].into_iter().collect(),
        reason: "Annual check-up".to_string(),
        note: Some("Prefers mornings".to_string()),
        payment_method: Some(PaymentMethod::CreditCard),
        card: CardEntry {
            card_number: "4111 1111 1111 1111".to_string(),
            cardholder_name: "J Doe".to_string(),
            expiry_date: "09/27".to_string(),
            cvv: "123".to_string(),
        },
    }
}

fn setup() -> (Arc<InMemoryAppointmentStore>, AppointmentLifecycle) {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let lifecycle = AppointmentLifecycle::new(store.clone() as Arc<dyn AppointmentStore>);
    (store, lifecycle)
}

#[tokio::test]
async fn happy_path_books_a_pending_appointment() {
    let (store, lifecycle) = setup();
    let mut session = BookingSession::new(AppointmentIntent::Create(booking_draft()));

    // First submit clears the details step, persists nothing.
    assert_matches!(session.submit(&lifecycle).await, SubmitOutcome::AwaitingPayment);
    assert_eq!(session.state(), BookingState::CollectingPayment);
    assert!(store.is_empty());

    // Second submit validates payment and persists.
    let appointment = match session.submit(&lifecycle).await {
        SubmitOutcome::Submitted(appointment) => appointment,
        other => panic!("expected Submitted, got {:?}", other),
    };

    assert_eq!(session.state(), BookingState::Submitted);
    assert_eq!(store.len(), 1);
    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.primary_physician, "Dr. Khaled Mansour");
    assert_eq!(appointment.reason, "Annual check-up");

    // The schedule combines the draft date with the first selected slot.
    assert_eq!(appointment.schedule.format("%H:%M").to_string(), "09:00");

    // A receipt built from the result masks the card down to its last four.
    let payment = PaymentDetails::for_appointment(
        &appointment,
        PaymentMethod::CreditCard,
        &booking_draft().card,
    );
    assert_eq!(
        payment.card_number_masked.as_deref(),
        Some("•••• •••• •••• 1111")
    );
    let receipt = Receipt::generate(&appointment, "Dr. Khaled Mansour", payment);
    assert!(!receipt.clipboard_text().contains("4111 1111 1111 1111"));
}

#[tokio::test]
async fn duplicate_submit_after_success_is_ignored() {
    let (store, lifecycle) = setup();
    let mut session = BookingSession::new(AppointmentIntent::Create(booking_draft()));

    session.submit(&lifecycle).await;
    assert_matches!(session.submit(&lifecycle).await, SubmitOutcome::Submitted(_));

    // A stray re-trigger must not create a second appointment.
    assert_matches!(session.submit(&lifecycle).await, SubmitOutcome::Ignored);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn invalid_details_keep_the_session_on_the_details_step() {
    let (store, lifecycle) = setup();

    let mut draft = booking_draft();
    draft.reason = String::new();
    let mut session = BookingSession::new(AppointmentIntent::Create(draft));

    let outcome = session.submit(&lifecycle).await;
    let errors = match outcome {
        SubmitOutcome::Invalid(errors) => errors,
        other => panic!("expected Invalid, got {:?}", other),
    };

    assert_eq!(errors.get("reason"), Some("Appointment reason is required"));
    assert_eq!(session.state(), BookingState::CollectingDetails);
    assert!(store.is_empty());

    // Fixing the field lets the same session proceed.
    session.draft_mut().unwrap().reason = "Follow-up".to_string();
    assert_matches!(session.submit(&lifecycle).await, SubmitOutcome::AwaitingPayment);
}

#[tokio::test]
async fn invalid_payment_keeps_the_session_on_the_payment_step() {
    let (store, lifecycle) = setup();

    let mut draft = booking_draft();
    draft.card.card_number = "4111 1111".to_string();
    let mut session = BookingSession::new(AppointmentIntent::Create(draft));

    session.submit(&lifecycle).await;
    let outcome = session.submit(&lifecycle).await;
    assert_matches!(outcome, SubmitOutcome::Invalid(_));
    assert_eq!(session.state(), BookingState::CollectingPayment);
    assert!(store.is_empty());
}

#[tokio::test]
async fn store_failure_lands_in_failed_and_a_retry_succeeds() {
    let (store, lifecycle) = setup();
    let mut session = BookingSession::new(AppointmentIntent::Create(booking_draft()));

    session.submit(&lifecycle).await;

    store.fail_writes(true);
    let outcome = session.submit(&lifecycle).await;
    assert_matches!(
        outcome,
        SubmitOutcome::Failed(BookingError::Persistence(_))
    );
    assert_eq!(session.state(), BookingState::Failed);
    assert!(store.is_empty());

    // Failed re-enters at the payment step; the details survive.
    store.fail_writes(false);
    assert_matches!(session.submit(&lifecycle).await, SubmitOutcome::Submitted(_));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn schedule_intent_is_a_single_step_submission() {
    let (store, lifecycle) = setup();

    let mut create = BookingSession::new(AppointmentIntent::Create(booking_draft()));
    create.submit(&lifecycle).await;
    let appointment = match create.submit(&lifecycle).await {
        SubmitOutcome::Submitted(appointment) => appointment,
        other => panic!("expected Submitted, got {:?}", other),
    };

    let mut session = BookingSession::new(AppointmentIntent::Schedule {
        appointment_id: appointment.id,
        fields: appointment_cell::models::ScheduleFields {
            primary_physician: "Dr. Sara Haddad".to_string(),
            schedule: Utc::now() + chrono::Duration::days(10),
        },
    });

    let outcome = session.submit(&lifecycle).await;
    let updated = match outcome {
        SubmitOutcome::Submitted(updated) => updated,
        other => panic!("expected Submitted, got {:?}", other),
    };

    assert_eq!(updated.status, AppointmentStatus::Scheduled);
    assert_eq!(updated.primary_physician, "Dr. Sara Haddad");
    assert_eq!(store.len(), 1);
}
