// libs/appointment-cell/tests/lifecycle_test.rs
//
// Status transitions: which are allowed from which status, what happens
// to the record on rejection, and the best-effort notification hook.
use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use uuid::Uuid;

use appointment_cell::models::{
    Appointment, AppointmentStatus, BookingError, CancelFields, ScheduleFields,
};
use appointment_cell::services::lifecycle::{AppointmentLifecycle, TransitionAction};
use appointment_cell::store::{AppointmentStore, InMemoryAppointmentStore};
use notification_cell::NotificationSender;

fn stored_appointment(status: AppointmentStatus) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        user_id: "user-1".to_string(),
        patient_id: "patient-1".to_string(),
        primary_physician: "Dr. Khaled Mansour".to_string(),
        schedule: Utc::now() + Duration::days(3),
        reason: "Annual check-up".to_string(),
        note: None,
        status,
        cancellation_reason: None,
    }
}

fn schedule_action() -> TransitionAction {
    TransitionAction::Schedule(ScheduleFields {
        primary_physician: "Dr. Sara Haddad".to_string(),
        schedule: Utc::now() + Duration::days(5),
    })
}

fn cancel_action(reason: &str) -> TransitionAction {
    TransitionAction::Cancel(CancelFields {
        cancellation_reason: reason.to_string(),
    })
}

#[tokio::test]
async fn scheduling_a_pending_appointment_succeeds() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let appointment = stored_appointment(AppointmentStatus::Pending);
    store.insert(appointment.clone());

    let lifecycle = AppointmentLifecycle::new(store.clone() as Arc<dyn AppointmentStore>);
    let updated = lifecycle
        .transition(appointment.id, schedule_action())
        .await
        .unwrap();

    assert_eq!(updated.status, AppointmentStatus::Scheduled);
    assert_eq!(updated.primary_physician, "Dr. Sara Haddad");
}

#[tokio::test]
async fn scheduling_a_cancelled_appointment_is_rejected_without_changes() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let appointment = stored_appointment(AppointmentStatus::Cancelled);
    store.insert(appointment.clone());

    let lifecycle = AppointmentLifecycle::new(store.clone() as Arc<dyn AppointmentStore>);
    let err = lifecycle
        .transition(appointment.id, schedule_action())
        .await
        .unwrap_err();

    assert_matches!(
        err,
        BookingError::InvalidTransition {
            from: AppointmentStatus::Cancelled,
            action: "schedule",
        }
    );

    // The stored record is untouched by a rejected transition.
    let stored = store.get(appointment.id).await.unwrap();
    assert_eq!(stored.status, AppointmentStatus::Cancelled);
    assert_eq!(stored.primary_physician, "Dr. Khaled Mansour");
}

#[tokio::test]
async fn cancelling_works_from_pending_and_scheduled_but_not_twice() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let pending = stored_appointment(AppointmentStatus::Pending);
    let scheduled = stored_appointment(AppointmentStatus::Scheduled);
    store.insert(pending.clone());
    store.insert(scheduled.clone());

    let lifecycle = AppointmentLifecycle::new(store.clone() as Arc<dyn AppointmentStore>);

    let cancelled = lifecycle
        .transition(pending.id, cancel_action("Feeling better"))
        .await
        .unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert_eq!(
        cancelled.cancellation_reason.as_deref(),
        Some("Feeling better")
    );

    lifecycle
        .transition(scheduled.id, cancel_action("Conflict"))
        .await
        .unwrap();

    // Cancelled is terminal.
    let err = lifecycle
        .transition(pending.id, cancel_action("Again"))
        .await
        .unwrap_err();
    assert_matches!(err, BookingError::InvalidTransition { action: "cancel", .. });
}

#[tokio::test]
async fn unknown_appointment_maps_to_not_found() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let lifecycle = AppointmentLifecycle::new(store as Arc<dyn AppointmentStore>);

    let err = lifecycle
        .transition(Uuid::new_v4(), cancel_action("No-show"))
        .await
        .unwrap_err();
    assert_matches!(err, BookingError::NotFound);
}

#[tokio::test]
async fn successful_transition_enqueues_one_notification() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let appointment = stored_appointment(AppointmentStatus::Pending);
    store.insert(appointment.clone());

    let (notifier, mut inbox) = NotificationSender::capture();
    let lifecycle =
        AppointmentLifecycle::with_notifier(store as Arc<dyn AppointmentStore>, notifier);

    lifecycle
        .transition(appointment.id, cancel_action("Feeling better"))
        .await
        .unwrap();

    let message = inbox.try_recv().unwrap();
    assert!(message.contains("cancelled"));
    assert!(message.contains("Feeling better"));
    assert!(inbox.try_recv().is_err());
}

#[tokio::test]
async fn rejected_transition_enqueues_nothing() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let appointment = stored_appointment(AppointmentStatus::Cancelled);
    store.insert(appointment.clone());

    let (notifier, mut inbox) = NotificationSender::capture();
    let lifecycle =
        AppointmentLifecycle::with_notifier(store as Arc<dyn AppointmentStore>, notifier);

    let _ = lifecycle
        .transition(appointment.id, schedule_action())
        .await
        .unwrap_err();

    assert!(inbox.try_recv().is_err());
}

#[tokio::test]
async fn a_dead_notification_channel_never_fails_the_transition() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let appointment = stored_appointment(AppointmentStatus::Pending);
    store.insert(appointment.clone());

    let (notifier, inbox) = NotificationSender::capture();
    drop(inbox);

    let lifecycle =
        AppointmentLifecycle::with_notifier(store as Arc<dyn AppointmentStore>, notifier);
    let updated = lifecycle
        .transition(appointment.id, schedule_action())
        .await
        .unwrap();

    assert_eq!(updated.status, AppointmentStatus::Scheduled);
}
