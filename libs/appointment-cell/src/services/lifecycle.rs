// libs/appointment-cell/src/services/lifecycle.rs
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use notification_cell::NotificationSender;

use crate::models::{
    Appointment, AppointmentDraft, AppointmentPatch, AppointmentStatus, BookingError, CancelFields,
    FieldErrors, NewAppointment, ScheduleFields,
};
use crate::store::AppointmentStore;

/// A requested status change, carrying only the fields its flow needs.
#[derive(Debug, Clone)]
pub enum TransitionAction {
    Schedule(ScheduleFields),
    Cancel(CancelFields),
}

impl TransitionAction {
    pub fn name(&self) -> &'static str {
        match self {
            TransitionAction::Schedule(_) => "schedule",
            TransitionAction::Cancel(_) => "cancel",
        }
    }

    pub fn target_status(&self) -> AppointmentStatus {
        match self {
            TransitionAction::Schedule(_) => AppointmentStatus::Scheduled,
            TransitionAction::Cancel(_) => AppointmentStatus::Cancelled,
        }
    }

    /// Status invariants: scheduling is only legal from Pending;
    /// cancellation from either live status. Cancelled is terminal.
    pub fn allowed_from(&self, current: &AppointmentStatus) -> bool {
        match self {
            TransitionAction::Schedule(_) => matches!(current, AppointmentStatus::Pending),
            TransitionAction::Cancel(_) => matches!(
                current,
                AppointmentStatus::Pending | AppointmentStatus::Scheduled
            ),
        }
    }
}

/// Owns the appointment entity's status transitions and their side
/// effects: persisting through the external store and enqueueing a
/// best-effort notification once the write is acknowledged.
pub struct AppointmentLifecycle {
    store: Arc<dyn AppointmentStore>,
    notifier: Option<NotificationSender>,
}

impl AppointmentLifecycle {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self {
            store,
            notifier: None,
        }
    }

    pub fn with_notifier(store: Arc<dyn AppointmentStore>, notifier: NotificationSender) -> Self {
        Self {
            store,
            notifier: Some(notifier),
        }
    }

    /// Persist a new appointment with status Pending. The schedule is the
    /// draft's date combined with the first selected slot.
    pub async fn create(&self, draft: &AppointmentDraft) -> Result<Appointment, BookingError> {
        let first_slot = draft.slots.first().ok_or_else(|| {
            BookingError::Validation(FieldErrors::single("slots", "Select at least one time slot"))
        })?;

        let schedule = draft.date.and_time(first_slot.to_naive_time()).and_utc();

        let input = NewAppointment {
            user_id: draft.user_id.clone(),
            patient_id: draft.patient_id.clone(),
            primary_physician: draft.doctor.clone(),
            schedule,
            reason: draft.reason.clone(),
            note: draft.note.clone(),
            status: AppointmentStatus::Pending,
        };

        let appointment = self.store.create(input).await?;
        info!(
            "Appointment {} created for patient {} at {}",
            appointment.id, appointment.patient_id, appointment.schedule
        );

        Ok(appointment)
    }

    /// Load, check the status invariant, persist the new status, then
    /// enqueue a notification. A rejected transition leaves the record
    /// unchanged; a lost notification never reverses the transition.
    pub async fn transition(
        &self,
        appointment_id: Uuid,
        action: TransitionAction,
    ) -> Result<Appointment, BookingError> {
        let current = self.store.get(appointment_id).await?;
        debug!(
            "Validating {} transition for appointment {} (status {})",
            action.name(),
            appointment_id,
            current.status
        );

        if !action.allowed_from(&current.status) {
            warn!(
                "Invalid {} transition attempted from status {}",
                action.name(),
                current.status
            );
            return Err(BookingError::InvalidTransition {
                from: current.status,
                action: action.name(),
            });
        }

        let patch = match &action {
            TransitionAction::Schedule(fields) => AppointmentPatch {
                status: Some(action.target_status()),
                primary_physician: Some(fields.primary_physician.clone()),
                schedule: Some(fields.schedule),
                cancellation_reason: None,
            },
            TransitionAction::Cancel(fields) => AppointmentPatch {
                status: Some(action.target_status()),
                primary_physician: None,
                schedule: None,
                cancellation_reason: Some(fields.cancellation_reason.clone()),
            },
        };

        let updated = self.store.update(appointment_id, patch).await?;
        info!(
            "Appointment {} transitioned to {}",
            updated.id, updated.status
        );

        // Only after the write is acknowledged; never before or instead.
        self.notify(&updated, &action);

        Ok(updated)
    }

    fn notify(&self, appointment: &Appointment, action: &TransitionAction) {
        let Some(notifier) = &self.notifier else {
            return;
        };

        let message = match action {
            TransitionAction::Schedule(_) => format!(
                "Your appointment with {} has been scheduled for {}.",
                appointment.primary_physician,
                appointment.schedule.format("%Y-%m-%d %H:%M")
            ),
            TransitionAction::Cancel(fields) => format!(
                "Your appointment with {} has been cancelled. Reason: {}",
                appointment.primary_physician, fields.cancellation_reason
            ),
        };

        notifier.enqueue(message);
    }
}
