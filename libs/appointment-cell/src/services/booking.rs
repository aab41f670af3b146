// libs/appointment-cell/src/services/booking.rs
use chrono::Utc;
use tracing::{debug, warn};

use crate::models::{Appointment, AppointmentDraft, AppointmentIntent, BookingError, FieldErrors};
use crate::services::lifecycle::{AppointmentLifecycle, TransitionAction};
use crate::services::validation::{
    validate_cancel, validate_create_details, validate_create_payment, validate_schedule,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    CollectingDetails,
    CollectingPayment,
    Submitting,
    Submitted,
    Failed,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Details accepted; nothing persisted yet, payment step is next.
    AwaitingPayment,
    /// The current step's validation failed; the session stays on it.
    Invalid(FieldErrors),
    Submitted(Appointment),
    Failed(BookingError),
    /// Duplicate submit while in flight or after completion; no effect.
    Ignored,
}

/// Drives one booking from raw input to a persisted appointment.
///
/// A session owns its intent (and, for Create, the draft) exclusively.
/// Dropping the session abandons the booking; nothing is persisted
/// before the session reaches Submitted.
pub struct BookingSession {
    intent: AppointmentIntent,
    state: BookingState,
}

impl BookingSession {
    pub fn new(intent: AppointmentIntent) -> Self {
        Self {
            intent,
            state: BookingState::CollectingDetails,
        }
    }

    pub fn state(&self) -> BookingState {
        self.state
    }

    pub fn draft(&self) -> Option<&AppointmentDraft> {
        match &self.intent {
            AppointmentIntent::Create(draft) => Some(draft),
            _ => None,
        }
    }

    /// Mutable access for correcting fields between submits, e.g. fixing
    /// the card after a rejected payment step.
    pub fn draft_mut(&mut self) -> Option<&mut AppointmentDraft> {
        match &mut self.intent {
            AppointmentIntent::Create(draft) => Some(draft),
            _ => None,
        }
    }

    /// Advance the session by one submit trigger.
    ///
    /// The state moves to Submitting before any store call is awaited, so
    /// a duplicate trigger during an in-flight submission is ignored and
    /// can never persist a second appointment.
    pub async fn submit(&mut self, lifecycle: &AppointmentLifecycle) -> SubmitOutcome {
        match self.state {
            BookingState::Submitting | BookingState::Submitted => {
                warn!("Duplicate submit ignored in state {:?}", self.state);
                return SubmitOutcome::Ignored;
            }
            _ => {}
        }

        match self.intent.clone() {
            AppointmentIntent::Create(draft) => self.submit_create(&draft, lifecycle).await,
            AppointmentIntent::Schedule {
                appointment_id,
                fields,
            } => {
                if let Err(errors) = validate_schedule(&fields, Utc::now()) {
                    return SubmitOutcome::Invalid(errors);
                }
                self.state = BookingState::Submitting;
                let result = lifecycle
                    .transition(appointment_id, TransitionAction::Schedule(fields))
                    .await;
                self.finish(result)
            }
            AppointmentIntent::Cancel {
                appointment_id,
                fields,
            } => {
                if let Err(errors) = validate_cancel(&fields) {
                    return SubmitOutcome::Invalid(errors);
                }
                self.state = BookingState::Submitting;
                let result = lifecycle
                    .transition(appointment_id, TransitionAction::Cancel(fields))
                    .await;
                self.finish(result)
            }
        }
    }

    async fn submit_create(
        &mut self,
        draft: &AppointmentDraft,
        lifecycle: &AppointmentLifecycle,
    ) -> SubmitOutcome {
        match self.state {
            BookingState::CollectingDetails => match validate_create_details(draft, Utc::now()) {
                Ok(()) => {
                    debug!("Details accepted, moving to payment step");
                    self.state = BookingState::CollectingPayment;
                    SubmitOutcome::AwaitingPayment
                }
                Err(errors) => SubmitOutcome::Invalid(errors),
            },
            // A failed submission re-enters at the payment step: details
            // are kept, at most the payment is redone.
            BookingState::CollectingPayment | BookingState::Failed => {
                if let Err(errors) = validate_create_payment(draft) {
                    self.state = BookingState::CollectingPayment;
                    return SubmitOutcome::Invalid(errors);
                }

                self.state = BookingState::Submitting;
                self.finish(lifecycle.create(draft).await)
            }
            BookingState::Submitting | BookingState::Submitted => SubmitOutcome::Ignored,
        }
    }

    fn finish(&mut self, result: Result<Appointment, BookingError>) -> SubmitOutcome {
        match result {
            Ok(appointment) => {
                self.state = BookingState::Submitted;
                SubmitOutcome::Submitted(appointment)
            }
            Err(err) => {
                warn!("Submission failed: {}", err);
                self.state = BookingState::Failed;
                SubmitOutcome::Failed(err)
            }
        }
    }
}
