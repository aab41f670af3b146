// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use directory_cell::find_doctor;
use notification_cell::NotificationSender;
use scheduling_cell::{available_slots, SlotSelection, TimeSlot};
use shared_models::AppError;

use crate::models::{
    AppointmentDraft, AppointmentIntent, BookingError, CancelFields, CardEntry, PaymentMethod,
    ScheduleFields,
};
use crate::services::booking::{BookingSession, SubmitOutcome};
use crate::services::lifecycle::AppointmentLifecycle;
use crate::services::receipt::{PaymentDetails, Receipt};
use crate::store::AppointmentStore;

/// Shared state for the appointment routes: the external store plus an
/// optional notification producer.
pub struct AppointmentCellState {
    pub store: Arc<dyn AppointmentStore>,
    pub notifier: Option<NotificationSender>,
}

impl AppointmentCellState {
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

    fn lifecycle(&self) -> AppointmentLifecycle {
        match &self.notifier {
            Some(notifier) => {
                AppointmentLifecycle::with_notifier(Arc::clone(&self.store), notifier.clone())
            }
            None => AppointmentLifecycle::new(Arc::clone(&self.store)),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub user_id: String,
    pub patient_id: String,
    pub doctor: String,
    pub clinic: String,
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    pub reason: String,
    pub note: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub card_number: Option<String>,
    pub cardholder_name: Option<String>,
    pub expiry_date: Option<String>,
    pub cvv: Option<String>,
}

impl CreateAppointmentRequest {
    fn into_draft(self) -> AppointmentDraft {
        AppointmentDraft {
            user_id: self.user_id,
            patient_id: self.patient_id,
            doctor: self.doctor,
            clinic: self.clinic,
            date: self.date,
            slots: self.slots.into_iter().collect::<SlotSelection>(),
            reason: self.reason,
            note: self.note,
            payment_method: self.payment_method,
            card: CardEntry {
                card_number: self.card_number.unwrap_or_default(),
                cardholder_name: self.cardholder_name.unwrap_or_default(),
                expiry_date: self.expiry_date.unwrap_or_default(),
                cvv: self.cvv.unwrap_or_default(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScheduleAppointmentRequest {
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CancelAppointmentRequest {
    pub cancellation_reason: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailableSlotsQuery {
    pub date: NaiveDate,
    /// Comma-separated "HH:MM" slots already booked for that date.
    pub taken: Option<String>,
}

// ==============================================================================
// HANDLERS
// ==============================================================================

/// One form submit drives the whole create flow: the details step, then
/// the payment step, then submission. Validation failures from either
/// step come back as a field-error map.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppointmentCellState>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let draft = request.into_draft();
    let doctor_name = draft.doctor.clone();
    let payment_method = draft.payment_method;
    let card = draft.card.clone();

    let lifecycle = state.lifecycle();
    let mut session = BookingSession::new(AppointmentIntent::Create(draft));

    // Details step
    match session.submit(&lifecycle).await {
        SubmitOutcome::AwaitingPayment => {}
        SubmitOutcome::Invalid(errors) => return Err(BookingError::Validation(errors).into()),
        _ => return Err(AppError::Internal("unexpected booking state".to_string())),
    }

    // Payment step + submission
    match session.submit(&lifecycle).await {
        SubmitOutcome::Submitted(appointment) => {
            // Validation guarantees a method is present on this path.
            let method = payment_method.unwrap_or(PaymentMethod::CreditCard);
            let payment = PaymentDetails::for_appointment(&appointment, method, &card);

            let display_name = find_doctor(&doctor_name)
                .map(|doctor| doctor.name)
                .unwrap_or(doctor_name.as_str());
            let receipt = Receipt::generate(&appointment, display_name, payment);
            let receipt_text = receipt.clipboard_text();

            Ok(Json(json!({
                "success": true,
                "appointment": appointment,
                "receipt": receipt,
                "receipt_text": receipt_text,
            })))
        }
        SubmitOutcome::Invalid(errors) => Err(BookingError::Validation(errors).into()),
        SubmitOutcome::Failed(err) => Err(err.into()),
        _ => Err(AppError::Internal("unexpected booking state".to_string())),
    }
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppointmentCellState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state
        .store
        .get(appointment_id)
        .await
        .map_err(BookingError::from)?;

    Ok(Json(json!({ "appointment": appointment })))
}

#[axum::debug_handler]
pub async fn schedule_appointment(
    State(state): State<Arc<AppointmentCellState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<ScheduleAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let intent = AppointmentIntent::Schedule {
        appointment_id,
        fields: ScheduleFields {
            primary_physician: request.primary_physician,
            schedule: request.schedule,
        },
    };

    submit_single_step(&state, intent).await
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppointmentCellState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let intent = AppointmentIntent::Cancel {
        appointment_id,
        fields: CancelFields {
            cancellation_reason: request.cancellation_reason,
        },
    };

    submit_single_step(&state, intent).await
}

/// Bookable slots for a date, minus whatever the caller reports as
/// taken. Read-time filtering only; nothing is reserved here.
#[axum::debug_handler]
pub async fn get_available_slots(
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let taken = parse_taken_slots(query.taken.as_deref())?;
    let slots: Vec<String> = available_slots(query.date, &taken)
        .into_iter()
        .map(|slot| slot.to_string())
        .collect();

    Ok(Json(json!({ "date": query.date, "slots": slots })))
}

// ==============================================================================
// HELPERS
// ==============================================================================

async fn submit_single_step(
    state: &AppointmentCellState,
    intent: AppointmentIntent,
) -> Result<Json<Value>, AppError> {
    let lifecycle = state.lifecycle();
    let mut session = BookingSession::new(intent);

    match session.submit(&lifecycle).await {
        SubmitOutcome::Submitted(appointment) => Ok(Json(json!({
            "success": true,
            "appointment": appointment,
        }))),
        SubmitOutcome::Invalid(errors) => Err(BookingError::Validation(errors).into()),
        SubmitOutcome::Failed(err) => Err(err.into()),
        _ => Err(AppError::Internal("unexpected booking state".to_string())),
    }
}

fn parse_taken_slots(raw: Option<&str>) -> Result<Vec<TimeSlot>, AppError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse::<TimeSlot>()
                .map_err(|e| AppError::BadRequest(e.to_string()))
        })
        .collect()
}
