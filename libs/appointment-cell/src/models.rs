// libs/appointment-cell/src/models.rs
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use scheduling_cell::SlotSelection;
use shared_models::AppError;
use shared_store::StoreError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// The persisted appointment entity. Owned by the external store; this
/// core creates it, transitions its status, and never deletes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: String,
    pub patient_id: String,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub reason: String,
    pub note: Option<String>,
    pub status: AppointmentStatus,
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Scheduled,
    Cancelled,
}

impl AppointmentStatus {
    /// Cancelled is terminal; no transition leaves it.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// ==============================================================================
// STORE INPUT MODELS
// ==============================================================================

/// Payload for the store's `create` operation. Note the absence of any
/// payment fields: card data never reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub user_id: String,
    pub patient_id: String,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub reason: String,
    pub note: Option<String>,
    pub status: AppointmentStatus,
}

/// Partial update for the store's `update` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_physician: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

// ==============================================================================
// BOOKING DRAFT MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Insurance")]
    Insurance,
}

impl PaymentMethod {
    pub fn is_card(&self) -> bool {
        matches!(self, PaymentMethod::CreditCard | PaymentMethod::DebitCard)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::CreditCard => write!(f, "Credit Card"),
            PaymentMethod::DebitCard => write!(f, "Debit Card"),
            PaymentMethod::Insurance => write!(f, "Insurance"),
        }
    }
}

/// Raw card form input. Validated, used to derive the receipt mask, and
/// then discarded; never serialized toward the store.
#[derive(Debug, Clone, Default)]
pub struct CardEntry {
    pub card_number: String,
    pub cardholder_name: String,
    pub expiry_date: String,
    pub cvv: String,
}

/// In-progress booking state, owned by exactly one `BookingSession` for
/// the duration of the session and dropped on success or abandonment.
#[derive(Debug, Clone)]
pub struct AppointmentDraft {
    pub user_id: String,
    pub patient_id: String,
    pub doctor: String,
    pub clinic: String,
    pub date: NaiveDate,
    pub slots: SlotSelection,
    pub reason: String,
    pub note: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub card: CardEntry,
}

#[derive(Debug, Clone)]
pub struct ScheduleFields {
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CancelFields {
    pub cancellation_reason: String,
}

/// What the caller wants from a booking session. Each variant carries
/// only the fields its flow needs, and the state machine matches on it
/// exhaustively.
#[derive(Debug, Clone)]
pub enum AppointmentIntent {
    Create(AppointmentDraft),
    Schedule {
        appointment_id: Uuid,
        fields: ScheduleFields,
    },
    Cancel {
        appointment_id: Uuid,
        fields: CancelFields,
    },
}

// ==============================================================================
// VALIDATION MODELS
// ==============================================================================

/// Field-level validation failures, ordered by field name so rendering
/// and assertions are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("cannot {action} an appointment in status {from}")]
    InvalidTransition {
        from: AppointmentStatus,
        action: &'static str,
    },

    #[error("appointment not found")]
    NotFound,

    #[error("appointment store error: {0}")]
    Persistence(String),
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => BookingError::NotFound,
            other => BookingError::Persistence(other.to_string()),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(fields) => AppError::Validation(json!(fields)),
            BookingError::InvalidTransition { .. } => AppError::Conflict(err.to_string()),
            BookingError::NotFound => AppError::NotFound("appointment not found".to_string()),
            // Generic user-visible failure; detail stays in the logs.
            BookingError::Persistence(detail) => AppError::ExternalService(detail),
        }
    }
}
