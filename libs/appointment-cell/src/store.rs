// libs/appointment-cell/src/store.rs
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_store::{RestClient, StoreError};

use crate::models::{Appointment, AppointmentPatch, NewAppointment};

/// The external appointment store, reduced to the three operations the
/// core consumes. Implementations must not retry internally; failures
/// surface to the state machine.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn create(&self, input: NewAppointment) -> Result<Appointment, StoreError>;
    async fn get(&self, id: Uuid) -> Result<Appointment, StoreError>;
    async fn update(&self, id: Uuid, patch: AppointmentPatch) -> Result<Appointment, StoreError>;
}

// ==============================================================================
// HTTP IMPLEMENTATION
// ==============================================================================

pub struct HttpAppointmentStore {
    client: RestClient,
}

impl HttpAppointmentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: RestClient::new(config),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: RestClient::with_base_url(base_url),
        }
    }
}

#[async_trait]
impl AppointmentStore for HttpAppointmentStore {
    async fn create(&self, input: NewAppointment) -> Result<Appointment, StoreError> {
        debug!("Creating appointment for patient {}", input.patient_id);
        self.client
            .request(Method::POST, "/appointments", Some(json!(input)))
            .await
    }

    async fn get(&self, id: Uuid) -> Result<Appointment, StoreError> {
        let path = format!("/appointments/{}", id);
        self.client.request(Method::GET, &path, None).await
    }

    async fn update(&self, id: Uuid, patch: AppointmentPatch) -> Result<Appointment, StoreError> {
        debug!("Patching appointment {}", id);
        let path = format!("/appointments/{}", id);
        self.client
            .request(Method::PATCH, &path, Some(json!(patch)))
            .await
    }
}

// ==============================================================================
// IN-MEMORY IMPLEMENTATION (tests, demos)
// ==============================================================================

/// Process-local store double. `fail_writes` simulates a rejecting
/// backend so retry paths can be exercised.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    records: Mutex<HashMap<Uuid, Appointment>>,
    fail_writes: AtomicBool,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn insert(&self, appointment: Appointment) {
        self.records
            .lock()
            .expect("store lock poisoned")
            .insert(appointment.id, appointment);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected {
                status: 503,
                detail: "store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn create(&self, input: NewAppointment) -> Result<Appointment, StoreError> {
        self.check_writable()?;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            patient_id: input.patient_id,
            primary_physician: input.primary_physician,
            schedule: input.schedule,
            reason: input.reason,
            note: input.note,
            status: input.status,
            cancellation_reason: None,
        };

        self.insert(appointment.clone());
        Ok(appointment)
    }

    async fn get(&self, id: Uuid) -> Result<Appointment, StoreError> {
        self.records
            .lock()
            .expect("store lock poisoned")
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: Uuid, patch: AppointmentPatch) -> Result<Appointment, StoreError> {
        self.check_writable()?;

        let mut records = self.records.lock().expect("store lock poisoned");
        let record = records.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(physician) = patch.primary_physician {
            record.primary_physician = physician;
        }
        if let Some(schedule) = patch.schedule {
            record.schedule = schedule;
        }
        if let Some(reason) = patch.cancellation_reason {
            record.cancellation_reason = Some(reason);
        }

        Ok(record.clone())
    }
}
