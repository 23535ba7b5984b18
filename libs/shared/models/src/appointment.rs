use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the appointment store on a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentId(pub String);

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The persisted appointment shape. Contact fields arrive already cleaned
/// (trimmed name, lowercased email, digits-only phone) and the date/time
/// pair resolved into a single timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub property_id: Option<String>,
    pub advisor_id: String,
    pub appointment_date: NaiveDateTime,
    pub appointment_type: String,
    pub visit_type: String,
    pub attendees: i32,
    pub special_requests: Option<String>,
    pub contact_method: String,
    pub marketing_consent: bool,
}

/// Categorized persistence failures surfaced to the booking flow.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("an appointment already exists for this slot")]
    Duplicate,

    #[error("network error: {0}")]
    Network(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("store error: {0}")]
    Unknown(String),
}

/// External appointment store collaborator.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn save_appointment(
        &self,
        record: &AppointmentRecord,
    ) -> Result<AppointmentId, StoreError>;

    /// Times already taken for an advisor on a given date.
    async fn get_busy_slots(
        &self,
        advisor_id: &str,
        date: NaiveDate,
    ) -> Result<HashSet<NaiveTime>, StoreError>;
}
