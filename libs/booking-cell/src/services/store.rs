use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::appointment::{
    AppointmentId, AppointmentRecord, AppointmentStore, StoreError,
};

const TABLE_PATH: &str = "/rest/v1/property_appointments";

#[derive(Debug, Deserialize)]
struct InsertedRow {
    id: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct BusyRow {
    appointment_date: NaiveDateTime,
}

/// Appointment persistence backed by the Supabase REST API.
pub struct SupabaseAppointmentStore {
    client: SupabaseClient,
}

impl SupabaseAppointmentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl AppointmentStore for SupabaseAppointmentStore {
    async fn save_appointment(
        &self,
        record: &AppointmentRecord,
    ) -> Result<AppointmentId, StoreError> {
        debug!(
            advisor_id = %record.advisor_id,
            appointment_date = %record.appointment_date,
            "Saving appointment"
        );

        let body = json!({
            "client_name": record.client_name,
            "client_email": record.client_email,
            "client_phone": record.client_phone,
            "property_id": record.property_id,
            "advisor_id": record.advisor_id,
            "appointment_date": record.appointment_date,
            "appointment_type": record.appointment_type,
            "visit_type": record.visit_type,
            "attendees": record.attendees,
            "special_requests": record.special_requests,
            "contact_method": record.contact_method,
            "marketing_consent": record.marketing_consent,
            "status": "pending",
        });

        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let rows: Vec<InsertedRow> = self
            .client
            .request_with_headers(Method::POST, TABLE_PATH, Some(body), Some(headers))
            .await
            .map_err(classify_error)?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Unknown("insert returned no rows".to_string()))?;

        // PostgREST serializes integer and uuid primary keys differently.
        let id = match row.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };

        info!(appointment_id = %id, "Appointment persisted");
        Ok(AppointmentId(id))
    }

    async fn get_busy_slots(
        &self,
        advisor_id: &str,
        date: NaiveDate,
    ) -> Result<HashSet<NaiveTime>, StoreError> {
        let day_start = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            StoreError::Validation(format!("invalid date: {}", date))
        })?;
        let day_end = day_start + Duration::days(1);

        let path = format!(
            "{}?select=appointment_date&advisor_id=eq.{}&appointment_date=gte.{}&appointment_date=lt.{}&status=neq.cancelled",
            TABLE_PATH,
            urlencoding::encode(advisor_id),
            day_start.format("%Y-%m-%dT%H:%M:%S"),
            day_end.format("%Y-%m-%dT%H:%M:%S"),
        );

        let rows: Vec<BusyRow> = self
            .client
            .request(Method::GET, &path, None)
            .await
            .map_err(classify_error)?;

        debug!(advisor_id, %date, busy = rows.len(), "Fetched busy slots");
        Ok(rows.into_iter().map(|r| r.appointment_date.time()).collect())
    }
}

/// Map the transport layer's error text onto the categorized store errors
/// the booking flow understands.
fn classify_error(err: anyhow::Error) -> StoreError {
    let text = err.to_string();
    let lowered = text.to_lowercase();

    if lowered.contains("duplicate") {
        StoreError::Duplicate
    } else if lowered.contains("network") || lowered.contains("fetch") {
        StoreError::Network(text)
    } else if lowered.contains("validation") {
        StoreError::Validation(text)
    } else {
        StoreError::Unknown(text)
    }
}
