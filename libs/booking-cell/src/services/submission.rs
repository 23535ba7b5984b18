use std::sync::Arc;

use tracing::{error, info, warn};

use shared_models::appointment::{AppointmentRecord, AppointmentStore, StoreError};
use shared_models::directory::{Advisor, PropertySummary};

use crate::error::BookingError;
use crate::models::{AppointmentDraft, ContactMethod, FormField, SubmissionStatus};
use crate::ports::NavigationPort;
use crate::services::form::BookingForm;
use crate::services::message::{whatsapp_message, whatsapp_url};
use crate::services::validation::{digits_only, validate_step};

const DUPLICATE_MESSAGE: &str =
    "Ya existe una cita programada para esta fecha y hora. Por favor selecciona otro horario.";
const NETWORK_MESSAGE: &str = "Error de conexión. Verifica tu internet e intenta nuevamente.";
const VALIDATION_MESSAGE: &str =
    "Los datos ingresados no son válidos. Por favor revísalos e intenta nuevamente.";
const UNKNOWN_MESSAGE: &str = "Hubo un problema al guardar tu cita. Por favor intenta nuevamente.";

/// Runs the final submission: WhatsApp handoff, persistence, fallback retry
/// and error categorization. Stateless itself; all visible state lives on
/// the form.
pub struct SubmissionService {
    store: Arc<dyn AppointmentStore>,
    navigation: Arc<dyn NavigationPort>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn AppointmentStore>, navigation: Arc<dyn NavigationPort>) -> Self {
        Self { store, navigation }
    }

    /// Submit the form. Ordering is load-bearing: when the contact method is
    /// WhatsApp the external handoff happens BEFORE the async save, so it
    /// still counts as part of the triggering user gesture. The save result
    /// only decides the terminal status and a single fallback handoff retry.
    ///
    /// Re-entrant calls while a submission is in flight are rejected without
    /// touching the form.
    pub async fn submit(
        &self,
        form: &mut BookingForm,
        advisor: &Advisor,
        property: Option<&PropertySummary>,
    ) -> Result<SubmissionStatus, BookingError> {
        if *form.status() == SubmissionStatus::Submitting {
            warn!("Submission already in progress, ignoring duplicate request");
            return Err(BookingError::AlreadySubmitting);
        }

        // Full re-validation of every step before anything leaves the form.
        let errors = validate_step(crate::models::FormStep::Review, form.draft());
        if !errors.is_empty() {
            form.set_errors(errors);
            return Err(BookingError::ValidationFailed);
        }

        let record = build_record(form.draft(), advisor, property)?;
        form.begin_submission();

        let wants_whatsapp = form.draft().contact_method == ContactMethod::WhatsApp;
        let handoff_url = if wants_whatsapp {
            let message = whatsapp_message(form.draft(), advisor, property);
            Some(whatsapp_url(&advisor.whatsapp, &message))
        } else {
            None
        };

        let mut handoff_opened = false;
        if let Some(url) = &handoff_url {
            info!("Opening WhatsApp handoff before persisting appointment");
            handoff_opened = self.navigation.open_external(url);
        }

        let status = match self.store.save_appointment(&record).await {
            Ok(id) => {
                info!(appointment_id = %id, "Appointment saved");
                if let Some(url) = &handoff_url {
                    if !handoff_opened {
                        warn!("WhatsApp handoff did not open, retrying once");
                        self.navigation.open_external(url);
                    }
                }
                SubmissionStatus::Success
            }
            Err(err) => {
                error!(error = %err, "Failed to save appointment");
                // The conversation can still happen even when persistence
                // failed, so the handoff is attempted once regardless.
                if let Some(url) = &handoff_url {
                    warn!("Save failed, opening WhatsApp handoff anyway");
                    self.navigation.open_external(url);
                }
                SubmissionStatus::Error(user_message(&err).to_string())
            }
        };

        form.finish_submission(status.clone());
        Ok(status)
    }
}

/// Normalize the validated draft into the persisted record: trimmed name,
/// lowercased email, digits-only phone.
fn build_record(
    draft: &AppointmentDraft,
    advisor: &Advisor,
    property: Option<&PropertySummary>,
) -> Result<AppointmentRecord, BookingError> {
    let appointment_type = draft
        .appointment_type
        .ok_or(BookingError::IncompleteDraft(FormField::AppointmentType))?;
    let visit_type = draft
        .visit_type
        .ok_or(BookingError::IncompleteDraft(FormField::VisitType))?;
    let appointment_date = draft
        .appointment_datetime()
        .ok_or(BookingError::IncompleteDraft(FormField::PreferredDate))?;

    let special_requests = draft.special_requests.trim();

    Ok(AppointmentRecord {
        client_name: draft.name.trim().to_string(),
        client_email: draft.email.trim().to_lowercase(),
        client_phone: digits_only(&draft.phone),
        property_id: property.map(|p| p.id.clone()),
        advisor_id: advisor.id.clone(),
        appointment_date,
        appointment_type: appointment_type.id().to_string(),
        visit_type: visit_type.id().to_string(),
        attendees: 1,
        special_requests: if special_requests.is_empty() {
            None
        } else {
            Some(special_requests.to_string())
        },
        contact_method: draft.contact_method.id().to_string(),
        marketing_consent: draft.marketing_consent,
    })
}

fn user_message(err: &StoreError) -> &'static str {
    match err {
        StoreError::Duplicate => DUPLICATE_MESSAGE,
        StoreError::Network(_) => NETWORK_MESSAGE,
        StoreError::Validation(_) => VALIDATION_MESSAGE,
        StoreError::Unknown(_) => UNKNOWN_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime};

    use shared_models::appointment::AppointmentId;

    use super::*;
    use crate::models::AppointmentType;
    use crate::models::VisitType;

    struct CountingStore {
        saves: AtomicUsize,
    }

    #[async_trait]
    impl AppointmentStore for CountingStore {
        async fn save_appointment(
            &self,
            _record: &AppointmentRecord,
        ) -> Result<AppointmentId, StoreError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(AppointmentId("appt-1".to_string()))
        }

        async fn get_busy_slots(
            &self,
            _advisor_id: &str,
            _date: NaiveDate,
        ) -> Result<HashSet<NaiveTime>, StoreError> {
            Ok(HashSet::new())
        }
    }

    struct NoopNavigation;

    impl NavigationPort for NoopNavigation {
        fn open_external(&self, _url: &str) -> bool {
            true
        }
    }

    fn advisor() -> Advisor {
        Advisor {
            id: "advisor-1".to_string(),
            name: "Carolina Pérez".to_string(),
            email: "carolina@example.com".to_string(),
            phone: "3105550101".to_string(),
            photo: String::new(),
            specialty: "Ventas".to_string(),
            whatsapp: "3105550101".to_string(),
            rating: 5,
            reviews: 10,
            availability: None,
        }
    }

    fn completed_form() -> BookingForm {
        let mut form = BookingForm::new();
        form.set_name("Ana María");
        form.set_email("ana@example.com");
        form.set_phone("3001234567");
        form.set_appointment_type(AppointmentType::PropertyVisit);
        form.set_preferred_date(NaiveDate::from_ymd_opt(2025, 9, 15).unwrap());
        form.set_preferred_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        form.set_visit_type(VisitType::InPerson);
        form
    }

    #[tokio::test]
    async fn test_submit_is_rejected_while_already_submitting() {
        let store = Arc::new(CountingStore {
            saves: AtomicUsize::new(0),
        });
        let service = SubmissionService::new(store.clone(), Arc::new(NoopNavigation));

        let mut form = completed_form();
        form.begin_submission();

        let result = service.submit(&mut form, &advisor(), None).await;

        assert!(matches!(result, Err(BookingError::AlreadySubmitting)));
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
        assert_eq!(*form.status(), SubmissionStatus::Submitting);
    }
}
