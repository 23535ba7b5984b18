use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

// ==============================================================================
// DRAFT AND CHOICE CATALOGS
// ==============================================================================

/// What kind of appointment the visitor is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    PropertyVisit,
    GeneralInquiry,
    CommercialAppraisal,
    FinancialAdvisory,
}

impl AppointmentType {
    /// Stable identifier persisted with the appointment record.
    pub fn id(&self) -> &'static str {
        match self {
            AppointmentType::PropertyVisit => "visita",
            AppointmentType::GeneralInquiry => "consulta",
            AppointmentType::CommercialAppraisal => "avaluo",
            AppointmentType::FinancialAdvisory => "asesoria",
        }
    }

    /// User-facing label, also used in the outbound message.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentType::PropertyVisit => "Visita a la propiedad",
            AppointmentType::GeneralInquiry => "Consulta general",
            AppointmentType::CommercialAppraisal => "Avalúo comercial",
            AppointmentType::FinancialAdvisory => "Asesoría financiera",
        }
    }
}

/// How the visit takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitType {
    InPerson,
    Virtual,
    Mixed,
}

impl VisitType {
    pub fn id(&self) -> &'static str {
        match self {
            VisitType::InPerson => "presencial",
            VisitType::Virtual => "virtual",
            VisitType::Mixed => "mixta",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VisitType::InPerson => "Presencial",
            VisitType::Virtual => "Virtual",
            VisitType::Mixed => "Mixta",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    WhatsApp,
    Phone,
    Email,
}

impl ContactMethod {
    pub fn id(&self) -> &'static str {
        match self {
            ContactMethod::WhatsApp => "whatsapp",
            ContactMethod::Phone => "phone",
            ContactMethod::Email => "email",
        }
    }
}

/// The in-memory, not-yet-submitted appointment form data. Owned
/// exclusively by one form instance and discarded on close or submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub appointment_type: Option<AppointmentType>,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<NaiveTime>,
    pub visit_type: Option<VisitType>,
    pub special_requests: String,
    pub contact_method: ContactMethod,
    pub marketing_consent: bool,
}

impl Default for AppointmentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            appointment_type: None,
            preferred_date: None,
            preferred_time: None,
            visit_type: None,
            special_requests: String::new(),
            contact_method: ContactMethod::WhatsApp,
            marketing_consent: false,
        }
    }
}

impl AppointmentDraft {
    /// The resolved timestamp for the picked date and time, once both exist.
    pub fn appointment_datetime(&self) -> Option<NaiveDateTime> {
        Some(self.preferred_date?.and_time(self.preferred_time?))
    }
}

// ==============================================================================
// VALIDATION STATE
// ==============================================================================

/// Fields the step validators report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Phone,
    AppointmentType,
    PreferredDate,
    PreferredTime,
    VisitType,
}

/// Field-level errors for the current step. Recomputed whole on every step
/// validation, cleared per-field as soon as the user edits that field.
pub type FormErrors = BTreeMap<FormField, String>;

// ==============================================================================
// FORM LIFECYCLE
// ==============================================================================

/// The three ordered form steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormStep {
    Contact = 1,
    Schedule = 2,
    Review = 3,
}

impl FormStep {
    pub fn next(self) -> FormStep {
        match self {
            FormStep::Contact => FormStep::Schedule,
            FormStep::Schedule | FormStep::Review => FormStep::Review,
        }
    }

    pub fn prev(self) -> FormStep {
        match self {
            FormStep::Contact | FormStep::Schedule => FormStep::Contact,
            FormStep::Review => FormStep::Schedule,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for FormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Terminal and in-flight submission states. Exactly one terminal state is
/// ever shown: `Success` or `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Success,
    Error(String),
}

/// What the caller should do when the user asks to close the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Nothing worth keeping; close immediately.
    Close,
    /// The draft has edits past step 1; ask before discarding.
    ConfirmDiscard,
    /// A submission is in flight; ignore the request.
    Blocked,
}
