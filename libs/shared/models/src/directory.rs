use serde::{Deserialize, Serialize};

/// Read-only advisor record from the directory. Display fields feed the
/// booking form header and the outbound message template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub photo: String,
    pub specialty: String,
    pub whatsapp: String,
    pub rating: i32,
    pub reviews: i32,
    pub availability: Option<AdvisorAvailability>,
}

/// Human-readable office hours shown next to the advisor card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorAvailability {
    pub weekdays: String,
    pub weekends: Option<String>,
}

/// Minimal property listing fields consumed by the appointment flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySummary {
    pub id: String,
    pub code: Option<String>,
    pub title: String,
    pub location: Option<String>,
    pub price: Option<i64>,
}
