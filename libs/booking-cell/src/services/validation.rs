use std::sync::OnceLock;

use regex::Regex;

use crate::models::{AppointmentDraft, FormErrors, FormField, FormStep};

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$").expect("valid regex"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"))
}

fn mobile_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Colombian mobile: optional 57 country code, subscriber number starting
    // with 3.
    RE.get_or_init(|| {
        Regex::new(r"^(\+57|57)?[\s-]?3[0-9]{2}[\s-]?[0-9]{3}[\s-]?[0-9]{4}$")
            .expect("valid regex")
    })
}

fn ten_digit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("valid regex"))
}

/// At least three characters after trimming, letters and spaces only
/// (accented Latin included).
pub fn validate_name(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.chars().count() >= 3 && name_regex().is_match(trimmed)
}

/// Standard `local@domain.tld` shape check.
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Colombian mobile number: `+57`/`57`-prefixed subscriber starting with 3,
/// or a plain 10-digit local number.
pub fn validate_phone(phone: &str) -> bool {
    let clean: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    mobile_regex().is_match(&clean) || ten_digit_regex().is_match(&clean)
}

/// Strip everything but digits; the shape expected by the messaging
/// deep link and the persisted record.
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Run the validator for `step`. Validators are cumulative: step 2 re-checks
/// step 1's fields and step 3 re-checks both. Messages are the user-facing
/// strings surfaced inline next to each field.
pub fn validate_step(step: FormStep, draft: &AppointmentDraft) -> FormErrors {
    let mut errors = FormErrors::new();

    if step >= FormStep::Contact {
        if !validate_name(&draft.name) {
            errors.insert(
                FormField::Name,
                "Ingresa un nombre válido (mínimo 3 caracteres, solo letras)".to_string(),
            );
        }
        if !validate_email(&draft.email) {
            errors.insert(
                FormField::Email,
                "Ingresa un correo electrónico válido".to_string(),
            );
        }
        if !validate_phone(&draft.phone) {
            errors.insert(
                FormField::Phone,
                "Ingresa un número de teléfono colombiano válido".to_string(),
            );
        }
        if draft.appointment_type.is_none() {
            errors.insert(
                FormField::AppointmentType,
                "Selecciona un tipo de cita".to_string(),
            );
        }
    }

    if step >= FormStep::Schedule {
        if draft.preferred_date.is_none() {
            errors.insert(FormField::PreferredDate, "Selecciona una fecha".to_string());
        }
        if draft.preferred_time.is_none() {
            errors.insert(FormField::PreferredTime, "Selecciona una hora".to_string());
        }
        if draft.visit_type.is_none() {
            errors.insert(
                FormField::VisitType,
                "Selecciona una modalidad de visita".to_string(),
            );
        }
    }

    errors
}
