use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use shared_models::directory::{Advisor, PropertySummary};

use crate::models::AppointmentDraft;

const WEEKDAYS_ES: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long-form Colombian Spanish date, e.g. `lunes, 15 de septiembre de 2025`.
pub fn format_date_es(date: NaiveDate) -> String {
    let weekday = WEEKDAYS_ES[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS_ES[date.month0() as usize];
    format!("{}, {} de {} de {}", weekday, date.day(), month, date.year())
}

/// 12-hour clock with AM/PM, e.g. `2:30 PM`. Midnight renders as `12:00 AM`.
pub fn format_time_12h(time: NaiveTime) -> String {
    let hour24 = time.hour();
    let hour12 = match hour24 {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let period = if hour24 < 12 { "AM" } else { "PM" };
    format!("{}:{:02} {}", hour12, time.minute(), period)
}

/// Colombian peso amount with dot thousands grouping, e.g. `$ 450.000.000`.
pub fn format_price_cop(price: i64) -> String {
    let digits = price.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if price < 0 { "-" } else { "" };
    format!("$ {}{}", sign, grouped)
}

/// Build the pre-filled WhatsApp greeting sent to the advisor. The draft is
/// expected to be fully validated; missing optional fields degrade to empty
/// sections rather than failing.
pub fn whatsapp_message(
    draft: &AppointmentDraft,
    advisor: &Advisor,
    property: Option<&PropertySummary>,
) -> String {
    let property_info = match property {
        Some(p) => {
            let location_line = match &p.location {
                Some(location) if !location.is_empty() => format!("📍 {}\n", location),
                _ => String::new(),
            };
            let price_line = match p.price {
                Some(price) => format_price_cop(price),
                None => "Precio a convenir".to_string(),
            };
            format!(
                "\nMe interesa agendar una cita para la siguiente propiedad:\n\n🏠 *{}*\n{}💰 {}\n",
                p.title, location_line, price_line
            )
        }
        None => "\nMe interesa agendar una cita de asesoría inmobiliaria.\n".to_string(),
    };

    let appointment_type_label = draft
        .appointment_type
        .map(|t| t.label())
        .unwrap_or("Sin especificar");
    let visit_type_label = draft
        .visit_type
        .map(|t| t.label())
        .unwrap_or("Sin especificar");
    let date_line = draft
        .preferred_date
        .map(format_date_es)
        .unwrap_or_else(|| "Sin especificar".to_string());
    let time_line = draft
        .preferred_time
        .map(format_time_12h)
        .unwrap_or_else(|| "Sin especificar".to_string());

    let requests_block = if draft.special_requests.trim().is_empty() {
        String::new()
    } else {
        format!("💭 *Solicitudes especiales:*\n{}\n\n", draft.special_requests)
    };

    format!(
        "¡Hola {}! 👋\n{}\n📋 *Datos del contacto:*\n• Nombre: {}\n• Email: {}\n• Teléfono: {}\n\n📅 *Detalles de la cita:*\n• Tipo: {}\n• Modalidad: {}\n• Fecha preferida: {}\n• Hora preferida: {}\n\n{}\n¡Espero tu confirmación! 😊",
        advisor.name,
        property_info,
        draft.name,
        draft.email,
        draft.phone,
        appointment_type_label,
        visit_type_label,
        date_line,
        time_line,
        requests_block,
    )
}

/// `https://wa.me/<digits>?text=<urlencoded>` deep link. The phone keeps
/// digits only: `wa.me` rejects `+`, spaces and dashes.
pub fn whatsapp_url(phone: &str, message: &str) -> String {
    let clean_phone: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!(
        "https://wa.me/{}?text={}",
        clean_phone,
        urlencoding::encode(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_in_spanish_long_form() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        assert_eq!(format_date_es(date), "lunes, 15 de septiembre de 2025");
    }

    #[test]
    fn time_in_twelve_hour_clock() {
        assert_eq!(
            format_time_12h(NaiveTime::from_hms_opt(0, 0, 0).unwrap()),
            "12:00 AM"
        );
        assert_eq!(
            format_time_12h(NaiveTime::from_hms_opt(9, 30, 0).unwrap()),
            "9:30 AM"
        );
        assert_eq!(
            format_time_12h(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
            "12:00 PM"
        );
        assert_eq!(
            format_time_12h(NaiveTime::from_hms_opt(14, 30, 0).unwrap()),
            "2:30 PM"
        );
    }

    #[test]
    fn price_grouped_with_dots() {
        assert_eq!(format_price_cop(450_000_000), "$ 450.000.000");
        assert_eq!(format_price_cop(1_500), "$ 1.500");
        assert_eq!(format_price_cop(900), "$ 900");
    }

    #[test]
    fn message_includes_property_block_when_present() {
        use crate::models::{AppointmentType, VisitType};
        use shared_models::directory::PropertySummary;

        let mut draft = AppointmentDraft::default();
        draft.name = "Ana María".to_string();
        draft.email = "ana@example.com".to_string();
        draft.phone = "3001234567".to_string();
        draft.appointment_type = Some(AppointmentType::PropertyVisit);
        draft.visit_type = Some(VisitType::InPerson);
        draft.preferred_date = NaiveDate::from_ymd_opt(2025, 9, 15);
        draft.preferred_time = NaiveTime::from_hms_opt(14, 30, 0);

        let advisor = Advisor {
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
        };
        let property = PropertySummary {
            id: "prop-77".to_string(),
            code: Some("VC-077".to_string()),
            title: "Apartamento en El Poblado".to_string(),
            location: Some("Medellín, Antioquia".to_string()),
            price: Some(450_000_000),
        };

        let message = whatsapp_message(&draft, &advisor, Some(&property));

        assert!(message.starts_with("¡Hola Carolina Pérez! 👋"));
        assert!(message.contains("🏠 *Apartamento en El Poblado*"));
        assert!(message.contains("📍 Medellín, Antioquia"));
        assert!(message.contains("💰 $ 450.000.000"));
        assert!(message.contains("• Nombre: Ana María"));
        assert!(message.contains("• Tipo: Visita a la propiedad"));
        assert!(message.contains("• Modalidad: Presencial"));
        assert!(message.contains("• Fecha preferida: lunes, 15 de septiembre de 2025"));
        assert!(message.contains("• Hora preferida: 2:30 PM"));
        assert!(message.ends_with("¡Espero tu confirmación! 😊"));
        // No requests were given, so the block is absent.
        assert!(!message.contains("Solicitudes especiales"));
    }

    #[test]
    fn message_without_property_uses_generic_opening() {
        let draft = AppointmentDraft {
            name: "Luis".to_string(),
            ..AppointmentDraft::default()
        };
        let advisor = Advisor {
            id: "advisor-1".to_string(),
            name: "Carolina Pérez".to_string(),
            email: String::new(),
            phone: String::new(),
            photo: String::new(),
            specialty: String::new(),
            whatsapp: String::new(),
            rating: 0,
            reviews: 0,
            availability: None,
        };

        let message = whatsapp_message(&draft, &advisor, None);
        assert!(message.contains("Me interesa agendar una cita de asesoría inmobiliaria."));
        assert!(!message.contains("🏠"));
    }

    #[test]
    fn url_strips_phone_to_digits_and_encodes_text() {
        let url = whatsapp_url("+57 300 123-4567", "¡Hola! 👋");
        assert!(url.starts_with("https://wa.me/573001234567?text="));
        assert!(!url.contains('+'));
        assert!(!url.contains(' '));
    }
}
