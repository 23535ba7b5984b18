use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::{debug, warn};

use shared_models::AppointmentStore;

use crate::models::{ConflictReason, SlotTemplate, SlotValidity, TimeSlot};

/// Produces the offerable slot catalog for an advisor and date by flagging
/// the daily template against the advisor's already-booked times.
pub struct SlotSelector {
    store: Arc<dyn AppointmentStore>,
}

impl SlotSelector {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// Full slot catalog for the date, each entry flagged available or
    /// carrying its conflict reason.
    ///
    /// When the busy-slot query fails, every slot is returned unavailable
    /// with [`ConflictReason::AvailabilityUnknown`]: an unreachable store
    /// must never look like an empty calendar.
    pub async fn slots_for(
        &self,
        advisor_id: &str,
        date: NaiveDate,
        template: &SlotTemplate,
    ) -> Vec<TimeSlot> {
        let busy = match self.store.get_busy_slots(advisor_id, date).await {
            Ok(busy) => busy,
            Err(e) => {
                warn!(
                    "Busy-slot query failed for advisor {} on {}: {}",
                    advisor_id, date, e
                );
                return template_times(template)
                    .map(|time| TimeSlot {
                        time,
                        available: false,
                        conflict: Some(ConflictReason::AvailabilityUnknown),
                    })
                    .collect();
            }
        };

        debug!(
            "Advisor {} has {} busy slots on {}",
            advisor_id,
            busy.len(),
            date
        );

        let duration = Duration::minutes(template.duration_minutes as i64);
        template_times(template)
            .map(|time| {
                let slot_end = time + duration;

                // A visit must fit inside business hours entirely.
                if slot_end > template.end {
                    return TimeSlot {
                        time,
                        available: false,
                        conflict: Some(ConflictReason::OutsideBusinessHours),
                    };
                }

                // Overlap against existing bookings, assuming each booking
                // occupies one visit-length window.
                let booked = busy
                    .iter()
                    .any(|&b| b < slot_end && time < b + duration);

                if booked {
                    TimeSlot {
                        time,
                        available: false,
                        conflict: Some(ConflictReason::AlreadyBooked),
                    }
                } else {
                    TimeSlot {
                        time,
                        available: true,
                        conflict: None,
                    }
                }
            })
            .collect()
    }
}

/// Re-check a previously picked time against the current slot set. Callers
/// run this on every date change so a stale pick is surfaced instead of
/// silently submitted.
pub fn validate_selection(slots: &[TimeSlot], selected: NaiveTime) -> SlotValidity {
    match slots.iter().find(|slot| slot.time == selected) {
        Some(slot) if slot.available => SlotValidity::Valid,
        Some(slot) => SlotValidity::Invalid(conflict_message(slot.conflict)),
        None => SlotValidity::Invalid("Horario no disponible".to_string()),
    }
}

fn conflict_message(reason: Option<ConflictReason>) -> String {
    match reason {
        Some(ConflictReason::AlreadyBooked) => "Conflicto con cita existente".to_string(),
        Some(ConflictReason::OutsideBusinessHours) => {
            "Horario fuera del horario de atención".to_string()
        }
        Some(ConflictReason::AvailabilityUnknown) => {
            "No se pudo verificar la disponibilidad".to_string()
        }
        None => "Horario no disponible".to_string(),
    }
}

fn template_times(template: &SlotTemplate) -> impl Iterator<Item = NaiveTime> + '_ {
    let interval = Duration::minutes(template.interval_minutes as i64);
    std::iter::successors(Some(template.start), move |&t| {
        let next = t + interval;
        (next < template.end && next > t).then_some(next)
    })
}
