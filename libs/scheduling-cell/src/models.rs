use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// One cell of the fixed 6x7 month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_disabled: bool,
    pub is_today: bool,
}

/// Booking-window rules applied when building a month grid.
#[derive(Debug, Clone)]
pub struct CalendarRules {
    pub min_date: NaiveDate,
    pub max_date: Option<NaiveDate>,
    pub excluded_weekdays: Vec<Weekday>,
}

impl CalendarRules {
    /// Sundays-off rules with an open upper bound, the default for the
    /// public booking flow.
    pub fn weekdays_from(min_date: NaiveDate) -> Self {
        Self {
            min_date,
            max_date: None,
            excluded_weekdays: vec![Weekday::Sun],
        }
    }

    pub fn is_excluded_weekday(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        self.excluded_weekdays.contains(&date.weekday())
    }
}

/// Why a slot cannot be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    AlreadyBooked,
    OutsideBusinessHours,
    AvailabilityUnknown,
}

/// One offerable (or blocked) time slot for a given advisor and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: NaiveTime,
    pub available: bool,
    pub conflict: Option<ConflictReason>,
}

/// Outcome of re-checking a previously picked time against the current
/// slot set. Emitted by the selector and reduced into form errors by the
/// owning state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValidity {
    Valid,
    Invalid(String),
}

/// The daily slot catalog: business-hour increments offered every day.
#[derive(Debug, Clone)]
pub struct SlotTemplate {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub interval_minutes: u32,
    pub duration_minutes: u32,
}

impl Default for SlotTemplate {
    /// 08:00-18:00 in 30-minute increments, one-hour visits.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 0, 0).expect("valid time"),
            end: NaiveTime::from_hms_opt(18, 0, 0).expect("valid time"),
            interval_minutes: 30,
            duration_minutes: 60,
        }
    }
}
