use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::models::{CalendarDay, CalendarRules};

/// Number of cells in the fixed visual grid: 6 rows of 7 days.
pub const GRID_SIZE: usize = 42;

/// Build the month grid for `year`/`month`.
///
/// The grid always contains exactly [`GRID_SIZE`] entries: trailing days of
/// the previous month, every day of the requested month, and leading days of
/// the next month as padding. Out-of-month cells are always disabled.
/// In-month cells are disabled when they fall before `rules.min_date`, after
/// `rules.max_date` (when set), or on an excluded weekday. `today` is tagged
/// for highlighting only; a disabled today stays disabled.
pub fn month_grid(
    year: i32,
    month: u32,
    rules: &CalendarRules,
    today: NaiveDate,
) -> Vec<CalendarDay> {
    let first_of_month =
        NaiveDate::from_ymd_opt(year, month, 1).expect("month is validated by the caller");
    let days_in_month = days_in_month(year, month);
    let start_offset = first_of_month.weekday().num_days_from_sunday() as i64;

    let mut days = Vec::with_capacity(GRID_SIZE);

    // Trailing days of the previous month
    for i in (1..=start_offset).rev() {
        let date = first_of_month - Duration::days(i);
        days.push(CalendarDay {
            date,
            is_current_month: false,
            is_disabled: true,
            is_today: date == today,
        });
    }

    // Days of the requested month
    for day in 1..=days_in_month {
        let date = NaiveDate::from_ymd_opt(year, month, day).expect("in-month day");
        let is_disabled = date < rules.min_date
            || rules.max_date.is_some_and(|max| date > max)
            || rules.is_excluded_weekday(date);

        days.push(CalendarDay {
            date,
            is_current_month: true,
            is_disabled,
            is_today: date == today,
        });
    }

    // Leading days of the next month, padding out to the fixed grid
    let first_of_next = first_of_month + Duration::days(days_in_month as i64);
    let remaining = GRID_SIZE - days.len();
    for day in 0..remaining as i64 {
        let date = first_of_next + Duration::days(day);
        days.push(CalendarDay {
            date,
            is_current_month: false,
            is_disabled: true,
            is_today: date == today,
        });
    }

    debug!("Built {}-{:02} grid with {} cells", year, month, days.len());
    days
}

/// Resolve a click on a grid cell. Disabled cells produce no selection.
pub fn select_day(grid: &[CalendarDay], date: NaiveDate) -> Option<NaiveDate> {
    grid.iter()
        .find(|day| day.date == date && !day.is_disabled)
        .map(|day| day.date)
}

/// Month navigation is plain arithmetic on the (year, month) pair; which
/// month is shown belongs to the caller's state.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = next_month(year, month);
    let first_of_next =
        NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("valid month");
    (first_of_next - Duration::days(1)).day()
}
