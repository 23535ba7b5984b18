pub mod calendar;
pub mod slots;

pub use calendar::{month_grid, next_month, prev_month, select_day};
pub use slots::{validate_selection, SlotSelector};
