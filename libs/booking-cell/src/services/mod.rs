pub mod form;
pub mod message;
pub mod store;
pub mod submission;
pub mod validation;

pub use form::BookingForm;
pub use store::SupabaseAppointmentStore;
pub use submission::SubmissionService;
