pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use error::BookingError;
pub use models::*;
pub use ports::{DraftStorage, NavigationPort};
pub use services::*;
