pub mod appointment;
pub mod directory;

pub use appointment::*;
pub use directory::*;
