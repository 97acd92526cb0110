//! SQLite storage implementation for check-ins.

mod model;
mod repository;

pub use model::{CheckInDB, CheckInRevisionDB, NewCheckInDB};
pub use repository::CheckInRepository;
