//! Willpower Core - Domain entities, services, and traits.
//!
//! This crate contains the goal and daily check-in logic. It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate.

pub mod checkins;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod outcome;
pub mod retention;
pub mod summaries;
pub mod users;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
