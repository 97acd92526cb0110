//! Check-ins module - one status per goal per calendar day.

mod checkins_model;
mod checkins_service;
mod checkins_traits;

pub use checkins_model::{
    CheckIn, CheckInDraft, CheckInRevision, CheckInStatus, NewCheckIn, StatusCount,
};
pub use checkins_service::CheckInService;
pub use checkins_traits::{CheckInRepositoryTrait, CheckInServiceTrait};
