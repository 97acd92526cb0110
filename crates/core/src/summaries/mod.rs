//! Per-goal check-in counts.

mod summaries_model;
mod summaries_service;

pub use summaries_model::GoalSummary;
pub use summaries_service::{SummaryService, SummaryServiceTrait};
