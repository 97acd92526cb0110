//! Permanent removal of goals that sat in the recycle bin too long.

mod retention_service;

pub use retention_service::{RetentionService, RetentionServiceTrait, SweepReport};
