/// Maximum goal title length, in characters
pub const GOAL_TITLE_MAX_LEN: usize = 255;

/// Username length bounds, in characters
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;

/// Days a goal stays in the recycle bin before the sweep purges it
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Wire format of calendar dates (check-in days, summary filters)
pub const DATE_FORMAT: &str = "%Y-%m-%d";
