//! Goals domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::GOAL_TITLE_MAX_LEN;
use crate::errors::{Error, Result, ValidationError};

/// The kind of commitment a goal expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalType {
    #[serde(rename = "I_WILL")]
    IWill,
    #[serde(rename = "I_WONT")]
    IWont,
    #[serde(rename = "I_WANT")]
    IWant,
}

impl GoalType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GoalType::IWill => "I_WILL",
            GoalType::IWont => "I_WONT",
            GoalType::IWant => "I_WANT",
        }
    }
}

impl FromStr for GoalType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "I_WILL" => Ok(GoalType::IWill),
            "I_WONT" => Ok(GoalType::IWont),
            "I_WANT" => Ok(GoalType::IWant),
            other => Err(ValidationError::UnknownVariant {
                field: "goal type",
                value: other.to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Archived,
}

impl GoalStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Archived => "archived",
        }
    }
}

impl FromStr for GoalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(GoalStatus::Active),
            "archived" => Ok(GoalStatus::Archived),
            other => Err(ValidationError::UnknownVariant {
                field: "goal status",
                value: other.to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a goal is live or sitting in the recycle bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalLifecycle {
    Live,
    Deleted { at: NaiveDateTime },
}

impl GoalLifecycle {
    pub fn from_tombstone(deleted_at: Option<NaiveDateTime>) -> Self {
        match deleted_at {
            Some(at) => GoalLifecycle::Deleted { at },
            None => GoalLifecycle::Live,
        }
    }

    pub fn deleted_at(&self) -> Option<NaiveDateTime> {
        match self {
            GoalLifecycle::Live => None,
            GoalLifecycle::Deleted { at } => Some(*at),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, GoalLifecycle::Live)
    }
}

/// Which side of the tombstone a goal lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalScope {
    Live,
    RecycleBin,
}

/// Domain model representing a goal
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    pub goal_type: GoalType,
    pub title: String,
    pub status: GoalStatus,
    pub lifecycle: GoalLifecycle,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewGoal {
    #[serde(rename = "type")]
    pub goal_type: String,
    pub title: String,
}

/// Partial edit of a goal; omitted or blank fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GoalUpdate {
    #[serde(rename = "type", default)]
    pub goal_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Validated goal ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub user_id: i64,
    pub goal_type: GoalType,
    pub title: String,
    pub created_at: NaiveDateTime,
}

/// Column changes applied to a live goal. `None` leaves the column as is.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalChanges {
    pub goal_type: Option<GoalType>,
    pub title: Option<String>,
    pub status: Option<GoalStatus>,
    pub updated_at: NaiveDateTime,
}

impl GoalChanges {
    pub fn is_empty(&self) -> bool {
        self.goal_type.is_none() && self.title.is_none() && self.status.is_none()
    }
}

/// Trims and bounds-checks a goal title.
pub fn validate_title(raw: &str) -> Result<String> {
    let title = raw.trim();
    let len = title.chars().count();
    if len == 0 || len > GOAL_TITLE_MAX_LEN {
        return Err(ValidationError::Length {
            field: "title",
            min: 1,
            max: GOAL_TITLE_MAX_LEN,
        }
        .into());
    }
    Ok(title.to_string())
}

impl GoalUpdate {
    /// Resolves the provided fields into typed values, skipping blanks.
    pub(crate) fn resolve(&self) -> Result<(Option<GoalType>, Option<String>)> {
        let goal_type = match self.goal_type.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(raw.parse::<GoalType>()?),
            _ => None,
        };
        let title = match self.title.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(validate_title(raw)?),
            _ => None,
        };
        Ok((goal_type, title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn goal_type_accepts_only_the_three_commitments() {
        assert_eq!("I_WILL".parse::<GoalType>().unwrap(), GoalType::IWill);
        assert_eq!("I_WONT".parse::<GoalType>().unwrap(), GoalType::IWont);
        assert_eq!("I_WANT".parse::<GoalType>().unwrap(), GoalType::IWant);
        for bad in ["i_will", "I_MIGHT", ""] {
            assert_eq!(
                bad.parse::<GoalType>().unwrap_err().kind(),
                ErrorKind::Validation
            );
        }
    }

    #[test]
    fn title_is_trimmed_and_bounded() {
        assert_eq!(validate_title("  Exercise ").unwrap(), "Exercise");
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(GOAL_TITLE_MAX_LEN)).is_ok());
        assert!(validate_title(&"x".repeat(GOAL_TITLE_MAX_LEN + 1)).is_err());
        // Length counts characters, not bytes.
        assert!(validate_title(&"é".repeat(GOAL_TITLE_MAX_LEN)).is_ok());
    }

    #[test]
    fn blank_update_fields_resolve_to_nothing() {
        let update = GoalUpdate {
            goal_type: Some(" ".into()),
            title: Some(String::new()),
        };
        assert_eq!(update.resolve().unwrap(), (None, None));
    }

    #[test]
    fn padded_update_type_is_rejected() {
        let update = GoalUpdate {
            goal_type: Some(" I_WONT".into()),
            title: None,
        };
        assert_eq!(update.resolve().unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn lifecycle_round_trips_through_the_tombstone() {
        let at = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(GoalLifecycle::from_tombstone(None), GoalLifecycle::Live);
        let deleted = GoalLifecycle::from_tombstone(Some(at));
        assert_eq!(deleted, GoalLifecycle::Deleted { at });
        assert_eq!(deleted.deleted_at(), Some(at));
        assert!(!deleted.is_live());
    }
}
