use serde::Serialize;

/// Result of a write that may create, change, or leave a record untouched.
///
/// Callers use the variant to pick the message they report; the record is
/// always the current stored state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WriteOutcome<T> {
    Created(T),
    Updated(T),
    Unchanged(T),
}

impl<T> WriteOutcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            WriteOutcome::Created(value)
            | WriteOutcome::Updated(value)
            | WriteOutcome::Unchanged(value) => value,
        }
    }

    pub fn get(&self) -> &T {
        match self {
            WriteOutcome::Created(value)
            | WriteOutcome::Updated(value)
            | WriteOutcome::Unchanged(value) => value,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, WriteOutcome::Created(_))
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, WriteOutcome::Updated(_))
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, WriteOutcome::Unchanged(_))
    }
}
