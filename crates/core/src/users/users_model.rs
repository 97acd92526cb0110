use chrono::NaiveDateTime;
use serde::Serialize;

use crate::constants::{USERNAME_MAX_LEN, USERNAME_MIN_LEN};
use crate::errors::{Result, ValidationError};

/// A registered account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Account to insert. `password_hash` is already hashed by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Trims a username and checks its length in characters.
pub fn validate_username(raw: &str) -> Result<String> {
    let username = raw.trim();
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::Length {
            field: "username",
            min: USERNAME_MIN_LEN,
            max: USERNAME_MAX_LEN,
        }
        .into());
    }
    Ok(username.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_length_is_bounded() {
        assert_eq!(validate_username("  bob ").unwrap(), "bob");
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"x".repeat(51)).is_err());
        assert!(validate_username(&"x".repeat(50)).is_ok());
    }
}
