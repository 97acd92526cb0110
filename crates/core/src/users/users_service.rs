use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::users_model::{validate_username, NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};
use crate::utils::time_utils::utc_now;

fn username_taken() -> Error {
    Error::Conflict("Username already exists".to_string())
}

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        UserService { repository, clock }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, username: &str, password_hash: String) -> Result<User> {
        let username = validate_username(username)?;
        if self.repository.find_by_username(&username)?.is_some() {
            return Err(username_taken());
        }
        let new_user = NewUser {
            username,
            password_hash,
            created_at: utc_now(self.clock.as_ref()),
        };
        match self.repository.insert_user(new_user).await {
            Err(err) if err.is_unique_violation() => Err(username_taken()),
            other => other,
        }
    }

    fn find_by_username(&self, username: &str) -> Result<User> {
        self.repository
            .find_by_username(username.trim())?
            .ok_or_else(|| Error::NotFound("User".to_string()))
    }
}
