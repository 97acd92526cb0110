use async_trait::async_trait;

use crate::errors::Result;
use crate::users::users_model::{NewUser, User};

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Inserts an account; a taken username surfaces as a unique violation.
    async fn insert_user(&self, new_user: NewUser) -> Result<User>;
}

#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, username: &str, password_hash: String) -> Result<User>;
    fn find_by_username(&self, username: &str) -> Result<User>;
}
