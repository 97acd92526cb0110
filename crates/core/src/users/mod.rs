//! Account records for the owners of goals.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{validate_username, NewUser, User};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
