pub mod handlers;
pub mod router;
pub mod validators;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;

/// What the API exposes for a user. The password never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub person_id: i32,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            person_id: user.person_id,
        }
    }
}
