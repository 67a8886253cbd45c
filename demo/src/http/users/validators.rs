use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserValidator {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 4, message = "password must be at least 4 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}
