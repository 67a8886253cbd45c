use crate::domain::User;
use crate::entity::persons;
use crate::http::AppState;
use crate::http::api_error::{ApiError, ValidateJson};
use crate::http::response::Response;
use crate::http::users::UserResponse;
use crate::http::users::validators::CreateUserValidator;
use axum::extract::State;
use oarlock::CudRepository;

#[utoipa::path(
    post,
    path = "",
    tag = "user",
    summary = "Create user",
    description = "Creates a person record and a user account pointing at it.",
    request_body = CreateUserValidator,
    responses(
        (status = 201, body = UserResponse)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateUserValidator>,
) -> Result<Response<UserResponse>, ApiError> {
    let mut person = persons::Model {
        id: 0,
        name: payload.name,
    };
    state
        .persons
        .create(&mut person)
        .await
        .map_err(ApiError::from)?;

    let mut user = User {
        id: 0,
        username: payload.username,
        password: payload.password,
        person_id: person.id,
    };
    state.users.create(&mut user).await.map_err(ApiError::from)?;

    Ok(Response::Created(UserResponse::from(user)))
}
