use crate::entity::users;
use crate::http::AppState;
use crate::http::api_error::ApiError;
use crate::http::response::Response;
use crate::http::users::UserResponse;
use axum::extract::{Path, State};
use oarlock::{Condition, Preload, ReadRepository, Where};
use sea_orm::RelationTrait;

#[utoipa::path(
    get,
    path = "/{username}",
    tag = "user",
    summary = "Get user",
    description = "Looks a user up by username, pulling the person relation into the query.",
    params(
        ("username" = String, Path, description = "Username"),
    ),
    responses(
        (status = 200, body = UserResponse),
        (status = 404)
    ),
)]
pub async fn get_user(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<UserResponse>, ApiError> {
    let preload = Preload::new(|| users::Relation::Persons.def());
    let user = state
        .users
        .find_by(
            Where::new(Condition::equal("users.username", username.clone())),
            &[preload],
        )
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("user {username}")))?;

    Ok(Response::OK(user.into()))
}
