use crate::http::AppState;
use crate::http::api_error::ApiError;
use crate::http::response::Response;
use crate::http::users::UserResponse;
use axum::extract::{Path, State};
use oarlock::{Condition, CudRepository, ReadRepository, Where};

#[utoipa::path(
    delete,
    path = "/{username}",
    tag = "user",
    summary = "Delete user",
    params(
        ("username" = String, Path, description = "Username"),
    ),
    responses(
        (status = 204),
        (status = 404)
    ),
)]
pub async fn delete_user(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by(Where::new(Condition::equal("username", username.clone())), &[])
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("user {username}")))?;

    state.users.delete(&user).await.map_err(ApiError::from)?;

    Ok(Response::NoContent)
}
