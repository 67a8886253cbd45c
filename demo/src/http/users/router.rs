use super::handlers::create_user::{__path_create_user, create_user};
use super::handlers::delete_user::{__path_delete_user, delete_user};
use super::handlers::get_user::{__path_get_user, get_user};
use super::handlers::list_users::{__path_list_users, list_users};
use crate::http::AppState;

use axum::{
    Router,
    routing::{delete, get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(list_users, get_user, create_user, delete_user))]
pub struct UserApiDoc;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/{username}", get(get_user))
        .route("/users/{username}", delete(delete_user))
}
