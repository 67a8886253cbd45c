pub mod api_error;
pub mod response;
pub mod users;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use oarlock::{ConvertingRepository, EntityRepository};
use sea_orm::DatabaseConnection;
use utoipa::OpenApi;

use crate::domain::User;
use crate::entity::{persons, users as user_entity};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<ConvertingRepository<user_entity::Entity, User>>,
    pub persons: Arc<EntityRepository<persons::Entity>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let db = Arc::new(db);
        Self {
            users: Arc::new(ConvertingRepository::new(db.clone())),
            persons: Arc::new(EntityRepository::new(db)),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Oarlock demo API"),
    nest(
        (path = "/users", api = users::router::UserApiDoc),
    )
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(users::router::user_routes())
        .route(
            "/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .with_state(state)
}
