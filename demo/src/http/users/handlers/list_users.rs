use crate::http::AppState;
use crate::http::api_error::ApiError;
use crate::http::response::Response;
use crate::http::users::UserResponse;
use axum::extract::{Query, State};
use oarlock::{Direction, Filter, Join, Order, PageRequest, ReadRepository};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// Sort expression, `column` or `column:desc`.
    pub sort: Option<String>,
    /// Substring match on the linked person's name.
    pub name: Option<String>,
    /// Substring match on the username.
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ListUsersResponse {
    pub total: u64,
    pub data: Vec<UserResponse>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "user",
    summary = "List users",
    description = "Returns one page of users plus the filtered total.",
    params(ListUsersQuery),
    responses(
        (status = 200, body = ListUsersResponse)
    ),
)]
pub async fn list_users(
    Query(query): Query<ListUsersQuery>,
    State(state): State<AppState>,
) -> Result<Response<ListUsersResponse>, ApiError> {
    let mut request = PageRequest::new(query.page.unwrap_or(1), query.size.unwrap_or(10))
        .map_err(ApiError::from)?;

    if let Some(sort) = &query.sort {
        let (column, direction) = match sort.split_once(':') {
            Some((column, direction)) => {
                (column, Direction::parse(direction).map_err(ApiError::from)?)
            }
            None => (sort.as_str(), Direction::Ascending),
        };
        request = request.with_order(Order::new(column, direction).map_err(ApiError::from)?);
    }

    // None or empty values drop their field (and its join) from the query.
    let filter = Filter::new()
        .field(
            "users.username LIKE ?",
            query.username.map(|u| format!("%{u}%")),
        )
        .field_with_join(
            "persons.name LIKE ?",
            query.name.map(|n| format!("%{n}%")),
            Join::inner("persons", "persons.id = users.person_id"),
        );
    let request = request.with_filter(filter);

    let page = state
        .users
        .find_all_paginated(&request, &[])
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ListUsersResponse {
        total: page.total,
        data: page.elements.into_iter().map(UserResponse::from).collect(),
    }))
}
