//! User endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, User},
    AppState,
};

use super::{DataResponse, ListResponse};

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created", body = crate::api::UserResponse),
        (status = 400, description = "Malformed JSON", body = crate::error::ErrorResponse),
        (status = 409, description = "Referenced book does not exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    WithRejection(Json(data), _): WithRejection<Json<CreateUser>, AppError>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = state.services.users.create(&data).await?;
    Ok(Json(DataResponse::new("user created successfully", user)))
}

/// List all users with their books
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "Every user", body = crate::api::UserListResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<ListResponse<User>>> {
    let users = state.services.users.list().await?;
    Ok(Json(ListResponse::new("users fetched successfully", users)))
}

/// Get a user by ID with its book
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = crate::api::UserResponse),
        (status = 400, description = "Invalid id", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = state.services.users.get_by_id(id).await?;
    Ok(Json(DataResponse::new("user fetched successfully", user)))
}
