//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE, ORIGIN},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{
    config::CorsConfig,
    models::{Book, User},
    AppState,
};

/// Envelope carrying only a message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Envelope carrying a single record
#[derive(Debug, Serialize, ToSchema)]
#[aliases(BookResponse = DataResponse<Book>, UserResponse = DataResponse<User>)]
pub struct DataResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(message: &str, data: T) -> Self {
        Self {
            message: message.to_string(),
            data,
        }
    }
}

/// Envelope carrying a full collection
#[derive(Debug, Serialize, ToSchema)]
#[aliases(BookListResponse = ListResponse<Book>, UserListResponse = ListResponse<User>)]
pub struct ListResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub message: String,
    pub data: Vec<T>,
}

impl<T> ListResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(message: &str, data: Vec<T>) -> Self {
        Self {
            message: message.to_string(),
            data,
        }
    }
}

/// Build the CORS policy from the configured origin list
pub fn cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origins = config.client_url.trim();

    let allow_origin = if origins == "*" {
        AllowOrigin::any()
    } else {
        let list = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(HeaderValue::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if list.is_empty() {
            anyhow::bail!("cors.client_url has no origin");
        }
        AllowOrigin::list(list)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([ORIGIN, CONTENT_TYPE, ACCEPT]))
}

/// Create the application router with all routes
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
