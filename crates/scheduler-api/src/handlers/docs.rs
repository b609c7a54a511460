//! API documentation handlers.

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

/// OpenAPI description of the HTTP interface.
pub const OPENAPI_DOC: &str = include_str!("../../openapi.json");

/// Path the OpenAPI document is served from.
pub const OPENAPI_PATH: &str = "/swagger/doc.json";

/// GET /swagger/doc.json - OpenAPI document.
pub async fn openapi_doc() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], OPENAPI_DOC)
}

/// GET /docs - Redirects to the OpenAPI document.
pub async fn docs_redirect() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, OPENAPI_PATH)],
    )
}
