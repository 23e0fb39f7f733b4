pub mod auth;
pub mod jokes;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Validation failure: 400 with the action payload so the form can re-render
/// with field errors and the previously entered values.
pub(crate) fn bad_request<T: Serialize>(data: T) -> Response {
    (StatusCode::BAD_REQUEST, Json(data)).into_response()
}
