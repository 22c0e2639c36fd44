// Pretty-printed JSON responses with explicit content headers.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub struct PrettyJson<T>(pub T);

impl<T> IntoResponse for PrettyJson<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let body = match serde_json::to_vec_pretty(&self.0) {
            Ok(body) => body,
            Err(error) => {
                tracing::error!(%error, "failed to serialize response body");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        (
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                ),
                (header::CONTENT_LENGTH, HeaderValue::from(body.len())),
            ],
            body,
        )
            .into_response()
    }
}
