use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ResponsePayload<T> {
    pub status_code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn respond<T: Serialize>(status: StatusCode, message: &str, data: Option<T>) -> Response {
    let payload = ResponsePayload {
        status_code: status.as_u16(),
        message: message.to_owned(),
        data,
    };
    (status, Json(payload)).into_response()
}
