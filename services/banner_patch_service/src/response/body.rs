use axum::{
    Json,
    response::{IntoResponse as _, Response},
};
use derive_new::new;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, new, ToSchema, Debug, PartialEq, Eq)]
pub struct SuccessBody {
    pub success: bool,
}

impl SuccessBody {
    pub fn ok() -> Self {
        Self::new(true)
    }
}

#[derive(Deserialize, Serialize, new, ToSchema, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    #[new(into)]
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}
