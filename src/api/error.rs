use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::error::FaultError;

/// One schema problem in a rejected request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationIssue {
    pub fn body(msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    pub fn field(field: &str, msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

/// Errors a handler can return. Each maps to exactly one status code.
#[derive(Debug)]
pub enum ApiError {
    /// 422: request body does not match the schema
    Validation(Vec<ValidationIssue>),
    /// 500: the model could not produce a prediction
    PredictionFailed(String),
    /// Body could not be read at all (e.g. 413 over the size limit)
    Rejected { status: StatusCode, detail: String },
}

impl From<FaultError> for ApiError {
    fn from(err: FaultError) -> Self {
        ApiError::PredictionFailed(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(issues) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": issues })),
            )
                .into_response(),
            ApiError::PredictionFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": format!("Prediction failed: {msg}") })),
            )
                .into_response(),
            ApiError::Rejected { status, detail } => {
                (status, Json(json!({ "detail": detail }))).into_response()
            }
        }
    }
}
