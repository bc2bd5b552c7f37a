use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Error type for the item endpoints
///
/// Every variant is rendered as a plain-text body. A missing item is the
/// only failure with its own status code; everything else is a 500.
#[derive(Debug)]
pub enum ApiError {
    /// Path segment is not a valid ObjectId
    MalformedId(String),
    /// No item with this id
    NotFound(ObjectId),
    /// Candidate item violates the schema
    Validation(String),
    /// Database operation error
    Database(String),
    /// Request body could not be read as the expected JSON
    InvalidBody(String),
    /// Invalid query parameter
    InvalidQueryParam(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::MalformedId(raw) => format!(
                "Cast to ObjectId failed for value \"{}\" (type string) at path \"_id\" for model \"Item\"",
                raw
            ),
            ApiError::NotFound(_) => "Item not found".to_string(),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Database(msg) => msg.clone(),
            ApiError::InvalidBody(msg) => format!("Invalid request body: {}", msg),
            ApiError::InvalidQueryParam(msg) => format!("Invalid query parameter: {}", msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        match &self {
            ApiError::NotFound(id) => tracing::debug!("No item with id {}", id),
            _ if status.is_server_error() => tracing::error!("Request failed: {}", message),
            _ => {}
        }

        (status, message).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(err) => ApiError::Validation(err.to_string()),
            other => ApiError::Database(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQueryParam(rejection.body_text())
    }
}
