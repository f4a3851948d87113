//! Typed error handling for the query engine and its repositories
//!
//! Every failure in the engine fails the whole query; nothing is downgraded to
//! a partial result. Callers match on the variants to decide on recovery.
//!
//! # Error Categories
//!
//! - [`QueryError`]: building or executing a search query
//! - [`StoreError`]: the underlying entity store
//!
//! # Example
//!
//! ```rust,ignore
//! use blogspec::prelude::*;
//!
//! match repository.search(&query).await {
//!     Ok(page) => println!("{} matches", page.count()),
//!     Err(QueryError::FieldNotFound { field, .. }) => {
//!         println!("cannot sort by {}", field);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

/// Errors raised while translating or executing a search query
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// A sort or filter field does not exist on the entity type
    #[error("Field '{field}' not found on {entity_type}")]
    FieldNotFound { entity_type: String, field: String },

    /// A table filter names an operator the translator does not implement
    #[error("Unsupported filter operator '{operator}' for column '{column}'")]
    UnsupportedFilterOperator { column: String, operator: String },

    /// Sort direction is neither ascending nor descending
    #[error("Invalid sort direction '{value}'")]
    InvalidSortDirection { value: String },

    /// The store has no relation registered under this include path
    #[error("Include path '{path}' is not a relation of {entity_type}")]
    IncludeNotFound { entity_type: String, path: String },

    /// Include path is not a dotted identifier
    #[error("Invalid include path '{path}'")]
    InvalidIncludePath { path: String },

    /// The table filter failed validation
    #[error("Invalid filter descriptor: {message}")]
    InvalidFilterDescriptor { message: String },

    /// Reading from the entity store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by entity stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: Uuid },

    #[error("{entity_type} with id '{id}' already exists")]
    AlreadyExists { entity_type: String, id: Uuid },

    #[error("Failed to acquire {entity_type} store lock: {message}")]
    LockPoisoned { entity_type: String, message: String },

    /// Loading related data for an include failed
    #[error("Failed to load relation '{path}': {message}")]
    Relation { path: String, message: String },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl QueryError {
    pub(crate) fn field_not_found<T: crate::core::Entity>(field: &str) -> Self {
        QueryError::FieldNotFound {
            entity_type: T::resource_name_singular().to_string(),
            field: field.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::FieldNotFound { .. }
            | QueryError::UnsupportedFilterOperator { .. }
            | QueryError::InvalidSortDirection { .. }
            | QueryError::IncludeNotFound { .. }
            | QueryError::InvalidIncludePath { .. }
            | QueryError::InvalidFilterDescriptor { .. } => StatusCode::BAD_REQUEST,
            QueryError::Store(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::FieldNotFound { .. } => "FIELD_NOT_FOUND",
            QueryError::UnsupportedFilterOperator { .. } => "UNSUPPORTED_FILTER_OPERATOR",
            QueryError::InvalidSortDirection { .. } => "INVALID_SORT_DIRECTION",
            QueryError::IncludeNotFound { .. } => "INCLUDE_NOT_FOUND",
            QueryError::InvalidIncludePath { .. } => "INVALID_INCLUDE_PATH",
            QueryError::InvalidFilterDescriptor { .. } => "INVALID_FILTER_DESCRIPTOR",
            QueryError::Store(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            QueryError::FieldNotFound { entity_type, field } => Some(serde_json::json!({
                "entity_type": entity_type,
                "field": field
            })),
            QueryError::UnsupportedFilterOperator { column, operator } => {
                Some(serde_json::json!({
                    "column": column,
                    "operator": operator
                }))
            }
            QueryError::IncludeNotFound { entity_type, path } => Some(serde_json::json!({
                "entity_type": entity_type,
                "path": path
            })),
            QueryError::Store(e) => e.details(),
            _ => None,
        }
    }
}

impl StoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::AlreadyExists { .. } => StatusCode::CONFLICT,
            StoreError::LockPoisoned { .. } | StoreError::Relation { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "ENTITY_NOT_FOUND",
            StoreError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            StoreError::LockPoisoned { .. } => "STORE_UNAVAILABLE",
            StoreError::Relation { .. } => "RELATION_LOAD_FAILED",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            StoreError::NotFound { entity_type, id }
            | StoreError::AlreadyExists { entity_type, id } => Some(serde_json::json!({
                "entity_type": entity_type,
                "id": id.to_string()
            })),
            _ => None,
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
