//! Response types for the rota engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Allowance, BlockPlacement};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates an invalid date error response.
    pub fn invalid_date(input: &str, message: &str) -> Self {
        Self::with_details(
            "INVALID_DATE",
            format!("Invalid date '{}': {}", input, message),
            "Dates may be written as YYYY-MM-DD, DD/MM/YYYY or D Month YYYY",
        )
    }

    /// Creates a registrar not found error response.
    pub fn registrar_not_found(name: &str) -> Self {
        Self::new("REGISTRAR_NOT_FOUND", format!("Registrar not found: {}", name))
    }

    /// Creates a block not found error response.
    pub fn block_not_found(name: &str) -> Self {
        Self::new("BLOCK_NOT_FOUND", format!("Block not found: {}", name))
    }
}

/// One row of the `/registrars` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrarSummary {
    /// The registrar's name.
    pub name: String,
    /// The resolved allowance.
    pub allowance: Allowance,
    /// Number of leave records on file, readable or not.
    pub leave_records: usize,
}

/// Response body for `/leave/on`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnLeaveResponse {
    /// The date asked about.
    pub date: NaiveDate,
    /// Registrars on leave that day, in file order.
    pub registrars: Vec<String>,
}

/// Response body for `/registrars/:name/blocks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrarBlocksResponse {
    /// The registrar's name.
    pub registrar: String,
    /// Placements in chronological order.
    pub blocks: Vec<BlockPlacement>,
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::DateParse { input, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::invalid_date(&input, &message),
            },
            EngineError::RegistrarNotFound { name } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::registrar_not_found(&name),
            },
            EngineError::BlockNotFound { name } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::block_not_found(&name),
            },
            EngineError::DataNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "DATA_ERROR",
                    "Data error",
                    format!("Data file not found: {}", path),
                ),
            },
            EngineError::DataParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "DATA_ERROR",
                    "Data parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidRotaEntry { index, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "DATA_ERROR",
                    "Invalid rota data",
                    format!("Rota entry {}: {}", index, message),
                ),
            },
        }
    }
}
