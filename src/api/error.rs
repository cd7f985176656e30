use reqwest::StatusCode;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::wire::envelope::ErrorBody;

/// Everything a gateway call can fail with. Raw transport errors never
/// escape a gateway; they are folded into one of these four cases.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No usable response arrived: connection refused, timeout, or a body
    /// the client could not read. The transport detail is kept for logs.
    #[error("Network error")]
    Network { detail: String },
    /// The server rejected individual fields of the submitted payload.
    #[error("{message}")]
    Validation {
        message: String,
        errors: BTreeMap<String, String>,
    },
    /// Invalid or expired credentials. By the time a caller sees this the
    /// session has already been expired.
    #[error("{message}")]
    Authorization { message: String },
    /// A business rule said no; the message is shown as-is.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

impl ApiError {
    pub(crate) fn network(detail: impl Into<String>) -> Self {
        ApiError::Network {
            detail: detail.into(),
        }
    }

    /// Classify a non-2xx response.
    pub(crate) fn from_response(status: StatusCode, text: &str) -> Self {
        let body = ErrorBody::parse(text).unwrap_or_default();
        let message = body
            .message
            .clone()
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Authorization { message };
        }

        let errors = body.field_errors();
        if !errors.is_empty() {
            return ApiError::Validation { message, errors };
        }

        ApiError::Rejected {
            status: status.as_u16(),
            message,
        }
    }

    /// Field-keyed messages for inline form rendering, when present.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            ApiError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, ApiError::Authorization { .. })
    }
}
