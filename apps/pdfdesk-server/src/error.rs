//! Error types for the pdfdesk server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pdfdesk_core::PdfDeskError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Please select at least {0} files for this tool")]
    TooFewFiles(usize),

    #[error("{0}")]
    Pdf(#[from] PdfDeskError),

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body, shaped exactly like the success body the upload form reads:
/// a `status` discriminator plus a human message.
#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::UnknownTool(_) | ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::InvalidRequest(_) | ServerError::TooFewFiles(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Pdf(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            status: "error",
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_the_error_class() {
        assert_eq!(
            ServerError::UnknownTool("x".into())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::TooFewFiles(2).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Pdf(PdfDeskError::ParseError("bad".into()))
                .into_response()
                .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
