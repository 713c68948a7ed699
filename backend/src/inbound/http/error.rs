//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn failures into the wire-level `{"errors": [...]}` envelope
//! with consistent status codes.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Wire-level error envelope: one or more failure entries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorBody>,
}

/// A single wire-level failure entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric HTTP status of the failure.
    #[schema(example = 404)]
    pub code: u16,
    /// Human-readable message.
    pub message: String,
    /// Supplementary description of the failing part.
    pub description: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the wire envelope, redacting infrastructure failures.
fn envelope(status: StatusCode, error: &Error) -> ErrorResponse {
    if matches!(
        error.code(),
        ErrorCode::InternalError | ErrorCode::ServiceUnavailable
    ) {
        // Log the raw failure; clients only see a generic entry.
        error!(code = ?error.code(), detail = %error, "request failed");
        let message = match error.code() {
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
            _ => "Internal server error",
        };
        return ErrorResponse {
            errors: vec![ErrorBody {
                code: status.as_u16(),
                message: message.to_owned(),
                description: "the request could not be completed".to_owned(),
            }],
        };
    }

    ErrorResponse {
        errors: error
            .entries()
            .iter()
            .map(|entry| ErrorBody {
                code: status.as_u16(),
                message: entry.message().to_owned(),
                description: entry.description().to_owned(),
            })
            .collect(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(envelope(status, self))
    }
}

/// Render malformed JSON payloads with the same envelope as validation
/// failures so 400 responses are uniform across the API.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        errors: vec![ErrorBody {
            code: StatusCode::BAD_REQUEST.as_u16(),
            message,
            description: "request body is not a valid catalogue item payload".to_owned(),
        }],
    });
    actix_web::error::InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for status mapping and redaction.
    use super::*;
    use crate::domain::ErrorEntry;
    use rstest::rstest;

    #[rstest]
    #[case::invalid(Error::invalid_request("bad", "field"), StatusCode::BAD_REQUEST)]
    #[case::missing(Error::not_found("gone", "no row"), StatusCode::NOT_FOUND)]
    #[case::unavailable(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case::internal(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn domain_codes_map_to_expected_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[rstest]
    fn validation_envelope_enumerates_every_entry() {
        let error = Error::with_entries(
            ErrorCode::InvalidRequest,
            vec![
                ErrorEntry::new("Name cannot be null or empty", "field 'name'"),
                ErrorEntry::new("Invalid category provided", "field 'category'"),
            ],
        );

        let body = envelope(StatusCode::BAD_REQUEST, &error);

        assert_eq!(body.errors.len(), 2);
        assert!(body.errors.iter().all(|entry| entry.code == 400));
        assert_eq!(body.errors[1].message, "Invalid category provided");
    }

    #[rstest]
    fn internal_failures_are_redacted() {
        let error = Error::internal("connection string leaked");

        let body = envelope(StatusCode::INTERNAL_SERVER_ERROR, &error);

        assert_eq!(body.errors.len(), 1);
        assert_eq!(body.errors[0].message, "Internal server error");
        assert!(!body.errors[0].message.contains("leaked"));
    }
}
