use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

/// Closed set of request-level failures, mapped to status codes at the
/// boundary. Server errors keep the internal cause for the logs; callers only
/// ever see a generic message.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(String),
    MissingToken,
    InvalidToken,
    Server(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::MissingToken => write!(f, "Missing authorization token"),
            ApiError::InvalidToken => write!(f, "Invalid token"),
            ApiError::Server(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken => StatusCode::BAD_REQUEST,
            ApiError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let msg = match self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) => msg.as_str(),
            ApiError::MissingToken => "access denied",
            ApiError::InvalidToken => "invalid token",
            ApiError::Server(_) => "something went wrong on the server, please try again later",
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "msg": msg }))
    }
}
